use clap::{Parser, Subcommand};
use docs_hooks::config::{self, HooksConfig};
use docs_hooks::files::FileSet;
use docs_hooks::hooks::{self, BuildContext};
use docs_hooks::render::CommandRenderer;
use docs_hooks::{output, yamlfmt};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docs-hooks")]
#[command(about = "Build hooks for the documentation site")]
#[command(long_about = "\
Build hooks for the documentation site

The site generator runs three hooks around its build:

  pre-build    render docs/<page> from <page>.tmpl and optional <page>.yaml
  files        drop non-website sources and template inputs from the output
  post-build   copy CNAME, install scripts, and cosign.pub into the site

Layout (paths relative to the directory holding hooks.toml):

  assets/website/
  ├── hooks.toml              # Optional; stock defaults otherwise
  ├── CNAME                   # → site/CNAME
  ├── docs/
  │   ├── install.md.tmpl     # Template → docs/install.md
  │   ├── install.md.yaml     # Template data (optional)
  │   └── hooks.py            # Non-website source, never published
  └── site/                   # Generated

Set RUST_LOG=debug for per-file detail.

Run 'docs-hooks gen-config' to print a documented hooks.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Hook configuration file; its directory anchors relative paths
    #[arg(long, default_value = "hooks.toml", global = true)]
    config: PathBuf,

    /// Documentation source directory (overrides docs_dir)
    #[arg(long, global = true)]
    docs_dir: Option<PathBuf>,

    /// Site output directory (overrides site_dir)
    #[arg(long, global = true)]
    site_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render templated pages
    PreBuild,
    /// List the files that would be published
    Files {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Copy auxiliary assets into the site directory
    PostBuild,
    /// Run pre-build, file filtering, publish, and post-build in order
    Build,
    /// Verify every configured input exists
    Check,
    /// Normalize YAML files in place
    FmtYaml {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print a stock hooks.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match &cli.command {
        Command::PreBuild => {
            let (config, ctx) = load(&cli)?;
            let renderer = CommandRenderer::from_config(&config.renderer, &ctx.config_dir);
            let report = hooks::pre_build(&ctx, &config, &renderer)?;
            output::print_expand_report(&report, &ctx.docs_dir);
        }
        Command::Files { json } => {
            let (config, ctx) = load(&cli)?;
            let files = hooks::on_files(FileSet::discover(&ctx.docs_dir)?, &config)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&files.src_uris())?);
            } else {
                output::print_file_list(&files);
            }
        }
        Command::PostBuild => {
            let (config, ctx) = load(&cli)?;
            let copied = hooks::post_build(&ctx, &config)?;
            output::print_assets(&copied, &ctx.config_dir, &ctx.site_dir);
        }
        Command::Build => {
            let (config, ctx) = load(&cli)?;
            let renderer = CommandRenderer::from_config(&config.renderer, &ctx.config_dir);
            println!("==> Building {} → {}", ctx.docs_dir.display(), ctx.site_dir.display());
            let report = hooks::build(&ctx, &config, &renderer)?;

            println!("==> Stage 1: Rendered templates");
            output::print_expand_report(&report.expanded, &ctx.docs_dir);
            println!("==> Stage 2: Published sources");
            output::print_file_list(&report.published);
            println!("==> Stage 3: Copied assets");
            output::print_assets(&report.assets, &ctx.config_dir, &ctx.site_dir);

            println!("==> Build complete: {}", ctx.site_dir.display());
        }
        Command::Check => {
            let (config, ctx) = load(&cli)?;
            println!("==> Checking {}", ctx.config_dir.display());
            let missing = hooks::check(&ctx, &config);
            if !missing.is_empty() {
                for line in output::format_check(&missing) {
                    eprintln!("{}", line);
                }
                return Err(format!("{} configured paths are missing", missing.len()).into());
            }
            println!("==> All configured paths exist");
        }
        Command::FmtYaml { files } => {
            let yaml = config::load_yaml_config(&cli.config);
            let results = yamlfmt::normalize_files(files, &yaml)?;
            for line in output::format_normalized(&results) {
                println!("{}", line);
            }
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Load the hook config and resolve the directories it names.
fn load(cli: &Cli) -> Result<(HooksConfig, BuildContext), config::ConfigError> {
    let config = config::load_config(&cli.config)?;
    let ctx = build_context(cli, &config);
    Ok((config, ctx))
}

/// Resolve directories from config, then apply CLI overrides.
fn build_context(cli: &Cli, config: &HooksConfig) -> BuildContext {
    let mut ctx = BuildContext::from_config(&cli.config, config);
    if let Some(docs_dir) = &cli.docs_dir {
        ctx = ctx.with_docs_dir(docs_dir.clone());
    }
    if let Some(site_dir) = &cli.site_dir {
        ctx = ctx.with_site_dir(site_dir.clone());
    }
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn gen_config_parses_without_other_flags() {
        let cli = Cli::try_parse_from(["docs-hooks", "gen-config"]).unwrap();
        assert!(matches!(cli.command, Command::GenConfig));
        assert_eq!(cli.config, PathBuf::from("hooks.toml"));
    }

    #[test]
    fn fmt_yaml_requires_files() {
        assert!(Cli::try_parse_from(["docs-hooks", "fmt-yaml"]).is_err());
        let cli = Cli::try_parse_from(["docs-hooks", "fmt-yaml", "a.yaml", "b.yaml"]).unwrap();
        assert!(matches!(cli.command, Command::FmtYaml { ref files } if files.len() == 2));
    }
}
