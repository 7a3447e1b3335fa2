use clap::{Parser, Subcommand};
use site_content::audit::{self, AuditError};
use site_content::diagnostics::{InputError, RecordingWarnings, TracingWarnings};
use site_content::{classes, config, load, output, render, resolve};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "site-content")]
#[command(about = "Validate, resolve, and preview marketing-site content")]
#[command(long_about = "\
Validate, resolve, and preview marketing-site content

Content lives in one file per record, JSON or TOML:

  project/
  ├── site.toml                    # Site config (optional)
  ├── public/img/                  # Images, served from the base path
  └── src/
      ├── components/              # Scanned by check-images
      └── content/
          ├── pages/home.json      # Sections keyed by name
          ├── sections/about.toml  # Standalone sections
          ├── languages/it.json    # One record per language
          └── templates/landing.json

Sections are resolved per language and environment:
  environment overrides → environment filter → visibility → order
  → language override → CSS classes → background image

Run 'site-content gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Project root (contains site.toml)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate every content collection
    Check,
    /// Print a page resolved for one language and environment, as JSON
    Resolve {
        /// Page slug (file stem under pages/)
        #[arg(long)]
        page: String,
        /// Language code (defaults to default_language)
        #[arg(long)]
        lang: Option<String>,
        /// Environment (defaults to the configured environment)
        #[arg(long)]
        env: Option<String>,
    },
    /// Render every page in every language to the output directory
    Build,
    /// Print the language directory
    Languages,
    /// Check that image references in sources exist under the public dir
    CheckImages {
        /// Exit with an error when references are missing
        #[arg(long)]
        strict: bool,
    },
    /// Print the CSS class safelist, one class per line
    Safelist,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Check => {
            let config = config::load_config(&cli.root)?;
            let content_dir = config.content_path(&cli.root);
            println!("==> Checking {}", content_dir.display());
            let warnings = RecordingWarnings::new();
            let content = load::load(&content_dir, &warnings)?;
            // reports the fallback when the languages collection is missing
            resolve::available_languages(content.languages.as_deref(), &warnings);
            output::print_check_output(&content, &warnings.messages());
            println!("==> Content is valid");
        }
        Command::Resolve { page, lang, env } => {
            let config = config::load_config(&cli.root)?;
            let content = load::load(&config.content_path(&cli.root), &TracingWarnings)?;
            let record = content
                .page(&page)
                .ok_or_else(|| InputError::MissingEntry(format!("page `{page}`")))?;
            let environment = match env {
                Some(env) => env,
                None => config.environment.clone(),
            };
            let options = resolve::ResolveOptions {
                language: lang.unwrap_or_else(|| config.default_language.clone()),
                environment,
                base_path: config.base.clone(),
            };
            let resolved = resolve::resolve_page(record, &options, &TracingWarnings);
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        Command::Build => {
            let config = config::load_config(&cli.root)?;
            let content = load::load(&config.content_path(&cli.root), &TracingWarnings)?;
            let output_dir = config.output_path(&cli.root);
            println!("==> Rendering {} environment → {}", config.environment, output_dir.display());
            let rendered = render::write_site(&content, &config, &output_dir, &TracingWarnings)?;
            output::print_build_output(&rendered, &output_dir);
            println!("==> Build complete: {}", output_dir.display());
        }
        Command::Languages => {
            let config = config::load_config(&cli.root)?;
            let content = load::load(&config.content_path(&cli.root), &TracingWarnings)?;
            let languages = resolve::available_languages(content.languages.as_deref(), &TracingWarnings);
            output::print_languages(&languages);
        }
        Command::CheckImages { strict } => {
            let config = config::load_config(&cli.root)?;
            println!("==> Checking image paths in {}", config.src_dir);
            let report = audit::audit(
                &config.src_path(&cli.root),
                &config.public_path(&cli.root),
                &config.audit.extensions,
            )?;
            output::print_audit_report(&report, &config.public_dir);
            if strict && !report.is_clean() {
                return Err(AuditError::Failed(report.issues.len()).into());
            }
        }
        Command::Safelist => {
            for class in classes::safelist() {
                println!("{class}");
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
