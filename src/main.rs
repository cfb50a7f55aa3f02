use clap::{Parser, Subcommand};
use seo_pages::{catalog, config, enumerate, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seo-pages")]
#[command(about = "Programmatic SEO landing page generator")]
#[command(long_about = "\
Programmatic SEO landing page generator

Expands a dimension catalog into one static landing page per combination:

  scenario × recipient × style    (Family A)
  scenario × industry  × style    (Family B, skipped where a slug is taken)

Catalog format (dimensions.json):

  {
    \"scenarios\":  [{ \"id\": \"skip_work\", \"name\": \"Skip Work\",
                     \"name_zh\": \"翘班\", \"keywords\": [\"sick\", \"tired\"] }],
    \"recipients\": [{ \"id\": \"boss\", \"name\": \"Boss\" }],
    \"styles\":     [{ \"id\": \"sincere\", \"name\": \"Sincere\" }],
    \"industries\": [{ \"id\": \"tech\", \"name\": \"Tech Industry\" }]
  }

Output layout:

  public/
  ├── p/<slug>/index.html          # One page per surviving combination
  ├── sitemap-programmatic.xml     # Every page, monthly, priority 0.6
  ├── sitemap-main.xml             # Tool root, weekly, priority 1.0
  └── sitemap.xml                  # Index of the two above

Run 'seo-pages gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Dimension catalog (JSON)
    #[arg(long, default_value = "dimensions.json", global = true)]
    catalog: PathBuf,

    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Output directory (overrides output.public_dir)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate every page and the sitemaps (default)
    Build,
    /// Validate config and catalog and summarize the corpus without writing
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = config::load_config(&cli.config_dir)?;
            let output_dir = cli
                .output
                .unwrap_or_else(|| PathBuf::from(&site_config.output.public_dir));

            println!("==> Loading catalog {}", cli.catalog.display());
            let catalog = catalog::load_catalog(&cli.catalog)?;

            println!("==> Generating pages \u{2192} {}", output_dir.display());
            init_thread_pool(&site_config.processing);
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_generate_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let today = chrono::Utc::now().date_naive();
            let result = generate::generate(&catalog, &site_config, &output_dir, today, Some(tx));
            if printer.join().is_err() {
                eprintln!("progress printer panicked");
            }
            let report = result?;
            output::print_report(&report, &output_dir);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.config_dir)?;
            println!("==> Checking {}", cli.catalog.display());
            let catalog = catalog::load_catalog(&cli.catalog)?;
            let pages = enumerate::enumerate(&catalog);
            output::print_check_output(&catalog, &pages, &site_config);
            println!("==> Catalog is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. The user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
