use chrono::Datelike;
use clap::{Parser, Subcommand};
use shutterpage::font::ExternalSubsetter;
use shutterpage::imaging::RustBackend;
use shutterpage::site::{self, SitePaths};
use shutterpage::{clear, config, logging, output};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "shutterpage")]
#[command(about = "Static photo-gallery generator: album folders in, gallery pages out")]
#[command(long_about = "\
Static photo-gallery generator: album folders in, gallery pages out

Each directory under the photos root is an album. Images are resized into
thumbnails and large renditions, every album gets its own page, and the
site font is subset to the text the pages actually use.

Input structure:

  photos/
  ├── 汕头/                     # Album (CJK names get a pinyin id: shan-tou)
  │   ├── meta.json             # id, title, author, cover, description (created if missing)
  │   ├── content.md            # Markdown shown on the album page (created if missing)
  │   ├── harbour.jpg
  │   └── market.jpg
  └── Harbour/
      └── ...

Output structure:

  web/
  ├── index.html                # Redirects to the first album
  ├── shan-tou.html             # One page per album
  ├── config/nav.json           # Navigation manifest (accumulates across runs)
  ├── data/shan-tou.json        # Album data for the client gallery
  ├── images/shan-tou/          # thumb_<name>.jpg, large_<name>.jpg
  └── fonts/                    # Subset font

Existing thumbnails and large images are never regenerated; run 'clear' to
start over.

Run 'shutterpage gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Photos root, overrides `photos_root` from the config
    #[arg(long, global = true)]
    photos: Option<PathBuf>,

    /// Web root, overrides `web_root` from the config
    #[arg(long, global = true)]
    web: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline (default)
    Build,
    /// Create missing meta.json / content.md files only
    Init,
    /// Remove generated pages and the config/, data/, fonts/, images/ directories
    Clear,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    run(&cli).inspect_err(|e| error!("{e}"))
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.as_ref().unwrap_or(&Command::Build) {
        Command::Build => {
            let (site_config, paths) = load(cli)?;
            let subsetter = ExternalSubsetter::new(
                &site_config.font_subset.tool,
                site_config.font_subset.hinting,
            );
            let year = chrono::Local::now().year();
            let report = site::build(&paths, &site_config, &RustBackend::new(), &subsetter, year)?;
            output::print_build_output(&report, &paths.web_root);
        }
        Command::Init => {
            let (site_config, paths) = load(cli)?;
            let report = site::init(&paths, &site_config)?;
            output::print_init_output(&report);
        }
        Command::Clear => {
            let (_, paths) = load(cli)?;
            let removed = clear::clear(&paths)?;
            output::print_clear_output(&removed, &paths.web_root);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config and apply the `--photos` / `--web` overrides.
fn load(cli: &Cli) -> Result<(config::SiteConfig, SitePaths), config::ConfigError> {
    let site_config = config::load_config(&cli.config)?;
    let mut paths = SitePaths::from_config(&site_config);
    if let Some(photos) = &cli.photos {
        paths.photos_root = photos.clone();
    }
    if let Some(web) = &cli.web {
        paths.web_root = web.clone();
    }
    Ok((site_config, paths))
}
