use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use thumbcard::config::{self, AppConfig, Hinting};
use thumbcard::format;
use thumbcard::imaging::{Quality, ResizeOptions, RustBackend, resize_image};
use thumbcard::output::{self, Classification};
use thumbcard::render::render_text_image;
use thumbcard::storage::OutputDir;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    if env!("BUILD_ON_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("BUILD_GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "thumbcard")]
#[command(about = "Resize images to square JPEGs and render text cards")]
#[command(long_about = "\
Resize images to square JPEGs and render text cards

All output goes to <root>/.images/:

  <root>/
  ├── thumbcard.toml     # Optional config (see 'thumbcard gen-config')
  └── .images/
      ├── dawn.jpg       # 'thumbcard resize dawn.png'
      └── out.jpeg       # 'thumbcard render Caption notes.txt' (overwritten)

Resize accepts JPEG and PNG by content; anything else is skipped without error.")]
#[command(version = version_string())]
struct Cli {
    /// Storage root; output goes to <root>/.images
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Flags overriding the `[render]` table.
#[derive(clap::Args)]
struct RenderArgs {
    /// Screen resolution in dots per inch
    #[arg(long)]
    dpi: Option<f64>,
    /// TrueType font file (default: bundled DejaVu Sans)
    #[arg(long)]
    fontfile: Option<PathBuf>,
    /// Glyph hinting
    #[arg(long, value_enum)]
    hinting: Option<Hinting>,
    /// Font size in points
    #[arg(long)]
    size: Option<f64>,
    /// Line spacing (e.g. 2 means double spaced)
    #[arg(long)]
    spacing: Option<f64>,
    /// White text on a black background
    #[arg(long)]
    whiteonblack: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resize a JPEG/PNG to a square JPEG in <root>/.images
    Resize {
        /// Image to resize
        path: PathBuf,
        /// Output edge length in pixels
        #[arg(long)]
        size: Option<u32>,
        /// JPEG quality (1-100)
        #[arg(long)]
        quality: Option<u32>,
    },
    /// Render a caption and the first lines of a text file to <root>/.images/out.jpeg
    Render {
        /// Caption drawn centered at the top
        caption: String,
        /// Text file whose first 12 lines are drawn below the caption
        text_file: PathBuf,
        #[command(flatten)]
        args: RenderArgs,
    },
    /// Show how paths are classified by name and by content
    Classify {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print a stock thumbcard.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Resize {
            path,
            size,
            quality,
        } => {
            let mut app = config::load_config(&cli.root)?;
            if let Some(size) = size {
                app.resize.size = size;
            }
            if let Some(quality) = quality {
                app.resize.quality = quality;
            }
            app.validate()?;

            let options = ResizeOptions {
                size: app.resize.size,
                quality: Quality::new(app.resize.quality),
            };
            let outcome =
                resize_image(&RustBackend::new(), &path, &OutputDir::new(&cli.root), options)?;
            output::print_resize_outcome(&path, &outcome);
        }
        Command::Render {
            caption,
            text_file,
            args,
        } => {
            let mut app = config::load_config(&cli.root)?;
            apply_render_args(&mut app, args);
            app.validate()?;

            let report =
                render_text_image(&app.render, &caption, &text_file, &OutputDir::new(&cli.root))?;
            output::print_render_report(&caption, &report);
        }
        Command::Classify { paths } => {
            for path in &paths {
                output::print_classification(path, &classify(path));
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "thumbcard=debug",
        _ => "thumbcard=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn apply_render_args(app: &mut AppConfig, args: RenderArgs) {
    let render = &mut app.render;
    if let Some(dpi) = args.dpi {
        render.dpi = dpi;
    }
    if let Some(fontfile) = args.fontfile {
        render.font_path = Some(fontfile);
    }
    if let Some(hinting) = args.hinting {
        render.hinting = hinting;
    }
    if let Some(size) = args.size {
        render.size = size;
    }
    if let Some(spacing) = args.spacing {
        render.spacing = spacing;
    }
    if args.whiteonblack {
        render.white_on_black = true;
    }
}

fn classify(path: &Path) -> Classification {
    let name = path.to_string_lossy();
    Classification {
        extension: format::file_extend(&name).to_string(),
        is_image: format::is_image(&name),
        signature: format::detect_file(path).ok(),
    }
}
