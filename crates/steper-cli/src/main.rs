use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steper_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "steper")]
#[command(author, version, about = "Drag and step carousel animations in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal carousel
    Demo {
        /// Number of slides (overrides ui.slide_count)
        #[arg(short = 'n', long)]
        slides: Option<usize>,
        /// Seconds per step slide (overrides slider.duration_secs)
        #[arg(short = 'd', long)]
        duration: Option<f64>,
    },
    /// Run a headless drag/slide simulation and print every frame
    Trace {
        /// Relative steps to slide, e.g. `--steps 1,1,-1`
        #[arg(short = 's', long, value_delimiter = ',', allow_hyphen_values = true)]
        steps: Vec<isize>,
        /// Drag by this many pixels before sliding
        #[arg(long, allow_hyphen_values = true)]
        drag: Option<f64>,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// Initialize logging; the demo logs to a file so the alternate screen stays clean
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;

    let is_demo = matches!(cli.command, Some(Commands::Demo { .. }) | None);
    init_logging(&config, is_demo)?;

    // Handle commands
    match cli.command {
        Some(Commands::Demo { slides, duration }) => {
            if let Some(slides) = slides {
                config.ui.slide_count = slides;
            }
            if let Some(duration) = duration {
                config.slider.duration_secs = duration;
            }
            config.validate()?;
            commands::demo::run(Arc::new(config))
        }
        None => commands::demo::run(Arc::new(config)),
        Some(Commands::Trace {
            steps,
            drag,
            fps,
            json,
        }) => commands::trace::run(&config, &steps, drag, fps, json),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init { force } => commands::config::init(force),
            ConfigAction::Show => commands::config::show(&config),
        },
    }
}
