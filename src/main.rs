use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::KeyEventKind;
use pcmonitor::app::App;
use pcmonitor::config::{self, load_config, load_config_from_path};
use pcmonitor::event::{Event, EventHandler};
use pcmonitor::format::{ReportFormat, render_report};
use pcmonitor::logging;
use pcmonitor::metrics::Collector;
use pcmonitor::ui;

#[derive(Parser)]
#[command(
    name = "pcmonitor",
    about = "Terminal monitor for per-thread CPU, memory and root disk usage"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Collect a single snapshot, print it and exit.
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Output format for --once.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Start with per-thread bars in vertical orientation.
    #[arg(long, default_value_t = false)]
    vertical: bool,

    /// Bar coloring: single, multi
    #[arg(long)]
    color_mode: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init(
        &config.logging,
        logging::resolve_target(&config.logging, cli.once),
    )?;

    if cli.once {
        return run_once(cli.format);
    }

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, config).await;
    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let mut app = App::new(config);
    let mut events = EventHandler::new(Collector::default())?;

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = app.map_key(key);
                app.dispatch(action);
            }
            Event::Sample(snapshot, error) => app.apply_sample(*snapshot, error),
            Event::Resize => {}
        }
        terminal.draw(|frame| ui::draw(frame, &app))?;
    }

    Ok(())
}

fn run_once(format: ReportFormat) -> Result<()> {
    let mut collector = Collector::default();
    let (snapshot, error) = collector.collect_snapshot();
    // A probe failure still produces a report; it is not an exit error.
    println!("{}", render_report(&snapshot, error.as_ref(), format)?.trim_end());
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if cli.vertical {
        config.general.vertical_mode = true;
    }
    if let Some(ref mode) = cli.color_mode {
        config.bars.color_mode = mode.clone();
    }
    if let Some(ref support) = cli.color {
        config.general.color_support = support.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.logging.file = Some(path.clone());
    }

    config
}
