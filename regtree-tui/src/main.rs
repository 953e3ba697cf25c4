mod browser;
mod config;
mod error;
mod outline;
mod paths;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use tuiwin::{Input, Key, Terminal};

use crate::browser::{Browser, Flow};
use crate::config::BrowserConfig;
use crate::error::Error;

/// Browse an indented outline one level at a time
#[derive(Parser, Debug)]
#[command(name = "regtree-tui", author, version, about, long_about = None)]
struct Cli {
    /// Outline file: one entry per line, children indented two spaces or one tab
    outline: PathBuf,

    /// Most verbose level written to the log file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Log file path (defaults to the platform cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = BrowserConfig::new().log_level(cli.log_level);
    if let Some(path) = cli.log_file {
        config = config.log_file(path);
    }

    if let Err(e) = run(&config, &cli.outline) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(config: &BrowserConfig) -> Result<(), Error> {
    if let Some(dir) = config.log_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(&config.log_file)?;
    WriteLogger::init(config.log_level, Config::default(), file)?;
    Ok(())
}

fn run(config: &BrowserConfig, path: &Path) -> Result<(), Error> {
    init_logging(config)?;
    log::info!("regtree-tui starting on {}", path.display());

    let outline = outline::load(path)?;
    log::info!("loaded {} nodes", outline.tree.len());

    let mut terminal = Terminal::new()?;
    let mut browser = Browser::new(outline, terminal.area(), config)?;
    let mut redraw = true;

    loop {
        if browser.take_refresh() || redraw {
            terminal.present(&browser.windows())?;
            redraw = false;
        }

        match terminal.read_input()? {
            Input::Key {
                key: Key::Char('c'),
                modifiers,
            } if modifiers.ctrl => break,
            Input::Key { key, .. } => {
                if browser.handle(key)? == Flow::Quit {
                    break;
                }
            }
            Input::Resize { width, height } => {
                log::debug!("terminal resized to {}x{}", width, height);
                redraw = true;
            }
        }
    }

    drop(terminal);

    let tree = browser.close();
    let scope = tree.scope();
    if scope.allocations() > 0 {
        log::warn!(
            "{} allocations ({} bytes) still charged after teardown",
            scope.allocations(),
            scope.used()
        );
    } else {
        log::info!("clean teardown");
    }
    Ok(())
}
