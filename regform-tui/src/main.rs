use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use regform_lib::LoggingRegistrationService;
use simplelog::{Config as LogConfig, WriteLogger};

use regform_tui::app::App;
use regform_tui::config::Config;
use regform_tui::error::AppError;
use regform_tui::paths;
use regform_tui::terminal::Terminal;

/// Start file logging. The terminal belongs to the form, so nothing goes to stdout.
fn init_logging(config: &Config) -> Result<PathBuf, AppError> {
    paths::rotate_logs();
    let path = match paths::log_file() {
        Some(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            path
        }
        None => PathBuf::from("regform.log"),
    };

    let log_file = File::create(&path)?;
    WriteLogger::init(config.log_level.into(), LogConfig::default(), log_file)?;
    Ok(path)
}

async fn run() -> Result<(), AppError> {
    let (config, config_error) = Config::load_or_default();
    let log_path = init_logging(&config)?;
    log::info!("logging to {}", log_path.display());
    if let Some(e) = config_error {
        log::warn!("using default config: {}", e);
    }

    let app = App::new(config.clone(), Arc::new(LoggingRegistrationService));
    let mut terminal = Terminal::new(config.theme)?;
    app.run(&mut terminal).await
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
