use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use rollingtui::cli::{Command, Flags};
use rollingtui::controllers::{Exit, Outcome};
use rollingtui::models::config::log_file_path;
use rollingtui::{show_post, start_app, HttpClient, PageController};

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file at {:?}", path))
}

// stdout belongs to the TUI, so logs go to a file
fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = open_log_file(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .try_init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    //Get Flags
    let flags = Flags::from_args();

    // A read-only cache dir is no reason to refuse to start
    if let Err(e) = init_logging() {
        eprintln!("rollingtui: logging disabled: {:#}", e);
    }

    let mut config = flags.load_config().context("Failed to load config")?;
    flags.apply(&mut config);
    if flags.save_config {
        flags.store_config(&config).context("Failed to save config")?;
    }

    let api = HttpClient::new(&config.api_base_url, config.request_timeout())
        .context("Failed to build HTTP client")?;
    log::info!("opening post {} against {}", flags.post_id, api.base_url());

    let command = flags.command();
    let controller = PageController::new(
        flags.post_id,
        Arc::new(api),
        Box::new(command.clipboard()),
        &config,
    );

    match command {
        Command::View => {
            match start_app(controller, config.notification_ttl()).await? {
                Exit::Home => println!("post {} deleted", flags.post_id),
                Exit::Quit => {}
            }
        }
        Command::Show => {
            for line in show_post(&controller).await {
                println!("{}", line);
            }
        }
        Command::Link => {
            // Printed first: the copy below blocks until the address is pasted
            println!("{}", controller.address());
            let outcome = controller.copy_to_clipboard();
            if let Some(note) = controller.notifications().all().last() {
                println!("{}", note.text);
            }
            if outcome == Outcome::Failed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
