use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::clipboard::SystemClipboard;
use crate::error::RollingError;
use crate::models::{Config, PostId};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum Command {
    /// Interactive post view
    #[default]
    View,
    /// Print the post and its messages
    Show,
    /// Copy the post's address to the clipboard
    Link,
}

impl Command {
    /// `link` exits right after copying, so its clipboard must hold the
    /// selection until something else pastes it.
    pub fn clipboard(self) -> SystemClipboard {
        match self {
            Command::Link => SystemClipboard::holding(),
            Command::View | Command::Show => SystemClipboard::default(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = concat!(env!("CARGO_CRATE_NAME"), " - rolling paper post viewer"))]
pub struct Flags {
    /// Id of the post (recipient) to open
    pub post_id: PostId,

    #[arg(value_enum)]
    pub command: Option<Command>,

    /// Backend base URL, overrides the config file
    #[arg(long)]
    pub api_url: Option<String>,

    /// Web front-end base URL used for links, overrides the config file
    #[arg(long)]
    pub web_url: Option<String>,

    /// Config file to read instead of ~/.config/rollingtui/config.json
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective config, overrides included, back to the config file
    #[arg(long)]
    pub save_config: bool,
}

impl Flags {
    /// Parse from `std::env::args_os()`, exit on error.
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }

    /// Reads the config file named by `--config`, or the default one.
    pub fn load_config(&self) -> Result<Config, RollingError> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Persists `config` to the same file it was loaded from.
    pub fn store_config(&self, config: &Config) -> Result<(), RollingError> {
        match &self.config {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
    }

    /// Command-line values win over the config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(url) = &self.web_url {
            config.web_base_url = url.clone();
        }
    }
}
