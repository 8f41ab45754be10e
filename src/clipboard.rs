#[cfg(all(unix, not(any(target_os = "macos", target_os = "android"))))]
use arboard::SetExtLinux;

use crate::error::RollingError;

pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> Result<(), RollingError>;
}

/// The desktop clipboard. A fresh handle is opened per write so it never has
/// to cross threads.
///
/// On X11 and Wayland the copied text only lives as long as some process
/// serves it. Inside the TUI that is this process (or a clipboard manager once
/// the handle drops). A one-shot command exits right after copying, so it uses
/// [`SystemClipboard::holding`], which blocks until another program takes the
/// selection over.
#[derive(Default)]
pub struct SystemClipboard {
    hold: bool,
}

impl SystemClipboard {
    pub fn holding() -> Self {
        SystemClipboard { hold: true }
    }

    pub fn holds_selection(&self) -> bool {
        self.hold
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), RollingError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| RollingError::Clipboard(e.to_string()))?;

        #[cfg(all(unix, not(any(target_os = "macos", target_os = "android"))))]
        if self.hold {
            log::debug!("holding the selection until it is pasted elsewhere");
            return clipboard
                .set()
                .wait()
                .text(text)
                .map_err(|e| RollingError::Clipboard(e.to_string()));
        }

        clipboard
            .set_text(text)
            .map_err(|e| RollingError::Clipboard(e.to_string()))
    }
}
