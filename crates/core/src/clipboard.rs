use crate::error::{Result, ResumoError};

/// Destination for the "copy full report" action.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The operating system clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| ResumoError::ClipboardFailed {
            reason: e.to_string(),
        })?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text)
            .map_err(|e| ResumoError::ClipboardFailed {
                reason: e.to_string(),
            })
    }
}

/// Keeps the last copied text in memory. Frontends that own their own
/// clipboard integration read it back with [`MemoryClipboard::take`].
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn take(&mut self) -> Option<String> {
        self.contents.take()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
