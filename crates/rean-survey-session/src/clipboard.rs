use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;

use crate::error::ClipboardError;

/// Destination of the share action. Writes never touch session state.
#[async_trait]
pub trait Clipboard: Send + Sync {
    fn name(&self) -> &'static str;

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes the copied text to a file, replacing its previous content.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Clipboard for FileClipboard {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

/// Keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}

/// Stand-in when no clipboard is configured; every write fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

#[async_trait]
impl Clipboard for UnavailableClipboard {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "no clipboard configured".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failure,
}

/// Transient, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: &'static str,
}

impl Notification {
    pub const LINK_COPIED: Self = Self {
        kind: NotificationKind::Success,
        message: "Link Copied!",
    };

    pub const COPY_FAILED: Self = Self {
        kind: NotificationKind::Failure,
        message: "Couldn't copy link",
    };

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}
