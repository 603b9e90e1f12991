use std::path::PathBuf;
use std::sync::Arc;

use crate::clipboard::{Clipboard, FileClipboard, MemoryClipboard, UnavailableClipboard};

#[derive(Debug, Clone)]
pub enum ClipboardConfig {
    File(PathBuf),
    Memory,
    Unavailable,
}

pub fn build_clipboard(cfg: ClipboardConfig) -> Arc<dyn Clipboard> {
    match cfg {
        ClipboardConfig::File(path) => Arc::new(FileClipboard::new(path)),
        ClipboardConfig::Memory => Arc::new(MemoryClipboard::default()),
        ClipboardConfig::Unavailable => Arc::new(UnavailableClipboard),
    }
}
