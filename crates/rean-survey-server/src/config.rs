use std::path::PathBuf;

use rean_survey_session::{ClipboardConfig, Location};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5173/psychology/rean-survey/";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeMode {
    Stdio,
    Console,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub mode: ServeMode,
    pub base_url: String,
    /// Raw bootstrap input: a bare token or a full link with `#token`.
    pub bootstrap: Option<String>,
    pub clipboard: ClipboardConfig,
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            mode: ServeMode::Stdio,
            base_url: DEFAULT_BASE_URL.to_string(),
            bootstrap: None,
            clipboard: ClipboardConfig::Unavailable,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads `REAN_SURVEYD_MODE`, `REAN_SURVEY_BASE_URL`,
    /// `REAN_SURVEY_FRAGMENT`, `REAN_SURVEY_CLIPBOARD_FILE` and
    /// `REAN_SURVEY_LOG`. Unknown modes are reported as an error message.
    pub fn from_env() -> Result<Self, String> {
        let mode = match env_trimmed("REAN_SURVEYD_MODE") {
            None => ServeMode::Stdio,
            Some(v) => parse_mode(&v)
                .ok_or_else(|| format!("REAN_SURVEYD_MODE must be stdio or console, got {v:?}"))?,
        };
        let base_url = env_trimmed("REAN_SURVEY_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let clipboard = env_trimmed("REAN_SURVEY_CLIPBOARD_FILE")
            .map_or(ClipboardConfig::Unavailable, |path| {
                ClipboardConfig::File(PathBuf::from(path))
            });
        let log_filter =
            env_trimmed("REAN_SURVEY_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            mode,
            base_url,
            bootstrap: env_trimmed("REAN_SURVEY_FRAGMENT"),
            clipboard,
            log_filter,
        })
    }

    /// Location the session bootstraps from. The configured base is kept;
    /// only the fragment of a full link is used.
    pub fn bootstrap_location(&self) -> Location {
        let location = Location::new(self.base_url.clone());
        match self.bootstrap.as_deref() {
            Some(raw) => {
                let fragment = raw.split_once('#').map_or(raw, |(_, fragment)| fragment);
                location.with_fragment(fragment)
            }
            None => location,
        }
    }
}

pub fn parse_mode(value: &str) -> Option<ServeMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "stdio" | "jsonrpc" => Some(ServeMode::Stdio),
        "console" | "tty" | "text" => Some(ServeMode::Console),
        _ => None,
    }
}

fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
