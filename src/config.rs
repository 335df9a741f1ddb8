//! Client configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable that overrides the configured server URL.
pub const SERVER_URL_ENV: &str = "STRICTLY_CHESS_SERVER_URL";

/// Terminal color names usable in the `[theme]` table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ThemeColor {
    /// Black.
    Black,
    /// Dark red.
    Red,
    /// Dark green.
    Green,
    /// Dark yellow / brown.
    Yellow,
    /// Dark blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// Light gray.
    Gray,
    /// Dark gray.
    DarkGray,
    /// Bright yellow.
    LightYellow,
    /// Bright green.
    LightGreen,
    /// Bright blue.
    LightBlue,
    /// White.
    White,
}

/// Board colors.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Theme {
    /// Background of light squares.
    #[serde(default = "default_light_square")]
    light_square: ThemeColor,

    /// Background of dark squares.
    #[serde(default = "default_dark_square")]
    dark_square: ThemeColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            light_square: default_light_square(),
            dark_square: default_dark_square(),
        }
    }
}

fn default_light_square() -> ThemeColor {
    ThemeColor::LightYellow
}

fn default_dark_square() -> ThemeColor {
    ThemeColor::Green
}

/// Configuration for the terminal client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// WebSocket URL of the game authority.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// File that receives log output while the UI owns the terminal.
    #[serde(default = "default_log_file")]
    log_file: String,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Capture mouse events for drag and drop.
    #[serde(default = "default_mouse")]
    mouse: bool,

    /// Board colors.
    #[serde(default)]
    theme: Theme,
}

fn default_server_url() -> String {
    "ws://127.0.0.1:3000/ws".to_string()
}

fn default_log_file() -> String {
    "strictly_chess.log".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_mouse() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            log_file: default_log_file(),
            log_filter: default_log_filter(),
            mouse: default_mouse(),
            theme: Theme::default(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// A file that exists but does not parse is still an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies the server URL from the environment and then the command line.
    ///
    /// The command line wins over the environment, which wins over the file.
    #[instrument(skip(self))]
    pub fn with_overrides(self, env_url: Option<String>, cli_url: Option<String>) -> Self {
        match cli_url.or(env_url) {
            Some(url) => {
                debug!(server_url = %url, "Server URL overridden");
                self.with_server_url(url)
            }
            None => self,
        }
    }

    /// Replaces the server URL.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Enables or disables mouse capture.
    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn theme_color_names_round_trip_through_strum() {
        for color in ThemeColor::iter() {
            assert_eq!(ThemeColor::from_str(&color.to_string()), Ok(color));
        }
        assert_eq!(ThemeColor::DarkGray.to_string(), "dark_gray");
    }
}
