// ABOUTME: Application configuration and the declared-session model
// Loads ~/.config/muxdeck/config.toml, writing an example file on first run

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

const APP_DIR: &str = "muxdeck";
const CONFIG_FILE: &str = "config.toml";
const EXAMPLE_FILE: &str = "config_example.toml";

pub const EXAMPLE_CONFIG: &str = r#"# Copy to config.toml and adjust.
# tmux_program = "tmux"
# status_message_secs = 2

[[sessions]]
name = "My Awesome Project"
directory = "~/projects/my-awesome-project"

[[sessions.windows]]
name = "Code"
layout = "vertical"

[[sessions.windows.panes]]
command = "nvim"

[[sessions.windows.panes]]
command = "git status"

[[sessions.windows]]
name = "Server"

[[sessions.windows.panes]]
command = "npm run dev"

[[sessions]]
name = "Another Project"
directory = "~/projects/another-project"

[[sessions.windows]]
name = "Editor"

[[sessions.windows.panes]]
command = "vim"
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the home directory")]
    NoHomeDir,

    #[error("Could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Binary used for every backend call.
    pub tmux_program: String,
    /// Lifetime of transient status messages.
    pub status_message_secs: u64,
    pub sessions: Vec<DeclaredSession>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tmux_program: "tmux".to_string(),
            status_message_secs: 2,
            sessions: Vec::new(),
        }
    }
}

/// A session as written in the config file. Read-only to the core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeclaredSession {
    pub name: String,
    pub directory: String,
    pub windows: Vec<DeclaredWindow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeclaredWindow {
    pub name: String,
    pub directory: Option<String>,
    pub layout: Layout,
    pub panes: Vec<DeclaredPane>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeclaredPane {
    pub command: String,
    pub directory: Option<String>,
}

/// Split direction for a window's extra panes. Unknown values mean horizontal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Layout {
    #[default]
    Horizontal,
    Vertical,
}

impl From<String> for Layout {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("vertical") {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }
}

impl Layout {
    pub fn split_flag(self) -> &'static str {
        match self {
            Self::Horizontal => "-h",
            Self::Vertical => "-v",
        }
    }
}

impl DeclaredWindow {
    /// The window's own directory if set, otherwise `session_dir`.
    pub fn resolved_directory(&self, session_dir: &str) -> String {
        resolve_override(self.directory.as_deref(), session_dir)
    }
}

impl DeclaredPane {
    pub fn resolved_directory(&self, window_dir: &str) -> String {
        resolve_override(self.directory.as_deref(), window_dir)
    }
}

fn resolve_override(directory: Option<&str>, inherited: &str) -> String {
    match directory.filter(|d| !d.trim().is_empty()) {
        Some(dir) => expand_home(dir),
        None => inherited.to_string(),
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(directory: &str) -> String {
    let rest = match directory.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return directory.to_string(),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home.to_string_lossy().into_owned(),
        Some(home) => home.join(rest).to_string_lossy().into_owned(),
        None => directory.to_string(),
    }
}

impl AppConfig {
    /// `~/.config/muxdeck`, also home of the log directory.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(".config").join(APP_DIR))
            .ok_or(ConfigError::NoHomeDir)
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Read `path`. A missing file yields the default config after writing
    /// an example file next to it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {}, starting without declared sessions", path.display());
            if let Some(dir) = path.parent() {
                write_example(dir)?;
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "Loaded {} declared sessions from {}",
            config.sessions.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn find_session(&self, name: &str) -> Option<&DeclaredSession> {
        self.sessions.iter().find(|s| s.name == name)
    }
}

fn write_example(dir: &Path) -> Result<(), ConfigError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ConfigError::Io { path, source }
    };

    fs::create_dir_all(dir).map_err(io_err(dir))?;
    let example = dir.join(EXAMPLE_FILE);
    if example.exists() {
        return Ok(());
    }
    fs::write(&example, EXAMPLE_CONFIG).map_err(io_err(&example))?;
    debug!("Wrote example config to {}", example.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config = AppConfig::from_toml_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.tmux_program, "tmux");
        assert_eq!(config.sessions.len(), 2);

        let first = &config.sessions[0];
        assert_eq!(first.name, "My Awesome Project");
        assert_eq!(first.windows.len(), 2);
        assert_eq!(first.windows[0].layout, Layout::Vertical);
        assert_eq!(first.windows[0].panes.len(), 2);
        assert_eq!(first.windows[1].layout, Layout::Horizontal);
    }

    #[test]
    fn test_unknown_layout_falls_back_to_horizontal() {
        let config = AppConfig::from_toml_str(
            r#"
            [[sessions]]
            name = "x"
            [[sessions.windows]]
            name = "w"
            layout = "diagonal"
            "#,
        )
        .unwrap();
        assert_eq!(config.sessions[0].windows[0].layout, Layout::Horizontal);
        assert_eq!(Layout::Vertical.split_flag(), "-v");
    }

    #[test]
    fn test_directory_precedence() {
        let window = DeclaredWindow {
            name: "w".to_string(),
            directory: Some("/win".to_string()),
            ..Default::default()
        };
        let pane = DeclaredPane {
            command: "ls".to_string(),
            directory: None,
        };
        let window_dir = window.resolved_directory("/session");
        assert_eq!(window_dir, "/win");
        assert_eq!(pane.resolved_directory(&window_dir), "/win");

        let bare = DeclaredWindow::default();
        assert_eq!(bare.resolved_directory("/session"), "/session");
    }

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(
            expand_home("~/code"),
            home.join("code").to_string_lossy()
        );
        assert_eq!(expand_home("~"), home.to_string_lossy());
        assert_eq!(expand_home("/abs/~x"), "/abs/~x");
        assert_eq!(expand_home("~other/x"), "~other/x");
    }
}
