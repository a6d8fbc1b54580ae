//! # Configuration
//!
//! Menu layouts can be described in TOML instead of code, with a clear
//! override hierarchy for where the file lives:
//! default path → `MENU_BACKEND_CONFIG` env var → CLI flag.
//!
//! The default path is `~/.menu_backend/menu.toml`. If it is missing on
//! first run, a small sample menu is written there so users can see the
//! format.
//!
//! Links are applied in file order, which matters: an item inherits its
//! anchor's `back` at the moment it is linked.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::backend::{MenuBackend, ROOT_NAME};
use crate::core::item::MenuItem;

// ============================================================================
// Config Structs (sparse TOML: everything but names is optional)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Item selected once the menu is built. Defaults to the root.
    pub start: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemEntry {
    pub name: String,
    pub shortkey: Option<char>,
    pub level: Option<u8>,
    pub value: Option<i32>,
    /// Fire item-changed events when the value changes.
    pub notify: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkEntry {
    pub from: String,
    pub to: String,
    pub direction: LinkDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    Before,
    After,
    Left,
    Right,
    Exit,
}

pub const CONFIG_ENV_VAR: &str = "MENU_BACKEND_CONFIG";

const SAMPLE_MENU: &str = r#"# menu_backend layout
# Items are linked in the order the [[links]] appear.
# The root item is always called "MenuRoot".

[general]
start = "File"

[[items]]
name = "File"
shortkey = "F"
level = 1

[[items]]
name = "New"
shortkey = "N"
level = 2

[[items]]
name = "Open"
shortkey = "O"
level = 2

[[items]]
name = "Edit"
shortkey = "E"
level = 1

[[items]]
name = "Brightness"
shortkey = "B"
level = 2
value = 5
notify = true

[[links]]
from = "MenuRoot"
to = "File"
direction = "after"

[[links]]
from = "File"
to = "Edit"
direction = "after"

[[links]]
from = "File"
to = "New"
direction = "right"

[[links]]
from = "New"
to = "Open"
direction = "after"

[[links]]
from = "Edit"
to = "Brightness"
direction = "right"

[[links]]
from = "New"
to = "File"
direction = "exit"

[[links]]
from = "Open"
to = "File"
direction = "exit"

[[links]]
from = "Brightness"
to = "Edit"
direction = "exit"
"#;

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// A link or the start item names an item that was never declared.
    UnknownItem(String),
    /// Two items (or an item and the root) share a name.
    DuplicateItem(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::UnknownItem(name) => write!(f, "unknown menu item: {name}"),
            ConfigError::DuplicateItem(name) => write!(f, "duplicate menu item: {name}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.menu_backend/menu.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".menu_backend").join("menu.toml"))
}

/// Picks the layout file: CLI → env → default path.
pub fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .or_else(config_path)
}

/// Parses a layout from TOML text.
pub fn parse_config(contents: &str) -> Result<MenuConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Load a layout from `path`.
///
/// If the file doesn't exist, writes the sample menu there and returns it.
/// If it exists but is malformed, returns `ConfigError::Parse`.
pub fn load_config(path: &Path) -> Result<MenuConfig, ConfigError> {
    if !path.exists() {
        info!("No menu file found, generating sample at {}", path.display());
        generate_sample_config(path);
        return parse_config(SAMPLE_MENU);
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded menu from {}", path.display());
    debug!("Menu config: {:?}", config);
    Ok(config)
}

/// The built-in sample layout.
pub fn sample_config() -> Result<MenuConfig, ConfigError> {
    parse_config(SAMPLE_MENU)
}

fn generate_sample_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create menu directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, SAMPLE_MENU) {
        warn!("Failed to write sample menu: {}", e);
    }
}

// ============================================================================
// Building
// ============================================================================

/// Builds a backend from a layout.
///
/// No hooks are installed; the caller adds them afterwards. The start item
/// is selected before returning.
pub fn build_backend(config: &MenuConfig) -> Result<MenuBackend, ConfigError> {
    let mut backend = MenuBackend::new();

    let mut seen: HashSet<&str> = HashSet::from([ROOT_NAME]);
    for entry in &config.items {
        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::DuplicateItem(entry.name.clone()));
        }
        let mut item = MenuItem::new(entry.name.clone())
            .with_level(entry.level.unwrap_or(0))
            .with_value(entry.value.unwrap_or(0));
        if let Some(key) = entry.shortkey {
            item = item.with_shortkey(key);
        }
        if entry.notify.unwrap_or(false) {
            backend.insert_registered(item);
        } else {
            backend.insert(item);
        }
    }

    for link in &config.links {
        let lookup = |name: &str| {
            backend
                .find(name)
                .ok_or_else(|| ConfigError::UnknownItem(name.to_string()))
        };
        let from = lookup(&link.from)?;
        let to = lookup(&link.to)?;
        match link.direction {
            LinkDirection::Before => backend.add_before(from, to),
            LinkDirection::After => backend.add_after(from, to),
            LinkDirection::Left => backend.add_left(from, to),
            LinkDirection::Right => backend.add_right(from, to),
            LinkDirection::Exit => backend.add_exit(from, to),
        };
    }

    if let Some(ref start) = config.general.start {
        let id = backend
            .find(start)
            .ok_or_else(|| ConfigError::UnknownItem(start.clone()))?;
        backend.select(id);
    }

    info!(
        "Built menu with {} items and {} links",
        backend.len(),
        config.links.len()
    );
    Ok(backend)
}
