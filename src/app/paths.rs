// SPDX-License-Identifier: MPL-2.0
//! Directory resolution for the host configuration and the settings slot.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to the `_with_override()` functions
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`SMARTPOS_DATA_DIR`, `SMARTPOS_CONFIG_DIR`)
//! 4. **Platform default** - via the `dirs` crate, with [`APP_NAME`] appended

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
pub const APP_NAME: &str = "SmartPOS";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "SMARTPOS_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "SMARTPOS_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` / `--config-dir` flags.
///
/// Only the first call has an effect. Returns `false` if the overrides were
/// already initialized.
pub fn init_cli_overrides(data_dir: Option<PathBuf>, config_dir: Option<PathBuf>) -> bool {
    let data_set = CLI_DATA_DIR.set(data_dir).is_ok();
    let config_set = CLI_CONFIG_DIR.set(config_dir).is_ok();
    data_set && config_set
}

/// One of the two directories this crate resolves.
#[derive(Debug, Clone, Copy)]
enum DirKind {
    Data,
    Config,
}

impl DirKind {
    fn cli_override(self) -> Option<PathBuf> {
        let cell = match self {
            DirKind::Data => &CLI_DATA_DIR,
            DirKind::Config => &CLI_CONFIG_DIR,
        };
        cell.get().and_then(Clone::clone)
    }

    fn env_var(self) -> &'static str {
        match self {
            DirKind::Data => ENV_DATA_DIR,
            DirKind::Config => ENV_CONFIG_DIR,
        }
    }

    fn platform_dir(self) -> Option<PathBuf> {
        match self {
            DirKind::Data => dirs::data_dir(),
            DirKind::Config => dirs::config_dir(),
        }
    }

    fn resolve(self, override_path: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(path) = override_path {
            return Some(path);
        }
        if let Some(path) = self.cli_override() {
            return Some(path);
        }
        if let Ok(env_path) = std::env::var(self.env_var()) {
            if !env_path.is_empty() {
                return Some(PathBuf::from(env_path));
            }
        }
        self.platform_dir().map(|mut path| {
            path.push(APP_NAME);
            path
        })
    }
}

/// Directory holding the persisted settings slot.
///
/// Platform defaults:
/// - Linux: `~/.local/share/SmartPOS/`
/// - macOS: `~/Library/Application Support/SmartPOS/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\SmartPOS\`
///
/// Returns `None` if no directory can be determined.
#[must_use]
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Like [`get_app_data_dir`], preferring `override_path` when given.
#[must_use]
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    DirKind::Data.resolve(override_path)
}

/// Directory holding `settings.toml`.
///
/// Platform defaults:
/// - Linux: `~/.config/SmartPOS/`
/// - macOS: `~/Library/Application Support/SmartPOS/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\SmartPOS\`
#[must_use]
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Like [`get_app_config_dir`], preferring `override_path` when given.
#[must_use]
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    DirKind::Config.resolve(override_path)
}
