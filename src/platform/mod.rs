// Sitelens platform abstraction
// Platform-specific config and data locations, selected with `cfg(target_os)`.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV_VAR: &str = "SITELENS_DATA_DIR";

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/sitelens` (or `$XDG_CONFIG_HOME/sitelens`)
/// - **macOS**: `~/Library/Application Support/Sitelens`
/// - **Windows**: `%APPDATA%/Sitelens`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the directory holding the review cache database.
///
/// `$SITELENS_DATA_DIR` wins when set; otherwise:
/// - **Linux**: `~/.local/share/sitelens` (or `$XDG_DATA_HOME/sitelens`)
/// - **macOS**: `~/Library/Application Support/Sitelens`
/// - **Windows**: `%LOCALAPPDATA%/Sitelens`
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV_VAR) {
        return PathBuf::from(dir);
    }
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
