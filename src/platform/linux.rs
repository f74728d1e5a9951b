// Sitelens platform paths for Linux
// Config: ~/.config/sitelens
// Data:   ~/.local/share/sitelens

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/sitelens` if set, otherwise `~/.config/sitelens`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg).join("sitelens"),
        Err(_) => home_dir().join(".config").join("sitelens"),
    }
}

/// Uses `$XDG_DATA_HOME/sitelens` if set, otherwise `~/.local/share/sitelens`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) => PathBuf::from(xdg).join("sitelens"),
        Err(_) => home_dir().join(".local").join("share").join("sitelens"),
    }
}
