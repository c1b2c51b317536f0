use std::path::PathBuf;

/// Docy config directory (~/.docy)
pub fn docy_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".docy")
}

/// Path of the JSON config file
pub fn config_json_path() -> PathBuf {
    docy_dir().join("config.json")
}

/// Path of the TOML config file, relative to the working directory
pub fn config_toml_path() -> PathBuf {
    PathBuf::from("config.toml")
}
