use std::path::PathBuf;

/// App data directory (~/.multi_app)
pub fn app_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".multi_app")
}

/// config.json path
pub fn config_json_path() -> PathBuf {
    app_dir().join("config.json")
}

/// Key-value storage file holding the session token
pub fn storage_json_path() -> PathBuf {
    app_dir().join("storage.json")
}
