use std::path::PathBuf;

const MINECRAFT_DIR_NAME: &str = ".minecraft";

/// Default Minecraft root: the platform's roaming application-data folder
/// joined with `.minecraft` (`%APPDATA%\.minecraft` on Windows).
pub fn default_minecraft_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(MINECRAFT_DIR_NAME)
}
