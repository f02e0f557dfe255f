use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", "circuit") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("circuit_config.json")
        }
    }

    pub fn log_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("circuit"),
            )
        } else {
            ProjectDirs::from("", "", "circuit")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }
}
