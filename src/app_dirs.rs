use directories::ProjectDirs;
use std::path::PathBuf;

/// Where the persisted plot config lives. Prefers the platform config dir,
/// falling back to the working directory when no home is resolvable.
pub fn config_path() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("", "", "sudoviz") {
        pd.config_dir().join("config.json")
    } else {
        PathBuf::from("sudoviz_config.json")
    }
}
