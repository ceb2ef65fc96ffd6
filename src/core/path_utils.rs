/*
 * Locates the per-application local configuration directory and the files kept in
 * it. The directory comes from `directories::ProjectDirs` without an organization
 * qualifier (AppData/Local/<app>/config on Windows) and is created on first use.
 */
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

pub const CONFIG_FILENAME: &str = "jumplist_config.json";
pub const LOG_FILENAME: &str = "jumplist_manager.log";

/*
 * Returns the application's local configuration directory, creating it if needed.
 * `None` means the platform offers no such directory or it could not be created;
 * the failure is logged.
 */
pub fn get_base_app_config_local_dir(app_name: &str) -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", app_name)?;
    let config_dir = project_dirs.config_local_dir();
    if !config_dir.exists() {
        if let Err(e) = fs::create_dir_all(config_dir) {
            log::error!("PathUtils: Failed to create config directory {config_dir:?}: {e}");
            return None;
        }
        log::debug!("PathUtils: Created config directory {config_dir:?}");
    }
    Some(config_dir.to_path_buf())
}

pub fn log_file_path(app_name: &str) -> Option<PathBuf> {
    get_base_app_config_local_dir(app_name).map(|dir| dir.join(LOG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_local_dir_is_created_and_named_after_app() {
        // Arrange
        let app_name = format!("JumpListTest_PathUtils_{}", rand::random::<u64>());

        // Act
        let dir = get_base_app_config_local_dir(&app_name);

        // Assert
        if let Some(dir) = dir {
            assert!(dir.exists(), "Config directory should exist after the call.");
            assert!(
                dir.to_string_lossy()
                    .to_lowercase()
                    .contains(&app_name.to_lowercase())
            );
            assert_eq!(
                log_file_path(&app_name),
                Some(dir.join(LOG_FILENAME))
            );
            if let Err(e) = fs::remove_dir_all(&dir) {
                eprintln!("Test cleanup failed for {dir:?}: {e}");
            }
        } else {
            eprintln!("No home directory available; skipping config directory checks.");
        }
    }
}
