//! Platform-appropriate locations for configuration files.
//!
//! | Platform | Directory                                      |
//! |----------|------------------------------------------------|
//! | Windows  | `%APPDATA%\<app>`                              |
//! | Linux    | `$XDG_CONFIG_HOME/<app>` or `~/.config/<app>`  |
//! | macOS    | `~/Library/Application Support/<app>`          |

use std::ffi::OsString;
use std::path::PathBuf;

use crate::storage::codec::ConfigFileError;

/// Resolves the config directory for an application named `app_dir`.
///
/// Returns `None` when the platform base directory cannot be determined from
/// the environment (for example `HOME` unset in a stripped container).
pub fn platform_config_dir(app_dir: &str) -> Option<PathBuf> {
    base_config_dir().map(|base| base.join(app_dir))
}

/// Resolves the full path of `file_name` inside the application's config
/// directory.
///
/// # Errors
///
/// Returns [`ConfigFileError::NoPlatformConfigDir`] if the base directory
/// cannot be determined.
pub fn config_file_path(app_dir: &str, file_name: &str) -> Result<PathBuf, ConfigFileError> {
    platform_config_dir(app_dir)
        .map(|dir| dir.join(file_name))
        .ok_or(ConfigFileError::NoPlatformConfigDir)
}

fn base_config_dir() -> Option<PathBuf> {
    base_config_dir_from(|key| std::env::var_os(key))
}

/// Platform base directory computed from an environment lookup.
fn base_config_dir_from(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // e.g. C:\Users\<user>\AppData\Roaming
        var("APPDATA").map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        var("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| var("HOME").map(|h| PathBuf::from(h).join(".config")))
    }

    #[cfg(target_os = "macos")]
    {
        var("HOME").map(|h| PathBuf::from(h).join("Library").join("Application Support"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        let _ = var;
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<OsString> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| OsString::from(v))
        }
    }

    #[test]
    fn test_config_file_path_is_platform_dir_joined_with_file_name() {
        // Holds whether or not the environment provides a base directory.
        let expected = platform_config_dir("JsonMaster").map(|dir| dir.join("settings.json"));

        match (config_file_path("JsonMaster", "settings.json"), expected) {
            (Ok(path), Some(expected)) => {
                assert_eq!(path, expected);
                assert!(path.parent().is_some_and(|p| p.ends_with("JsonMaster")));
            }
            (Err(ConfigFileError::NoPlatformConfigDir), None) => {}
            (got, expected) => panic!("config_file_path {got:?} disagrees with {expected:?}"),
        }
    }

    #[test]
    fn test_empty_environment_has_no_base_dir() {
        assert_eq!(base_config_dir_from(env_of(&[])), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_prefers_xdg_config_home() {
        let base = base_config_dir_from(env_of(&[
            ("XDG_CONFIG_HOME", "/xdg"),
            ("HOME", "/home/u"),
        ]));
        assert_eq!(base, Some(PathBuf::from("/xdg")));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_falls_back_to_home_dot_config() {
        // An empty XDG_CONFIG_HOME counts as unset.
        let base = base_config_dir_from(env_of(&[("XDG_CONFIG_HOME", ""), ("HOME", "/home/u")]));
        assert_eq!(base, Some(PathBuf::from("/home/u/.config")));
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_macos_uses_application_support() {
        let base = base_config_dir_from(env_of(&[("HOME", "/Users/u")]));
        assert_eq!(
            base,
            Some(PathBuf::from("/Users/u/Library/Application Support"))
        );
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_windows_uses_appdata() {
        let base = base_config_dir_from(env_of(&[("APPDATA", r"C:\Users\u\AppData\Roaming")]));
        assert_eq!(base, Some(PathBuf::from(r"C:\Users\u\AppData\Roaming")));
    }
}
