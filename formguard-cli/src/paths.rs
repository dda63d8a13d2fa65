//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "norpie";
const APPLICATION: &str = "formguard";

/// Name of the log file for the current run.
const LATEST_LOG: &str = "latest.log";

/// Environment variable pointing at an alternate config file.
pub const CONFIG_ENV: &str = "FORMGUARD_CONFIG";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/formguard` or `~/.cache/formguard`
/// - macOS: `~/Library/Caches/dev.norpie.formguard`
/// - Windows: `C:\Users\<User>\AppData\Local\norpie\formguard\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/formguard` or `~/.config/formguard`
/// - macOS: `~/Library/Application Support/dev.norpie.formguard`
/// - Windows: `C:\Users\<User>\AppData\Roaming\norpie\formguard\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the config file, honoring `FORMGUARD_CONFIG`.
pub fn config_file() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    config_dir().map(|dir| dir.join("config.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 25;

/// Archive the previous run's log under a timestamped name and prune old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    rotate_logs_in(&cache, &stamp);
}

fn rotate_logs_in(cache: &Path, stamp: &str) {
    let latest = cache.join(LATEST_LOG);
    if latest.exists() {
        let archived = cache.join(format!("{stamp}.log"));
        if let Err(e) = fs::rename(&latest, &archived) {
            log::warn!("Could not archive {}: {}", latest.display(), e);
        }
    }
    prune_archived_logs(cache, MAX_OLD_LOGS);
}

fn is_archived_log(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
        && path.file_name().is_some_and(|name| name != LATEST_LOG)
}

/// Delete archived logs beyond the `keep` most recently modified.
fn prune_archived_logs(cache: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(cache) else { return };

    let mut archived: Vec<(Option<SystemTime>, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_archived_log(path))
        .map(|path| (fs::metadata(&path).and_then(|m| m.modified()).ok(), path))
        .collect();

    // Newest first; entries without an mtime sort last and are pruned first.
    archived.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, path) in archived.into_iter().skip(keep) {
        if let Err(e) = fs::remove_file(&path) {
            log::warn!("Could not remove old log {}: {}", path.display(), e);
        }
    }
}
