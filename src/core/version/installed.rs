// ─── Installed Versions ───
// Scans `versions/**/*.json` for a version descriptor with a given `id`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

/// The only part of a version JSON the installer cares about.
#[derive(Debug, Deserialize)]
struct VersionId {
    id: String,
}

/// Return the first descriptor under `versions_dir` whose `id` equals
/// `required`, or `None`.
///
/// Unreadable files, invalid JSON and descriptors without a string `id` are
/// skipped; launchers drop all sorts of unrelated JSON in here.
/// Enumeration order is whatever the filesystem yields.
pub fn find_installed_version(versions_dir: &Path, required: &str) -> Option<PathBuf> {
    WalkDir::new(versions_dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry under {:?}: {}", versions_dir, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && has_json_extension(entry.path()))
        .find(|entry| read_version_id(entry.path()).as_deref() == Some(required))
        .map(|entry| entry.into_path())
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read_version_id(path: &Path) -> Option<String> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Skipping {:?}: {}", path, e);
            return None;
        }
    };

    match serde_json::from_slice::<VersionId>(&raw) {
        Ok(version) => Some(version.id),
        Err(e) => {
            debug!("Skipping {:?}: not a version descriptor ({})", path, e);
            None
        }
    }
}
