//! Snapshot persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Snapshot file for a route path.
///
/// The home pages map onto the directory's own `index.html`; every other
/// route gets `<route>/index.html` so the production web server can serve
/// the snapshot for the clean URL.
#[must_use]
pub fn snapshot_path(dist_dir: &Path, route_path: &str) -> PathBuf {
    let trimmed = route_path.trim_matches('/');
    if trimmed.is_empty() {
        dist_dir.join("index.html")
    } else {
        dist_dir.join(trimmed).join("index.html")
    }
}

/// Write a snapshot, creating route directories as needed.
///
/// An existing snapshot at the same path is overwritten.
///
/// # Errors
///
/// Returns an error if directories cannot be created or the file cannot be
/// written.
pub fn write_snapshot(dist_dir: &Path, route_path: &str, html: &str) -> io::Result<PathBuf> {
    let path = snapshot_path(dist_dir, route_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, html)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_home_maps_to_root_index() {
        assert_eq!(
            snapshot_path(Path::new("/dist"), "/"),
            PathBuf::from("/dist/index.html")
        );
    }

    #[test]
    fn test_routes_map_to_nested_index() {
        assert_eq!(
            snapshot_path(Path::new("/dist"), "/events"),
            PathBuf::from("/dist/events/index.html")
        );
        assert_eq!(
            snapshot_path(Path::new("/dist"), "/pt/sobre"),
            PathBuf::from("/dist/pt/sobre/index.html")
        );
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_snapshot(dir.path(), "/pt/eventos", "<html></html>").unwrap();

        assert_eq!(written, dir.path().join("pt/eventos/index.html"));
        assert_eq!(fs::read_to_string(written).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_overwrites_existing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "/faq", "old").unwrap();
        write_snapshot(dir.path(), "/faq", "new").unwrap();

        let content = fs::read_to_string(dir.path().join("faq/index.html")).unwrap();
        assert_eq!(content, "new");
    }
}
