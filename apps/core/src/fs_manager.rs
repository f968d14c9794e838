use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::info;

pub struct PortablePathManager;

impl PortablePathManager {
    /// Path of the database file behind a `sqlite:` URL, or `None` for in-memory databases.
    pub fn sqlite_file(database_url: &str) -> Option<PathBuf> {
        let rest = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();

        if path.is_empty() || path == ":memory:" || database_url.contains("mode=memory") {
            return None;
        }
        Some(PathBuf::from(path))
    }

    /// Creates the directory that will hold the database file.
    pub fn ensure_database_dir(database_url: &str) -> io::Result<()> {
        let Some(parent) = Self::sqlite_file(database_url)
            .and_then(|file| file.parent().map(PathBuf::from))
            .filter(|dir| !dir.as_os_str().is_empty())
        else {
            return Ok(());
        };

        if !parent.exists() {
            info!("Creating database directory: {:?}", parent);
            fs::create_dir_all(&parent)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_file_forms() {
        assert_eq!(
            PortablePathManager::sqlite_file("sqlite://data/mindflow.sqlite"),
            Some(PathBuf::from("data/mindflow.sqlite"))
        );
        assert_eq!(
            PortablePathManager::sqlite_file("sqlite:///var/lib/mindflow.db?mode=rwc"),
            Some(PathBuf::from("/var/lib/mindflow.db"))
        );
        assert_eq!(
            PortablePathManager::sqlite_file("sqlite:mindflow.db"),
            Some(PathBuf::from("mindflow.db"))
        );
        assert_eq!(PortablePathManager::sqlite_file("sqlite::memory:"), None);
        assert_eq!(PortablePathManager::sqlite_file("sqlite://shared?mode=memory"), None);
        assert_eq!(PortablePathManager::sqlite_file("postgres://localhost/db"), None);
    }

    #[test]
    fn test_ensure_database_dir_creates_parent() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("db").join("mindflow.sqlite");
        let url = format!("sqlite://{}", db_path.display());

        PortablePathManager::ensure_database_dir(&url).unwrap();

        assert!(tmp.path().join("nested").join("db").is_dir());
        assert!(!db_path.exists());
    }

    #[test]
    fn test_ensure_database_dir_ignores_memory_and_bare_files() {
        PortablePathManager::ensure_database_dir("sqlite::memory:").unwrap();
        PortablePathManager::ensure_database_dir("sqlite:mindflow.db").unwrap();
        assert!(!Path::new("mindflow.db").exists());
    }
}
