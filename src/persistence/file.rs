//! Plain text files, one per key, in a data directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PersistError, ScoreStore};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `high_score_lv2` -> `<dir>/high_score_lv2.txt`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", key))
    }
}

impl ScoreStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write via a temp file and rename so a crash never leaves a truncated record
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("txt.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Wrote {} = {}", path.display(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        assert_eq!(store.load_high_score("high_score").unwrap(), None);
    }

    #[test]
    fn test_records_land_in_text_files() {
        let tmp = tempfile::tempdir().unwrap();
        // Nested so the store has to create its directory
        let dir = tmp.path().join("records");
        let mut store = FileStore::new(&dir);
        store.save_high_score("high_score_lv2", 13.8).unwrap();
        store.save_points_total("points_collected_lv2", 20).unwrap();

        assert_eq!(fs::read_to_string(dir.join("high_score_lv2.txt")).unwrap(), "13.80");
        assert_eq!(fs::read_to_string(dir.join("points_collected_lv2.txt")).unwrap(), "20");
        assert_eq!(store.load_points_total("points_collected_lv2").unwrap(), Some(20));
        assert!(!dir.join("high_score_lv2.txt.tmp").exists());
    }
}
