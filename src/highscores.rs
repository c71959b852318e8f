use crate::consts;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Durable storage for the high score
pub(crate) trait ScoreStore {
    /// Read the stored high score.  A store with nothing in it yields 0.
    fn get(&self) -> Result<u32, LoadError>;

    fn set(&mut self, score: u32) -> Result<(), SaveError>;
}

/// A JSON file holding an object of scalar entries; the high score lives
/// under [`consts::HIGH_SCORE_KEY`].  Entries under other keys are left
/// alone when the high score is written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub(crate) fn new(path: PathBuf) -> FileScoreStore {
        FileScoreStore { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }
}

type Entries = BTreeMap<String, serde_json::Value>;

impl ScoreStore for FileScoreStore {
    fn get(&self) -> Result<u32, LoadError> {
        match self.read_entries()?.get(consts::HIGH_SCORE_KEY) {
            None => Ok(0),
            Some(value) => serde_json::from_value(value.clone()).map_err(LoadError::deserialize),
        }
    }

    fn set(&mut self, score: u32) -> Result<(), SaveError> {
        let mut entries = self.read_entries().map_err(SaveError::reload)?;
        let _ = entries.insert(String::from(consts::HIGH_SCORE_KEY), score.into());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn reload(e: LoadError) -> Self {
        SaveError(SaveErrorSource::Reload(e))
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    pub(crate) fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to read existing high score file")]
    Reload(#[source] LoadError),
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    pub(crate) fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_zero() {
        let tmpdir = tempfile::tempdir().unwrap();
        let store = FileScoreStore::new(tmpdir.path().join("highscore.json"));
        assert_eq!(store.get().unwrap(), 0);
    }

    #[test]
    fn save_and_reload() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("data").join("highscore.json");
        let mut store = FileScoreStore::new(path.clone());
        store.set(17).unwrap();
        assert_eq!(FileScoreStore::new(path.clone()).get().unwrap(), 17);
        let src = fs_err::read_to_string(&path).unwrap();
        assert_eq!(src, "{\n  \"snakeHighScore\": 17\n}\n");
    }

    #[test]
    fn other_keys_preserved() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "{\"theme\": \"dark\", \"snakeHighScore\": 3}").unwrap();
        let mut store = FileScoreStore::new(path.clone());
        assert_eq!(store.get().unwrap(), 3);
        store.set(9).unwrap();
        let entries: Entries = serde_json::from_str(&fs_err::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(entries["theme"], "dark");
        assert_eq!(entries["snakeHighScore"], 9);
    }

    #[test]
    fn corrupt_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "not json").unwrap();
        let mut store = FileScoreStore::new(path.clone());
        assert!(store.get().is_err());
        assert!(store.set(5).is_err());
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn bad_value() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "{\"snakeHighScore\": -4}").unwrap();
        assert!(FileScoreStore::new(path).get().is_err());
    }
}
