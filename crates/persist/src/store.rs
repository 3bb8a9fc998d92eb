//! File-backed program state.

use std::path::{Path, PathBuf};
use tabletop_scene::ProgramState;

use crate::codec::{decode_into, encode};

/// Where the demo keeps its state unless told otherwise.
pub const DEFAULT_STATE_PATH: &str = "resources/program_state.txt";

/// File name of the state file inside a resource directory.
pub const STATE_FILE_NAME: &str = "program_state.txt";

/// Errors from state file operations.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The program-state text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The state file inside resource directory `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file into a fresh default state.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(&self) -> Result<Option<ProgramState>, PersistError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut state = ProgramState::default();
        let report = decode_into(&mut state, &text);
        if let Some((field, token)) = &report.stopped_at {
            tracing::warn!(
                path = %self.path.display(),
                fields_read = report.fields_read,
                "state file ends early at {field} (token {token:?}); remaining fields use defaults"
            );
        } else {
            tracing::debug!(path = %self.path.display(), "state loaded");
        }
        Ok(Some(state))
    }

    /// Load the state, falling back to defaults on any problem.
    pub fn load_or_default(&self) -> ProgramState {
        match self.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::info!(path = %self.path.display(), "no saved state, using defaults");
                ProgramState::default()
            }
            Err(e) => {
                tracing::warn!("failed to read saved state: {e}");
                ProgramState::default()
            }
        }
    }

    /// Write `state`, creating parent directories as needed.
    pub fn save(&self, state: &ProgramState) -> Result<(), PersistError> {
        let io_err = |source| PersistError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, encode(state)).map_err(io_err)?;
        tracing::info!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("absent.txt"));
        assert!(file.load().unwrap().is_none());
        assert_eq!(file.load_or_default(), ProgramState::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("nested").join("program_state.txt"));

        let mut state = ProgramState::default();
        state.clear_color = Vec3::new(0.25, 0.5, 0.75);
        state.toggle_spotlight();
        state.camera.position = Vec3::new(-2.0, 1.0, 8.0);
        state.cup_position = Vec3::new(1.0, 0.0, -3.0);
        file.save(&state).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.clear_color, state.clear_color);
        assert!(loaded.spotlight_enabled);
        assert_eq!(loaded.camera.position, state.camera.position);
        assert_eq!(loaded.cup_position, state.cup_position);
    }

    #[test]
    fn truncated_file_loads_partially() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("program_state.txt");
        std::fs::write(&path, "1\n0\n0\n").unwrap();

        let loaded = StateFile::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded.clear_color, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(loaded.camera.position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn default_path_sits_in_resources() {
        assert_eq!(
            StateFile::default(),
            StateFile::in_dir("resources"),
        );
        assert!(StateFile::default().path().ends_with(STATE_FILE_NAME));
    }

    #[test]
    fn directory_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path());
        assert!(file.load().is_err());
        assert!(file.save(&ProgramState::default()).is_err());
        assert_eq!(file.load_or_default(), ProgramState::default());
    }
}
