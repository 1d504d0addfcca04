use aura::PersistenceError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{ErrorKind, Write};
use std::path::Path;

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        key: path.display().to_string(),
        source,
    }
}

/// Saves a serializable object to a file atomically.
///
/// This function ensures data integrity by writing to a temporary file first
/// and then renaming it to the target path.
///
/// # Arguments
///
/// * `path` - The target file path.
/// * `state` - The object to serialize and save.
///
/// # Returns
///
/// * `Ok(())` on success.
/// * `Err` on serialization or IO failure.
pub fn save_state<T: Serialize>(path: &Path, state: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let json = serde_json::to_string_pretty(state).map_err(|source| PersistenceError::Corrupt {
        key: path.display().to_string(),
        source,
    })?;

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");
    let mut temp_file = std::fs::File::create(&temp_path).map_err(|e| io_error(&temp_path, e))?;

    temp_file
        .write_all(json.as_bytes())
        .map_err(|e| io_error(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| io_error(&temp_path, e))?;

    std::fs::rename(&temp_path, path).map_err(|e| io_error(path, e))?;

    Ok(())
}

/// Loads a deserializable object from a file.
///
/// # Arguments
///
/// * `path` - The file path to read from.
///
/// # Returns
///
/// * `Ok(Some(T))` containing the deserialized object.
/// * `Ok(None)` if the file doesn't exist.
/// * `Err` if the file cannot be read or deserialization fails.
pub fn load_state<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    let reader = std::io::BufReader::new(file);
    let state = serde_json::from_reader(reader).map_err(|source| PersistenceError::Corrupt {
        key: path.display().to_string(),
        source,
    })?;
    Ok(Some(state))
}
