//! Persisted JSON key/value storage for client session state.
//!
//! Each item lives in its own `<key>.json` file inside a storage directory.
//! Writes go through a temp-file-and-rename so a crash never leaves a
//! truncated item behind. Directory access is scoped with `cap-std`; keys are
//! validated so they cannot name anything outside the storage directory.
//!
//! # Example
//!
//! ```
//! use local_storage::{LocalStorage, StorageKey};
//!
//! let tmp = tempfile::tempdir().expect("temp dir");
//! let storage = LocalStorage::open(tmp.path()).expect("open storage");
//! let key = StorageKey::new("greeting").expect("valid key");
//!
//! storage.set_item(&key, &"hello").expect("write item");
//! let value: Option<String> = storage.get_item(&key).expect("read item");
//! assert_eq!(value.as_deref(), Some("hello"));
//!
//! assert!(storage.remove_item(&key).expect("remove item"));
//! let gone: Option<String> = storage.get_item(&key).expect("read item");
//! assert!(gone.is_none());
//! ```

mod atomic_io;
mod error;
mod key;

use std::io;
use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use error::StorageError;
pub use key::{STORAGE_KEY_MAX, StorageKey};

/// A directory of JSON items addressed by [`StorageKey`].
#[derive(Debug)]
pub struct LocalStorage {
    root: PathBuf,
    dir: Dir,
}

impl LocalStorage {
    /// Open the storage directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::OpenError`] when the directory cannot be
    /// created or opened.
    pub fn open(root: &Path) -> Result<Self, StorageError> {
        let open_error = |err: io::Error| StorageError::OpenError {
            path: root.to_path_buf(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        restrict_to_owner(root).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Directory backing this storage.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read and decode an item. Missing items yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadError`] for I/O failures and
    /// [`StorageError::ParseError`] when the stored JSON does not decode.
    pub fn get_item<T: DeserializeOwned>(&self, key: &StorageKey) -> Result<Option<T>, StorageError> {
        let contents = match self.dir.read_to_string(key.file_name()) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StorageError::ReadError {
                    key: key.to_string(),
                    message: err.to_string(),
                });
            }
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| StorageError::ParseError {
                key: key.to_string(),
                message: err.to_string(),
            })
    }

    /// Encode and atomically store an item, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::EncodeError`] when the value cannot be
    /// serialised and [`StorageError::WriteError`] when the write fails.
    pub fn set_item<T: Serialize + ?Sized>(&self, key: &StorageKey, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value).map_err(|err| StorageError::EncodeError {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        atomic_io::write_atomic(&self.dir, key.as_str(), &key.file_name(), &json)
    }

    /// Delete an item. Returns whether an item was present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::WriteError`] when the file exists but cannot
    /// be removed.
    pub fn remove_item(&self, key: &StorageKey) -> Result<bool, StorageError> {
        match self.dir.remove_file(key.file_name()) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StorageError::WriteError {
                key: key.to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// Storage directory mode on unix: owner only.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

#[cfg(unix)]
fn restrict_to_owner(root: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(root, std::fs::Permissions::from_mode(DIR_MODE))
}

#[cfg(not(unix))]
fn restrict_to_owner(_root: &Path) -> io::Result<()> {
    Ok(())
}
