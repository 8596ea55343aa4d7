//! Validated storage keys.

use std::fmt;

use crate::error::StorageError;

/// Maximum length of a storage key in characters.
pub const STORAGE_KEY_MAX: usize = 64;

/// Name of a stored item.
///
/// Keys map one-to-one onto file names inside the storage directory, so they
/// are restricted to ASCII letters, digits, `-` and `_`.
///
/// # Examples
///
/// ```
/// use local_storage::StorageKey;
///
/// let key = StorageKey::new("auth-storage").expect("valid key");
/// assert_eq!(key.as_str(), "auth-storage");
/// assert!(StorageKey::new("../escape").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Validate and construct a key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] when the key is empty, longer
    /// than [`STORAGE_KEY_MAX`], or contains other characters.
    pub fn new(key: impl Into<String>) -> Result<Self, StorageError> {
        let raw = key.into();
        let reason = if raw.is_empty() {
            Some("key must not be empty")
        } else if raw.chars().count() > STORAGE_KEY_MAX {
            Some("key must be at most 64 characters")
        } else if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            Some("key may only contain ASCII letters, digits, '-' and '_'")
        } else {
            None
        };
        match reason {
            Some(why) => Err(StorageError::InvalidKey { key: raw, reason: why }),
            None => Ok(Self(raw)),
        }
    }

    /// Borrow the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub(crate) fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
