//! Atomic item writes.
//!
//! Items are written to a hidden temporary file in the storage directory and
//! renamed over the target, so a reader never observes a half-written value.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};
#[cfg(unix)]
use cap_std::fs::OpenOptionsExt;

use crate::error::StorageError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Items may hold credentials; only the owner can read them.
#[cfg(unix)]
const ITEM_MODE: u32 = 0o600;

/// Writes `contents` to `file_name` inside `dir` using a temp file and rename.
pub(crate) fn write_atomic(
    dir: &Dir,
    key: &str,
    file_name: &str,
    contents: &str,
) -> Result<(), StorageError> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    write_to_temp_file(dir, key, &tmp_name, contents)?;
    rename_temp_to_target(dir, key, &tmp_name, file_name)?;
    sync_directory(dir);

    Ok(())
}

fn write_error(key: &str, err: &io::Error) -> StorageError {
    StorageError::WriteError {
        key: key.to_owned(),
        message: err.to_string(),
    }
}

fn write_to_temp_file(
    dir: &Dir,
    key: &str,
    tmp_name: &str,
    contents: &str,
) -> Result<(), StorageError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(ITEM_MODE);
    let mut file = dir
        .open_with(tmp_name, &options)
        .map_err(|err| write_error(key, &err))?;

    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if let Err(err) = written {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(write_error(key, &err));
    }

    Ok(())
}

fn rename_temp_to_target(
    dir: &Dir,
    key: &str,
    tmp_name: &str,
    target_name: &str,
) -> Result<(), StorageError> {
    if let Err(err) = rename_impl(dir, tmp_name, target_name) {
        drop(dir.remove_file(tmp_name));
        return Err(write_error(key, &err));
    }
    Ok(())
}

#[cfg(windows)]
fn rename_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_directory(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // The item is already in place; a failed directory sync is not fatal.
    }
}
