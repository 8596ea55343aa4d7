//! Reading attachment files named on the command line.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::{Attachment, Error};

/// Read every file in `paths`, in order.
pub(super) fn read_attachments(paths: &[PathBuf]) -> Result<Vec<Attachment>, Error> {
    paths.iter().map(|path| read_attachment(path)).collect()
}

fn read_attachment(path: &Path) -> Result<Attachment, Error> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        Error::invalid_request(format!("'{}' is not a file", path.display()))
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        Error::invalid_request(format!(
            "cannot open directory '{}': {error}",
            parent.display()
        ))
    })?;
    let bytes = directory.read(Path::new(file_name)).map_err(|error| {
        Error::invalid_request(format!("cannot read '{}': {error}", path.display()))
    })?;
    Ok(Attachment {
        file_name: file_name.to_string_lossy().into_owned(),
        bytes,
    })
}
