//! Export of finished documents.
//!
//! An [`Exporter`] turns a [`Document`] into the text of a file. The only
//! backend is [`excalidraw`], which writes the JSON scene format read by
//! the Excalidraw editor.
//!
//! [`write_document`] puts exported text on disk under the
//! [`FILE_EXTENSION`], so every builder saves files the same way.
//!
//! # Error Handling
//!
//! Serialization failures surface as [`DrafterError::Serialize`]. Paths that
//! name no file and failed writes surface as [`DrafterError::Io`].

/// Excalidraw JSON backend.
pub mod excalidraw;

use std::{
    ffi::OsString,
    fs::File,
    io::{self, Write},
    path::{self, Path, PathBuf},
};

use log::{error, info};

use drafter_core::document::Document;

use crate::error::DrafterError;

/// Extension given to saved documents.
pub const FILE_EXTENSION: &str = "excalidraw";

/// Abstraction for export backends.
///
/// Implementors render a whole [`Document`] at once. Writing the result is
/// left to the caller, see [`write_document`].
pub trait Exporter {
    /// Renders `document` into the text of an output file.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Serialize`] if the document cannot be encoded.
    fn export_document(&self, document: &Document) -> Result<String, DrafterError>;
}

/// Returns `path` with the [`FILE_EXTENSION`] appended unless its file name
/// already ends with it.
///
/// ```
/// # use std::path::Path;
/// # use drafter::export::with_file_extension;
/// let extended = |path: &str| with_file_extension(Path::new(path)).unwrap();
/// assert_eq!(extended("flow"), Path::new("flow.excalidraw"));
/// assert_eq!(extended("flow.v2"), Path::new("flow.v2.excalidraw"));
/// assert_eq!(extended("flow.excalidraw"), Path::new("flow.excalidraw"));
/// assert!(with_file_extension(Path::new("out/")).is_err());
/// ```
///
/// # Errors
///
/// Returns [`DrafterError::Io`] with [`io::ErrorKind::InvalidInput`] if
/// `path` is empty, ends in a separator or has no file name (`.`, `..`).
pub fn with_file_extension(path: &Path) -> Result<PathBuf, DrafterError> {
    let ends_in_separator = path.as_os_str().to_string_lossy().ends_with(path::is_separator);
    let file_name = match path.file_name() {
        Some(file_name) if !ends_in_separator => file_name,
        _ => {
            return Err(DrafterError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("`{}` does not name a file", path.display()),
            )));
        }
    };

    let suffix = format!(".{FILE_EXTENSION}");
    if file_name.as_encoded_bytes().ends_with(suffix.as_bytes()) {
        return Ok(path.to_path_buf());
    }

    let mut name = OsString::from(file_name);
    name.push(suffix);
    Ok(path.with_file_name(name))
}

/// Writes exported contents to `path` and returns the path actually written.
///
/// # Errors
///
/// Returns [`DrafterError::Io`] if `path` names no file or the file cannot
/// be created or written.
pub fn write_document(path: &Path, contents: &str) -> Result<PathBuf, DrafterError> {
    let path = match with_file_extension(path) {
        Ok(path) => path,
        Err(err) => {
            error!(path:? = path; "Diagram path names no file");
            return Err(err);
        }
    };
    let file_name = path.display().to_string();
    info!(file_name; "Creating diagram file");

    let mut file = match File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            error!(file_name, err:err; "Failed to create diagram file");
            return Err(DrafterError::Io(err));
        }
    };

    if let Err(err) = file.write_all(contents.as_bytes()) {
        error!(file_name, err:err; "Failed to write diagram content");
        return Err(DrafterError::Io(err));
    }

    Ok(path)
}
