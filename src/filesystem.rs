//! Local storage for uploaded PDFs.
//!
//! Uploads land under the static directory and are referenced from the
//! database by relative path, so `actix-files` can serve them directly.
//! Only `.pdf` filenames are accepted anywhere in the admin surface.

use actix_multipart::Field;
use actix_web::{error, web, Error};
use futures::StreamExt;
use std::path::{Path, PathBuf};

pub const NOTES_SUBDIR: &str = "uploads/notes";
pub const INTERVIEW_SUBDIR: &str = "uploads/interview";

/// Root of the public static directory, overridable for tests and
/// containers.
pub fn static_root() -> PathBuf {
    PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_owned()))
}

/// Create the upload directories. Called once at startup.
pub fn init() {
    for subdir in [NOTES_SUBDIR, INTERVIEW_SUBDIR] {
        let dir = static_root().join(subdir);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            log::error!("filesystem::init: create_dir_all({:?}): {}", dir, e);
        }
    }
}

pub fn is_pdf_filename(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// Reduce an uploaded filename to a safe basename: path components are
/// stripped and anything outside `[A-Za-z0-9._-]` becomes an underscore.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_owned()
}

/// Drain a multipart field into a UTF-8 string (for ordinary form values).
pub async fn read_text_field(field: &mut Field) -> Result<String, Error> {
    let bytes = read_file_field(field).await?;
    String::from_utf8(bytes).map_err(|_| error::ErrorBadRequest("Form field was not UTF-8."))
}

/// Drain a multipart field into memory. Body size is already capped by the
/// multipart payload limits.
pub async fn read_file_field(field: &mut Field) -> Result<Vec<u8>, Error> {
    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes = chunk.map_err(|e| {
            log::error!("read_file_field: multipart read error: {}", e);
            error::ErrorBadRequest("Error reading upload.")
        })?;
        buf.extend_from_slice(&bytes);
    }
    Ok(buf)
}

/// Write an uploaded PDF under the given subdirectory and return the
/// relative path stored in the database.
pub async fn save_pdf(subdir: &str, filename: &str, bytes: Vec<u8>) -> Result<String, Error> {
    let safe_name = sanitize_filename(filename);
    if safe_name.is_empty() || !is_pdf_filename(&safe_name) {
        return Err(error::ErrorBadRequest("Only PDF uploads are accepted."));
    }

    let path = static_root().join(subdir).join(&safe_name);
    web::block(move || std::fs::write(&path, &bytes))
        .await
        .map_err(error::ErrorInternalServerError)?
        .map_err(|e| {
            log::error!("save_pdf: write failed: {}", e);
            error::ErrorInternalServerError("Failed to store upload.")
        })?;

    Ok(format!("{}/{}", subdir, safe_name))
}

/// Best-effort removal of a stored file; a missing file is not an error.
pub fn remove_static_file(relative_path: &str) {
    if relative_path.is_empty() {
        return;
    }

    // Stored paths are produced by save_pdf and are always relative.
    let path = static_root().join(Path::new(relative_path));
    match std::fs::remove_file(&path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::error!("remove_static_file({:?}): {}", path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_check_is_case_insensitive() {
        assert!(is_pdf_filename("Notes.PDF"));
        assert!(is_pdf_filename("a.pdf"));
        assert!(!is_pdf_filename("a.pdf.exe"));
        assert!(!is_pdf_filename("a.txt"));
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("c:\\temp\\notes.pdf"), "notes.pdf");
    }

    #[test]
    fn sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my notes (v2).pdf"), "my_notes__v2_.pdf");
    }

    #[test]
    fn sanitize_refuses_hidden_files() {
        assert_eq!(sanitize_filename(".hidden.pdf"), "hidden.pdf");
    }
}
