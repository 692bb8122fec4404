//! Attachment loading with a sensitivity guard and a size cap.
//!
//! The sensitive-name check runs before the file is even opened, so a
//! request naming `~/.ssh/id_rsa` is refused whether or not the file
//! exists. The size cap is checked on the open handle to avoid a
//! check-then-read race.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Attachments larger than this are refused.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Filename fragments that mark key material, credentials, and other
/// files that must never be sent to a remote backend.
const SENSITIVE_PATTERNS: &[&str] = &[
    ".env",
    "id_rsa",
    "id_dsa",
    "id_ecdsa",
    "id_ed25519",
    ".pem",
    ".key",
    ".pfx",
    ".p12",
    "credentials",
    "secrets",
    ".password",
    ".vault",
];

#[derive(Debug, Error)]
pub enum FileError {
    #[error(
        "file {path} looks sensitive (keys, passwords, .env); rename it if you really mean to send it"
    )]
    Sensitive { path: String },

    #[error("file {path} exceeds the 5 MiB limit ({size} bytes)")]
    Oversize { path: String, size: u64 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// A successfully loaded attachment.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub name: String,
    pub content: String,
    pub size: u64,
}

/// Does the path name sensitive material?
pub fn is_sensitive(path: &Path) -> bool {
    let file_name = path.file_name().map(|n| n.to_string_lossy().to_ascii_lowercase());
    if let Some(name) = file_name
        && SENSITIVE_PATTERNS.iter().any(|pattern| name.contains(pattern))
    {
        return true;
    }
    // Anything under a .ssh directory is off limits regardless of name
    path.components().any(|c| c.as_os_str() == ".ssh")
}

/// Load one attachment: sensitivity check, open, size check on the open
/// handle, lossy UTF-8 decode.
pub fn load_file(path_arg: &str) -> Result<LoadedFile, FileError> {
    let path = expand_tilde(path_arg);
    let display = path.display().to_string();

    if is_sensitive(&path) {
        return Err(FileError::Sensitive { path: display });
    }

    let mut file =
        File::open(&path).map_err(|source| FileError::Io { path: display.clone(), source })?;

    let size = file
        .metadata()
        .map_err(|source| FileError::Io { path: display.clone(), source })?
        .len();
    if size > MAX_FILE_BYTES {
        return Err(FileError::Oversize { path: display, size });
    }

    let mut bytes = Vec::with_capacity(size as usize);
    file.read_to_end(&mut bytes)
        .map_err(|source| FileError::Io { path: display.clone(), source })?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| display.clone());
    Ok(LoadedFile { name, content, size })
}

fn expand_tilde(path_arg: &str) -> PathBuf {
    if let Some(rest) = path_arg.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path_arg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_sensitive_names_blocked() {
        assert!(is_sensitive(Path::new("/home/u/.env")));
        assert!(is_sensitive(Path::new("/home/u/.env.production")));
        assert!(is_sensitive(Path::new("/home/u/id_rsa")));
        assert!(is_sensitive(Path::new("server.pem")));
        assert!(is_sensitive(Path::new("API.KEY")));
        assert!(is_sensitive(Path::new("aws-credentials.txt")));
    }

    #[test]
    fn test_ssh_directory_blocked() {
        assert!(is_sensitive(Path::new("/home/u/.ssh/known_hosts")));
    }

    #[test]
    fn test_ordinary_files_pass() {
        assert!(!is_sensitive(Path::new("README.md")));
        assert!(!is_sensitive(Path::new("src/main.rs")));
        assert!(!is_sensitive(Path::new("keyboard.txt")));
    }

    #[test]
    fn test_sensitive_error_before_open() {
        // The file does not exist; the name alone must refuse it
        let err = load_file("/nonexistent/.ssh/id_rsa").unwrap_err();
        assert!(matches!(err, FileError::Sensitive { .. }));
        assert!(err.to_string().contains("sensitive"));
    }

    #[test]
    fn test_load_reads_content_and_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.md");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"hello world").unwrap();

        let loaded = load_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.content, "hello world");
        assert_eq!(loaded.size, 11);
        assert_eq!(loaded.name, "notes.md");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, FileError::Io { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mixed.log");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"ok \xff\xfe bytes").unwrap();

        let loaded = load_file(path.to_str().unwrap()).unwrap();
        assert!(loaded.content.starts_with("ok "));
        assert!(loaded.content.contains('\u{FFFD}'));
    }
}
