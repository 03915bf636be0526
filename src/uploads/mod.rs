//! Media files on local disk: filename sanitizing, the extension allow-list,
//! and the directory uploads are written to.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::entity::MediaKind;
use crate::error::{NotedeckError, Result};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// Reduce a client-supplied filename to a safe single path component.
///
/// Directory parts are dropped, whitespace becomes `_`, and anything outside
/// ASCII alphanumerics, `.`, `-` and `_` is removed. Returns `None` when
/// nothing usable is left.
pub fn secure_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Lowercased extension of `filename`, if it has one.
pub fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Media kind implied by the extension, `None` when it is not allowed.
pub fn media_kind(filename: &str) -> Option<MediaKind> {
    let ext = extension(filename)?;
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Sanitize a filename and check it against the allow-list.
pub fn accept_media(raw: &str) -> Result<(String, MediaKind)> {
    let filename = secure_filename(raw)
        .ok_or_else(|| NotedeckError::BadRequest("Invalid filename".to_string()))?;
    let kind = media_kind(&filename)
        .ok_or_else(|| NotedeckError::DisallowedFileType(filename.clone()))?;
    Ok((filename, kind))
}

/// Like [`accept_media`], but only images are allowed.
pub fn accept_image(raw: &str) -> Result<String> {
    match accept_media(raw)? {
        (filename, MediaKind::Image) => Ok(filename),
        (filename, MediaKind::Video) => Err(NotedeckError::DisallowedFileType(filename)),
    }
}

/// Directory holding uploaded media and note images.
#[derive(Debug, Clone)]
pub struct MediaStore {
    dir: PathBuf,
}

impl MediaStore {
    pub async fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).await?;
        info!(path = %dir.display(), "Media store initialized");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path for an already-sanitized filename
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Write a file. An existing file with the same name is replaced.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<()> {
        let path = self.path_for(filename);
        fs::write(&path, data).await?;
        debug!(path = %path.display(), size = data.len() as u64, "Stored media file");
        Ok(())
    }

    /// Remove a file; a file that is already gone is not an error.
    pub async fn remove(&self, filename: &str) -> Result<()> {
        match fs::remove_file(self.path_for(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("photo.png").as_deref(), Some("photo.png"));
        assert_eq!(secure_filename("my photo.PNG").as_deref(), Some("my_photo.PNG"));
        assert_eq!(secure_filename("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(secure_filename("C:\\Users\\me\\cat.jpg").as_deref(), Some("cat.jpg"));
        assert_eq!(secure_filename("..."), None);
        assert_eq!(secure_filename("ünïcødé"), Some("ncd".to_string()));
        assert_eq!(secure_filename(""), None);
    }

    #[test]
    fn test_media_kind() {
        assert_eq!(media_kind("a.PNG"), Some(MediaKind::Image));
        assert_eq!(media_kind("clip.mov"), Some(MediaKind::Video));
        assert_eq!(media_kind("script.sh"), None);
        assert_eq!(media_kind("noextension"), None);
    }

    #[test]
    fn test_accept_media() {
        let (name, kind) = accept_media("holiday clip.mp4").unwrap();
        assert_eq!(name, "holiday_clip.mp4");
        assert_eq!(kind, MediaKind::Video);

        assert!(matches!(
            accept_media("evil.exe").unwrap_err(),
            NotedeckError::DisallowedFileType(_)
        ));
        assert!(matches!(
            accept_media("///").unwrap_err(),
            NotedeckError::BadRequest(_)
        ));
        assert!(matches!(
            accept_image("clip.avi").unwrap_err(),
            NotedeckError::DisallowedFileType(_)
        ));
    }

    #[tokio::test]
    async fn test_save_overwrites_and_remove() {
        let tmp = TempDir::new().unwrap();
        let store = MediaStore::new(tmp.path().join("uploads")).await.unwrap();

        store.save("a.png", b"first").await.unwrap();
        store.save("a.png", b"second").await.unwrap();
        let data = std::fs::read(store.path_for("a.png")).unwrap();
        assert_eq!(data, b"second");

        store.remove("a.png").await.unwrap();
        assert!(!store.path_for("a.png").exists());
        store.remove("a.png").await.unwrap();
    }
}
