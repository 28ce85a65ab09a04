//! Building attachments from files and links

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use wellsoulix_storage::Attachment;

use crate::error::Result;

/// Extensions whose contents are inlined as a text snippet
const TEXT_EXTENSIONS: [&str; 6] = ["txt", "md", "json", "js", "ts", "py"];

/// Characters of file content kept in a doc snippet
pub const SNIPPET_CHARS: usize = 1000;

fn image_mime_type(extension: &str) -> Option<&'static str> {
    match extension {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Turn a local file into an attachment.
///
/// Images become a base64 data URI, text-like files a `[File: ..]`
/// snippet, anything else just the file name.
///
/// # Errors
///
/// Returns an error if an image or text file cannot be read
pub fn from_file(path: &Path) -> Result<Attachment> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if let Some(mime_type) = image_mime_type(&extension) {
        let bytes = std::fs::read(path)?;
        log::debug!("Attaching image {name} ({} bytes)", bytes.len());
        return Ok(Attachment::Image {
            data: format!("data:{mime_type};base64,{}", BASE64_STANDARD.encode(&bytes)),
            mime_type: mime_type.to_string(),
        });
    }

    if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        let bytes = std::fs::read(path)?;
        let content: String = String::from_utf8_lossy(&bytes)
            .chars()
            .take(SNIPPET_CHARS)
            .collect();
        return Ok(Attachment::Doc {
            data: format!("[File: {name}] Content Snippet: {content}"),
            mime_type: Some("text/plain".to_string()),
        });
    }

    Ok(Attachment::Doc {
        data: name,
        mime_type: None,
    })
}

/// Attachment for a pasted url; blank input yields nothing
#[must_use]
pub fn link(url: &str) -> Option<Attachment> {
    let url = url.trim();
    (!url.is_empty()).then(|| Attachment::Link {
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_becomes_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood.PNG");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let attachment = from_file(&path).unwrap();
        assert_eq!(
            attachment,
            Attachment::Image {
                data: "data:image/png;base64,iVBORw==".to_string(),
                mime_type: "image/png".to_string(),
            }
        );
        assert_eq!(attachment.label(), "Visual Snippet");
    }

    #[test]
    fn test_text_file_snippet_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "a".repeat(1500)).unwrap();

        let Attachment::Doc { data, mime_type } = from_file(&path).unwrap() else {
            panic!("expected doc attachment");
        };
        assert_eq!(mime_type.as_deref(), Some("text/plain"));
        assert_eq!(
            data,
            format!("[File: notes.md] Content Snippet: {}", "a".repeat(1000))
        );
    }

    #[test]
    fn test_other_file_keeps_name_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thesis.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let attachment = from_file(&path).unwrap();
        assert_eq!(
            attachment,
            Attachment::Doc {
                data: "thesis.pdf".to_string(),
                mime_type: None,
            }
        );
        assert_eq!(attachment.label(), "thesis.pdf");
    }

    #[test]
    fn test_missing_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(from_file(&dir.path().join("gone.jpg")).is_err());
    }

    #[test]
    fn test_link() {
        assert_eq!(link("  "), None);
        assert_eq!(
            link(" https://example.com/article "),
            Some(Attachment::Link {
                url: "https://example.com/article".to_string()
            })
        );
    }
}
