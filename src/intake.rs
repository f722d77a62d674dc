//! Image intake from file selection, clipboard paste and drag-and-drop.
//!
//! Input bytes are sniffed by their magic number rather than trusted by file
//! extension or declared MIME type, so a mislabeled clipboard item is still
//! recognized and a non-image is turned away before reaching the engine.

use crate::error::{Error, Result};
use image::ImageFormat;
use std::fmt;

/// How an image reached us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// Chosen through the upload button's file dialog
    FileSelect,
    /// Pasted from the clipboard
    Paste,
    /// Dropped onto the input area
    Drop,
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageSource::FileSelect => "file select",
            ImageSource::Paste => "paste",
            ImageSource::Drop => "drop",
        })
    }
}

/// An image ready for recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
    /// Where the image came from
    pub source: ImageSource,
    /// Encoded image bytes, passed to the engine untouched
    pub bytes: Vec<u8>,
    /// Detected encoding
    pub format: ImageFormat,
}

impl ImageInput {
    /// Accept encoded image bytes, detecting their format.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyImage`] for zero bytes, [`Error::NotAnImage`] when the
    /// data matches no known image signature.
    pub fn from_bytes(source: ImageSource, bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::EmptyImage);
        }
        let format = image::guess_format(&bytes).map_err(|_| Error::NotAnImage)?;
        log::debug!("Accepted {:?} image ({} bytes) via {}", format, bytes.len(), source);
        Ok(Self {
            source,
            bytes,
            format,
        })
    }

    /// Read an image file chosen by the user.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(ImageSource::FileSelect, bytes)
    }
}

/// One entry of clipboard data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    /// Declared MIME type, e.g. `image/png` or `text/plain`
    pub mime: String,
    /// Raw item bytes
    pub data: Vec<u8>,
}

impl ClipboardItem {
    /// Create a clipboard item.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Whether the item declares itself as an image.
    pub fn is_image(&self) -> bool {
        self.mime.contains("image")
    }
}

/// Images carried by a paste, in clipboard order.
///
/// Items whose MIME type does not mention `image` are skipped, as are items
/// that claim to be images but fail format detection.
pub fn images_from_clipboard(items: Vec<ClipboardItem>) -> Vec<ImageInput> {
    items
        .into_iter()
        .filter(ClipboardItem::is_image)
        .filter_map(|item| match ImageInput::from_bytes(ImageSource::Paste, item.data) {
            Ok(input) => Some(input),
            Err(e) => {
                log::warn!("Skipping clipboard item {}: {}", item.mime, e);
                None
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
    const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_detects_png() {
        let input = ImageInput::from_bytes(ImageSource::Drop, PNG_SIGNATURE.to_vec()).unwrap();
        assert_eq!(input.format, ImageFormat::Png);
        assert_eq!(input.source, ImageSource::Drop);
    }

    #[test]
    fn test_detects_jpeg() {
        let input = ImageInput::from_bytes(ImageSource::Paste, JPEG_SIGNATURE.to_vec()).unwrap();
        assert_eq!(input.format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            ImageInput::from_bytes(ImageSource::Paste, Vec::new()),
            Err(Error::EmptyImage)
        ));
    }

    #[test]
    fn test_rejects_text() {
        assert!(matches!(
            ImageInput::from_bytes(ImageSource::FileSelect, b"hello world".to_vec()),
            Err(Error::NotAnImage)
        ));
    }

    #[test]
    fn test_clipboard_keeps_only_images() {
        let items = vec![
            ClipboardItem::new("text/plain", b"some text".to_vec()),
            ClipboardItem::new("image/png", PNG_SIGNATURE.to_vec()),
            ClipboardItem::new("text/html", b"<img>".to_vec()),
            ClipboardItem::new("image/jpeg", JPEG_SIGNATURE.to_vec()),
        ];
        let images = images_from_clipboard(items);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].format, ImageFormat::Png);
        assert_eq!(images[1].format, ImageFormat::Jpeg);
        assert!(images.iter().all(|i| i.source == ImageSource::Paste));
    }

    #[test]
    fn test_clipboard_skips_mislabeled_items() {
        let items = vec![ClipboardItem::new("image/png", b"not really".to_vec())];
        assert!(images_from_clipboard(items).is_empty());
    }
}
