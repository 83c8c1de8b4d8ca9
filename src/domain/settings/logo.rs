// SPDX-License-Identifier: MPL-2.0
//! Company logo payload.
//!
//! A logo is an image file of at most [`MAX_LOGO_BYTES`]. Its format is
//! sniffed from the leading bytes; the declared file extension or MIME type
//! is never trusted. Persisted data carries the logo as a `data:` URL.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::defaults::MAX_LOGO_BYTES;
use crate::error::LogoError;

/// Image formats accepted for the company logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
}

impl ImageFormat {
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Svg => "image/svg+xml",
        }
    }

    /// Detects the format from magic bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
        const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

        if bytes.starts_with(PNG_MAGIC) {
            return Some(ImageFormat::Png);
        }
        if bytes.starts_with(JPEG_MAGIC) {
            return Some(ImageFormat::Jpeg);
        }
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return Some(ImageFormat::Webp);
        }
        if looks_like_svg(bytes) {
            return Some(ImageFormat::Svg);
        }
        None
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    // Only the head is inspected; an XML prolog or comment may precede <svg.
    let head = &bytes[..bytes.len().min(1024)];
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        // The cut may split a multi-byte character; keep the valid prefix.
        Err(err) if err.error_len().is_none() => {
            let Ok(text) = std::str::from_utf8(&head[..err.valid_up_to()]) else {
                return false;
            };
            text
        }
        Err(_) => return false,
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    (text.starts_with("<svg") || text.starts_with("<?xml") || text.starts_with("<!--"))
        && text.contains("<svg")
}

/// A validated logo image.
#[derive(Clone, PartialEq, Eq)]
pub struct LogoImage {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl LogoImage {
    /// Validates raw file contents.
    ///
    /// # Errors
    ///
    /// Returns [`LogoError::PayloadTooLarge`] above [`MAX_LOGO_BYTES`] and
    /// [`LogoError::UnsupportedFormat`] when the bytes are not a known image.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LogoError> {
        if bytes.len() > MAX_LOGO_BYTES {
            return Err(LogoError::PayloadTooLarge {
                size: bytes.len(),
                limit: MAX_LOGO_BYTES,
            });
        }
        let format = ImageFormat::sniff(&bytes).ok_or(LogoError::UnsupportedFormat)?;
        Ok(Self { format, bytes })
    }

    /// Decodes a `data:<mime>;base64,<payload>` URL.
    ///
    /// The declared MIME type is ignored; the payload is validated exactly
    /// like [`LogoImage::from_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`LogoError::MalformedDataUrl`] when the URL or its base64
    /// payload cannot be decoded, otherwise the errors of `from_bytes`.
    pub fn from_data_url(url: &str) -> Result<Self, LogoError> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or(LogoError::MalformedDataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(LogoError::MalformedDataUrl)?;
        if !header.ends_with(";base64") {
            return Err(LogoError::MalformedDataUrl);
        }
        // Encoders may wrap base64 at 76 columns.
        let payload: String = payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        // Reject before decoding anything that cannot fit once decoded.
        if payload.len() / 4 * 3 > MAX_LOGO_BYTES + 3 {
            return Err(LogoError::PayloadTooLarge {
                size: payload.len() / 4 * 3,
                limit: MAX_LOGO_BYTES,
            });
        }
        let bytes = STANDARD
            .decode(&payload)
            .map_err(|_| LogoError::MalformedDataUrl)?;
        Self::from_bytes(bytes)
    }

    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encodes the image as a `data:` URL suitable for an `<img src>`.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }
}

impl std::fmt::Debug for LogoImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoImage")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}
