//! Self-describing raster payloads.
//!
//! Every image crosses the API as `{format, data}` where `data` is standard
//! base64. A client can decode any one of them without looking at its
//! siblings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, PartialEq)]
pub enum ImageError {
    #[error("image payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("image payload is empty")]
    Empty,
    #[error("unrecognized raster format")]
    UnknownFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Tiff,
    Webp,
}

impl ImageFormat {
    /// Identify a raster from its leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(Self::Tiff),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Tiff => "image/tiff",
            Self::Webp => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Tiff => "tif",
            Self::Webp => "webp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EncodedImage {
    pub format: ImageFormat,
    /// Standard base64 of the raster bytes.
    pub data: String,
}

impl EncodedImage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        let format = ImageFormat::sniff(bytes).ok_or(ImageError::UnknownFormat)?;
        Ok(Self {
            format,
            data: STANDARD.encode(bytes),
        })
    }

    /// Normalize a bare base64 string (optionally a `data:` URL) into a
    /// tagged image. The tag always comes from the decoded bytes.
    pub fn from_base64(payload: &str) -> Result<Self, ImageError> {
        let raw = strip_data_url(payload.trim());
        let bytes = STANDARD.decode(raw)?;
        Self::from_bytes(&bytes)
    }

    /// Accept an image the producer already tagged, checking that the tag
    /// matches the bytes.
    pub fn from_tagged(format: ImageFormat, payload: &str) -> Result<Self, ImageError> {
        let image = Self::from_base64(payload)?;
        if image.format != format {
            log::warn!(
                "Image tagged as {format:?} but content is {:?}; using content type",
                image.format
            );
        }
        Ok(image)
    }

    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        Ok(STANDARD.decode(&self.data)?)
    }
}

fn strip_data_url(s: &str) -> &str {
    match s.strip_prefix("data:") {
        Some(rest) => rest.split_once(";base64,").map_or(s, |(_, data)| data),
        None => s,
    }
}
