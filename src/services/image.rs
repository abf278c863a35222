// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Photo payload handling.
//!
//! The API carries photos as bare base64. Displays want a data URI, so the
//! prefix is added on the way in and stripped on the way out.

use crate::error::ClientError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

const DATA_URI_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";
const DEFAULT_MIME: &str = "image/jpeg";

/// A photo ready to be sent as quest proof.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    mime: String,
    base64: String,
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("mime", &self.mime)
            .field("base64_len", &self.base64.len())
            .finish()
    }
}

impl CapturedImage {
    /// Wrap raw image bytes.
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Result<Self, ClientError> {
        if bytes.is_empty() {
            return Err(ClientError::InvalidImage("empty image".to_string()));
        }
        Ok(Self {
            mime: mime.to_string(),
            base64: STANDARD.encode(bytes),
        })
    }

    /// Read a photo file, guessing the MIME type from its extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| ClientError::InvalidImage(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes, mime_for_path(path))
    }

    /// Accept either a data URI or bare base64.
    pub fn from_data_uri(data: &str) -> Result<Self, ClientError> {
        let (mime, payload) = split_data_uri(data);
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(ClientError::InvalidImage("empty image".to_string()));
        }
        STANDARD
            .decode(payload)
            .map_err(|e| ClientError::InvalidImage(e.to_string()))?;

        Ok(Self {
            mime: mime.unwrap_or(DEFAULT_MIME).to_string(),
            base64: payload.to_string(),
        })
    }

    /// Base64 payload as sent on the wire.
    pub fn as_base64(&self) -> &str {
        &self.base64
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// `data:` URI for display.
    pub fn to_data_uri(&self) -> String {
        format!("{}{}{}{}", DATA_URI_SCHEME, self.mime, BASE64_MARKER, self.base64)
    }

    /// Decoded image bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ClientError> {
        STANDARD
            .decode(&self.base64)
            .map_err(|e| ClientError::InvalidImage(e.to_string()))
    }
}

/// Add the display prefix to a bare base64 photo from the server.
pub fn to_data_uri(base64: &str) -> String {
    format!("{}{}{}{}", DATA_URI_SCHEME, DEFAULT_MIME, BASE64_MARKER, base64)
}

/// Strip a data-URI prefix if present.
pub fn strip_data_uri(data: &str) -> &str {
    split_data_uri(data).1
}

fn split_data_uri(data: &str) -> (Option<&str>, &str) {
    if let Some(rest) = data.strip_prefix(DATA_URI_SCHEME) {
        if let Some((mime, payload)) = rest.split_once(BASE64_MARKER) {
            let mime = (!mime.is_empty()).then_some(mime);
            return (mime, payload);
        }
    }
    (None, data)
}

fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => DEFAULT_MIME,
    }
}
