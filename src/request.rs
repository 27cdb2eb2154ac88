use anyhow::{Context, Result};
use std::path::Path;

#[cfg(test)]
mod tests;

/// An image attached to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let mime_type = mime_type_for(path).to_string();
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }
}

pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// What gets sent to the analysis endpoint.
///
/// There is no empty variant: a request carries a name, an image, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    /// Name only, sent as `GET ?query=`.
    Query { name: String },
    /// Image with an optional name, sent as a multipart `POST`.
    Upload {
        name: Option<String>,
        image: ImageFile,
    },
}

impl AnalysisRequest {
    /// Picks the request shape from the raw form values.
    ///
    /// The name is trimmed; a blank name counts as absent. Returns `None`
    /// when neither a name nor an image is present.
    pub fn from_form(name: &str, image: Option<ImageFile>) -> Option<Self> {
        let name = Some(name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        match (name, image) {
            (name, Some(image)) => Some(AnalysisRequest::Upload { name, image }),
            (Some(name), None) => Some(AnalysisRequest::Query { name }),
            (None, None) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            AnalysisRequest::Query { name } => Some(name),
            AnalysisRequest::Upload { name, .. } => name.as_deref(),
        }
    }

    pub fn has_image(&self) -> bool {
        matches!(self, AnalysisRequest::Upload { .. })
    }
}
