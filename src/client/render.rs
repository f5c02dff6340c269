//! Document generation and image upload against the external renderer
//!
//! The returned markup is opaque: this client never inspects or repairs
//! it. Layout and typesetting are the renderer's business.

use serde::{Deserialize, Serialize};

use crate::client::{ClientError, ClientResult};
use crate::core::config::{AppConfig, FormattingOptions};
use crate::core::section::Section;

/// Client for the external document renderer.
#[derive(Debug, Clone)]
pub struct RenderClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    sections: &'a [Section],
    formatting: &'a FormattingOptions,
    include_toc: bool,
    template: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_break_mode: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    success: bool,
    html: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    url: Option<String>,
    error: Option<String>,
}

impl RenderClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Render the full document with the configured formatting, template,
    /// and page break mode.
    pub async fn generate(&self, sections: &[Section], config: &AppConfig) -> ClientResult<String> {
        let request = GenerateRequest {
            sections,
            formatting: &config.formatting,
            include_toc: config.include_toc,
            template: &config.template,
            page_break_mode: config.page_break_mode.as_deref(),
        };
        self.post_generate(&request).await
    }

    /// Render a single section. A partial document has no meaningful table
    /// of contents, so `include_toc` is never set here, and no page break
    /// mode is forwarded.
    pub async fn preview_section(
        &self,
        section: &Section,
        config: &AppConfig,
    ) -> ClientResult<String> {
        let request = GenerateRequest {
            sections: std::slice::from_ref(section),
            formatting: &config.formatting,
            include_toc: false,
            template: &config.template,
            page_break_mode: None,
        };
        self.post_generate(&request).await
    }

    async fn post_generate(&self, request: &GenerateRequest<'_>) -> ClientResult<String> {
        tracing::debug!(
            template = request.template,
            sections = request.sections.len(),
            include_toc = request.include_toc,
            "requesting document generation"
        );
        let response: GenerateResponse = self
            .http
            .post(format!("{}/api/generate-document", self.base_url))
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            response
                .html
                .ok_or_else(|| ClientError::Remote("renderer returned no markup".to_string()))
        } else {
            Err(ClientError::Remote(response.error.unwrap_or_else(|| {
                "document generation failed".to_string()
            })))
        }
    }

    /// Upload one image file; on success the returned URL is ready to be
    /// appended to an image block.
    pub async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> ClientResult<String> {
        if filename.is_empty() {
            return Err(ClientError::EmptyInput("file name"));
        }

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("image", part);

        tracing::debug!(filename, "uploading image");
        let response: UploadResponse = self
            .http
            .post(format!("{}/api/upload-image", self.base_url))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            response
                .url
                .ok_or_else(|| ClientError::Remote("upload returned no URL".to_string()))
        } else {
            Err(ClientError::Remote(
                response.error.unwrap_or_else(|| "upload failed".to_string()),
            ))
        }
    }
}
