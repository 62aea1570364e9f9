//! Video export: request model, wire format and encoder clients.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Prefix of a PNG data URL.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No frames to export")]
    NoFrames,
    #[error("Failed to render frame {index}: {message}")]
    Render { index: usize, message: String },
    #[error("Could not reach the video service: {0}")]
    Transport(String),
    #[error("Video service returned {code}: {message}")]
    Status { code: u16, message: String },
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Boxed future for encoder calls (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Ordered PNG stills plus the playback rate for the video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    pub frames: Vec<Vec<u8>>,
    pub fps: u32,
}

/// JSON body sent to the video render service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderVideoBody {
    /// Frames as `data:image/png;base64,...` URLs.
    pub frames: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
}

impl From<&EncodeRequest> for RenderVideoBody {
    fn from(request: &EncodeRequest) -> Self {
        Self {
            frames: request.frames.iter().map(|png| to_data_url(png)).collect(),
            fps: Some(request.fps),
        }
    }
}

/// Encode PNG bytes as a data URL.
pub fn to_data_url(png: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png))
}

/// Decode a frame from the wire. The data URL prefix is optional.
pub fn from_data_url(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = data.strip_prefix(PNG_DATA_URL_PREFIX).unwrap_or(data);
    STANDARD.decode(payload)
}

/// Turns an ordered sequence of stills into a video.
///
/// Note: On native platforms, implementations must be Send + Sync.
#[cfg(not(target_arch = "wasm32"))]
pub trait VideoEncoder: Send + Sync {
    /// Encode the frames, returning the video bytes.
    fn encode<'a>(&'a self, request: &'a EncodeRequest) -> BoxFuture<'a, ExportResult<Vec<u8>>>;
}

/// Turns an ordered sequence of stills into a video (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait VideoEncoder {
    /// Encode the frames, returning the video bytes.
    fn encode<'a>(&'a self, request: &'a EncodeRequest) -> BoxFuture<'a, ExportResult<Vec<u8>>>;
}

/// Encoder backed by the `flipink-server` HTTP endpoint.
#[cfg(not(target_arch = "wasm32"))]
pub struct HttpVideoEncoder {
    client: reqwest::Client,
    endpoint: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpVideoEncoder {
    /// `endpoint` is the service base URL, e.g. `http://localhost:3000`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn render_url(&self) -> String {
        format!("{}/render-video", self.endpoint.trim_end_matches('/'))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl VideoEncoder for HttpVideoEncoder {
    fn encode<'a>(&'a self, request: &'a EncodeRequest) -> BoxFuture<'a, ExportResult<Vec<u8>>> {
        Box::pin(async move {
            if request.frames.is_empty() {
                return Err(ExportError::NoFrames);
            }
            let body = RenderVideoBody::from(request);
            let url = self.render_url();
            log::info!("Posting {} frames to {}", body.frames.len(), url);

            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| ExportError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(ExportError::Status {
                    code: status.as_u16(),
                    message,
                });
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| ExportError::Transport(e.to_string()))?;
            Ok(bytes.to_vec())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_wire_format() {
        let request = EncodeRequest {
            frames: vec![vec![0x89, b'P', b'N', b'G'], vec![1, 2, 3]],
            fps: 10,
        };
        let json = serde_json::to_value(RenderVideoBody::from(&request)).unwrap();
        assert_eq!(json["fps"], 10);
        assert_eq!(json["frames"][0], "data:image/png;base64,iVBORw==");
        assert_eq!(json["frames"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_fps_parses() {
        let body: RenderVideoBody = serde_json::from_str(r#"{"frames": []}"#).unwrap();
        assert!(body.frames.is_empty());
        assert_eq!(body.fps, None);
    }

    #[test]
    fn test_data_url_round_trip_and_bare_base64() {
        let png = vec![0u8, 255, 17, 42];
        assert_eq!(from_data_url(&to_data_url(&png)).unwrap(), png);
        assert_eq!(from_data_url("AP8RKg==").unwrap(), png);
        assert!(from_data_url("data:image/png;base64,@@@").is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_render_url() {
        let encoder = HttpVideoEncoder::new("http://localhost:3000/");
        assert_eq!(encoder.render_url(), "http://localhost:3000/render-video");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_http_encoder_rejects_empty_request() {
        let encoder = HttpVideoEncoder::new("http://127.0.0.1:9");
        let request = EncodeRequest { frames: Vec::new(), fps: 10 };
        let result = pollster::block_on(encoder.encode(&request));
        assert!(matches!(result, Err(ExportError::NoFrames)));
    }
}
