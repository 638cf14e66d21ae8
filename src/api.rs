// API client module: a small blocking HTTP client that pushes one image
// to the file storage service's `/files` endpoint. The whole payload is
// built in memory before any request goes out.

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Address of the storage service. There is no configuration path for it.
pub const DEFAULT_BASE_URL: &str = "http://0.0.0.0:5000";

const FILES_PATH: &str = "/files";

/// Header carrying the session token expected by the storage service.
pub const TOKEN_HEADER: &str = "x-token";

/// Kinds of entries the storage service accepts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Folder,
    File,
    Image,
}

/// JSON body of `POST /files`. Built once and never modified.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    name: String,
    #[serde(rename = "type")]
    file_type: FileType,
    is_public: bool,
    data: String,
    parent_id: String,
}

impl UploadRequest {
    /// Public image named after the last segment of `path`, with `data`
    /// already base64-encoded.
    pub fn image(path: &str, data: String, parent_id: &str) -> Self {
        UploadRequest {
            name: display_name(path).to_string(),
            file_type: FileType::Image,
            is_public: true,
            data,
            parent_id: parent_id.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }
}

/// Everything after the last path separator, or the whole path when it
/// has none. A trailing separator yields an empty name.
pub fn display_name(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or(path)
}

/// Read the whole file and encode it as standard padded base64.
pub fn encode_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file {}", path.display()))?;
    Ok(general_purpose::STANDARD.encode(bytes))
}

/// Status and raw body of whatever the server answered.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text; invalid UTF-8 sequences are replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> ResponseJson {
        ResponseJson::from_body(&self.body)
    }
}

/// Result of trying to read the response body as JSON. A body that does
/// not parse is not an error for the caller, just `Undecodable`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseJson {
    Parsed(serde_json::Value),
    Undecodable,
}

impl ResponseJson {
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(value) => ResponseJson::Parsed(value),
            Err(_) => ResponseJson::Undecodable,
        }
    }

    /// `error` field of a `{"error": "..."}` reply.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResponseJson::Parsed(value) => value.get("error").and_then(|e| e.as_str()),
            ResponseJson::Undecodable => None,
        }
    }

    /// `id` of the stored file in a successful reply.
    pub fn file_id(&self) -> Option<String> {
        match self {
            ResponseJson::Parsed(value) => match value.get("id")? {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            },
            ResponseJson::Undecodable => None,
        }
    }
}

/// Blocking client bound to one storage service.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`. No request timeout is set: a call
    /// blocks until the server answers or the transport fails.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client for the fixed storage service address.
    pub fn default_endpoint() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn files_url(&self) -> String {
        format!("{}{}", self.base_url, FILES_PATH)
    }

    /// Header set for an upload: the token, forwarded verbatim.
    pub fn token_headers(token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(token).context("Token is not a valid header value")?;
        headers.insert(HeaderName::from_static(TOKEN_HEADER), value);
        Ok(headers)
    }

    /// POST the request as JSON. Any HTTP status is returned as an
    /// outcome; only transport failures are errors.
    pub fn upload(&self, req: &UploadRequest, token: &str) -> Result<UploadOutcome> {
        let headers = Self::token_headers(token)?;
        let url = self.files_url();
        debug!(%url, name = req.name(), encoded_len = req.data().len(), "sending upload");

        let res = self
            .client
            .post(&url)
            .headers(headers)
            .json(req)
            .send()
            .context("Failed to send upload request")?;
        let status = res.status().as_u16();
        let body = res
            .bytes()
            .context("Failed to read upload response body")?
            .to_vec();
        debug!(status, body_len = body.len(), "upload answered");
        Ok(UploadOutcome { status, body })
    }

    /// Read, encode and upload the image at `path` under `parent_id`.
    /// The file is read before any network access.
    pub fn upload_image(&self, path: &str, token: &str, parent_id: &str) -> Result<UploadOutcome> {
        let data = encode_file(Path::new(path))?;
        let req = UploadRequest::image(path, data, parent_id);
        self.upload(&req, token)
    }
}
