use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uiforge_core::{
    GenerationRequest, GenerationResult, HistoryEntry, HistoryEntrySummary, SaveReceipt, Strategy,
    StrategyDraft, StrategySummary,
};

use crate::{ApiError, FailureKind};

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The generation service's HTTP surface.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// `GET /strategies`
    async fn list_strategies(&self) -> Result<Vec<StrategySummary>, ApiError>;
    /// `GET /strategies/{filename}`
    async fn get_strategy(&self, filename: &str) -> Result<Strategy, ApiError>;
    /// `POST /strategies/save`
    async fn save_strategy(&self, draft: &StrategyDraft) -> Result<SaveReceipt, ApiError>;
    /// `POST /generate`
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ApiError>;
    /// `GET /history`
    async fn list_history(&self) -> Result<Vec<HistoryEntrySummary>, ApiError>;
    /// `GET /history/{id}`
    async fn get_history_item(&self, id: &str) -> Result<HistoryEntry, ApiError>;
}

/// [`Backend`] over reqwest.
///
/// One client (and so one cookie jar) lives as long as the backend: history
/// is scoped to the session cookie the service hands out.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    base: Url,
    client: reqwest::Client,
    max_response_bytes: u64,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }

        // No overall request timeout: generation can take as long as the model does.
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .cookie_store(true)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            base,
            client,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::new(FailureKind::InvalidUrl, self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        engine_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_json(response).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        engine_debug!("POST {}", url);
        let payload = serde_json::to_vec(body)
            .map_err(|err| ApiError::new(FailureKind::Malformed, err.to_string()))?;
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_json(response).await
    }

    /// Reads the body under the size limit, then classifies it.
    ///
    /// An `error` field wins over the status code: the service reports its
    /// own failures as `{error}` with 4xx/5xx.
    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_response_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_response_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }

        let value: Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(ApiError::new(
                    FailureKind::HttpStatus(status.as_u16()),
                    status.to_string(),
                ));
            }
            Err(err) => return Err(ApiError::new(FailureKind::Malformed, err.to_string())),
        };

        if let Some(message) = server_error(&value) {
            return Err(ApiError::new(FailureKind::Server, message));
        }
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|err| ApiError::new(FailureKind::Malformed, err.to_string()))
    }

    fn too_large(&self, actual: Option<u64>) -> ApiError {
        ApiError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_response_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn list_strategies(&self) -> Result<Vec<StrategySummary>, ApiError> {
        self.get_json(self.endpoint(&["strategies"])?).await
    }

    async fn get_strategy(&self, filename: &str) -> Result<Strategy, ApiError> {
        let mut strategy: Strategy = self
            .get_json(self.endpoint(&["strategies", filename])?)
            .await?;
        if strategy.filename.is_empty() {
            strategy.filename = filename.to_string();
        }
        Ok(strategy)
    }

    async fn save_strategy(&self, draft: &StrategyDraft) -> Result<SaveReceipt, ApiError> {
        self.post_json(self.endpoint(&["strategies", "save"])?, draft)
            .await
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ApiError> {
        self.post_json(self.endpoint(&["generate"])?, request).await
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntrySummary>, ApiError> {
        self.get_json(self.endpoint(&["history"])?).await
    }

    async fn get_history_item(&self, id: &str) -> Result<HistoryEntry, ApiError> {
        let mut entry: HistoryEntry = self.get_json(self.endpoint(&["history", id])?).await?;
        if entry.id.is_empty() {
            entry.id = id.to_string();
        }
        Ok(entry)
    }
}

/// A present, non-empty `error` field, stringified if it is not a string.
fn server_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
