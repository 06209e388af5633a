// ============================================================================
// API CLIENT - Single choke-point for backend calls
// ============================================================================
// Attaches the session token, normalizes failures into ApiError and decodes
// one explicit schema per endpoint. No business logic lives here.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::document::{
    DocumentDetail, DocumentId, DocumentSummary, DownloadFormat, SelectedFile, UploadAck,
};
use crate::models::generation::{GeneratedDocument, GenerationRequest};
use crate::models::style::StyleLearningResult;
use crate::models::token_usage::TokenUsageStats;
use crate::services::error::ApiError;
use crate::services::session_service::SessionHolder;
use crate::services::transport::{
    FormField, HttpRequest, HttpResponse, Method, RequestBody, Transport,
};

/// Server-side search parameters; empty values are not sent
#[derive(Clone, PartialEq, Debug, Default)]
pub struct DocumentQuery {
    pub keyword: String,
    pub document_type: Option<String>,
}

impl DocumentQuery {
    pub fn is_empty(&self) -> bool {
        self.keyword.trim().is_empty() && self.document_type.as_deref().unwrap_or("").is_empty()
    }

    fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let keyword = self.keyword.trim();
        if !keyword.is_empty() {
            params.push(("keyword".to_string(), keyword.to_string()));
        }
        if let Some(kind) = self.document_type.as_deref().filter(|t| !t.is_empty()) {
            params.push(("type".to_string(), kind.to_string()));
        }
        params
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    session: SessionHolder,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn Transport>, session: SessionHolder) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    /// Send one request and map non-2xx statuses to `ApiError`
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let mut headers = Vec::new();
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            query: options.query,
            headers,
            body,
        };

        log::debug!("🌐 [API] {} {}", method.as_str(), path);
        let response = self.transport.execute(request).await?;

        if response.ok() {
            return Ok(response);
        }
        let error = error_from_response(&response);
        log::warn!("⚠️ [API] {} {} failed: {}", method.as_str(), path, error);
        Err(error)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.send(Method::Get, path, RequestBody::Empty, options)
            .await?
            .json()
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.send(Method::Post, path, RequestBody::Json(value), RequestOptions::default())
            .await?
            .json()
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/register", request).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/login", request).await
    }

    pub async fn upload_document(
        &self,
        user_id: i64,
        file: &SelectedFile,
        summarize: bool,
    ) -> Result<UploadAck, ApiError> {
        let fields = vec![
            FormField::File {
                name: "file".to_string(),
                file_name: file.name.clone(),
                mime_type: file.mime_type.clone(),
                bytes: file.bytes.clone(),
            },
            FormField::Text {
                name: "userId".to_string(),
                value: user_id.to_string(),
            },
            FormField::Text {
                name: "summarize".to_string(),
                value: summarize.to_string(),
            },
        ];
        let response = self
            .send(
                Method::Post,
                "/documents/upload",
                RequestBody::Multipart(fields),
                RequestOptions::default(),
            )
            .await?;

        // Some backends answer with a plain-text ack
        if response.body.is_empty() {
            return Ok(UploadAck::default());
        }
        Ok(response.json().unwrap_or_else(|_| UploadAck {
            message: Some(response.text()),
            ..UploadAck::default()
        }))
    }

    pub async fn list_documents(&self, user_id: i64) -> Result<Vec<DocumentSummary>, ApiError> {
        self.get_json(
            &format!("/mysql/documents/user/{}", user_id),
            RequestOptions::default(),
        )
        .await
    }

    /// Falls back to the plain list when the query is empty
    pub async fn search_documents(
        &self,
        user_id: i64,
        query: &DocumentQuery,
    ) -> Result<Vec<DocumentSummary>, ApiError> {
        if query.is_empty() {
            return self.list_documents(user_id).await;
        }
        self.get_json(
            &format!("/mysql/documents/user/{}/search", user_id),
            RequestOptions {
                query: query.params(),
            },
        )
        .await
    }

    pub async fn delete_document(&self, document_id: DocumentId) -> Result<(), ApiError> {
        self.send(
            Method::Delete,
            &format!("/mysql/documents/{}", document_id),
            RequestBody::Empty,
            RequestOptions::default(),
        )
        .await
        .map(|_| ())
    }

    pub async fn document_detail(&self, document_id: DocumentId) -> Result<DocumentDetail, ApiError> {
        self.get_json(
            &format!("/integrated/documents/{}", document_id),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn download_document(
        &self,
        document_id: DocumentId,
        format: DownloadFormat,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self
            .send(
                Method::Get,
                &format!("/integrated/documents/{}/download", document_id),
                RequestBody::Empty,
                RequestOptions {
                    query: vec![("format".to_string(), format.as_str().to_string())],
                },
            )
            .await?;
        Ok(response.body)
    }

    pub async fn generate_document(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedDocument, ApiError> {
        self.post_json("/documents/generate", request).await
    }

    pub async fn learn_style(&self, user_id: i64) -> Result<StyleLearningResult, ApiError> {
        let response = self
            .send(
                Method::Post,
                &format!("/style/learn/{}", user_id),
                RequestBody::Empty,
                RequestOptions::default(),
            )
            .await?;
        if response.body.is_empty() {
            return Ok(StyleLearningResult::default());
        }
        response.json()
    }

    pub async fn token_usage(&self, user_id: i64) -> Result<TokenUsageStats, ApiError> {
        self.get_json(
            &format!("/token-usage/stats/{}", user_id),
            RequestOptions::default(),
        )
        .await
    }
}

/// Prefer the backend's own message (`message` / `error` field or a plain
/// text body) over the generic status text
fn error_from_response(response: &HttpResponse) -> ApiError {
    if response.status == 401 {
        return ApiError::Unauthorized;
    }

    let parsed = serde_json::from_slice::<serde_json::Value>(&response.body).ok();
    let from_body = match parsed {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()).map(str::to_string)),
        Some(_) => None,
        // Plain text bodies are used as-is, HTML error pages are not
        None => {
            let text = response.text();
            let text = text.trim();
            (!text.starts_with('<')).then(|| text.to_string())
        }
    };

    let message = from_body
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            if response.status_text.is_empty() {
                format!("HTTP {}", response.status)
            } else {
                response.status_text.clone()
            }
        });

    ApiError::Http {
        status: response.status,
        message,
    }
}
