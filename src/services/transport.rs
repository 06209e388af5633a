// ============================================================================
// TRANSPORT - One-shot HTTP exchange (gloo-net in the browser)
// ============================================================================
// No retries, no caching: every call is a single request with the
// browser's default timeout.
// ============================================================================

use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::services::error::ApiError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime_type: String,
        bytes: Rc<Vec<u8>>,
    },
}

#[derive(Clone, PartialEq, Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormField>),
}

#[derive(Clone, PartialEq, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `fetch` through gloo-net
#[derive(Clone, Copy, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Delete => Request::delete(&request.url),
        };

        if !request.query.is_empty() {
            builder = builder.query(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(fields) => {
                // The browser sets the multipart boundary itself
                let form = build_form_data(fields)
                    .map_err(|e| ApiError::Request(format!("FormData: {:?}", e)))?;
                builder.body(form)
            }
        }
        .map_err(|e| ApiError::Request(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .binary()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}

fn build_form_data(fields: &[FormField]) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for field in fields {
        match field {
            FormField::Text { name, value } => form.append_with_str(name, value)?,
            FormField::File {
                name,
                file_name,
                mime_type,
                bytes,
            } => {
                let parts = js_sys::Array::new();
                parts.push(&js_sys::Uint8Array::from(bytes.as_slice()).into());
                let options = BlobPropertyBag::new();
                options.set_type(mime_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
                form.append_with_blob_and_filename(name, &blob, file_name)?;
            }
        }
    }
    Ok(form)
}
