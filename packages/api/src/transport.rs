//! # HTTP transport
//!
//! [`Transport`] is the seam between [`crate::ApiClient`] (interceptors,
//! debounce) and the HTTP library. [`ReqwestTransport`] is the production
//! implementation; tests use [`crate::mock::MockTransport`].
//!
//! A transport only moves bytes: it resolves the path against the base URL,
//! encodes the body, and decodes whatever JSON comes back. Status handling
//! belongs to the client.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use store::config::ApiSettings;

use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse, FormPart, Method, PartValue, RequestBody};

#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// reqwest-backed transport.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    with_credentials: bool,
}

impl ReqwestTransport {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(settings.timeout_secs.min(5)));

        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            with_credentials: settings.with_credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn multipart_form(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File {
                file_name,
                mime,
                bytes,
            } => {
                let file = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&mime)
                    .map_err(|e| ApiError::Invalid(format!("invalid file type {mime}: {e}")))?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}

fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        #[cfg(target_arch = "wasm32")]
        if self.with_credentials {
            builder = builder.fetch_credentials_include();
        }

        builder = match request.body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Multipart(parts)) => builder.multipart(multipart_form(parts)?),
            None => builder,
        };

        tracing::debug!("{} {}", request.method.as_str().to_uppercase(), url);

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(ApiResponse {
            status,
            body: decode_body(&text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let transport = ReqwestTransport::new(&ApiSettings {
            base_url: "http://localhost:8000/api/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(transport.url("/leads/"), "http://localhost:8000/api/leads/");
        assert_eq!(transport.url("leads/3/"), "http://localhost:8000/api/leads/3/");
        assert_eq!(
            transport.url("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("{\"ok\":true}")["ok"], true);
        assert_eq!(decode_body("<html>"), Value::String("<html>".into()));
    }
}
