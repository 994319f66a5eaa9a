//! Transport-neutral request and response values.

use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::Delete => "delete",
        }
    }
}

/// One part of a `multipart/form-data` body.
#[derive(Clone, Debug, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PartValue::Text(value.into()),
        }
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            value: PartValue::File {
                file_name: file_name.into(),
                mime: mime.into(),
                bytes,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }

    /// The JSON value, if this is a JSON body.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            RequestBody::Json(value) => Some(value),
            RequestBody::Multipart(_) => None,
        }
    }

    /// Text value of a multipart field, if present.
    pub fn text_part(&self, name: &str) -> Option<&str> {
        let RequestBody::Multipart(parts) = self else {
            return None;
        };
        parts.iter().find_map(|p| match &p.value {
            PartValue::Text(text) if p.name == name => Some(text.as_str()),
            _ => None,
        })
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

/// A request relative to the API base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `method-url-params-body`; identical keys share one debounced GET.
    pub fn debounce_key(&self) -> String {
        let params = serde_json::to_string(&self.query).unwrap_or_default();
        let body = match &self.body {
            Some(RequestBody::Json(value)) => value.to_string(),
            Some(RequestBody::Multipart(parts)) => format!("{parts:?}"),
            None => String::new(),
        };
        format!("{}-{}-{}-{}", self.method.as_str(), self.path, params, body)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_debounce_key_distinguishes_params() {
        let a = ApiRequest::new(Method::Get, "/leads/")
            .with_query(vec![("page".into(), "1".into())]);
        let b = ApiRequest::new(Method::Get, "/leads/")
            .with_query(vec![("page".into(), "2".into())]);
        assert_ne!(a.debounce_key(), b.debounce_key());
        assert_eq!(a.debounce_key(), a.clone().debounce_key());
        assert!(a.debounce_key().starts_with("get-/leads/-"));
    }

    #[test]
    fn test_text_part_lookup() {
        let body = RequestBody::Multipart(vec![
            FormPart::text("title", "Villa"),
            FormPart::file("image", "a.png", "image/png", vec![1, 2]),
        ]);
        assert_eq!(body.text_part("title"), Some("Villa"));
        assert_eq!(body.text_part("image"), None);
        assert!(RequestBody::from(json!({})).as_json().is_some());
    }
}
