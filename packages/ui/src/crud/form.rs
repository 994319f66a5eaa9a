//! Form state, validation and request payloads for the CRUD manager.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use api::{FormPart, RequestBody};
use regex::Regex;
use serde_json::{Map, Value};

use super::descriptor::{FieldKind, FormField};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Field name to error message.
pub type FieldErrors = BTreeMap<String, String>;

/// A file picked in the browser, not yet uploaded.
#[derive(Clone, Debug, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            mime: mime_for(&file_name).to_string(),
            file_name,
            bytes,
        }
    }
}

/// Content type guessed from the file extension.
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    /// Text input value. For file fields, the URL of the existing file.
    Text(String),
    Bool(bool),
    List(Vec<String>),
    File(FileUpload),
}

impl FieldValue {
    fn is_present(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Bool(_) | FieldValue::File(_) => true,
            FieldValue::List(items) => !items.is_empty(),
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            _ => "",
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }

    pub fn as_list(&self) -> &[String] {
        match self {
            FieldValue::List(items) => items,
            _ => &[],
        }
    }

    fn is_upload(&self) -> bool {
        matches!(self, FieldValue::File(_))
    }
}

/// Current values of a CRUD form, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormData {
    values: BTreeMap<String, FieldValue>,
}

impl FormData {
    /// Blank form for a new record.
    pub fn empty(fields: &[FormField]) -> Self {
        let values = fields
            .iter()
            .map(|field| {
                let value = match field.kind {
                    FieldKind::Checkbox => FieldValue::Bool(false),
                    FieldKind::MultiSelect => FieldValue::List(Vec::new()),
                    _ => FieldValue::Text(String::new()),
                };
                (field.name.to_string(), value)
            })
            .collect();
        Self { values }
    }

    /// Form pre-filled from an existing record.
    pub fn from_item(fields: &[FormField], item: &Value) -> Self {
        let values = fields
            .iter()
            .map(|field| (field.name.to_string(), prefill(field, item)))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> &FieldValue {
        self.values.get(name).unwrap_or(&FieldValue::Null)
    }

    pub fn text(&self, name: &str) -> &str {
        self.get(name).as_text()
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn set_text(&mut self, name: &str, text: impl Into<String>) {
        self.set(name, FieldValue::Text(text.into()));
    }

    /// Add or remove one option of a multi-select.
    pub fn toggle(&mut self, name: &str, option: &str, selected: bool) {
        let mut items = self.get(name).as_list().to_vec();
        items.retain(|item| item != option);
        if selected {
            items.push(option.to_string());
        }
        self.set(name, FieldValue::List(items));
    }
}

fn prefill(field: &FormField, item: &Value) -> FieldValue {
    let raw = item.get(field.name).unwrap_or(&Value::Null);
    match field.kind {
        FieldKind::Password => FieldValue::Text(String::new()),
        FieldKind::File => {
            let url = item
                .get(&format!("{}_url", field.name))
                .and_then(Value::as_str)
                .filter(|url| !url.is_empty());
            match url {
                Some(url) => FieldValue::Text(url.to_string()),
                None => FieldValue::Text(raw.as_str().unwrap_or_default().to_string()),
            }
        }
        FieldKind::Checkbox => FieldValue::Bool(match raw {
            Value::Bool(b) => *b,
            Value::String(s) => s == "true",
            _ => false,
        }),
        FieldKind::MultiSelect => FieldValue::List(match raw {
            Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
            Value::String(s) => split_list(s),
            _ => Vec::new(),
        }),
        FieldKind::Tags => FieldValue::Text(match raw {
            Value::Array(items) => items
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(", "),
            other => scalar_text(other).unwrap_or_default(),
        }),
        FieldKind::Date => {
            let text = scalar_text(raw).unwrap_or_default();
            FieldValue::Text(text.chars().take(10).collect())
        }
        FieldKind::Select => FieldValue::Text(match raw {
            // A nested relation selects by its id.
            Value::Object(_) => raw.get("id").and_then(scalar_text).unwrap_or_default(),
            other => scalar_text(other).unwrap_or_default(),
        }),
        _ => FieldValue::Text(scalar_text(raw).unwrap_or_default()),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check the form before anything reaches the API.
///
/// `editing` is true when an existing record is being updated; an empty
/// password is then allowed and left out of the payload.
pub fn validate(fields: &[FormField], data: &FormData, editing: bool) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    for field in fields {
        let value = data.get(field.name);
        let text = value.as_text().trim();
        let optional_password = editing && field.kind == FieldKind::Password;

        if field.required && !optional_password && !value.is_present() {
            errors.insert(field.name.to_string(), format!("{} is required", field.label));
        }

        if field.kind == FieldKind::Email && !text.is_empty() && !EMAIL.is_match(text) {
            errors.insert(
                field.name.to_string(),
                "Please enter a valid email address".to_string(),
            );
        }

        if field.kind == FieldKind::Password
            && !field.read_only
            && !text.is_empty()
            && text.chars().count() < MIN_PASSWORD_LEN
        {
            errors.insert(
                field.name.to_string(),
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Request body for the current form values.
///
/// A freshly chosen file anywhere in the form makes the whole body multipart.
/// Otherwise the body is JSON; when a file field still points at a stored
/// file, URL values are made relative to the media origin.
pub fn build_payload(
    fields: &[FormField],
    data: &FormData,
    editing: bool,
    media_origin: &str,
) -> RequestBody {
    let included = fields
        .iter()
        .filter(|field| !omits_password(field, data, editing));

    if fields
        .iter()
        .any(|field| field.is_file() && data.get(field.name).is_upload())
    {
        return RequestBody::Multipart(included.filter_map(|f| multipart_part(f, data)).collect());
    }

    let has_stored_file = fields
        .iter()
        .any(|field| field.is_file() && !data.text(field.name).is_empty());

    let mut body = Map::new();
    for field in included {
        if let Some(value) = json_value(field, data.get(field.name)) {
            body.insert(field.name.to_string(), value);
        }
    }

    if has_stored_file && !media_origin.is_empty() {
        for value in body.values_mut() {
            if let Value::String(s) = value {
                if let Some(relative) = s.strip_prefix(media_origin) {
                    *s = relative.to_string();
                }
            }
        }
    }

    RequestBody::Json(Value::Object(body))
}

fn omits_password(field: &FormField, data: &FormData, editing: bool) -> bool {
    editing && field.kind == FieldKind::Password && data.text(field.name).trim().is_empty()
}

fn multipart_part(field: &FormField, data: &FormData) -> Option<FormPart> {
    let name = field.name;
    match data.get(name) {
        FieldValue::Null => None,
        FieldValue::File(file) => Some(FormPart::file(
            name,
            file.file_name.clone(),
            file.mime.clone(),
            file.bytes.clone(),
        )),
        // The stored file stays as it is on the server.
        FieldValue::Text(_) if field.is_file() => None,
        FieldValue::Text(text) if field.kind == FieldKind::Tags => {
            Some(FormPart::text(name, Value::from(split_list(text)).to_string()))
        }
        FieldValue::Text(text) => Some(FormPart::text(name, text.clone())),
        FieldValue::Bool(b) => Some(FormPart::text(name, b.to_string())),
        FieldValue::List(items) => Some(FormPart::text(name, Value::from(items.clone()).to_string())),
    }
}

fn json_value(field: &FormField, value: &FieldValue) -> Option<Value> {
    let converted = match (field.kind, value) {
        (_, FieldValue::Null) => Value::Null,
        (FieldKind::Checkbox, value) => Value::Bool(value.as_bool()),
        (_, FieldValue::Bool(b)) => Value::Bool(*b),
        (_, FieldValue::List(items)) => Value::from(items.clone()),
        (_, FieldValue::File(_)) => return None,
        (FieldKind::File, FieldValue::Text(url)) if url.is_empty() => return None,
        (FieldKind::Tags, FieldValue::Text(text)) => Value::from(split_list(text)),
        (FieldKind::Number, FieldValue::Text(text)) => number_value(text),
        (FieldKind::Select, FieldValue::Text(text)) if text.is_empty() => Value::Null,
        (_, FieldValue::Text(text)) => Value::String(text.clone()),
    };
    Some(converted)
}

fn number_value(text: &str) -> Value {
    let text = text.trim();
    if text.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = text.parse::<i64>() {
        return Value::from(n);
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::from(n),
        _ => Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user_fields() -> Vec<FormField> {
        vec![
            FormField::text("username", "Username").required(),
            FormField::new("email", "Email", FieldKind::Email).required(),
            FormField::new("password", "Password", FieldKind::Password).required(),
            FormField::new("is_active", "Active", FieldKind::Checkbox),
            FormField::new("age", "Age", FieldKind::Number),
        ]
    }

    fn property_fields() -> Vec<FormField> {
        vec![
            FormField::text("title", "Title").required(),
            FormField::new("price", "Price", FieldKind::Number),
            FormField::new("tags", "Tags", FieldKind::Tags),
            FormField::new("image", "Image", FieldKind::File),
            FormField::new("website", "Website", FieldKind::Url),
        ]
    }

    #[test]
    fn test_required_fields() {
        let fields = user_fields();
        let errors = validate(&fields, &FormData::empty(&fields), false).unwrap_err();

        assert_eq!(errors["username"], "Username is required");
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["password"], "Password is required");
        assert!(!errors.contains_key("is_active"));
    }

    #[test]
    fn test_numeric_zero_is_present() {
        let fields = vec![FormField::new("floor", "Floor", FieldKind::Number).required()];
        let data = FormData::from_item(&fields, &json!({"floor": 0}));
        assert!(validate(&fields, &data, true).is_ok());
    }

    #[test]
    fn test_format_checks() {
        let fields = user_fields();
        let mut data = FormData::empty(&fields);
        data.set_text("username", "sara");
        data.set_text("email", "sara-at-example");
        data.set_text("password", "abc");

        let errors = validate(&fields, &data, false).unwrap_err();
        assert_eq!(errors["email"], "Please enter a valid email address");
        assert_eq!(errors["password"], "Password must be at least 6 characters");

        data.set_text("email", "sara@example.com");
        data.set_text("password", "secret1");
        assert!(validate(&fields, &data, false).is_ok());
    }

    #[test]
    fn test_edit_allows_empty_password_and_omits_it() {
        let fields = user_fields();
        let item = json!({"id": 4, "username": "sara", "email": "s@x.io", "password": "hash"});
        let data = FormData::from_item(&fields, &item);
        assert_eq!(data.text("password"), "");

        assert!(validate(&fields, &data, true).is_ok());
        let body = build_payload(&fields, &data, true, "");
        assert!(body.as_json().unwrap().get("password").is_none());
    }

    #[test]
    fn test_read_only_password_skips_length_check() {
        let fields = vec![FormField::new("password", "Password", FieldKind::Password).read_only()];
        let mut data = FormData::empty(&fields);
        data.set_text("password", "abc");
        assert!(validate(&fields, &data, false).is_ok());
    }

    #[test]
    fn test_prefill_from_record() {
        let fields = vec![
            FormField::new("image", "Image", FieldKind::File),
            FormField::new("features", "Features", FieldKind::MultiSelect),
            FormField::new("tags", "Tags", FieldKind::Tags),
            FormField::new("agent", "Agent", FieldKind::Select),
            FormField::new("listed", "Listed", FieldKind::Date),
        ];
        let item = json!({
            "image": "/media/a.jpg",
            "image_url": "http://localhost:8000/media/a.jpg",
            "features": "pool, gym,",
            "tags": ["sea", "new"],
            "agent": {"id": 3, "name": "Omar"},
            "listed": "2024-05-01T10:00:00Z",
        });
        let data = FormData::from_item(&fields, &item);

        assert_eq!(data.text("image"), "http://localhost:8000/media/a.jpg");
        assert_eq!(data.get("features").as_list(), ["pool", "gym"]);
        assert_eq!(data.text("tags"), "sea, new");
        assert_eq!(data.text("agent"), "3");
        assert_eq!(data.text("listed"), "2024-05-01");
    }

    #[test]
    fn test_plain_json_conversions() {
        let fields = user_fields();
        let mut data = FormData::empty(&fields);
        data.set_text("username", "sara");
        data.set("is_active", FieldValue::Bool(true));
        data.set_text("age", "31");

        let body = build_payload(&fields, &data, false, "http://localhost:8000");
        let json = body.as_json().unwrap();
        assert_eq!(json["is_active"], true);
        assert_eq!(json["age"], 31);
        assert_eq!(json["username"], "sara");
    }

    #[test]
    fn test_tags_become_array() {
        let fields = property_fields();
        let mut data = FormData::empty(&fields);
        data.set_text("tags", "sea view, new ,");
        data.set_text("price", "1250000.5");

        let body = build_payload(&fields, &data, false, "");
        let json = body.as_json().unwrap();
        assert_eq!(json["tags"], json!(["sea view", "new"]));
        assert_eq!(json["price"], 1250000.5);
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_new_upload_makes_multipart() {
        let fields = property_fields();
        let mut data = FormData::empty(&fields);
        data.set_text("title", "Villa");
        data.set_text("tags", "a,b");
        data.set("image", FieldValue::File(FileUpload::new("front.JPG", vec![1, 2, 3])));

        let body = build_payload(&fields, &data, false, "");
        let RequestBody::Multipart(parts) = &body else {
            panic!("expected multipart");
        };
        assert_eq!(body.text_part("title"), Some("Villa"));
        assert_eq!(body.text_part("tags"), Some(r#"["a","b"]"#));
        let image = parts.iter().find(|p| p.name == "image").unwrap();
        assert_eq!(
            image.value,
            api::PartValue::File {
                file_name: "front.JPG".to_string(),
                mime: "image/jpeg".to_string(),
                bytes: vec![1, 2, 3],
            }
        );
    }

    #[test]
    fn test_stored_file_strips_media_origin() {
        let fields = property_fields();
        let item = json!({
            "title": "Villa",
            "image_url": "http://localhost:8000/media/v.jpg",
            "website": "https://villa.example.com",
        });
        let data = FormData::from_item(&fields, &item);

        let body = build_payload(&fields, &data, true, "http://localhost:8000");
        let json = body.as_json().unwrap();
        assert_eq!(json["image"], "/media/v.jpg");
        assert_eq!(json["website"], "https://villa.example.com");
    }

    #[test]
    fn test_toggle_multiselect() {
        let fields = vec![FormField::new("areas", "Areas", FieldKind::MultiSelect)];
        let mut data = FormData::empty(&fields);
        data.toggle("areas", "marina", true);
        data.toggle("areas", "jlt", true);
        data.toggle("areas", "marina", false);
        assert_eq!(data.get("areas").as_list(), ["jlt"]);
    }
}
