//! Declarative column and form-field descriptors.
//!
//! A page hands the CRUD manager a list of [`Column`]s for the table and a
//! list of [`FormField`]s for the create/edit form. Everything else (loading,
//! searching, validation, payload shape) is derived from these.

/// How a table cell renders its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// Display string, `-` for null.
    Text,
    /// Upper-cased pill.
    Badge,
    /// `Yes` / `No`.
    Boolean,
    /// Thumbnail; relative URLs are resolved against the media origin.
    Image,
    /// `YYYY-MM-DD` prefix of an ISO timestamp.
    Date,
    /// Text cut to this many characters with an ellipsis.
    Truncate(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: CellKind,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: CellKind::Text,
        }
    }

    pub const fn kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    pub const fn badge(self) -> Self {
        self.kind(CellKind::Badge)
    }

    pub const fn boolean(self) -> Self {
        self.kind(CellKind::Boolean)
    }

    pub const fn image(self) -> Self {
        self.kind(CellKind::Image)
    }

    pub const fn date(self) -> Self {
        self.kind(CellKind::Date)
    }

    pub const fn truncate(self, max: usize) -> Self {
        self.kind(CellKind::Truncate(max))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Textarea,
    Select,
    MultiSelect,
    Checkbox,
    Date,
    Url,
    /// Comma-separated input sent as a JSON array.
    Tags,
    /// Image, video or document upload.
    File,
}

impl FieldKind {
    /// The `type` attribute of the `<input>` rendering this kind, if it is one.
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Number => "number",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Date => "date",
            FieldKind::Url => "url",
            FieldKind::File => "file",
            _ => "text",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub options: Vec<SelectOption>,
    pub placeholder: Option<&'static str>,
    pub read_only: bool,
    /// `accept` attribute for file inputs.
    pub accept: Option<&'static str>,
}

impl FormField {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            options: Vec::new(),
            placeholder: None,
            read_only: false,
            accept: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn accept(mut self, accept: &'static str) -> Self {
        self.accept = Some(accept);
        self
    }

    pub fn options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|(value, label)| SelectOption::new(value, label))
            .collect();
        self
    }

    pub fn is_file(&self) -> bool {
        self.kind == FieldKind::File
    }
}
