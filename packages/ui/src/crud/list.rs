//! Table-side helpers: display values, search and cell rendering.

use serde_json::Value;

use super::descriptor::{CellKind, Column};

/// What a table cell shows.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Badge(String),
    Boolean(bool),
    Image(Option<String>),
}

/// Plain display string of a record field.
///
/// Nested objects show their `name`, `title` or `username`; arrays are joined.
pub fn display_value(record: &Value, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(value) => value_text(value),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => ["name", "title", "username"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
    }
}

/// Rows whose column values contain `term`, ignoring case. An empty term
/// keeps every row.
pub fn filter_rows(rows: &[Value], columns: &[Column], term: &str) -> Vec<Value> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| {
            columns
                .iter()
                .any(|col| display_value(row, col.key).to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}

pub fn render_cell(record: &Value, column: &Column, media_origin: &str) -> Cell {
    let text = display_value(record, column.key);
    match column.kind {
        CellKind::Text if text.is_empty() => Cell::Text("-".to_string()),
        CellKind::Text => Cell::Text(text),
        CellKind::Badge => Cell::Badge(text.to_uppercase()),
        CellKind::Boolean => Cell::Boolean(matches!(
            record.get(column.key),
            Some(Value::Bool(true))
        )),
        CellKind::Image => {
            let url = record
                .get(&format!("{}_url", column.key))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(text);
            Cell::Image((!url.is_empty()).then(|| media_url(media_origin, &url)))
        }
        CellKind::Date if text.is_empty() => Cell::Text("-".to_string()),
        CellKind::Date => Cell::Text(text.chars().take(10).collect()),
        CellKind::Truncate(max) => Cell::Text(truncate(&text, max)),
    }
}

/// Absolute URL for a media path returned by the backend.
pub fn media_url(origin: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:") {
        return url.to_string();
    }
    if url.starts_with('/') {
        format!("{origin}{url}")
    } else {
        format!("{origin}/{url}")
    }
}

pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

/// Name shown in the delete confirmation.
pub fn record_label(record: &Value, singular: &str) -> String {
    ["name", "title", "username"]
        .iter()
        .find_map(|key| {
            record
                .get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
        .unwrap_or_else(|| {
            let id = api::record_id(record).unwrap_or_default();
            format!("{} #{id}", singular.to_lowercase())
        })
}

/// `"Properties"` to `"Property"`, `"Users"` to `"User"`.
pub fn singular(title: &str) -> String {
    if let Some(stem) = title.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = title.strip_suffix('s') {
        stem.to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_search_is_case_insensitive_over_columns() {
        let columns = [Column::new("name", "Name"), Column::new("email", "Email")];
        let rows = vec![
            json!({"id": 1, "name": "Sara Khan", "email": "sara@x.io", "bio": "villa"}),
            json!({"id": 2, "name": "Omar", "email": "omar@VILLA.ae"}),
        ];

        assert_eq!(filter_rows(&rows, &columns, "").len(), 2);
        assert_eq!(filter_rows(&rows, &columns, "KHAN")[0]["id"], 1);
        // Only column keys are searched.
        let hits = filter_rows(&rows, &columns, "villa");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["id"], 2);
    }

    #[test]
    fn test_cells() {
        let record = json!({
            "name": null,
            "status": "active",
            "is_active": true,
            "photo": "/media/p.png",
            "created_at": "2024-03-09T08:00:00Z",
            "bio": "A long biography text",
        });
        let origin = "http://localhost:8000";

        assert_eq!(render_cell(&record, &Column::new("name", "Name"), origin), Cell::Text("-".into()));
        assert_eq!(
            render_cell(&record, &Column::new("status", "Status").badge(), origin),
            Cell::Badge("ACTIVE".into())
        );
        assert_eq!(
            render_cell(&record, &Column::new("is_active", "Active").boolean(), origin),
            Cell::Boolean(true)
        );
        assert_eq!(
            render_cell(&record, &Column::new("photo", "Photo").image(), origin),
            Cell::Image(Some("http://localhost:8000/media/p.png".into()))
        );
        assert_eq!(
            render_cell(&record, &Column::new("created_at", "Created").date(), origin),
            Cell::Text("2024-03-09".into())
        );
        assert_eq!(
            render_cell(&record, &Column::new("bio", "Bio").truncate(6), origin),
            Cell::Text("A long...".into())
        );
    }

    #[test]
    fn test_record_label() {
        assert_eq!(record_label(&json!({"id": 3, "title": "Marina"}), "Slide"), "Marina");
        assert_eq!(record_label(&json!({"id": 3, "name": ""}), "Slide"), "slide #3");
    }

    #[test]
    fn test_singular() {
        assert_eq!(singular("Properties"), "Property");
        assert_eq!(singular("Users"), "User");
        assert_eq!(singular("Hero"), "Hero");
    }
}
