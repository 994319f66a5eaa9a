//! The CRUD manager's API round trips, free of any component state.
//!
//! Each mutation is followed by exactly one list refetch; the component only
//! applies the returned rows and shows the message.

use api::{normalize_list, record_id, ApiError, CrudApi};
use serde_json::Value;
use thiserror::Error;

use super::descriptor::FormField;
use super::form::{build_payload, validate, FieldErrors, FormData};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result of a successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub message: String,
    /// The refetched list, or why it could not be fetched.
    pub rows: Result<Vec<Value>, ApiError>,
}

/// Fetch and normalize the full list.
pub async fn load(api: &dyn CrudApi) -> Result<Vec<Value>, ApiError> {
    Ok(normalize_list(api.get_all().await?))
}

/// Validate, send create or update, then refetch.
///
/// `editing` is the record the form was opened for. It is updated when it has
/// an id; otherwise a new record is created.
pub async fn save(
    api: &dyn CrudApi,
    fields: &[FormField],
    data: &FormData,
    editing: Option<&Value>,
    media_origin: &str,
    singular: &str,
) -> Result<Saved, SubmitError> {
    validate(fields, data, editing.is_some()).map_err(SubmitError::Invalid)?;
    let payload = build_payload(fields, data, editing.is_some(), media_origin);

    let verb = match editing.and_then(record_id) {
        Some(id) => {
            api.update(&id, payload).await?;
            "updated"
        }
        None => {
            api.create(payload).await?;
            "created"
        }
    };

    Ok(Saved {
        message: format!("{singular} {verb} successfully"),
        rows: load(api).await,
    })
}

/// Delete a record, then refetch.
pub async fn remove(api: &dyn CrudApi, record: &Value, singular: &str) -> Result<Saved, ApiError> {
    let id = record_id(record).ok_or_else(|| ApiError::Invalid("Record has no id".to_string()))?;
    api.delete(&id).await?;

    Ok(Saved {
        message: format!("{singular} deleted successfully"),
        rows: load(api).await,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use api::RequestBody;
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::crud::descriptor::FieldKind;

    /// In-memory collection recording every call.
    #[derive(Default)]
    struct RecordingApi {
        list: Value,
        calls: RefCell<Vec<String>>,
        fail_writes: bool,
    }

    impl RecordingApi {
        fn with_list(list: Value) -> Self {
            Self {
                list,
                ..Default::default()
            }
        }

        fn count(&self, call: &str) -> usize {
            self.calls.borrow().iter().filter(|c| c.starts_with(call)).count()
        }

        fn write(&self, call: String) -> Result<Value, ApiError> {
            self.calls.borrow_mut().push(call);
            if self.fail_writes {
                Err(ApiError::Status {
                    status: 400,
                    body: json!({"non_field_errors": ["Duplicate title"]}),
                })
            } else {
                Ok(json!({"id": 99}))
            }
        }
    }

    #[async_trait(?Send)]
    impl CrudApi for RecordingApi {
        async fn get_all(&self) -> Result<Value, ApiError> {
            self.calls.borrow_mut().push("get_all".to_string());
            Ok(self.list.clone())
        }

        async fn get_by_id(&self, id: &str) -> Result<Value, ApiError> {
            self.calls.borrow_mut().push(format!("get_by_id {id}"));
            Ok(json!({"id": id}))
        }

        async fn create(&self, _body: RequestBody) -> Result<Value, ApiError> {
            self.write("create".to_string())
        }

        async fn update(&self, id: &str, _body: RequestBody) -> Result<Value, ApiError> {
            self.write(format!("update {id}"))
        }

        async fn delete(&self, id: &str) -> Result<Value, ApiError> {
            self.write(format!("delete {id}"))
        }
    }

    fn fields() -> Vec<FormField> {
        vec![
            FormField::text("title", "Title").required(),
            FormField::new("email", "Email", FieldKind::Email),
        ]
    }

    fn filled() -> FormData {
        let mut data = FormData::empty(&fields());
        data.set_text("title", "Marina Heights");
        data
    }

    #[tokio::test]
    async fn test_load_normalizes_every_shape() {
        let rows = json!([{"id": 1}, {"id": 2}]);
        for list in [json!({"results": rows.clone()}), json!({"data": rows.clone()}), rows.clone()] {
            let api = RecordingApi::with_list(list);
            assert_eq!(load(&api).await.unwrap(), rows.as_array().unwrap().clone());
        }

        let api = RecordingApi::with_list(json!({"detail": "odd"}));
        assert!(load(&api).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_never_calls_api() {
        let api = RecordingApi::default();
        let data = FormData::empty(&fields());

        let err = save(&api, &fields(), &data, None, "", "Property").await.unwrap_err();

        let SubmitError::Invalid(errors) = err else {
            panic!("expected field errors");
        };
        assert_eq!(errors["title"], "Title is required");
        assert!(api.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_single_refetch() {
        let api = RecordingApi::with_list(json!([{"id": 99, "title": "Marina Heights"}]));

        let saved = save(&api, &fields(), &filled(), None, "", "Property").await.unwrap();

        assert_eq!(saved.message, "Property created successfully");
        assert_eq!(saved.rows.unwrap().len(), 1);
        assert_eq!(api.count("create"), 1);
        assert_eq!(api.count("get_all"), 1);
    }

    #[tokio::test]
    async fn test_edit_with_id_updates() {
        let api = RecordingApi::with_list(json!([]));
        let record = json!({"id": 7, "title": "Old"});

        let saved = save(&api, &fields(), &filled(), Some(&record), "", "Slide").await.unwrap();

        assert_eq!(saved.message, "Slide updated successfully");
        assert_eq!(api.count("update 7"), 1);
        assert_eq!(api.count("create"), 0);
        assert_eq!(api.count("get_all"), 1);
    }

    #[tokio::test]
    async fn test_failed_write_skips_refetch() {
        let api = RecordingApi {
            fail_writes: true,
            ..Default::default()
        };

        let err = save(&api, &fields(), &filled(), None, "", "Slide").await.unwrap_err();

        let SubmitError::Api(err) = err else {
            panic!("expected api error");
        };
        assert_eq!(err.user_message("Operation failed"), "Duplicate title");
        assert_eq!(api.count("get_all"), 0);
    }

    #[tokio::test]
    async fn test_remove_then_single_refetch() {
        let api = RecordingApi::with_list(json!({"results": []}));

        let saved = remove(&api, &json!({"id": "abc"}), "Agent").await.unwrap();

        assert_eq!(saved.message, "Agent deleted successfully");
        assert_eq!(api.count("delete abc"), 1);
        assert_eq!(api.count("get_all"), 1);
    }

    #[tokio::test]
    async fn test_remove_without_id() {
        let api = RecordingApi::default();
        assert!(remove(&api, &json!({"name": "x"}), "Agent").await.is_err());
        assert!(api.calls.borrow().is_empty());
    }
}
