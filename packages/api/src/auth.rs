//! Login, registration, logout and the signed-in profile.

use serde_json::{json, Map, Value};
use store::models::email_local_part;
use store::{Role, UserProfile};

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::request::{FormPart, RequestBody};

/// Token and user from a successful login.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginResult {
    pub token: String,
    pub user: UserProfile,
}

pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<LoginResult, ApiError> {
    let body = json!({ "email": email, "password": password });
    let response = client.post(endpoints::LOGIN, body.into()).await?;
    parse_login(response, email)
}

/// The user is taken from `user` when present, otherwise assembled from the
/// flat fields of the response.
pub fn parse_login(response: Value, email: &str) -> Result<LoginResult, ApiError> {
    let token = response
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Invalid("No token received from login".to_string()))?
        .to_string();

    let user = match response.get("user") {
        Some(user @ Value::Object(_)) => serde_json::from_value(user.clone())?,
        _ => flat_user(&response, email)?,
    };

    Ok(LoginResult {
        token,
        user: user.normalized(),
    })
}

fn flat_user(response: &Value, email: &str) -> Result<UserProfile, ApiError> {
    let mut user: UserProfile = serde_json::from_value(response.clone())?;
    if user.email.is_empty() {
        user.email = email.to_string();
    }
    if user.username.is_empty() {
        user.username = email_local_part(email).to_string();
    }
    if response.get("is_active").is_none() {
        user.is_active = true;
    }
    if response.get("role").is_none() {
        user.role = Role::User;
    }
    Ok(user)
}

pub async fn register(client: &ApiClient, data: Value) -> Result<Value, ApiError> {
    client.post(endpoints::REGISTER, data.into()).await
}

pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client.post_empty(endpoints::LOGOUT).await.map(|_| ())
}

/// `GET /profile/`; the profile may be wrapped in `user`.
pub async fn fetch_profile(client: &ApiClient) -> Result<UserProfile, ApiError> {
    let response = client.get(endpoints::PROFILE).await?;
    let raw = match response {
        Value::Object(mut map) if map.get("user").is_some_and(Value::is_object) => {
            map.remove("user").unwrap_or_default()
        }
        other => other,
    };
    let user: UserProfile = serde_json::from_value(raw)?;
    Ok(user.normalized())
}

/// A new profile picture to upload.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// `PATCH /profile/` as multipart with only the given fields.
pub async fn update_profile(
    client: &ApiClient,
    fields: Map<String, Value>,
    image: Option<ImageUpload>,
) -> Result<Value, ApiError> {
    let mut parts: Vec<FormPart> = fields
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(s) => Some(FormPart::text(name, s)),
            other => Some(FormPart::text(name, other.to_string())),
        })
        .collect();
    if let Some(image) = image {
        parts.push(FormPart::file("profile_image", image.file_name, image.mime, image.bytes));
    }
    client
        .patch(endpoints::PROFILE, RequestBody::Multipart(parts))
        .await
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::Duration;

    use store::{MemoryStorage, Session};

    use super::*;
    use crate::mock::MockTransport;
    use crate::request::Method;

    #[test]
    fn test_login_without_token_fails() {
        let err = parse_login(json!({"user": {"email": "a@b.co"}}), "a@b.co").unwrap_err();
        assert_eq!(err.to_string(), "No token received from login");
    }

    #[test]
    fn test_login_nested_user() {
        let result = parse_login(
            json!({"token": "t", "user": {"email": "boss@x.io", "role": "admin", "first_name": "Dana"}}),
            "boss@x.io",
        )
        .unwrap();
        assert!(result.user.is_admin());
        assert_eq!(result.user.name.as_deref(), Some("Dana"));
    }

    #[test]
    fn test_login_flat_fields() {
        let result = parse_login(json!({"token": "t", "id": 4}), "maria@homes.ae").unwrap();
        assert_eq!(result.user.id, Some(4));
        assert_eq!(result.user.username, "maria");
        assert_eq!(result.user.email, "maria@homes.ae");
        assert_eq!(result.user.role, Role::User);
        assert!(result.user.is_active);
        assert_eq!(result.user.name.as_deref(), Some("maria"));
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_server_detail() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(
            Method::Post,
            endpoints::LOGIN,
            401,
            json!({"detail": "Invalid email or password"}),
        );
        let client = ApiClient::with_transport(
            transport.clone(),
            Session::new(Arc::new(MemoryStorage::new())),
            Duration::ZERO,
        );

        let err = login(&client, "a@b.co", "wrong").await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.user_message("Login failed"), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_fetch_profile_unwraps_user() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(
            Method::Get,
            endpoints::PROFILE,
            200,
            json!({"user": {"email": "g@x.io", "role": "agent"}}),
        );
        let client = ApiClient::with_transport(
            transport.clone(),
            Session::new(Arc::new(MemoryStorage::new())),
            Duration::ZERO,
        );

        let user = fetch_profile(&client).await.unwrap();
        assert!(user.is_agent());
        assert_eq!(user.display_name(), "g");
    }

    #[tokio::test]
    async fn test_update_profile_is_multipart_patch() {
        let transport = Rc::new(MockTransport::new());
        let client = ApiClient::with_transport(
            transport.clone(),
            Session::new(Arc::new(MemoryStorage::new())),
            Duration::ZERO,
        );
        let mut fields = Map::new();
        fields.insert("phone".into(), json!("+971"));
        fields.insert("bio".into(), Value::Null);

        update_profile(&client, fields, None).await.unwrap();

        let request = transport.last().unwrap();
        assert_eq!(request.method, Method::Patch);
        let body = request.body.unwrap();
        assert_eq!(body.text_part("phone"), Some("+971"));
        assert_eq!(body.text_part("bio"), None);
    }
}
