//! CMS section flags.

use store::CmsSettings;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;

/// `GET /cms-settings/`. A list response yields its first row.
pub async fn get(client: &ApiClient) -> Result<CmsSettings, ApiError> {
    let value = client.get(endpoints::CMS_SETTINGS).await?;
    let row = if value.is_object() && value.get("results").is_none() {
        value
    } else {
        crate::resource::normalize_list(value)
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Parse("empty cms settings".to_string()))?
    };
    Ok(serde_json::from_value(row)?)
}

/// `PUT /cms-settings/1/` with the full flag set.
pub async fn update(client: &ApiClient, settings: &CmsSettings) -> Result<CmsSettings, ApiError> {
    let body = serde_json::to_value(settings)?;
    let value = client.put(endpoints::CMS_SETTINGS_DETAIL, body.into()).await?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use store::{MemoryStorage, Section, Session};

    use super::*;
    use crate::mock::MockTransport;
    use crate::request::Method;

    fn client(transport: &Rc<MockTransport>) -> ApiClient {
        ApiClient::with_transport(
            transport.clone(),
            Session::new(Arc::new(MemoryStorage::new())),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn test_get_accepts_list_or_object() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(
            Method::Get,
            endpoints::CMS_SETTINGS,
            200,
            json!([{"heroSection": false, "agentsSection": true}]),
        );
        let settings = get(&client(&transport)).await.unwrap();
        assert!(!settings.get(Section::Hero));
        assert!(settings.get(Section::Agents));
        assert!(!settings.get(Section::Marketing));
    }

    #[tokio::test]
    async fn test_update_puts_full_set() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(
            Method::Put,
            endpoints::CMS_SETTINGS_DETAIL,
            200,
            json!({"heroSection": true, "agentsSection": true, "propertiesSection": true,
                   "leadFormSection": false, "marketingSection": true}),
        );
        let mut settings = CmsSettings::default();
        settings.set(Section::LeadForm, false);

        let saved = update(&client(&transport), &settings).await.unwrap();

        assert_eq!(saved, settings);
        let body = transport.last().unwrap().body.unwrap();
        assert_eq!(body.as_json().unwrap()["leadFormSection"], false);
        assert_eq!(body.as_json().unwrap().as_object().unwrap().len(), 5);
    }
}
