//! # API client with request and response interceptors
//!
//! [`ApiClient`] wraps a [`Transport`] with the behaviour every resource call
//! shares:
//!
//! | Stage | Behaviour |
//! |-------|-----------|
//! | request | attach `Authorization: Bearer <token>` from the [`Session`] (which falls back to persisted storage) |
//! | request, GET only | debounce: identical GETs (same method, path, params and body) issued within the window share one transport call |
//! | response, 401 | invalidate the session token and broadcast [`Unauthorized`] |
//! | response, other non-2xx | [`ApiError::Status`] with the decoded body |
//!
//! The debounce delays rather than cancels: the first caller's request is
//! sent when the window elapses and its result is handed to everyone who
//! joined. The key is released at that moment, so a later identical GET
//! starts a fresh window.
//!
//! The client is a cheap `Clone` (`Rc` inside) meant to live in a Dioxus
//! context on the single-threaded browser event loop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde_json::Value;
use store::config::ApiSettings;
use store::Session;
use tokio::sync::broadcast;

use crate::error::ApiError;
use crate::request::{ApiRequest, Method, RequestBody};
use crate::transport::{ReqwestTransport, Transport};

type PendingGet = Shared<LocalBoxFuture<'static, Result<Value, ApiError>>>;

/// Broadcast after the backend answered 401.
#[derive(Clone, Debug, PartialEq)]
pub struct Unauthorized {
    pub path: String,
}

/// Listener handed out by [`ApiClient::unauthorized_events`].
pub struct UnauthorizedEvents {
    rx: broadcast::Receiver<Unauthorized>,
}

impl UnauthorizedEvents {
    /// Next signal, or `None` once the client is gone. Signals missed while
    /// lagging are skipped.
    pub async fn next(&mut self) -> Option<Unauthorized> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!("skipped {skipped} unauthorized signals");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<Inner>,
}

struct Inner {
    transport: Rc<dyn Transport>,
    session: Session,
    debounce: Duration,
    pending: RefCell<HashMap<String, PendingGet>>,
    unauthorized: broadcast::Sender<Unauthorized>,
}

impl ApiClient {
    /// Client over the reqwest transport.
    pub fn new(settings: &ApiSettings, session: Session) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(settings)?;
        Ok(Self::with_transport(
            Rc::new(transport),
            session,
            Duration::from_millis(settings.debounce_ms),
        ))
    }

    pub fn with_transport(
        transport: Rc<dyn Transport>,
        session: Session,
        debounce: Duration,
    ) -> Self {
        let (unauthorized, _) = broadcast::channel(16);
        Self {
            inner: Rc::new(Inner {
                transport,
                session,
                debounce,
                pending: RefCell::new(HashMap::new()),
                unauthorized,
            }),
        }
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Receiver for the global unauthorized signal.
    pub fn subscribe_unauthorized(&self) -> broadcast::Receiver<Unauthorized> {
        self.inner.unauthorized.subscribe()
    }

    /// Stream of unauthorized signals for a long-lived listener.
    pub fn unauthorized_events(&self) -> UnauthorizedEvents {
        UnauthorizedEvents {
            rx: self.subscribe_unauthorized(),
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(ApiRequest::new(Method::Get, path)).await
    }

    pub async fn get_with(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Value, ApiError> {
        self.send(ApiRequest::new(Method::Get, path).with_query(query))
            .await
    }

    pub async fn post(&self, path: &str, body: RequestBody) -> Result<Value, ApiError> {
        self.send(ApiRequest::new(Method::Post, path).with_body(body))
            .await
    }

    /// POST without a body.
    pub async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        self.send(ApiRequest::new(Method::Post, path)).await
    }

    pub async fn put(&self, path: &str, body: RequestBody) -> Result<Value, ApiError> {
        self.send(ApiRequest::new(Method::Put, path).with_body(body))
            .await
    }

    pub async fn patch(&self, path: &str, body: RequestBody) -> Result<Value, ApiError> {
        self.send(ApiRequest::new(Method::Patch, path).with_body(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(ApiRequest::new(Method::Delete, path)).await
    }

    /// Send any request through the interceptors. GETs are debounced.
    pub async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        if request.method != Method::Get {
            return self.inner.execute(request).await;
        }
        self.debounced(request).await
    }

    fn debounced(&self, request: ApiRequest) -> PendingGet {
        let key = request.debounce_key();
        let mut pending = self.inner.pending.borrow_mut();
        if let Some(shared) = pending.get(&key) {
            tracing::trace!("joining debounced request {key}");
            return shared.clone();
        }

        let inner = Rc::clone(&self.inner);
        let release = key.clone();
        let shared = async move {
            if !inner.debounce.is_zero() {
                crate::time::sleep(inner.debounce).await;
            }
            inner.pending.borrow_mut().remove(&release);
            inner.execute(request).await
        }
        .boxed_local()
        .shared();

        pending.insert(key, shared.clone());
        shared
    }
}

impl Inner {
    async fn execute(&self, mut request: ApiRequest) -> Result<Value, ApiError> {
        if let Some(token) = self.session.token() {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        let path = request.path.clone();
        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::error!("request to {path} failed: {e}");
        })?;

        if response.status == 401 {
            self.session.invalidate();
            // No receivers is fine: nothing is mounted that cares.
            let _ = self.unauthorized.send(Unauthorized { path });
            return Err(ApiError::Unauthorized {
                body: response.body,
            });
        }

        if !response.is_success() {
            tracing::warn!("{path} answered {}", response.status);
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use store::persist::TOKEN_KEY;
    use store::{KeyValueStore, MemoryStorage, UserProfile};

    use super::*;
    use crate::mock::MockTransport;

    fn client(debounce_ms: u64) -> (ApiClient, Rc<MockTransport>, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(storage.clone());
        let transport = Rc::new(MockTransport::new());
        let client = ApiClient::with_transport(
            transport.clone(),
            session,
            Duration::from_millis(debounce_ms),
        );
        (client, transport, storage)
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let (client, transport, _) = client(0);
        client
            .session()
            .sign_in("abc".to_string(), UserProfile::default());

        client.get("/users/").await.unwrap();

        let request = transport.last().unwrap();
        assert_eq!(request.header("authorization"), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_token_falls_back_to_storage() {
        let (client, transport, storage) = client(0);
        storage.set(TOKEN_KEY, "stored");

        client.post("/leads/", json!({}).into()).await.unwrap();

        assert_eq!(
            transport.last().unwrap().header("Authorization"),
            Some("Bearer stored")
        );
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token_and_broadcasts() {
        let (client, transport, storage) = client(0);
        client
            .session()
            .sign_in("expired".to_string(), UserProfile::default());
        let mut rx = client.subscribe_unauthorized();
        transport.respond(Method::Get, "/profile/", 401, json!({"detail": "expired"}));

        let err = client.get("/profile/").await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Unauthorized {
                body: json!({"detail": "expired"})
            }
        );
        assert!(storage.get(TOKEN_KEY).is_none());
        assert_eq!(rx.try_recv().unwrap().path, "/profile/");

        client.get("/users/").await.unwrap();
        assert_eq!(transport.last().unwrap().header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_unauthorized_events_stream() {
        let (client, transport, _) = client(0);
        let mut events = client.unauthorized_events();
        transport.respond(Method::Get, "/leads/", 401, json!({}));

        let _ = client.get("/leads/").await;

        assert_eq!(
            events.next().await,
            Some(Unauthorized {
                path: "/leads/".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let (client, transport, _) = client(0);
        transport.respond(Method::Post, "/users/", 400, json!({"email": ["taken"]}));

        let err = client.post("/users/", json!({}).into()).await.unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body["email"][0], "taken");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_gets_share_one_call() {
        let (client, transport, _) = client(200);
        transport.respond(Method::Get, "/agents/", 200, json!([{"id": 1}]));

        let (a, b) = futures::join!(client.get("/agents/"), client.get("/agents/"));

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(transport.count(Method::Get, "/agents/"), 1);

        // Window elapsed: the key is released.
        client.get("/agents/").await.unwrap();
        assert_eq!(transport.count(Method::Get, "/agents/"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_different_params_are_not_merged() {
        let (client, transport, _) = client(200);
        let page = |n: &str| vec![("page".to_string(), n.to_string())];

        let _ = futures::join!(
            client.get_with("/leads/", page("1")),
            client.get_with("/leads/", page("2"))
        );

        assert_eq!(transport.count(Method::Get, "/leads/"), 2);
    }

    #[tokio::test]
    async fn test_mutations_are_not_debounced() {
        let (client, transport, _) = client(200);
        let body = || RequestBody::from(json!({"name": "x"}));

        let _ = futures::join!(client.post("/slides/", body()), client.post("/slides/", body()));

        assert_eq!(transport.count(Method::Post, "/slides/"), 2);
    }
}
