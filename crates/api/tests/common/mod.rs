#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use richiesta_api::background::{HealthMonitor, HealthProbe, ProbeError};
use richiesta_api::config::ServerConfig;
use richiesta_api::router::build_app_router;
use richiesta_api::state::AppState;
use richiesta_db::{Listing, PageRequest, RecordStore, RequestFilter};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        health_check_interval_secs: 3600,
        environment: "test".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Fake health probe
// ---------------------------------------------------------------------------

/// Probe whose outcome is flipped by the test.
#[derive(Default)]
pub struct FakeProbe {
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl FakeProbe {
    pub fn healthy() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let probe = Self::default();
        probe.failing.store(true, Ordering::SeqCst);
        Arc::new(probe)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthProbe for FakeProbe {
    async fn probe(&self) -> Result<(), ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(ProbeError("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

/// A monitor over `probe` that never ticks on its own during a test.
pub fn test_monitor(probe: Arc<FakeProbe>) -> Arc<HealthMonitor> {
    Arc::new(HealthMonitor::new(probe, Duration::from_secs(3600)))
}

// ---------------------------------------------------------------------------
// In-memory record store
// ---------------------------------------------------------------------------

/// Record store backed by vectors of raw records.
///
/// Records use the same mixed relation keys the PostgreSQL store emits.
#[derive(Default)]
pub struct InMemoryStore {
    pub requests: Vec<Value>,
    pub quotes: Vec<Value>,
    pub users: Vec<Value>,
    pub categories: Vec<Value>,
    pub subcategories: Vec<Value>,
    pub notifications: Vec<Value>,
    /// When set, every call fails with a connection error.
    pub broken: bool,
}

fn field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

fn by_id(records: &[Value], id: &str) -> Option<Value> {
    records.iter().find(|r| field(r, "id") == Some(id)).cloned()
}

impl InMemoryStore {
    fn check(&self) -> Result<(), sqlx::Error> {
        if self.broken {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_requests(
        &self,
        filter: &RequestFilter,
        page: PageRequest,
    ) -> Result<Listing, sqlx::Error> {
        self.check()?;
        let matching: Vec<&Value> = self
            .requests
            .iter()
            .filter(|r| {
                filter.status.as_deref().map_or(true, |s| field(r, "status") == Some(s))
                    && filter
                        .priority
                        .as_deref()
                        .map_or(true, |p| field(r, "priority") == Some(p))
                    && filter
                        .category_id
                        .as_deref()
                        .map_or(true, |c| field(r, "categoryId") == Some(c))
            })
            .collect();

        let total = matching.len() as i64;
        let records = matching
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();
        Ok(Listing { records, total })
    }

    async fn find_request(&self, id: &str) -> Result<Option<Value>, sqlx::Error> {
        self.check()?;
        Ok(by_id(&self.requests, id))
    }

    async fn find_quote(&self, id: &str) -> Result<Option<Value>, sqlx::Error> {
        self.check()?;
        Ok(by_id(&self.quotes, id))
    }

    async fn list_quotes_for_request(&self, request_id: &str) -> Result<Vec<Value>, sqlx::Error> {
        self.check()?;
        Ok(self
            .quotes
            .iter()
            .filter(|q| field(q, "requestId") == Some(request_id))
            .cloned()
            .collect())
    }

    async fn find_user(&self, id: &str) -> Result<Option<Value>, sqlx::Error> {
        self.check()?;
        Ok(by_id(&self.users, id))
    }

    async fn list_categories(&self) -> Result<Vec<Value>, sqlx::Error> {
        self.check()?;
        Ok(self.categories.clone())
    }

    async fn find_category(&self, id: &str) -> Result<Option<Value>, sqlx::Error> {
        self.check()?;
        Ok(by_id(&self.categories, id))
    }

    async fn list_subcategories(
        &self,
        category_id: Option<&str>,
    ) -> Result<Vec<Value>, sqlx::Error> {
        self.check()?;
        Ok(self
            .subcategories
            .iter()
            .filter(|s| category_id.map_or(true, |c| field(s, "categoryId") == Some(c)))
            .cloned()
            .collect())
    }

    async fn list_notifications(
        &self,
        recipient_id: &str,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Value>, sqlx::Error> {
        self.check()?;
        Ok(self
            .notifications
            .iter()
            .filter(|n| field(n, "recipientId") == Some(recipient_id))
            .filter(|n| !unread_only || n.get("isRead") != Some(&Value::Bool(true)))
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A small data set covering every resource.
pub fn seeded_store() -> InMemoryStore {
    let client = json!({
        "id": "u-client",
        "email": "lucia@example.it",
        "firstName": "Lucia",
        "lastName": "Verdi",
        "role": "CLIENT",
        "createdAt": "2024-01-10T08:00:00.000Z"
    });
    let professional = json!({
        "id": "u-pro",
        "email": "marco@example.it",
        "firstName": "Marco",
        "lastName": "Rossi",
        "role": "PROFESSIONAL",
        "hourlyRate": "45.50",
        "Profession": { "id": "p-idraulico", "name": "Idraulico", "slug": "idraulico" },
        "ProfessionalUserSubcategory": [
            { "id": "pus-1", "userId": "u-pro", "subcategoryId": "s-perdite", "experienceYears": 8 }
        ],
        "createdAt": "2024-01-05T09:30:00.000Z"
    });
    let category = json!({
        "id": "c-idraulica",
        "name": "Idraulica",
        "slug": "idraulica",
        "color": "#3B82F6",
        "isActive": true,
        "displayOrder": 1,
        "_count": { "subcategory": 2, "assistanceRequest": 3 },
        "Subcategory": [
            { "id": "s-perdite", "name": "Perdite", "categoryId": "c-idraulica" },
            { "id": "s-caldaie", "name": "Caldaie", "categoryId": "c-idraulica" }
        ],
        "createdAt": "2024-01-01T00:00:00.000Z"
    });

    InMemoryStore {
        requests: vec![
            json!({
                "id": "r-1",
                "title": "Perdita sotto il lavello",
                "description": "Acqua sul pavimento",
                "status": "PENDING",
                "priority": "HIGH",
                "clientId": "u-client",
                "categoryId": "c-idraulica",
                "client": client.clone(),
                "category": { "id": "c-idraulica", "name": "Idraulica" },
                "createdAt": "2024-03-01T10:00:00.000Z"
            }),
            json!({
                "id": "r-2",
                "title": "Caldaia in blocco",
                "description": "Nessuna acqua calda",
                "status": "IN_PROGRESS",
                "priority": "URGENT",
                "clientId": "u-client",
                "professionalId": "u-pro",
                "categoryId": "c-idraulica",
                "assignmentType": "STAFF",
                "client": client.clone(),
                "professional": professional.clone(),
                "Category": { "id": "c-idraulica", "name": "Idraulica" },
                "Subcategory": { "id": "s-caldaie", "name": "Caldaie" },
                "quotes": [
                    { "id": "q-1", "requestId": "r-2", "amount": "120.00", "status": "SENT", "items": [] }
                ],
                "RequestAttachment": [
                    { "id": "a-1", "requestId": "r-2", "userId": "u-client", "fileName": "foto.jpg" }
                ],
                "createdAt": "2024-02-20T15:30:00.000Z"
            }),
            json!({
                "id": "r-3",
                "title": "Presa elettrica bruciata",
                "description": "Odore di bruciato",
                "status": "COMPLETED",
                "priority": "MEDIUM",
                "clientId": "u-client",
                "categoryId": "c-elettricita",
                "createdAt": "2024-01-15T12:00:00.000Z"
            }),
        ],
        quotes: vec![
            json!({
                "id": "q-1",
                "requestId": "r-2",
                "professionalId": "u-pro",
                "title": "Sostituzione valvola",
                "amount": "120.00",
                "status": "SENT",
                "depositAmount": "30.00",
                "User": professional.clone(),
                "QuoteItem": [
                    { "id": "i-1", "quantity": 2, "unitPrice": 1000, "totalPrice": 2000 },
                    { "id": "i-2", "quantity": 1, "unitPrice": 500, "totalPrice": 500 }
                ],
                "Payment": [
                    { "id": "pay-1", "amount": 2500, "status": "COMPLETED", "type": "DEPOSIT" }
                ],
                "createdAt": "2024-02-21T09:00:00.000Z"
            }),
            json!({
                "id": "q-2",
                "requestId": "r-2",
                "professionalId": "u-pro",
                "title": "Revisione completa",
                "amount": 150.5,
                "status": "DRAFT",
                "professional": professional.clone(),
                "items": [],
                "createdAt": "2024-02-22T09:00:00.000Z"
            }),
        ],
        users: vec![client, professional],
        categories: vec![category],
        subcategories: vec![
            json!({
                "id": "s-perdite",
                "name": "Perdite",
                "categoryId": "c-idraulica",
                "Category": { "id": "c-idraulica", "name": "Idraulica" },
                "SubcategoryAiSettings": { "id": "ai-1", "temperature": "0.70", "maxTokens": 2048 },
                "_count": { "ProfessionalUserSubcategory": 4, "assistanceRequest": 2 }
            }),
            json!({
                "id": "s-prese",
                "name": "Prese",
                "categoryId": "c-elettricita",
                "_count": { "ProfessionalUserSubcategory": 1, "assistanceRequest": 0 }
            }),
        ],
        notifications: vec![
            json!({
                "id": "n-1",
                "type": "QUOTE_RECEIVED",
                "title": "Nuovo preventivo",
                "content": "Hai ricevuto un preventivo",
                "priority": "HIGH",
                "recipientId": "u-client",
                "senderId": "u-pro",
                "isRead": false,
                "sender": { "id": "u-pro", "firstName": "Marco", "lastName": "Rossi" },
                "createdAt": "2024-02-21T09:01:00.000Z"
            }),
            json!({
                "id": "n-2",
                "type": "REQUEST_UPDATE",
                "title": "Richiesta aggiornata",
                "content": "Stato cambiato",
                "recipientId": "u-client",
                "isRead": true,
                "createdAt": "2024-02-20T16:00:00.000Z"
            }),
            json!({
                "id": "n-3",
                "type": "NEW_REQUEST",
                "title": "Nuova richiesta",
                "content": "Richiesta in zona",
                "recipientId": "u-pro",
                "isRead": false,
                "createdAt": "2024-03-01T10:00:01.000Z"
            }),
        ],
        broken: false,
    }
}

// ---------------------------------------------------------------------------
// App builders and request helpers
// ---------------------------------------------------------------------------

/// Build the full application router over `store` and `health`.
///
/// Uses the same [`build_app_router`] as `main.rs` so tests exercise the
/// production middleware stack, including the database gate.
pub fn build_app(store: InMemoryStore, health: Arc<HealthMonitor>) -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
        health,
    };
    build_app_router(state, &config)
}

/// Build the app over the seeded store with a health monitor that has not
/// probed yet.
pub fn build_test_app() -> Router {
    build_app(seeded_store(), test_monitor(FakeProbe::healthy()))
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the failure envelope shape and its error code.
pub fn assert_error_envelope(json: &Value, status: StatusCode, expected_code: &str) {
    assert_eq!(json["success"], false, "status {status}: {json}");
    assert_eq!(json["error"]["code"], expected_code);
    assert!(json["error"]["message"].is_string());
    assert!(json["timestamp"].is_string());
}
