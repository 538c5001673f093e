#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use storefront_api::config::ServerConfig;
use storefront_api::routes;
use storefront_api::state::AppState;
use storefront_core::auth::{Identity, Profile, Role, Session, SignUpOutcome};
use storefront_core::backend::MarketplaceBackend;
use storefront_core::error::CoreError;
use storefront_core::filter::{sort_listings, ListingQuery};
use storefront_core::listing::{
    Listing, ListingPatch, ListingStatus, ListingType, NewListing, Specifications,
    DEFAULT_CURRENCY, DEFAULT_WHATSAPP_NUMBER,
};
use storefront_core::types::{ListingId, UserId};
use storefront_supabase::SupabaseConfig;

pub const ADMIN_EMAIL: &str = "admin@charlymotors.com";
pub const BUYER_EMAIL: &str = "buyer@example.com";
pub const PASSWORD: &str = "password123";

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Account {
    identity: Identity,
    password: String,
    profile: Option<Profile>,
    is_admin: bool,
}

/// In-memory stand-in for the managed backend.
///
/// Access tokens are real (unsigned-for-us) JWTs so they pass the local
/// claim inspection. Only admins may write listings, mirroring the row rules.
pub struct FakeBackend {
    accounts: Mutex<Vec<Account>>,
    /// access token -> account id
    sessions: Mutex<HashMap<String, UserId>>,
    listings: Mutex<Vec<Listing>>,
    admin_checks: AtomicUsize,
}

impl FakeBackend {
    /// An admin, a regular buyer, and a small catalog:
    ///
    /// | title                         | type     | price      | featured | status |
    /// |-------------------------------|----------|------------|----------|--------|
    /// | Toyota Camry 2020             | car      | 3,200,000  | yes      | active |
    /// | Honda CR-V 2019               | car      | 2,800,000  | no       | active |
    /// | 3BR Modern Apartment Kilimani | property | 15,000,000 | yes      | active |
    /// | 4BR Family House Karen        | property | 28,000,000 | no       | active |
    /// | Nissan X-Trail 2021           | car      | 4,100,000  | no       | sold   |
    pub fn seeded() -> Self {
        let backend = Self {
            accounts: Mutex::new(Vec::new()),
            sessions: Mutex::new(HashMap::new()),
            listings: Mutex::new(Vec::new()),
            admin_checks: AtomicUsize::new(0),
        };
        backend.add_account(ADMIN_EMAIL, Some("Charly Admin"), true);
        backend.add_account(BUYER_EMAIL, None, false);

        let rows = [
            ("Toyota Camry 2020", ListingType::Car, 3_200_000.0, "Nairobi, Kenya", true, ListingStatus::Active),
            ("Honda CR-V 2019", ListingType::Car, 2_800_000.0, "Mombasa, Kenya", false, ListingStatus::Active),
            ("3BR Modern Apartment Kilimani", ListingType::Property, 15_000_000.0, "Kilimani, Nairobi", true, ListingStatus::Active),
            ("4BR Family House Karen", ListingType::Property, 28_000_000.0, "Karen, Nairobi", false, ListingStatus::Active),
            ("Nissan X-Trail 2021", ListingType::Car, 4_100_000.0, "Nakuru, Kenya", false, ListingStatus::Sold),
        ];
        let mut listings = backend.listings.lock().unwrap();
        for (day, (title, listing_type, price, location, featured, status)) in
            rows.into_iter().enumerate()
        {
            listings.push(Listing {
                id: Uuid::new_v4(),
                created_at: Utc
                    .with_ymd_and_hms(2024, 5, 1 + day as u32, 9, 0, 0)
                    .unwrap(),
                updated_at: None,
                title: title.to_string(),
                description: Some(format!("{title} in excellent condition")),
                price,
                currency: DEFAULT_CURRENCY.to_string(),
                listing_type,
                location: location.to_string(),
                images: Vec::new(),
                features: Vec::new(),
                specifications: Specifications::new(),
                whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
                featured,
                status,
                user_id: None,
            });
        }
        drop(listings);
        backend
    }

    fn add_account(&self, email: &str, full_name: Option<&str>, is_admin: bool) -> UserId {
        let id = Uuid::new_v4();
        let mut metadata = serde_json::Map::new();
        if let Some(name) = full_name {
            metadata.insert("full_name".into(), name.into());
        }
        let identity = Identity {
            id,
            email: Some(email.to_string()),
            user_metadata: metadata,
            created_at: None,
        };
        let profile = Profile {
            id,
            email: Some(email.to_string()),
            full_name: full_name.map(str::to_string),
            role: if is_admin { Role::Admin } else { Role::User },
            phone: None,
            avatar_url: None,
            created_at: None,
            updated_at: None,
        };
        self.accounts.lock().unwrap().push(Account {
            identity,
            password: PASSWORD.to_string(),
            profile: Some(profile),
            is_admin,
        });
        id
    }

    fn account_by_email(&self, email: &str) -> Option<Account> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.identity.email.as_deref() == Some(email))
            .cloned()
    }

    fn account_for_token(&self, token: &str) -> Result<Account, CoreError> {
        let id = self
            .sessions
            .lock()
            .unwrap()
            .get(token)
            .copied()
            .ok_or_else(|| CoreError::Unauthorized("invalid JWT".into()))?;
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.identity.id == id)
            .cloned()
            .ok_or_else(|| CoreError::Unauthorized("user not found".into()))
    }

    fn open_session(&self, account: &Account) -> Session {
        let access_token = mint_token(account.identity.id, 3600);
        self.sessions
            .lock()
            .unwrap()
            .insert(access_token.clone(), account.identity.id);
        Session {
            access_token,
            refresh_token: format!("refresh-{}", account.identity.id),
            expires_in: 3600,
            token_type: "bearer".into(),
            user: account.identity.clone(),
        }
    }

    /// A live access token for `email`.
    pub fn token_for(&self, email: &str) -> String {
        let account = self.account_by_email(email).expect("seeded account");
        self.open_session(&account).access_token
    }

    pub fn admin_token(&self) -> String {
        self.token_for(ADMIN_EMAIL)
    }

    pub fn buyer_token(&self) -> String {
        self.token_for(BUYER_EMAIL)
    }

    /// How many times the admin-status procedure was consulted.
    pub fn admin_checks(&self) -> usize {
        self.admin_checks.load(Ordering::SeqCst)
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.listings.lock().unwrap().clone()
    }

    pub fn listing_titled(&self, title: &str) -> Listing {
        self.listings()
            .into_iter()
            .find(|l| l.title == title)
            .expect("seeded listing")
    }

    fn require_admin(&self, token: &str) -> Result<Account, CoreError> {
        let account = self.account_for_token(token)?;
        if !account.is_admin {
            return Err(CoreError::Forbidden(
                "new row violates row-level security policy".into(),
            ));
        }
        Ok(account)
    }
}

#[async_trait]
impl MarketplaceBackend for FakeBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        match self.account_by_email(email) {
            Some(account) if account.password == password => Ok(self.open_session(&account)),
            _ => Err(CoreError::Unauthorized("Invalid login credentials".into())),
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<SignUpOutcome, CoreError> {
        if self.account_by_email(email).is_some() {
            return Err(CoreError::Conflict("User already registered".into()));
        }
        let id = self.add_account(email, full_name, false);
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.identity.id == id)
            .expect("just added");
        account.password = password.to_string();
        Ok(SignUpOutcome {
            user: account.identity.clone(),
            session: None,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), CoreError> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }

    async fn get_user(&self, token: &str) -> Result<Identity, CoreError> {
        Ok(self.account_for_token(token)?.identity)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, CoreError> {
        let account = refresh_token
            .strip_prefix("refresh-")
            .and_then(|id| id.parse::<Uuid>().ok())
            .and_then(|id| {
                self.accounts
                    .lock()
                    .unwrap()
                    .iter()
                    .find(|a| a.identity.id == id)
                    .cloned()
            })
            .ok_or_else(|| CoreError::Unauthorized("Invalid Refresh Token".into()))?;
        Ok(self.open_session(&account))
    }

    async fn is_admin(&self, token: &str) -> Result<bool, CoreError> {
        self.admin_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.account_for_token(token)?.is_admin)
    }

    async fn get_profile(&self, user_id: UserId, _token: &str) -> Result<Option<Profile>, CoreError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.identity.id == user_id)
            .and_then(|a| a.profile.clone()))
    }

    async fn list_listings(
        &self,
        query: &ListingQuery,
        _token: Option<&str>,
    ) -> Result<Vec<Listing>, CoreError> {
        let mut rows: Vec<Listing> = self
            .listings
            .lock()
            .unwrap()
            .iter()
            .filter(|l| query.matches(l))
            .cloned()
            .collect();
        sort_listings(&mut rows, query.order);
        Ok(rows)
    }

    async fn get_listing(
        &self,
        id: ListingId,
        _token: Option<&str>,
    ) -> Result<Option<Listing>, CoreError> {
        Ok(self.listings.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn insert_listing(&self, listing: &NewListing, token: &str) -> Result<Listing, CoreError> {
        self.require_admin(token)?;
        let row = Listing {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: None,
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            currency: listing.currency.clone(),
            listing_type: listing.listing_type,
            location: listing.location.clone(),
            images: listing.images.clone(),
            features: listing.features.clone(),
            specifications: listing.specifications.clone(),
            whatsapp_number: listing.whatsapp_number.clone(),
            featured: listing.featured,
            status: listing.status,
            user_id: Some(listing.user_id),
        };
        self.listings.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update_listing(
        &self,
        id: ListingId,
        patch: &ListingPatch,
        token: &str,
    ) -> Result<Option<Listing>, CoreError> {
        self.require_admin(token)?;
        let mut listings = self.listings.lock().unwrap();
        Ok(listings.iter_mut().find(|l| l.id == id).map(|listing| {
            patch.apply_to(listing);
            listing.updated_at = Some(Utc::now());
            listing.clone()
        }))
    }

    async fn delete_listing(&self, id: ListingId, token: &str) -> Result<bool, CoreError> {
        self.require_admin(token)?;
        let mut listings = self.listings.lock().unwrap();
        let before = listings.len();
        listings.retain(|l| l.id != id);
        Ok(listings.len() != before)
    }
}

/// Mint an HS256 token shaped like the backend's. The signature key is
/// irrelevant: the server only inspects claims.
pub fn mint_token(sub: Uuid, expires_in_secs: i64) -> String {
    let claims = serde_json::json!({
        "sub": sub,
        "exp": Utc::now().timestamp() + expires_in_secs,
        "aud": "authenticated",
        "role": "authenticated",
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-signing-secret"),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        supabase: SupabaseConfig::new("http://localhost:54321", "test-anon-key").unwrap(),
    }
}

/// Build the full application router with all middleware layers over the
/// given backend.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(backend: Arc<FakeBackend>) -> Router {
    let state = AppState {
        backend,
        config: Arc::new(test_config()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, None, body).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request(app, Method::POST, uri, Some(token), body).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request(app, Method::PUT, uri, Some(token), body).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
