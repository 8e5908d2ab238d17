//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use serde_json::json;

use crate::domain::ports::{
    MockCurrentUserQuery, MockLoginService, MockPointsCommand, MockPointsQuery,
    MockRegistrationService,
};
use crate::domain::{
    Description, Email, Latitude, Longitude, PasswordHash, Point, PointDraft, PointId, PointParts,
    User, UserId,
};
use crate::inbound::http::error::json_config;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mocked driving ports. Unconfigured mocks panic when called, which makes
/// an unexpected port call fail the test.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub current_user: MockCurrentUserQuery,
    pub points_query: MockPointsQuery,
    pub points_command: MockPointsCommand,
}

impl MockPorts {
    /// Make `POST /api/login` succeed as `user_id` for any credentials.
    pub fn signing_in_as(mut self, user_id: i64) -> Self {
        self.login
            .expect_authenticate()
            .returning(move |_| Ok(sample_user(user_id)));
        self
    }

    /// Like [`Self::signing_in_as`], with `user_id` also resolving to an
    /// existing account on every request.
    pub fn acting_as(mut self, user_id: i64) -> Self {
        self.current_user
            .expect_current_user()
            .returning(move |_| Ok(Some(sample_user(user_id))));
        self.signing_in_as(user_id)
    }

    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            current_user: Arc::new(self.current_user),
            points_query: Arc::new(self.points_query),
            points_command: Arc::new(self.points_command),
        })
    }
}

/// App with every `/api` route registered over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .service(
            web::scope("/api")
                .wrap(test_session_middleware())
                .configure(super::configure_api),
        )
}

pub fn sample_user(id: i64) -> User {
    let now = Utc::now();
    User::new(
        UserId::new(id).expect("valid user id"),
        Email::new(format!("user{id}@example.com")).expect("valid email"),
        PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA").expect("valid hash"),
        now,
        now,
    )
}

pub fn sample_point(id: i64, owner: i64) -> Point {
    let now = Utc::now();
    Point::new(PointParts {
        id: PointId::new(id).expect("valid point id"),
        owner_id: UserId::new(owner).expect("valid owner id"),
        draft: PointDraft {
            longitude: Longitude::new(30.3141).expect("longitude"),
            latitude: Latitude::new(59.9386).expect("latitude"),
            description: Description::new("Palace Square").expect("description"),
        },
        created_at: now,
        updated_at: now,
    })
}

/// Sign in through `POST /api/login` and return the session cookie.
pub async fn session_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": "owner@example.com", "password": "secret1" }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "login failed: {}", response.status());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
