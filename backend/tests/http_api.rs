//! End-to-end HTTP flows over the assembled application.
//!
//! Every test builds the full app from `server::build_app` with in-memory
//! repositories, so sessions, validation, ownership and tracing run exactly
//! as they do in production.

use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use geonotes::domain::{LoginMode, TRACE_ID_HEADER};
use geonotes::inbound::http::health::HealthState;
use geonotes::server::{AppDependencies, Repositories, SESSION_COOKIE, build_app, build_http_state};
use rstest::rstest;
use serde_json::{Value, json};

const PASSWORD: &str = "secret1";

fn dependencies(login_mode: LoginMode) -> AppDependencies {
    signed_with(Key::generate(), login_mode)
}

/// Fresh in-memory stores behind a caller-chosen cookie key.
fn signed_with(key: Key, login_mode: LoginMode) -> AppDependencies {
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(build_http_state(Repositories::in_memory(), login_mode)),
        key,
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

struct Reply {
    status: StatusCode,
    cookie: Option<Cookie<'static>>,
    trace_id: Option<String>,
    body: Value,
}

async fn send<S, B>(app: &S, request: test::TestRequest) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned);
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    Reply {
        status,
        cookie,
        trace_id,
        body,
    }
}

fn credentials(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

async fn sign_up<S, B>(app: &S, email: &str) -> (Cookie<'static>, i64)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let reply = send(
        app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(credentials(email, PASSWORD)),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "register failed: {}", reply.body);
    let id = reply.body["id"].as_i64().expect("user id");
    (reply.cookie.expect("session cookie"), id)
}

async fn create_point<S, B>(app: &S, cookie: &Cookie<'static>, description: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let reply = send(
        app,
        test::TestRequest::put()
            .uri("/api/points")
            .cookie(cookie.clone())
            .set_json(json!({
                "longitude": 30.3158,
                "latitude": 59.9391,
                "description": description,
            })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "create failed: {}", reply.body);
    reply.body
}

#[rstest]
#[actix_web::test]
async fn registered_user_creates_and_lists_points() {
    let app = test::init_service(build_app(dependencies(LoginMode::Strict))).await;
    let (cookie, user_id) = sign_up(&app, "Ada@Example.com ").await;

    let me = send(&app, test::TestRequest::get().uri("/api/user").cookie(cookie.clone())).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], json!("ada@example.com"));
    assert_eq!(me.body["id"], json!(user_id));

    let created = create_point(&app, &cookie, "Palace Square").await;
    assert_eq!(created["owner_id"], json!(user_id));
    assert_eq!(created["description"], json!("Palace Square"));

    let listed = send(&app, test::TestRequest::get().uri("/api/points")).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([created]));
}

#[rstest]
#[actix_web::test]
async fn ownership_is_enforced_for_updates_and_deletes() {
    let app = test::init_service(build_app(dependencies(LoginMode::Strict))).await;
    let (owner, _) = sign_up(&app, "owner@example.com").await;
    let (intruder, _) = sign_up(&app, "intruder@example.com").await;
    let point = create_point(&app, &owner, "Owned").await;
    let uri = format!("/api/points/{}", point["id"]);
    let edit = json!({ "longitude": 1.0, "latitude": 2.0, "description": "Edited" });

    let foreign_update = send(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .cookie(intruder.clone())
            .set_json(edit.clone()),
    )
    .await;
    assert_eq!(foreign_update.status, StatusCode::FORBIDDEN);
    assert_eq!(foreign_update.body["code"], json!("forbidden"));

    let foreign_delete = send(&app, test::TestRequest::delete().uri(&uri).cookie(intruder)).await;
    assert_eq!(foreign_delete.status, StatusCode::FORBIDDEN);

    let anonymous_delete = send(&app, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(anonymous_delete.status, StatusCode::UNAUTHORIZED);

    let update = send(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .cookie(owner.clone())
            .set_json(edit),
    )
    .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["description"], json!("Edited"));
    assert_eq!(update.body["created_at"], point["created_at"]);

    let delete = send(&app, test::TestRequest::delete().uri(&uri).cookie(owner.clone())).await;
    assert_eq!(delete.status, StatusCode::NO_CONTENT);
    assert_eq!(delete.body, Value::Null);

    let again = send(&app, test::TestRequest::delete().uri(&uri).cookie(owner)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["code"], json!("not_found"));
}

#[rstest]
#[case::missing("/api/points/999")]
#[case::malformed("/api/points/not-a-number")]
#[actix_web::test]
async fn unknown_point_ids_are_not_found(#[case] uri: &str) {
    let app = test::init_service(build_app(dependencies(LoginMode::Strict))).await;
    let (cookie, _) = sign_up(&app, "owner@example.com").await;

    let update = send(
        &app,
        test::TestRequest::put()
            .uri(uri)
            .cookie(cookie.clone())
            .set_json(json!({ "longitude": 1.0, "latitude": 2.0 })),
    )
    .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let anonymous_delete = send(&app, test::TestRequest::delete().uri(uri)).await;
    assert_eq!(anonymous_delete.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn invalid_points_report_field_errors() {
    let app = test::init_service(build_app(dependencies(LoginMode::Strict))).await;
    let (cookie, _) = sign_up(&app, "owner@example.com").await;

    let reply = send(
        &app,
        test::TestRequest::put()
            .uri("/api/points")
            .cookie(cookie)
            .set_json(json!({ "latitude": 95, "description": "Nowhere" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], json!("invalid_request"));
    let errors = &reply.body["details"]["errors"];
    assert!(errors.get("longitude").is_some(), "errors: {errors}");
    assert!(errors.get("latitude").is_some(), "errors: {errors}");
}

#[rstest]
#[actix_web::test]
async fn longitudes_past_the_antimeridian_are_wrapped() {
    let app = test::init_service(build_app(dependencies(LoginMode::Strict))).await;
    let (cookie, _) = sign_up(&app, "owner@example.com").await;

    let reply = send(
        &app,
        test::TestRequest::put()
            .uri("/api/points")
            .cookie(cookie)
            .set_json(json!({ "longitude": 190, "latitude": -16.5, "description": "Fiji" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK, "create failed: {}", reply.body);
    assert_eq!(reply.body["longitude"], json!(-170.0));
    assert_eq!(reply.body["latitude"], json!(-16.5));
}

#[rstest]
#[actix_web::test]
async fn cookies_for_users_missing_from_the_store_are_rejected() {
    let key = Key::generate();
    let issuer = test::init_service(build_app(signed_with(key.clone(), LoginMode::Strict))).await;
    let (cookie, _) = sign_up(&issuer, "owner@example.com").await;
    let stranger = test::init_service(build_app(signed_with(key, LoginMode::Strict))).await;

    let me = send(&stranger, test::TestRequest::get().uri("/api/user").cookie(cookie.clone())).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body, Value::Null);

    let created = send(
        &stranger,
        test::TestRequest::put()
            .uri("/api/points")
            .cookie(cookie)
            .set_json(json!({ "longitude": 30.3158, "latitude": 59.9391 })),
    )
    .await;
    assert_eq!(created.status, StatusCode::UNAUTHORIZED);
    assert_eq!(created.body["code"], json!("unauthorized"));

    let listed = send(&stranger, test::TestRequest::get().uri("/api/points")).await;
    assert_eq!(listed.body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_rejected() {
    let app = test::init_service(build_app(dependencies(LoginMode::Strict))).await;
    sign_up(&app, "ada@example.com").await;

    let reply = send(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(credentials("ADA@example.com", PASSWORD)),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["details"]["errors"].get("email").is_some());
}

#[rstest]
#[case::wrong_password("ada@example.com", "not-the-secret", "password")]
#[case::unknown_email("grace@example.com", PASSWORD, "email")]
#[actix_web::test]
async fn strict_login_rejects_bad_credentials(
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
) {
    let app = test::init_service(build_app(dependencies(LoginMode::Strict))).await;
    sign_up(&app, "ada@example.com").await;

    let reply = send(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(credentials(email, password)),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["details"]["errors"].get(field).is_some());
    assert!(reply.cookie.is_none());
}

#[rstest]
#[actix_web::test]
async fn login_after_registration_starts_a_session() {
    let app = test::init_service(build_app(dependencies(LoginMode::Strict))).await;
    let (_, user_id) = sign_up(&app, "ada@example.com").await;

    let login = send(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(credentials("ada@example.com", PASSWORD)),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK);
    let cookie = login.cookie.expect("session cookie");

    let me = send(&app, test::TestRequest::get().uri("/api/user").cookie(cookie)).await;
    assert_eq!(me.body["id"], json!(user_id));
}

#[rstest]
#[actix_web::test]
async fn logout_clears_the_session() {
    let app = test::init_service(build_app(dependencies(LoginMode::Strict))).await;
    let (cookie, _) = sign_up(&app, "ada@example.com").await;

    let logout = send(&app, test::TestRequest::post().uri("/api/logout").cookie(cookie)).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body, Value::Null);
    let removal = logout.cookie.expect("removal cookie");
    assert_eq!(removal.value(), "");

    let me = send(&app, test::TestRequest::get().uri("/api/user")).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn error_trace_id_matches_response_header() {
    let app = test::init_service(build_app(dependencies(LoginMode::Strict))).await;

    let reply = send(
        &app,
        test::TestRequest::put()
            .uri("/api/points")
            .set_json(json!({ "longitude": 1.0, "latitude": 2.0 })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    let header = reply.trace_id.expect("trace-id header");
    assert_eq!(reply.body["traceId"], json!(header));
}

#[rstest]
#[actix_web::test]
async fn first_login_registers_unknown_accounts() {
    let app = test::init_service(build_app(dependencies(LoginMode::RegisterOnFirstLogin))).await;

    let first = send(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(credentials("new@example.com", PASSWORD)),
    )
    .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["email"], json!("new@example.com"));
    assert!(first.cookie.is_some());

    let wrong = send(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(credentials("new@example.com", "other-password")),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);
    assert_eq!(wrong.body["code"], json!("forbidden"));
}

#[rstest]
#[actix_web::test]
async fn health_probes_sit_outside_the_api_scope() {
    let deps = dependencies(LoginMode::Strict);
    let health = deps.health_state.clone();
    let app = test::init_service(build_app(deps)).await;

    let before = send(&app, test::TestRequest::get().uri("/health/ready")).await;
    assert_eq!(before.status, StatusCode::SERVICE_UNAVAILABLE);

    health.mark_ready();
    let after = send(&app, test::TestRequest::get().uri("/health/ready")).await;
    assert_eq!(after.status, StatusCode::OK);

    let live = send(&app, test::TestRequest::get().uri("/health/live")).await;
    assert_eq!(live.status, StatusCode::OK);
}
