//! End-to-end flows through the full router: session layer, access gate,
//! pages and the profile endpoint.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use authgate::config::{AuthConfig, SessionConfig};
use authgate::{AppState, Database, PasswordScheme, build_router};

async fn test_app() -> (Router, Arc<AppState>) {
    let db = Database::connect_in_memory().await.expect("in-memory db");
    let auth = AuthConfig {
        password_scheme: PasswordScheme::Sha256,
    };
    let state = Arc::new(AppState::new(db, &SessionConfig::default(), &auth));
    (build_router(state.clone()), state)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// `name=value` part of the Set-Cookie header, if any
fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Register (or log in) and return the authenticated session cookie
async fn sign_in(app: &Router, action: &str, username: &str, password: &str) -> String {
    let body = format!("username={username}&password={password}&action={action}");
    let response = app
        .clone()
        .oneshot(post_form("/login", &body, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "{action} {username}");
    set_cookie(&response).expect("session cookie issued")
}

#[tokio::test]
async fn info_without_session_redirects_to_login() {
    let (app, _) = test_app().await;

    let response = app.oneshot(get("/info", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect_to=/info");
}

#[tokio::test]
async fn register_then_info_returns_profile() {
    let (app, _) = test_app().await;
    let cookie = sign_in(&app, "register", "alice", "secret1").await;

    let response = app.clone().oneshot(get("/info", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["username"], "alice");
    assert!(json["id"].as_i64().unwrap() >= 1);

    // YYYY-MM-DD HH:MM:SS
    let created = json["create_at"].as_str().unwrap();
    assert!(
        chrono::NaiveDateTime::parse_from_str(created, "%Y-%m-%d %H:%M:%S").is_ok(),
        "bad timestamp: {created}"
    );
    assert_eq!(json.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn home_page_reflects_session() {
    let (app, _) = test_app().await;

    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).is_some(), "first contact gets a cookie");
    let html = body_string(response).await;
    assert!(html.contains("Welcome, stranger!"));

    let cookie = sign_in(&app, "register", "alice", "secret1").await;
    let response = app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    assert!(set_cookie(&response).is_none(), "known session keeps its cookie");
    let html = body_string(response).await;
    assert!(html.contains("Welcome, alice"));
    assert!(html.contains(r#"href="/info""#));
}

#[tokio::test]
async fn login_after_register_succeeds() {
    let (app, _) = test_app().await;
    sign_in(&app, "register", "alice", "secret1").await;
    let cookie = sign_in(&app, "login", "alice", "secret1").await;

    let response = app.oneshot(get("/info", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let (app, _) = test_app().await;
    sign_in(&app, "register", "alice", "secret1").await;

    let wrong = app
        .clone()
        .oneshot(post_form("/login", "username=alice&password=nope123&action=login", None))
        .await
        .unwrap();
    let unknown = app
        .clone()
        .oneshot(post_form("/login", "username=mallory&password=nope123&action=login", None))
        .await
        .unwrap();

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let wrong_html = body_string(wrong).await;
    let unknown_html = body_string(unknown).await;
    assert!(wrong_html.contains("Invalid username or password"));
    assert!(unknown_html.contains("Invalid username or password"));
}

#[tokio::test]
async fn duplicate_registration_rejected() {
    let (app, _) = test_app().await;
    sign_in(&app, "register", "alice", "secret1").await;

    let response = app
        .oneshot(post_form(
            "/login",
            "username=alice&password=different1&action=register",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_string(response).await.contains("Username already exists"));
}

#[tokio::test]
async fn length_violations_rejected_before_store() {
    let (app, state) = test_app().await;

    for body in [
        "username=ab&password=secret1&action=register",
        "username=abcdefghijklmnopqrstu&password=secret1&action=register",
        "username=alice&password=12345&action=register",
        "username=alice&password=123456789012345678901&action=register",
    ] {
        let response = app.clone().oneshot(post_form("/login", body, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }

    let count = authgate::account::UserRepository::count(state.db.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn logout_closes_the_session() {
    let (app, _) = test_app().await;
    let cookie = sign_in(&app, "register", "alice", "secret1").await;

    let response = app
        .clone()
        .oneshot(post_form("/logout", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app.oneshot(get("/info", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect_to=/info");
}

#[tokio::test]
async fn login_page_redirects_logged_in_users_home() {
    let (app, _) = test_app().await;

    let response = app
        .clone()
        .oneshot(get("/login?redirect_to=/info", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains(r#"value="/info""#));

    let cookie = sign_in(&app, "register", "alice", "secret1").await;
    let response = app.oneshot(get("/login", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn redirect_to_is_followed_only_for_local_paths() {
    let (app, _) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            "username=alice&password=secret1&action=register&redirect_to=%2Finfo",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/info");

    let response = app
        .oneshot(post_form(
            "/login",
            "username=alice&password=secret1&action=login&redirect_to=https%3A%2F%2Fevil.example",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn redirect_to_with_line_break_falls_back_home() {
    let (app, state) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            "username=alice&password=secret1&action=register&redirect_to=%2Finfo%0Ax",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = set_cookie(&response).expect("session cookie issued");

    let count = authgate::account::UserRepository::count(state.db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);

    let response = app.oneshot(get("/info", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_rotates_session_id() {
    let (app, _) = test_app().await;

    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    let anonymous = set_cookie(&response).unwrap();

    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            "username=alice&password=secret1&action=register",
            Some(&anonymous),
        ))
        .await
        .unwrap();
    let authenticated = set_cookie(&response).unwrap();
    assert_ne!(anonymous, authenticated);

    // The pre-login id never becomes authenticated
    let response = app.oneshot(get("/info", Some(&anonymous))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn tampered_cookie_is_anonymous() {
    let (app, _) = test_app().await;
    let cookie = sign_in(&app, "register", "alice", "secret1").await;

    let mut forged = cookie.clone();
    let last = forged.pop().unwrap();
    forged.push(if last == 'a' { 'b' } else { 'a' });

    let response = app.oneshot(get("/info", Some(&forged))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn internal_assets_are_public() {
    let (app, _) = test_app().await;

    let response = app.clone().oneshot(get("/_authgate/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["code"], 0);

    let response = app.clone().oneshot(get("/_authgate/style.css", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css; charset=utf-8"
    );

    let response = app.oneshot(get("/_authgate/openapi.json", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("/info"));
}

#[tokio::test]
async fn configured_cookie_name_is_issued_and_documented() {
    let db = Database::connect_in_memory().await.expect("in-memory db");
    let session = SessionConfig {
        cookie_name: "sid".to_string(),
        ..SessionConfig::default()
    };
    let state = Arc::new(AppState::new(db, &session, &AuthConfig::default()));
    let app = build_router(state);

    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    assert!(set_cookie(&response).unwrap().starts_with("sid="));

    let response = app.oneshot(get("/_authgate/openapi.json", None)).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        json["components"]["securitySchemes"]["session_cookie"]["name"],
        "sid"
    );
}

#[tokio::test]
async fn unknown_paths_are_gated() {
    let (app, _) = test_app().await;

    let response = app.clone().oneshot(get("/admin", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect_to=/admin");

    let cookie = sign_in(&app, "register", "alice", "secret1").await;
    let response = app.oneshot(get("/admin", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn info_for_vanished_user_is_not_found() {
    let (app, state) = test_app().await;
    let cookie = sign_in(&app, "register", "alice", "secret1").await;

    sqlx::query("DELETE FROM users WHERE username = 'alice'")
        .execute(state.db.pool())
        .await
        .unwrap();

    let response = app.oneshot(get("/info", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
