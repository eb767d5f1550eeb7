mod common;

use axum::http::StatusCode;
use brochure::service::passwords;
use common::{SETUP_KEY, spawn_app, spawn_app_with_ttl};
use serde_json::json;

#[tokio::test]
async fn setup_login_me_logout_lifecycle() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/admin/setup",
            None,
            Some(json!({
                "username": "admin",
                "password": "hunter2hunter2",
                "setupKey": SETUP_KEY,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Admin user created"));

    let (status, body) = app
        .request(
            "POST",
            "/api/admin/login",
            None,
            Some(json!({"username": "admin", "password": "hunter2hunter2"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], json!("admin"));
    assert!(body["user"]["id"].is_string());
    let session_id = body["sessionId"].as_str().expect("missing sessionId");
    assert_eq!(session_id.len(), 64);

    let (status, body) = app
        .request("GET", "/api/admin/me", Some(session_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], json!("admin"));

    let (status, body) = app
        .request("POST", "/api/admin/logout", Some(session_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    // the session is gone server-side, not just forgotten by the client
    let (status, body) = app
        .request("GET", "/api/admin/me", Some(session_id), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn setup_rejects_bad_key_and_duplicate_username() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/admin/setup",
            None,
            Some(json!({
                "username": "admin",
                "password": "hunter2hunter2",
                "setupKey": "guessed-wrong",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], json!("Invalid setup key"));

    // no account was created by the failed attempt
    let user = app
        .state
        .storage
        .get_user_by_username("admin")
        .await
        .unwrap();
    assert!(user.is_none());

    let payload = json!({
        "username": "admin",
        "password": "hunter2hunter2",
        "setupKey": SETUP_KEY,
    });
    let (status, _) = app
        .request("POST", "/api/admin/setup", None, Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request("POST", "/api/admin/setup", None, Some(payload))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("User already exists"));
}

#[tokio::test]
async fn setup_requires_username_and_password() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/admin/setup",
            None,
            Some(json!({"setupKey": SETUP_KEY})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation error"));
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("missing errors array")
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["username", "password"]);
}

#[tokio::test]
async fn setup_checks_the_key_before_field_validation() {
    let app = spawn_app().await;

    // a wrong key wins even when the field checks would also fail
    let (status, body) = app
        .request(
            "POST",
            "/api/admin/setup",
            None,
            Some(json!({"setupKey": "guessed-wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], json!("Invalid setup key"));

    // with the right key the same body falls through to the field rules
    let (status, body) = app
        .request(
            "POST",
            "/api/admin/setup",
            None,
            Some(json!({"setupKey": SETUP_KEY})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation error"));
}

#[tokio::test]
async fn login_rejects_unknown_user_and_wrong_password() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/admin/login",
            None,
            Some(json!({"username": "ghost", "password": "whatever1"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Invalid credentials"));

    app.login_admin().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/admin/login",
            None,
            Some(json!({"username": "admin", "password": "not-the-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Invalid credentials"));

    let (status, _) = app
        .request(
            "POST",
            "/api/admin/login",
            None,
            Some(json!({"username": "admin"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rejects_non_admin_accounts() {
    let app = spawn_app().await;

    let hash = passwords::hash_password("plain-user-pw", 4).unwrap();
    app.state
        .storage
        .create_user("viewer", &hash, false)
        .await
        .unwrap();

    let (status, body) = app
        .request(
            "POST",
            "/api/admin/login",
            None,
            Some(json!({"username": "viewer", "password": "plain-user-pw"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], json!("Not authorized as admin"));
}

#[tokio::test]
async fn failed_logins_do_not_mint_sessions() {
    let app = spawn_app().await;
    app.login_admin().await;

    let hash = passwords::hash_password("plain-user-pw", 4).unwrap();
    app.state
        .storage
        .create_user("viewer", &hash, false)
        .await
        .unwrap();

    // the bootstrap login is the only session so far
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
        .fetch_one(app.state.storage.pool())
        .await
        .unwrap();
    assert_eq!(count.0, 1);

    let rejected_logins = [
        (
            json!({"username": "admin", "password": "not-the-password"}),
            StatusCode::UNAUTHORIZED,
        ),
        (
            json!({"username": "ghost", "password": "whatever1"}),
            StatusCode::UNAUTHORIZED,
        ),
        (
            json!({"username": "viewer", "password": "plain-user-pw"}),
            StatusCode::FORBIDDEN,
        ),
    ];
    for (payload, expected) in &rejected_logins {
        let (status, _) = app
            .request("POST", "/api/admin/login", None, Some(payload.clone()))
            .await;
        assert_eq!(status, *expected, "{payload}");
    }

    // every rejected attempt left the sessions table untouched
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
        .fetch_one(app.state.storage.pool())
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[tokio::test]
async fn non_admin_sessions_are_rejected_by_the_gate() {
    let app = spawn_app().await;

    let hash = passwords::hash_password("plain-user-pw", 4).unwrap();
    let viewer = app
        .state
        .storage
        .create_user("viewer", &hash, false)
        .await
        .unwrap();
    // login never issues sessions for non-admins; forge one to show the
    // gate checks the flag itself
    let session_id = app.state.sessions.create(&viewer).await.unwrap();

    let (status, body) = app
        .request("GET", "/api/admin/me", Some(&session_id), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Unauthorized"));
}

#[tokio::test]
async fn admin_routes_reject_missing_and_bogus_sessions() {
    let app = spawn_app().await;

    let admin_calls = [
        ("GET", "/api/admin/me", None),
        ("PUT", "/api/admin/content/hero", Some(json!({"title": "x"}))),
        (
            "POST",
            "/api/admin/testimonials",
            Some(json!({
                "quote": "Great work.",
                "name": "A B",
                "role": "CEO",
                "company": "Acme",
            })),
        ),
        ("PUT", "/api/admin/testimonials/some-id", Some(json!({}))),
        ("DELETE", "/api/admin/testimonials/some-id", None),
        ("PUT", "/api/admin/contact-info", Some(json!({}))),
        ("GET", "/api/contact", None),
    ];

    for (method, uri, body) in admin_calls {
        let (status, resp) = app.request(method, uri, None, body.clone()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(resp["message"], json!("Unauthorized"), "{method} {uri}");

        let (status, _) = app
            .request(method, uri, Some("fabricated-session-id"), body)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
    }

    // the rejected upsert left no trace
    let (_, sections) = app.request("GET", "/api/content", None, None).await;
    assert_eq!(sections, json!([]));
}

#[tokio::test]
async fn sessions_expire_after_ttl() {
    let app = spawn_app_with_ttl(0).await;
    let session_id = app.login_admin().await;

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let (status, _) = app
        .request("GET", "/api/admin/me", Some(&session_id), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // the expired row was deleted on lookup, not merely skipped
    let row = app.state.storage.get_session(&session_id).await.unwrap();
    assert!(row.is_none());
}

#[tokio::test]
async fn logout_is_idempotent() {
    let app = spawn_app().await;

    // no header at all still succeeds
    let (status, body) = app.request("POST", "/api/admin/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let session_id = app.login_admin().await;
    for _ in 0..2 {
        let (status, body) = app
            .request("POST", "/api/admin/logout", Some(&session_id), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
    }
}
