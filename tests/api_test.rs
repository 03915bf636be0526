use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use notedeck::server::{build_router, seed_admin, AppState};
use notedeck::uploads::MediaStore;
use notedeck::{Config, SqliteStore};

const ADMIN: (&str, &str) = ("admin", "adminpass");
const BOUNDARY: &str = "notedeck-test-boundary";

struct TestApp {
    router: Router,
    state: AppState,
    _tmp: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let config = Config {
            upload_dir: tmp.path().join("uploads"),
            ..Config::default()
        };

        let store = SqliteStore::open_in_memory().unwrap();
        seed_admin(&store, &config).unwrap();
        let media = MediaStore::new(config.upload_dir.clone()).await.unwrap();

        let state = AppState::new(store, media, config);
        TestApp {
            router: build_router(state.clone()),
            state,
            _tmp: tmp,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn register(&self, username: &str, password: &str) -> Response {
        self.send(form_request("/register", username, password, None)).await
    }

    /// Log in and return the session cookie.
    async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .send(form_request("/login", username, password, None))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("login sets a session cookie")
    }

    async fn signup(&self, username: &str) -> String {
        let response = self.register(username, "password").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        self.login(username, "password").await
    }
}

fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn form_request(uri: &str, username: &str, password: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(format!("username={}&password={}", username, password)))
        .unwrap()
}

fn json_request(method: Method, uri: &str, cookie: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn multipart_request(uri: &str, cookie: &str, fields: &[(&str, Option<&str>, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, filename, value) in fields {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        match filename {
            Some(filename) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                name, filename
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                name
            )),
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_note(app: &TestApp, cookie: &str, title: &str, is_public: bool) -> i64 {
    let response = app
        .send(json_request(
            Method::POST,
            "/api/notes",
            cookie,
            json!({ "title": title, "content": "body", "is_public": is_public }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_register_login_and_duplicate() {
    let app = TestApp::new().await;

    let response = app.register("alice", "pw").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app.register("alice", "other").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.send(form_request("/login", "alice", "pw", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/feed");

    let response = app.send(form_request("/login", "alice", "wrong", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_admin_login_redirects_to_dashboard() {
    let app = TestApp::new().await;
    let response = app
        .send(form_request("/login", ADMIN.0, ADMIN.1, None))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/dashboard");
}

#[tokio::test]
async fn test_api_requires_login() {
    let app = TestApp::new().await;
    let response = app
        .send(Request::builder().uri("/api/notes").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new().await;
    let cookie = app.signup("alice").await;

    let response = app.send(get("/logout", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app.send(get("/api/notes", &cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_private_notes_stay_out_of_public_feed() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;

    let private_id = create_note(&app, &alice, "Diary", false).await;
    create_note(&app, &alice, "Announcement", true).await;

    let feed = body_json(app.send(get("/api/notes/public", &bob)).await).await;
    let titles: Vec<&str> = feed
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Announcement"]);
    assert_eq!(feed[0]["author"], "alice");

    let response = app.send(get(&format!("/api/notes/{}", private_id), &bob)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let mine = body_json(app.send(get("/api/notes", &alice)).await).await;
    assert_eq!(mine.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_note_missing_fields() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let response = app
        .send(json_request(Method::POST, "/api/notes", &alice, json!({ "title": "Only title" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Missing title or content");
}

#[tokio::test]
async fn test_note_update_is_owner_only() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = create_note(&app, &alice, "Draft", true).await;
    let uri = format!("/api/notes/{}", id);

    let response = app
        .send(json_request(Method::PUT, &uri, &bob, json!({ "title": "Hijacked" })))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .send(json_request(Method::PUT, &uri, &alice, json!({ "title": "Final", "is_public": false })))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let note = body_json(app.send(get(&uri, &alice)).await).await;
    assert_eq!(note["title"], "Final");
    assert_eq!(note["is_public"], false);

    let response = app.send(get("/api/notes/9999", &alice)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_note_with_image_via_multipart() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let response = app
        .send(multipart_request(
            "/api/notes",
            &alice,
            &[
                ("title", None, "Trip"),
                ("content", None, "Photos"),
                ("is_public", None, "on"),
                ("image", Some("beach photo.png"), "fake-png"),
            ],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let note = body_json(app.send(get(&format!("/api/notes/{}", id), &alice)).await).await;
    assert_eq!(note["image_filename"], "beach_photo.png");
    assert_eq!(note["is_public"], true);
    assert!(app.state.media.path_for("beach_photo.png").exists());

    let response = app
        .send(multipart_request(
            "/api/notes",
            &alice,
            &[
                ("title", None, "Bad"),
                ("content", None, "Attachment"),
                ("image", Some("script.exe"), "nope"),
            ],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vote_toggle() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = create_note(&app, &alice, "Vote on me", true).await;
    let uri = format!("/api/notes/{}/vote", id);

    let body = body_json(
        app.send(json_request(Method::POST, &uri, &bob, json!({ "vote_type": "up" })))
            .await,
    )
    .await;
    assert_eq!(body["outcome"], "added");
    assert_eq!(body["score"], 1);

    let body = body_json(
        app.send(json_request(Method::POST, &uri, &bob, json!({ "vote_type": "up" })))
            .await,
    )
    .await;
    assert_eq!(body["outcome"], "removed");
    assert_eq!(body["vote"], Value::Null);
    assert_eq!(body["score"], 0);

    app.send(json_request(Method::POST, &uri, &bob, json!({ "vote_type": "up" })))
        .await;
    let body = body_json(
        app.send(json_request(Method::POST, &uri, &bob, json!({ "vote_type": "down" })))
            .await,
    )
    .await;
    assert_eq!(body["outcome"], "switched");
    assert_eq!(body["vote"], "down");
    assert_eq!(body["score"], -1);

    let response = app
        .send(json_request(Method::POST, &uri, &bob, json!({ "vote_type": "sideways" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vote_on_private_note_is_not_found() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = create_note(&app, &alice, "Secret", false).await;

    let response = app
        .send(json_request(
            Method::POST,
            &format!("/api/notes/{}/vote", id),
            &bob,
            json!({ "vote_type": "up" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_delete_by_other_user_is_refused() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;

    let response = app
        .send(json_request(
            Method::POST,
            "/api/tasks",
            &alice,
            json!({ "description": "Buy milk", "category": "Errands" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/tasks/{}", id))
        .header(header::COOKIE, &bob)
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let tasks = body_json(app.send(get("/api/tasks", &alice)).await).await;
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["description"], "Buy milk");
}

#[tokio::test]
async fn test_task_validation_and_category_delete() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let response = app
        .send(json_request(Method::POST, "/api/tasks", &alice, json!({ "description": "No category" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    for (description, category) in [("a", "Work"), ("b", "Work"), ("c", "Home")] {
        app.send(json_request(
            Method::POST,
            "/api/tasks",
            &alice,
            json!({ "description": description, "category": category }),
        ))
        .await;
    }

    let body = body_json(
        app.send(json_request(
            Method::POST,
            "/api/tasks/delete_category",
            &alice,
            json!({ "category": "Work" }),
        ))
        .await,
    )
    .await;
    assert_eq!(body["deleted"], 2);

    let tasks = body_json(app.send(get("/api/tasks", &alice)).await).await;
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["category"], "Home");
}

#[tokio::test]
async fn test_upload_rejects_disallowed_type() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let response = app
        .send(multipart_request(
            "/upload",
            &alice,
            &[("file", Some("payload.exe"), "MZ"), ("category", None, "Junk")],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let uploads = body_json(app.send(get("/upload", &alice)).await).await;
    assert!(uploads.as_object().unwrap().is_empty());
    assert!(!app.state.media.path_for("payload.exe").exists());
}

#[tokio::test]
async fn test_upload_groups_by_category() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let response = app
        .send(multipart_request(
            "/upload",
            &alice,
            &[("file", Some("clip.mp4"), "video"), ("category", None, "Travel")],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/upload");

    app.send(multipart_request("/upload", &alice, &[("file", Some("cat.jpg"), "img")]))
        .await;

    let uploads = body_json(app.send(get("/upload", &alice)).await).await;
    assert_eq!(uploads["Travel"][0]["filename"], "clip.mp4");
    assert_eq!(uploads["Travel"][0]["kind"], "video");
    assert_eq!(uploads["Uncategorized"][0]["filename"], "cat.jpg");

    let response = app
        .send(multipart_request("/upload", &alice, &[("category", None, "Empty")]))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_theme() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let response = app.send(get("/set_theme/neon", &alice)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid theme");

    let request = Request::builder()
        .uri("/set_theme/dark")
        .header(header::COOKIE, &alice)
        .header(header::REFERER, "/profile")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile");

    let profile = body_json(app.send(get("/profile", &alice)).await).await;
    assert_eq!(profile["theme"], "dark");
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let before = body_json(app.send(get("/profile", &alice)).await).await;

    let response = app
        .send(json_request(
            Method::POST,
            "/update_profile",
            &alice,
            json!({ "avatar_url": "", "bio": "Gardener" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = body_json(app.send(get("/profile", &alice)).await).await;
    assert_eq!(after["bio"], "Gardener");
    assert_eq!(after["avatar_url"], before["avatar_url"]);
}

#[tokio::test]
async fn test_explore_filters_by_topic() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    for (title, topic) in [("Sourdough", "baking"), ("Rust tips", "code")] {
        app.send(json_request(
            Method::POST,
            "/api/notes",
            &alice,
            json!({ "title": title, "content": "x", "is_public": true, "topic": topic }),
        ))
        .await;
    }

    let body = body_json(app.send(get("/explore?query=topic:baking", &alice)).await).await;
    let notes = body["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Sourdough");

    let feed = body_json(app.send(get("/feed", &alice)).await).await;
    assert_eq!(feed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let response = app.send(get("/admin/dashboard", &alice)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .send(Request::builder().uri("/admin/users").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_manages_users_and_pages() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let note_id = create_note(&app, &alice, "Spam", true).await;
    let admin = app.login(ADMIN.0, ADMIN.1).await;

    let dashboard = body_json(app.send(get("/admin/dashboard", &admin)).await).await;
    assert_eq!(dashboard["counts"]["users"], 2);
    assert_eq!(dashboard["counts"]["notes"], 1);

    let response = app.send(get(&format!("/admin/pages/delete/{}", note_id), &admin)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/pages");
    let pages = body_json(app.send(get("/admin/pages", &admin)).await).await;
    assert!(pages.as_array().unwrap().is_empty());

    let users = body_json(app.send(get("/admin/users", &admin)).await).await;
    let alice_id = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "alice")
        .and_then(|u| u["id"].as_i64())
        .unwrap();
    let admin_id = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "admin")
        .and_then(|u| u["id"].as_i64())
        .unwrap();

    let response = app
        .send(form_request(
            &format!("/admin/users/edit/{}", alice_id),
            "alicia",
            "",
            Some(&admin),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = app.send(form_request("/login", "alicia", "password", None)).await;
    assert_eq!(location(&response), "/feed");

    let response = app.send(get(&format!("/admin/users/delete/{}", admin_id), &admin)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.send(get(&format!("/admin/users/delete/{}", alice_id), &admin)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.send(get("/api/notes", &alice)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.send(get("/admin/users/delete/9999", &admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

async fn user_id(app: &TestApp, admin: &str, username: &str) -> Option<i64> {
    let users = body_json(app.send(get("/admin/users", admin)).await).await;
    users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == username)
        .and_then(|u| u["id"].as_i64())
}

#[tokio::test]
async fn test_non_admin_cannot_delete_users() {
    let app = TestApp::new().await;
    let mallory = app.signup("mallory").await;
    app.signup("victim").await;
    let admin = app.login(ADMIN.0, ADMIN.1).await;
    let victim_id = user_id(&app, &admin, "victim").await.unwrap();

    let response = app
        .send(get(&format!("/admin/users/delete/{}", victim_id), &mallory))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    assert_eq!(user_id(&app, &admin, "victim").await, Some(victim_id));
    let response = app.send(form_request("/login", "victim", "password", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/feed");
}

#[tokio::test]
async fn test_deleting_user_removes_their_uploaded_files() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;

    app.send(multipart_request("/upload", &alice, &[("file", Some("alice.mp4"), "v")]))
        .await;
    app.send(multipart_request("/upload", &alice, &[("file", Some("shared.png"), "a")]))
        .await;
    app.send(multipart_request("/upload", &bob, &[("file", Some("shared.png"), "b")]))
        .await;
    assert!(app.state.media.path_for("alice.mp4").exists());

    let admin = app.login(ADMIN.0, ADMIN.1).await;
    let alice_id = user_id(&app, &admin, "alice").await.unwrap();
    let response = app
        .send(get(&format!("/admin/users/delete/{}", alice_id), &admin))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert!(!app.state.media.path_for("alice.mp4").exists());
    assert!(app.state.media.path_for("shared.png").exists());
}

#[tokio::test]
async fn test_json_body_errors_are_json_400() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tasks")
        .header(header::COOKIE, &alice)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("description=x"))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());

    let response = app
        .send(json_request(
            Method::POST,
            "/api/tasks",
            &alice,
            json!({ "description": 42, "category": ["x"] }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());

    let response = app
        .send(json_request(Method::POST, "/update_profile", &alice, json!({ "bio": 7 })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_set_theme_ignores_foreign_referer() {
    let app = TestApp::new().await;
    let alice = app.signup("alice").await;

    let request = Request::builder()
        .uri("/set_theme/light")
        .header(header::COOKIE, &alice)
        .header(header::HOST, "localhost:5000")
        .header(header::REFERER, "https://evil.example/phish")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let request = Request::builder()
        .uri("/set_theme/purple")
        .header(header::COOKIE, &alice)
        .header(header::HOST, "localhost:5000")
        .header(header::REFERER, "http://localhost:5000/explore?query=rust")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(location(&response), "/explore?query=rust");
}
