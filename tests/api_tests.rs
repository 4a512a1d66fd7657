mod common;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::json;

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-frame-options"], "SAMEORIGIN");
    assert_eq!(resp.text().await.unwrap(), "ok");
}

// ── Session ─────────────────────────────────────────────────────

#[tokio::test]
async fn login_valid_credentials() {
    let app = common::spawn_app().await;

    let (body, status) = app.login(common::USERNAME, common::PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], true);

    let (body, _) = app.get_json("/api/v1/auth/session").await;
    assert_eq!(body["authenticated"], true);
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = common::spawn_app().await;

    let (wrong_password, status) = app.login(common::USERNAME, "nope").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (wrong_user, status) = app.login("root", common::PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["error"], wrong_user["error"]);

    let (body, _) = app.get_json("/api/v1/auth/session").await;
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn login_is_throttled_after_repeated_failures() {
    let app = common::spawn_app().await;

    for _ in 0..5 {
        let (_, status) = app.login(common::USERNAME, "nope").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused while throttled.
    let (_, status) = app.login(common::USERNAME, common::PASSWORD).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn session_survives_until_logout() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/api/v1/auth/login"))
        .json(&json!({ "username": common::USERNAME, "password": common::PASSWORD }))
        .send()
        .await
        .unwrap();
    let cookie = resp.headers()["set-cookie"].to_str().unwrap().to_string();
    assert!(cookie.starts_with("lander_session="), "{cookie}");
    assert!(cookie.contains("HttpOnly"), "{cookie}");
    assert!(cookie.contains("SameSite=Strict"), "{cookie}");

    // Only a digest of the token is persisted.
    let token = cookie["lander_session=".len()..].split(';').next().unwrap();
    let stored = std::fs::read_to_string(app.data_path().join("admin_authenticated.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert!(stored.is_string());
    assert!(!stored.as_str().unwrap().contains(token));

    let (body, status) = app.post_json("/api/v1/auth/logout", &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
    assert!(!app.data_path().join("admin_authenticated.json").exists());

    let (_, status) = app.get_json("/api/v1/projects").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_belongs_to_the_browser_that_logged_in() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let project = app.create_project(&common::project_body("Acme", "modern")).await;
    let id = project["id"].as_str().unwrap();

    let stranger = common::new_client();

    let resp = stranger.get(app.url("/api/v1/projects")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = stranger
        .post(app.url(&format!("/projects/{id}/delete")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/login");

    // A stranger's logout leaves the operator's session alone.
    let resp = stranger.post(app.url("/api/v1/auth/logout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, status) = app.get_json(&format!("/api/v1/projects/{id}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn api_requires_login() {
    let app = common::spawn_app().await;

    let (body, status) = app.get_json("/api/v1/projects").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (_, status) = app.get_json("/api/v1/templates").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn views_redirect_to_login() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/dashboard")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/login?next=/dashboard");

    let resp = app.client.post(app.url("/projects/abc/delete")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/login");

    let resp = app.client.get(app.url("/login")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("name=\"password\""));
}

#[tokio::test]
async fn login_form_opens_the_dashboard() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/login"))
        .form(&[("username", "admin"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Invalid username or password."));

    let resp = app
        .client
        .post(app.url("/login"))
        .form(&[
            ("username", common::USERNAME),
            ("password", common::PASSWORD),
            ("next", "https://evil.test/"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/dashboard");

    let resp = app.client.get(app.url("/login?next=/projects/new")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/projects/new");

    let resp = app.client.get(app.url("/dashboard")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("No projects yet"));

    let resp = app.client.post(app.url("/logout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/login");

    let resp = app.client.get(app.url("/dashboard")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

// ── Templates ───────────────────────────────────────────────────

#[tokio::test]
async fn lists_builtin_templates_in_order() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app.get_json("/api/v1/templates").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["modern", "classic"]);
    assert_eq!(body[0]["name"], "Modern (Tailwind)");
    assert_eq!(body[1]["name"], "Classic (Bootstrap)");
}

#[tokio::test]
async fn preview_renders_unsaved_input() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let resp = app
        .client
        .post(app.url("/api/v1/preview"))
        .json(&common::project_body("Preview Shop", "classic"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Preview Shop"));

    let (_, status) = app.get_json("/api/v1/projects").await;
    assert_eq!(status, StatusCode::OK);
}

// ── Projects ────────────────────────────────────────────────────

#[tokio::test]
async fn project_crud_lifecycle() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let created = app
        .create_project(&common::project_body("Acme Store", "modern"))
        .await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["websiteName"], "Acme Store");
    assert!(created["createdAt"].is_string());

    let (list, _) = app.get_json("/api/v1/projects").await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let mut changed = common::project_body("Acme Store", "classic");
    changed["productPhotos"] = json!(["  https://x/a.jpg ", "", "https://x/b.jpg"]);
    changed["mainWebsiteUrl"] = json!("   ");
    let (updated, status) = app.put_json(&format!("/api/v1/projects/{id}"), &changed).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["template"], "classic");
    assert_eq!(updated["productPhotos"], json!(["https://x/a.jpg", "https://x/b.jpg"]));
    assert!(updated.get("mainWebsiteUrl").is_none());

    let (fetched, status) = app.get_json(&format!("/api/v1/projects/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let (_, status) = app.delete(&format!("/api/v1/projects/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app.get_json(&format!("/api/v1/projects/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, status) = app.delete(&format!("/api/v1/projects/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_rejects_missing_fields_and_unknown_template() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let mut body = common::project_body("Acme", "modern");
    body["price"] = json!("");
    body["productTitle"] = json!("   ");
    let (resp, status) = app.post_json("/api/v1/projects", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = resp["error"].as_str().unwrap();
    assert!(message.contains("productTitle"));
    assert!(message.contains("price"));

    let (resp, status) = app
        .post_json("/api/v1/projects", &common::project_body("Acme", "retro"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], "Unknown template: retro");

    let (list, _) = app.get_json("/api/v1/projects").await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn numeric_price_is_accepted() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let mut body = common::project_body("Acme", "modern");
    body["price"] = json!(19.5);
    let created = app.create_project(&body).await;
    assert_eq!(created["price"], "19.5");
}

#[tokio::test]
async fn download_returns_html_attachment() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let mut body = common::project_body("Acme Store", "modern");
    body["mainWebsiteUrl"] = json!("https://acme.test");
    let created = app.create_project(&body).await;
    let id = created["id"].as_str().unwrap();

    let resp = app
        .client
        .get(app.url(&format!("/api/v1/projects/{id}/html")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let disposition = resp.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("acme_store_index.html"));

    let html = resp.text().await.unwrap();
    assert!(html.contains("<title>Widget - Acme Store</title>"));
    assert!(html.contains("https://acme.test"));
    assert!(html.contains("&copy; 2024 Acme Store"));
}

#[tokio::test]
async fn stored_record_with_unknown_template_fails_to_render() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let records = json!([{
        "id": "legacy-1",
        "websiteName": "Old Shop",
        "productPhotos": [],
        "productTitle": "Thing",
        "shortDescription": "A thing",
        "fullDescription": "<p>Thing</p>",
        "price": 5,
        "buyButtonText": "Buy",
        "template": "retro",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    }]);
    std::fs::write(
        app.data_path().join("admin_projects.json"),
        serde_json::to_string(&records).unwrap(),
    )
    .unwrap();

    let (project, status) = app.get_json("/api/v1/projects/legacy-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["price"], "5");

    let (body, status) = app.get_json("/api/v1/projects/legacy-1/html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Template not found: retro");

    let resp = app
        .client
        .get(app.url("/projects/legacy-1/download"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/dashboard?notice=render-failed");
}

#[tokio::test]
async fn editor_form_saves_repeated_photo_fields() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let resp = app
        .client
        .post(app.url("/projects"))
        .form(&[
            ("website_name", "Form Shop"),
            ("product_title", "Widget"),
            ("short_description", "Best widget"),
            ("full_description", "<p>Great</p>"),
            ("price", "9.99"),
            ("buy_button_text", "Buy"),
            ("template", "classic"),
            ("product_photos", "https://x/a.jpg"),
            ("product_photos", ""),
            ("product_photos", "https://x/b.jpg"),
            ("logo", ""),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/dashboard?notice=created");

    let (list, _) = app.get_json("/api/v1/projects").await;
    let saved = &list[0];
    assert_eq!(saved["websiteName"], "Form Shop");
    assert_eq!(saved["productPhotos"], json!(["https://x/a.jpg", "https://x/b.jpg"]));
    assert!(saved.get("logo").is_none());

    let resp = app
        .client
        .get(app.url("/dashboard?notice=created"))
        .send()
        .await
        .unwrap();
    let page = resp.text().await.unwrap();
    assert!(page.contains("Form Shop"));
    assert!(page.contains("Project created successfully."));
}

#[tokio::test]
async fn dashboard_delete_reports_missing_projects() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let project = app.create_project(&common::project_body("Acme", "modern")).await;
    let id = project["id"].as_str().unwrap();

    let path = format!("/projects/{id}/delete");
    let resp = app.client.post(app.url(&path)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/dashboard?notice=deleted");

    let resp = app.client.post(app.url(&path)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/dashboard?notice=not-found");

    let page = app
        .client
        .get(app.url("/dashboard?notice=not-found"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Project not found."));
}

#[tokio::test]
async fn editor_form_shows_validation_errors() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let resp = app
        .client
        .post(app.url("/projects"))
        .form(&[("website_name", "Half <Done>"), ("template", "modern")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let page = resp.text().await.unwrap();
    assert!(page.contains("Missing required fields"));
    assert!(page.contains("Half &#60;Done&#62;") || page.contains("Half &lt;Done&gt;"));
}

// ── Uploads ─────────────────────────────────────────────────────

#[tokio::test]
async fn upload_reports_each_file() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let form = Form::new()
        .part("images", Part::bytes(b"one".to_vec()).file_name("one.png"))
        .part("images", Part::bytes(b"two".to_vec()).file_name("fail.png"))
        .part("images", Part::bytes(b"three".to_vec()).file_name("three.png"));
    let resp = app
        .client
        .post(app.url("/api/v1/uploads"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[0]["url"], "https://i.example.test/one.png");
    assert!(files[1]["url"].is_null());
    assert!(files[1]["error"].is_string());
    assert_eq!(files[2]["url"], "https://i.example.test/three.png");
}

#[tokio::test]
async fn upload_fails_when_no_file_succeeds() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let form = Form::new().part("images", Part::bytes(b"x".to_vec()).file_name("fail.png"));
    let resp = app
        .client
        .post(app.url("/api/v1/uploads"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let form = Form::new().text("note", "no files here");
    let resp = app
        .client
        .post(app.url("/api/v1/uploads"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_requires_login() {
    let app = common::spawn_app().await;

    let form = Form::new().part("images", Part::bytes(b"x".to_vec()).file_name("a.png"));
    let resp = app
        .client
        .post(app.url("/api/v1/uploads"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
