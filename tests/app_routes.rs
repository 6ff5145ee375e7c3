mod schema_server;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use schema_browser::app::{AppState, router};
use schema_server::{LOGIN, ORDERS, SUMMARY, SchemaServer};
use tower::ServiceExt as _;

async fn get(state: &AppState, uri: &str) -> anyhow::Result<(StatusCode, String, Option<String>)> {
    let response = router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?, location))
}

fn state() -> AppState {
    AppState::new("./output", Duration::from_secs(5))
}

#[tokio::test]
async fn healthz_responds_ok() -> anyhow::Result<()> {
    let (status, body, _) = get(&state(), "/healthz").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok\n");
    Ok(())
}

#[tokio::test]
async fn empty_viewer_prompts_for_a_page() -> anyhow::Result<()> {
    let (status, body, _) = get(&state(), "/").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Select a page to view its schema."));
    assert!(body.contains("value=\"./output\""));
    Ok(())
}

#[tokio::test]
async fn load_select_and_api_flow() -> anyhow::Result<()> {
    let server = SchemaServer::spawn(&[
        ("/schemas/summary.json", 200, SUMMARY),
        ("/schemas/login.json", 200, LOGIN),
        ("/schemas/pages/orders.json", 200, ORDERS),
    ]);
    let state = state();

    let base: String =
        url::form_urlencoded::byte_serialize(format!("{}/schemas", server.base_url).as_bytes())
            .collect();
    let (status, _, location) = get(&state, &format!("/load?base={base}")).await?;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));

    let (_, body, _) = get(&state, "/").await?;
    assert!(body.contains("<h2>login</h2>"));
    assert!(body.contains("href=\"/select?page=orders\""));
    assert!(body.contains("Skipped"));

    let (_, body, _) = get(&state, "/select?page=orders").await?;
    assert!(body.contains("<h2>orders</h2>"));
    assert!(body.contains("<h4>top</h4>"));

    let (_, body, _) = get(&state, "/select?page=unknown").await?;
    assert!(body.contains("Select a page to view its schema."));

    let (status, body, _) = get(&state, "/api/page?page=login").await?;
    assert_eq!(status, StatusCode::OK);
    let page: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(page["title"], "Sign in");

    let (status, _, _) = get(&state, "/api/page?page=unknown").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body, _) = get(&state, "/api/snapshot").await?;
    let snapshot: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(snapshot["pages"].as_array().map(Vec::len), Some(2));
    assert_eq!(snapshot["selectedPageId"], serde_json::Value::Null);
    Ok(())
}

#[tokio::test]
async fn failed_load_shows_alert_and_keeps_pages() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("out");
    std::fs::create_dir_all(&root)?;
    std::fs::write(root.join("a.json"), r#"{ "pageId": "a" }"#)?;

    let state = state();
    let dir: String =
        url::form_urlencoded::byte_serialize(root.to_string_lossy().as_bytes()).collect();
    let (status, _, _) = get(&state, &format!("/load-dir?dir={dir}")).await?;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let missing: String = url::form_urlencoded::byte_serialize(
        temp.path().join("absent").to_string_lossy().as_bytes(),
    )
    .collect();
    get(&state, &format!("/load?base={missing}")).await?;

    let (_, body, _) = get(&state, "/").await?;
    assert!(body.contains("role=\"alert\""));
    assert!(body.contains("unable to load summary at"));
    assert!(body.contains("<h2>a</h2>"));
    Ok(())
}

#[tokio::test]
async fn load_dir_requires_a_directory() -> anyhow::Result<()> {
    let (status, body, _) = get(&state(), "/load-dir?dir=%20").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "dir is required");
    Ok(())
}
