//! End-to-end flows through the full router, backed by `MemoryStore`.

mod common;

use axum::http::StatusCode;
use common::{get, location, post_form, text, TestApp};
use domains::ports::{Table, WriteCondition};
use serde_json::json;

#[tokio::test]
async fn front_page_is_newest_first_with_id_tiebreak() {
    let app = TestApp::new(false);
    for (id, title, created_at) in [
        ("0001", "Oldest post", 100),
        ("0002", "Tied lower id", 200),
        ("0003", "Tied higher id", 200),
        ("0004", "Newest post", 300),
    ] {
        let document = json!({
            "id": id,
            "title": title,
            "url": "https://example.com",
            "community": "devs",
            "createdAt": created_at,
        });
        app.store
            .put(
                Table::Submissions,
                document.as_object().cloned().unwrap(),
                WriteCondition::KeyAbsent,
            )
            .await
            .unwrap();
    }

    let html = text(get(&app.router, "/").await).await;
    let positions: Vec<usize> = ["Newest post", "Tied higher id", "Tied lower id", "Oldest post"]
        .iter()
        .map(|title| html.find(title).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{positions:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_community_posts_have_exactly_one_redirect() {
    let app = TestApp::new(false);
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let router = app.router.clone();
            tokio::spawn(async move { post_form(&router, "/communities", "community%5Bname%5D=racers").await.status() })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::FOUND).count(), 1);
    assert!(statuses
        .iter()
        .all(|s| *s == StatusCode::FOUND || *s == StatusCode::UNPROCESSABLE_ENTITY));
}

#[tokio::test]
async fn submissions_get_distinct_ids() {
    let app = TestApp::new(false);
    let first = app.submit("Hello there", "devs").await;
    let second = app.submit("Hello there", "devs").await;
    assert_ne!(first, second);

    for path in [&first, &second] {
        let html = text(get(&app.router, path).await).await;
        assert!(html.contains("Hello there"));
        assert!(html.contains("https://example.com"));
        assert!(html.contains("devs"));
    }
}

#[tokio::test]
async fn community_delete_removes_exactly_its_submissions() {
    let app = TestApp::new(false);
    post_form(&app.router, "/communities", "community%5Bname%5D=rust").await;
    post_form(&app.router, "/communities", "community%5Bname%5D=golang").await;
    let doomed = app.submit("Borrow checker", "rust").await;
    let kept = app.submit("Goroutines", "golang").await;

    let response = post_form(&app.router, "/communities/rust", "_method=delete").await;
    assert_eq!(location(&response), "/");

    assert_eq!(get(&app.router, &doomed).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app.router, &kept).await.status(), StatusCode::OK);

    let titles: Vec<String> = serde_json::from_str(&text(get(&app.router, "/communities").await).await).unwrap();
    assert_eq!(titles, vec!["golang"]);

    let front = text(get(&app.router, "/").await).await;
    assert!(front.contains("Goroutines"));
    assert!(!front.contains("Borrow checker"));
}

#[tokio::test]
async fn deleting_a_missing_community_still_redirects() {
    let app = TestApp::new(false);
    let response = post_form(&app.router, "/communities/never-was", "_method=delete").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn cascade_setting_removes_comments_through_http() {
    let app = TestApp::new(true);
    let path = app.submit("Hello there", "devs").await;
    let id = path.trim_start_matches("/submissions/");
    let response = post_form(
        &app.router,
        "/comments",
        &format!("comment%5Bmessage%5D=hello&comment%5Bsubmission_id%5D={id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);

    post_form(&app.router, &path, "_method=delete").await;
    assert!(app.store.scan(Table::Comments, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn new_submission_form_preselects_requested_community() {
    let app = TestApp::new(false);
    for name in ["gophers", "rustaceans"] {
        post_form(&app.router, "/communities", &format!("community%5Bname%5D={name}")).await;
    }

    let html = text(get(&app.router, "/submissions/new?community=rustaceans").await).await;
    assert!(html.contains(r#"<option value="rustaceans" selected>"#));
    assert!(html.contains(r#"<option value="gophers">"#));
    assert!(html.find("gophers").unwrap() < html.find("rustaceans").unwrap());
}

#[tokio::test]
async fn invalid_submission_keeps_entered_values_and_selection() {
    let app = TestApp::new(false);
    post_form(&app.router, "/communities", "community%5Bname%5D=rustaceans").await;

    let body = "submission%5Btitle%5D=Fine+title&submission%5Burl%5D=ftp%3A%2F%2Fx&submission%5Bcommunity%5D=rustaceans";
    let response = post_form(&app.router, "/submissions", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = text(response).await;
    assert!(html.contains("is not a valid URL"));
    assert!(html.contains(r#"value="Fine title""#));
    assert!(html.contains(r#"<option value="rustaceans" selected>"#));
}

#[tokio::test]
async fn missing_community_is_reported() {
    let app = TestApp::new(false);
    let body = "submission%5Btitle%5D=Fine+title&submission%5Burl%5D=http%3A%2F%2Fx";
    let response = post_form(&app.router, "/submissions", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(response).await.contains("invalid community"));
}
