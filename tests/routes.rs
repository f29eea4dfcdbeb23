use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::{
    matchers::method,
    Mock, MockServer, ResponseTemplate,
};

use lgbtech::{config::Config, router, state::State};

async fn mentor_server(rows: Value) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(&server)
        .await;

    server
}

async fn test_app(mentor_url: &str) -> (Router, Arc<State>, TempDir) {
    let data_dir = TempDir::new().unwrap();

    let config = Config {
        port: 0,
        data_dir: data_dir.path().to_path_buf(),
        mentor_url: mentor_url.to_string(),
    };

    let state = State::init(config).await;
    (router(state.clone()), state, data_dir)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn seed_directory_is_served_when_nothing_is_persisted() {
    let mentors = mentor_server(json!([])).await;
    let (app, _state, _dir) = test_app(&mentors.uri()).await;

    let response = app.oneshot(get("/companies")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let companies = body_json(response).await;
    let companies = companies.as_array().unwrap();

    assert_eq!(companies.len(), 4);
    assert!(companies.iter().all(|c| c["percentage"] == 0));
}

#[tokio::test]
async fn add_rejects_blanks_and_duplicates() {
    let mentors = mentor_server(json!([])).await;
    let (app, _state, _dir) = test_app(&mentors.uri()).await;

    let response = app
        .clone()
        .oneshot(post(
            "/companies",
            json!({"name": "   ", "apply_link": "https://example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // "Google" is in the seed; the check is case-insensitive.
    let response = app
        .clone()
        .oneshot(post(
            "/companies",
            json!({"name": "gOOgle", "apply_link": "https://example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.oneshot(get("/companies")).await.unwrap();
    let companies = body_json(response).await;
    assert_eq!(companies.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn votes_rerank_and_search_filters() {
    let mentors = mentor_server(json!([])).await;
    let (app, _state, _dir) = test_app(&mentors.uri()).await;

    let response = app
        .clone()
        .oneshot(post(
            "/votes",
            json!({"name": "Apple", "direction": "positive"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["positive_votes"], 1);
    assert_eq!(updated["negative_votes"], 0);
    assert_eq!(updated["percentage"], 100);

    // Apple is now the only company with a positive share, so it ranks first.
    let response = app.clone().oneshot(get("/companies")).await.unwrap();
    let companies = body_json(response).await;
    assert_eq!(companies[0]["name"], "Apple");

    let response = app.clone().oneshot(get("/companies?q=GOO")).await.unwrap();
    let companies = body_json(response).await;
    let companies = companies.as_array().unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0]["name"], "Google");

    let response = app
        .oneshot(post(
            "/votes",
            json!({"name": "Nowhere", "direction": "negative"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mutations_survive_a_restart() {
    let mentors = mentor_server(json!([])).await;
    let (app, _state, dir) = test_app(&mentors.uri()).await;

    app.clone()
        .oneshot(post(
            "/companies",
            json!({"name": "Mozilla", "apply_link": "https://www.mozilla.org/careers/"}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post(
            "/votes",
            json!({"name": "Mozilla", "direction": "positive"}),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/companies")).await.unwrap();
    let before = body_json(response).await;

    // Same data dir, fresh state: the snapshot wins over the seed, verbatim.
    let config = Config {
        port: 0,
        data_dir: dir.path().to_path_buf(),
        mentor_url: mentors.uri(),
    };
    let app = router(State::init(config).await);

    let response = app.oneshot(get("/companies")).await.unwrap();
    let after = body_json(response).await;

    assert_eq!(before, after);
    assert_eq!(after[0]["name"], "Mozilla");
}

#[tokio::test]
async fn corrupt_snapshot_degrades_to_the_seed() {
    let mentors = mentor_server(json!([])).await;
    let dir = TempDir::new().unwrap();

    std::fs::write(dir.path().join("companies.json"), "{{ not json").unwrap();

    let config = Config {
        port: 0,
        data_dir: dir.path().to_path_buf(),
        mentor_url: mentors.uri(),
    };
    let app = router(State::init(config).await);

    let response = app.oneshot(get("/companies")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let companies = body_json(response).await;
    assert_eq!(companies.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn mentors_are_filtered_and_contacts_normalized() {
    let mentors = mentor_server(json!([
        {
            "Name": "Sam",
            "Industry": "Tech",
            "Topics / Expertise": "Interview prep",
            "Contact": "sam@example.com"
        },
        {
            "Name": "Riley",
            "Industry": "Healthcare",
            "Topics / Expertise": "Med school",
            "Contact": "linkedin.com/in/riley"
        }
    ]))
    .await;
    let (app, _state, _dir) = test_app(&mentors.uri()).await;

    let response = app.clone().oneshot(get("/mentors?q=tech")).await.unwrap();
    let view = body_json(response).await;

    assert_eq!(view["fetch_failed"], false);
    let cards = view["mentors"].as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["name"], "Sam");
    assert_eq!(cards[0]["contact_link"], "mailto:sam@example.com");

    let response = app.oneshot(get("/mentors")).await.unwrap();
    let view = body_json(response).await;
    let cards = view["mentors"].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1]["contact_link"], "https://linkedin.com/in/riley");
}

#[tokio::test]
async fn mentor_fetch_failure_degrades_to_an_empty_directory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (app, _state, _dir) = test_app(&server.uri()).await;

    let response = app.oneshot(get("/mentors")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let view = body_json(response).await;
    assert_eq!(view["fetch_failed"], true);
    assert!(view["mentors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn applying_flags_drive_the_next_deadline_and_persist() {
    let mentors = mentor_server(json!([])).await;
    let (app, _state, dir) = test_app(&mentors.uri()).await;

    let response = app.clone().oneshot(get("/scholarships")).await.unwrap();
    let view = body_json(response).await;
    assert_eq!(view["next_deadline"], Value::Null);

    let response = app
        .clone()
        .oneshot(post(
            "/scholarships/applying",
            json!({"id": "pflag-national", "applying": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let view = body_json(response).await;
    assert_eq!(view["next_deadline"], "2027-04-30");

    let response = app
        .clone()
        .oneshot(post(
            "/scholarships/applying",
            json!({"id": "bogus", "applying": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The flag map is persisted under its own key, separate from companies.
    let raw = std::fs::read_to_string(dir.path().join("scholarship-applications.json")).unwrap();
    let flags: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(flags["pflag-national"], true);
}

#[tokio::test]
async fn safety_lookup_covers_known_and_unknown_states() {
    let mentors = mentor_server(json!([])).await;
    let (app, _state, _dir) = test_app(&mentors.uri()).await;

    let response = app.clone().oneshot(get("/safety/Texas")).await.unwrap();
    let view = body_json(response).await;
    assert_eq!(view["entry"]["level"], "low");
    assert_eq!(view["entry"]["name"], "Texas");

    let response = app.clone().oneshot(get("/safety/Wyoming")).await.unwrap();
    let view = body_json(response).await;
    assert_eq!(view["entry"], Value::Null);
    assert_eq!(
        view["message"],
        "Information for this state is coming soon."
    );

    let response = app.oneshot(get("/safety")).await.unwrap();
    let map = body_json(response).await;
    assert_eq!(map.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn resume_feedback_is_a_placeholder() {
    let mentors = mentor_server(json!([])).await;
    let (app, _state, _dir) = test_app(&mentors.uri()).await;

    let response = app.oneshot(get("/resume-feedback")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let view = body_json(response).await;
    assert_eq!(view["message"], "Upload your resume for feedback.");
}
