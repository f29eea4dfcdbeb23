//! # lgbtech
//!
//! Backend for an LGBTQ+ career resource platform.
//!
//! ## Features
//!
//! - **Company directory**: browse and add companies, vote on their
//!   queer-friendliness. Records are ranked by the share of positive votes
//!   and searchable by name.
//! - **Scholarships**: static listings with a persisted "applying" tracker
//!   that derives the next upcoming deadline.
//! - **Mentor directory**: mentor rows pulled once at startup from a
//!   spreadsheet-backed API, searchable by industry or topic.
//! - **Safety map**: per-state LGBTQ+ legal-protection levels for the
//!   client's choropleth map.
//!
//! ## State & persistence
//!
//! All state lives in memory behind one shared [`state::State`]. Every
//! mutation re-ranks the company list and synchronously writes the full
//! document to the local key-value store, so the persisted snapshot and the
//! displayed order never diverge. There is no external database.
//!
//! ## Running
//!
//! ```sh
//! RUST_LOG=info cargo run
//! ```
//!
//! Configuration is environment-only: `RUST_PORT`, `LGBTECH_DATA_DIR`,
//! `LGBTECH_MENTOR_URL`.

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod directory;
pub mod error;
pub mod mentors;
pub mod routes;
pub mod safety;
pub mod scholarships;
pub mod state;
pub mod storage;

use routes::{
    add_company_handler, applying_handler, companies_handler, mentors_handler,
    resume_feedback_handler, safety_map_handler, safety_state_handler, scholarships_handler,
    votes_handler,
};
use state::State;

pub fn router(state: Arc<State>) -> Router {
    Router::new()
        .route("/companies", get(companies_handler).post(add_company_handler))
        .route("/votes", post(votes_handler))
        .route("/scholarships", get(scholarships_handler))
        .route("/scholarships/applying", post(applying_handler))
        .route("/mentors", get(mentors_handler))
        .route("/safety", get(safety_map_handler))
        .route("/safety/:state", get(safety_state_handler))
        .route("/resume-feedback", get(resume_feedback_handler))
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = router(state.clone()).layer(cors);

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
