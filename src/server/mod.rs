//! HTTP server: router assembly, middleware and the serve loop.

mod admin;
mod extract;
mod media;
mod notes;
mod pages;
mod profile;
mod state;
mod tasks;

pub use state::{seed_admin, AppState};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::info;

use crate::auth::require_admin;
use crate::config::Config;
use crate::error::Result;

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/users", get(admin::users))
        .route(
            "/users/edit/{id}",
            get(admin::get_user).post(admin::edit_user),
        )
        .route("/users/delete/{id}", get(admin::delete_user))
        .route("/pages", get(admin::pages))
        .route("/pages/delete/{id}", get(admin::delete_page))
        .route("/tasks", get(admin::tasks))
        .route("/tasks/delete/{id}", get(admin::delete_task))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

/// Build the full application router around `state`.
pub fn build_router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.session_idle_minutes,
        )));

    Router::new()
        .route("/", get(pages::home))
        .route("/health", get(pages::health))
        .route("/login", get(pages::login_form).post(pages::login))
        .route("/register", get(pages::register_form).post(pages::register))
        .route("/logout", get(pages::logout))
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route("/api/notes/public", get(notes::public_notes))
        .route(
            "/api/notes/{id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route("/api/notes/{id}/vote", post(notes::vote_note))
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/api/tasks/delete_category", post(tasks::delete_category))
        .route(
            "/api/tasks/{id}",
            axum::routing::put(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/feed", get(profile::feed))
        .route("/explore", get(profile::explore))
        .route("/profile", get(profile::profile))
        .route("/update_profile", post(profile::update_profile))
        .route("/set_theme/{theme}", get(profile::set_theme))
        .route("/upload", get(media::list_uploads).post(media::upload_file))
        .nest("/admin", admin_routes(state.clone()))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(session_layer),
        )
        .with_state(state)
}

/// Open the store, bind the listener and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: Config) -> Result<()> {
    let bind = config.bind;
    let state = AppState::bootstrap(config).await?;
    let app = build_router(state);

    let listener = TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
