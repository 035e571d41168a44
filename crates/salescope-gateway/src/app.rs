use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use salescope_core::config::SalescopeConfig;
use salescope_scheduler::{Countdown, SchedulerHandle};
use salescope_store::SalesStore;

/// Central shared state — passed as Arc<AppState> to all handlers.
pub struct AppState {
    pub config: SalescopeConfig,
    pub store: Arc<SalesStore>,
    pub scheduler: SchedulerHandle,
    pub countdown: Countdown,
}

impl AppState {
    pub fn new(config: SalescopeConfig, store: Arc<SalesStore>, scheduler: SchedulerHandle) -> Self {
        let countdown = scheduler.countdown();
        Self {
            config,
            store,
            scheduler,
            countdown,
        }
    }
}

/// Assemble the full router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/upload", post(crate::http::upload::upload_handler))
        .route("/stop", post(crate::http::schedule::stop_handler))
        .route(
            "/api/time_remaining",
            get(crate::http::schedule::time_remaining_handler),
        )
        .route("/api/sales", get(crate::http::sales::list_handler))
        .route("/api/analysis", get(crate::http::sales::analysis_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::State;

    use salescope_core::Frequency;

    fn test_state() -> Arc<AppState> {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        salescope_store::db::init_db(&conn).unwrap();
        let store = Arc::new(SalesStore::new(conn));
        Arc::new(AppState::new(
            SalescopeConfig::default(),
            store,
            SchedulerHandle::new(),
        ))
    }

    #[tokio::test]
    async fn countdown_follows_the_schedule_lifecycle() {
        let state = test_state();

        let body =
            crate::http::schedule::time_remaining_handler(State(Arc::clone(&state))).await;
        assert_eq!(body.0["time_remaining"], 0);

        // Freshly installed, engine not yet ticking: the nominal fallback.
        state.scheduler.install(Frequency::Minute, Arc::new(|| {}));
        let body =
            crate::http::schedule::time_remaining_handler(State(Arc::clone(&state))).await;
        assert_eq!(body.0["time_remaining"], 60);

        crate::http::schedule::stop_handler(State(Arc::clone(&state)))
            .await
            .unwrap();
        let body = crate::http::schedule::time_remaining_handler(State(state)).await;
        assert_eq!(body.0["time_remaining"], 0);
    }
}
