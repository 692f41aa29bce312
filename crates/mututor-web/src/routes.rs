//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// /api 하위 라우트 구성
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notifications::list_notifications))
        .route("/notifications/read", post(handlers::notifications::read_notification))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mututor_notify::NotificationHub;
    use mututor_storage::sqlite::SqliteStorage;
    use std::sync::Arc;

    #[test]
    fn routes_compile() {
        let state = AppState {
            store: Arc::new(SqliteStorage::open_in_memory().unwrap()),
            hub: Arc::new(NotificationHub::new()),
        };
        let _router: Router = api_routes().with_state(state);
    }
}
