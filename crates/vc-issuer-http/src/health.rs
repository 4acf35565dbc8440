//! Health reporting of the services the issuer depends on.
use crate::state::AppState;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use std::collections::HashMap;
use std::sync::Arc;

/// Reports whether each monitored service is reachable.
#[async_trait]
pub trait HealthChecker: Send + Sync {
    async fn status(&self) -> HashMap<String, bool>;
}

/// Handles get request for the health status.
pub async fn get_health(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.health.status().await))
}

#[cfg(test)]
mod tests {
    use crate::mocks::TestServices;
    use hyper::StatusCode;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_get_health() {
        let mut services = TestServices::new();
        services.health.expect_status().returning(|| {
            HashMap::from([("db".to_string(), true), ("cache".to_string(), false)])
        });
        let client = services.into_client();
        let response = client.get("/status").send().await;
        assert_eq!(response.status(), StatusCode::OK);
        let status = response.json::<HashMap<String, bool>>().await;
        assert_eq!(status.get("db"), Some(&true));
        assert_eq!(status.get("cache"), Some(&false));
    }
}
