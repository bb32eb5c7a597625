use axum::{extract::State, http::StatusCode};
use sea_orm::DatabaseConnection;

/// Liveness probe. Answers as long as the process serves HTTP.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe. 503 until the database answers a ping.
pub async fn readyz(State(db): State<DatabaseConnection>) -> StatusCode {
    match db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_report_live() {
        assert_eq!(healthz().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_report_unavailable_without_database() {
        let status = readyz(State(DatabaseConnection::default())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
