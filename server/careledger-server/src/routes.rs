use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{
    handlers::{billing, health, revenue},
    openapi::ApiDoc,
    server::CareledgerServer,
};

/// Create health check routes
pub fn health_routes() -> Router<CareledgerServer> {
    Router::new().route("/health", get(health::health_check))
}

/// Create billing record routes
pub fn billing_routes() -> Router<CareledgerServer> {
    Router::new()
        .route("/api/billing", get(billing::list_billing))
        .route("/api/billing", post(billing::create_billing))
}

/// Create revenue analytics routes
pub fn revenue_routes() -> Router<CareledgerServer> {
    Router::new()
        .route("/api/queries/revenue", get(revenue::revenue_summary))
        .route("/api/revenue/range", get(revenue::collected_revenue))
}

/// Create API documentation routes
pub fn docs_routes() -> Router<CareledgerServer> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Assemble the full application router
pub fn create_app(server: CareledgerServer) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(billing_routes())
        .merge(revenue_routes())
        .merge(docs_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBillingStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use billing_analytics::models::{BillingRecord, PaymentMethod, PaymentStatus};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn bill(id: &str, amount: i64, date: &str, status: PaymentStatus) -> BillingRecord {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let at = Utc.from_utc_datetime(&day.and_hms_opt(9, 0, 0).unwrap());
        BillingRecord {
            bill_id: id.to_string(),
            patient_id: Uuid::new_v4(),
            appointment_id: None,
            amount: Decimal::from(amount),
            payment_date: at,
            payment_method: PaymentMethod::Cash,
            services: vec![],
            status,
            created_at: at,
        }
    }

    fn app_with_records(records: Vec<BillingRecord>) -> Router {
        let store = Arc::new(InMemoryBillingStore::with_records(records));
        create_app(CareledgerServer::with_store(store))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let (status, body) = get_json(app_with_records(vec![]), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], serde_json::json!(true));
        assert_eq!(body["data"]["status"], serde_json::json!("healthy"));
    }

    #[tokio::test]
    async fn revenue_summary_requires_both_dates() {
        let (status, body) =
            get_json(app_with_records(vec![]), "/api/queries/revenue?start=2024-01-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Start and end dates are required"));
    }

    #[tokio::test]
    async fn revenue_summary_end_to_end_over_http() {
        let records = vec![
            bill("BIL0001", 1000, "2024-01-05", PaymentStatus::Paid),
            bill("BIL0002", 2000, "2024-02-10", PaymentStatus::Pending),
        ];
        let (status, body) = get_json(
            app_with_records(records),
            "/api/queries/revenue?start=2024-01-01&end=2024-02-29&period=monthly",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["totalRevenue"].as_f64(), Some(3000.0));
        assert_eq!(data["totalBills"], serde_json::json!(2));
        assert_eq!(data["paidBills"], serde_json::json!(1));
        assert_eq!(data["averageBill"], serde_json::json!(1500));
        assert_eq!(data["period"], serde_json::json!("monthly"));
        let breakdown = data["breakdown"].as_array().unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0]["period"], serde_json::json!("January 2024"));
        assert_eq!(breakdown[1]["growth"], serde_json::json!(100));
    }

    #[tokio::test]
    async fn collected_revenue_counts_only_paid_bills() {
        let records = vec![
            bill("BIL0001", 1000, "2024-01-05", PaymentStatus::Paid),
            bill("BIL0002", 2000, "2024-01-06", PaymentStatus::Pending),
        ];
        let (status, body) = get_json(
            app_with_records(records),
            "/api/revenue/range?start=2024-01-01&end=2024-01-31",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["totalRevenue"].as_f64(), Some(1000.0));
        assert_eq!(body["data"]["totalBills"], serde_json::json!(1));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = get_json(app_with_records(vec![]), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/api/queries/revenue").is_some());
        assert!(body["paths"].get("/api/billing").is_some());
    }
}
