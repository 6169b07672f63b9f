use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use billing_analytics::BillingRecord;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::CareledgerServer;
use crate::storage::NewBillingRecord;

/// List billing records, newest payment first
#[utoipa::path(
    get,
    path = "/api/billing",
    tag = "billing",
    responses(
        (status = 200, description = "Billing records retrieved", body = [BillingRecord])
    )
)]
pub async fn list_billing(
    State(server): State<CareledgerServer>,
) -> Result<Json<ApiResponse<Vec<BillingRecord>>>, ApiError> {
    let records = server.billing.list().await?;
    info!(count = records.len(), "fetched billing records");
    Ok(Json(api_success(records)))
}

/// Create a billing record
#[utoipa::path(
    post,
    path = "/api/billing",
    tag = "billing",
    request_body = NewBillingRecord,
    responses(
        (status = 201, description = "Billing record created", body = BillingRecord),
        (status = 400, description = "Invalid billing record")
    )
)]
pub async fn create_billing(
    State(server): State<CareledgerServer>,
    Json(request): Json<NewBillingRecord>,
) -> Result<(StatusCode, Json<ApiResponse<BillingRecord>>), ApiError> {
    if request.amount < Decimal::ZERO {
        return Err(ApiError::validation("Bill amount must not be negative"));
    }

    let record = server.billing.insert(request).await?;
    info!(bill_id = %record.bill_id, "created billing record");
    Ok((StatusCode::CREATED, Json(api_success(record))))
}
