use axum::{
    extract::{Query, State},
    Json,
};
use billing_analytics::{revenue, CollectedTotals, Granularity, ReportRange, RevenueSummary};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::CareledgerServer;

/// Query parameters for the revenue summary endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct RevenueQuery {
    /// Range start, ISO-8601 date
    #[param(example = "2024-01-01")]
    pub start: Option<String>,
    /// Range end, ISO-8601 date; normalized to end-of-day
    #[param(example = "2024-02-29")]
    pub end: Option<String>,
    /// Breakdown granularity, defaults to monthly
    #[param(example = "monthly")]
    pub period: Option<Granularity>,
}

/// Query parameters for the collected-revenue endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct CollectedRangeQuery {
    #[param(example = "2024-01-01")]
    pub start: Option<String>,
    #[param(example = "2024-02-29")]
    pub end: Option<String>,
}

/// Revenue summary with per-period breakdown
#[utoipa::path(
    get,
    path = "/api/queries/revenue",
    tag = "revenue",
    params(RevenueQuery),
    responses(
        (status = 200, description = "Revenue summary computed", body = RevenueSummary),
        (status = 400, description = "Missing or unparseable date range")
    )
)]
pub async fn revenue_summary(
    State(server): State<CareledgerServer>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<ApiResponse<RevenueSummary>>, ApiError> {
    let range = parse_range(query.start.as_deref(), query.end.as_deref())?;
    let granularity = query.period.unwrap_or_default();

    let records = server.billing.in_range(range.start_at(), range.end_at()).await?;
    let summary = revenue::summarize(&records, &range, granularity);

    Ok(Json(api_success(summary)))
}

/// Collected (paid-only) revenue totals for a date range
#[utoipa::path(
    get,
    path = "/api/revenue/range",
    tag = "revenue",
    params(CollectedRangeQuery),
    responses(
        (status = 200, description = "Collected totals computed", body = CollectedTotals),
        (status = 400, description = "Missing or unparseable date range")
    )
)]
pub async fn collected_revenue(
    State(server): State<CareledgerServer>,
    Query(query): Query<CollectedRangeQuery>,
) -> Result<Json<ApiResponse<CollectedTotals>>, ApiError> {
    let range = parse_range(query.start.as_deref(), query.end.as_deref())?;

    let records = server.billing.in_range(range.start_at(), range.end_at()).await?;
    let totals = revenue::collected_totals(&records);

    Ok(Json(api_success(totals)))
}

/// Both dates are required before the aggregator ever runs; there is no
/// implicit "until now" default at this layer.
fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<ReportRange, ApiError> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(ReportRange::parse(start, end)?),
        _ => Err(ApiError::validation("Start and end dates are required")),
    }
}
