use utoipa::OpenApi;

use crate::handlers::{billing, health, revenue};

/// OpenAPI documentation for the CareLedger API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CareLedger Engine API",
        description = "Hospital billing records and revenue analytics",
        license(name = "AGPL-3.0-only")
    ),
    paths(
        health::health_check,
        billing::list_billing,
        billing::create_billing,
        revenue::revenue_summary,
        revenue::collected_revenue,
    ),
    components(schemas(
        health::HealthResponse,
        billing_analytics::BillingRecord,
        billing_analytics::ServiceLine,
        billing_analytics::PaymentMethod,
        billing_analytics::PaymentStatus,
        billing_analytics::Granularity,
        billing_analytics::PeriodBucket,
        billing_analytics::RevenueSummary,
        billing_analytics::CollectedTotals,
        crate::storage::NewBillingRecord,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "billing", description = "Billing record management"),
        (name = "revenue", description = "Revenue analytics")
    )
)]
pub struct ApiDoc;
