use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single billing record for a patient encounter
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    /// Human-readable bill identifier, e.g. "BIL0042"
    pub bill_id: String,
    pub patient_id: Uuid,
    pub appointment_id: Option<Uuid>,
    /// Billed amount; absent on the wire means zero, not an error
    #[serde(default)]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    /// Itemized service lines making up the bill
    #[serde(default)]
    pub services: Vec<ServiceLine>,
    #[serde(default)]
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl BillingRecord {
    pub fn is_paid(&self) -> bool {
        matches!(self.status, PaymentStatus::Paid)
    }
}

/// Itemized service on a bill
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    pub service_name: String,
    #[schema(value_type = f64)]
    pub cost: Decimal,
}

/// How the bill was (or will be) settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Insurance,
}

/// Settlement state of a bill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
}

/// Reporting period granularity for revenue breakdowns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_pending() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn granularity_defaults_to_monthly() {
        assert_eq!(Granularity::default(), Granularity::Monthly);
    }

    #[test]
    fn granularity_deserializes_lowercase() {
        let g: Granularity = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(g, Granularity::Weekly);
    }

    #[test]
    fn missing_amount_deserializes_to_zero() {
        let json = r#"{
            "billId": "BIL0001",
            "patientId": "7f2c1f9e-51f0-4dd1-9b54-3bb1e2f1a111",
            "appointmentId": null,
            "paymentDate": "2024-03-04T10:00:00Z",
            "paymentMethod": "cash",
            "createdAt": "2024-03-04T10:00:00Z"
        }"#;
        let record: BillingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount, Decimal::ZERO);
        assert_eq!(record.status, PaymentStatus::Pending);
        assert!(record.services.is_empty());
    }
}
