use async_trait::async_trait;
use billing_analytics::models::{BillingRecord, PaymentMethod, PaymentStatus, ServiceLine};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A billing record as submitted by the front desk, before the store
/// assigns its bill id.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBillingRecord {
    pub patient_id: Uuid,
    pub appointment_id: Option<Uuid>,
    #[serde(default)]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    /// Defaults to the time of submission when omitted
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub services: Vec<ServiceLine>,
    #[serde(default)]
    pub status: PaymentStatus,
}

/// Billing record store. The revenue handlers only ever need an inclusive
/// payment-date window, so that is the whole query surface.
#[async_trait]
pub trait BillingStore: Send + Sync {
    /// Insert a record, assigning the next sequential bill id.
    async fn insert(&self, record: NewBillingRecord) -> StorageResult<BillingRecord>;

    /// All records, newest payment first.
    async fn list(&self) -> StorageResult<Vec<BillingRecord>>;

    /// Records with `payment_date` in `[start, end]`, both ends inclusive.
    async fn in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StorageResult<Vec<BillingRecord>>;
}

/// In-memory store backing the server. Durability is out of scope; the
/// dataset is small and lives for the life of the process.
#[derive(Default)]
pub struct InMemoryBillingStore {
    records: RwLock<Vec<BillingRecord>>,
}

impl InMemoryBillingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records, e.g. for tests or demos.
    pub fn with_records(records: Vec<BillingRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl BillingStore for InMemoryBillingStore {
    async fn insert(&self, record: NewBillingRecord) -> StorageResult<BillingRecord> {
        let mut records = self.records.write();
        let bill_id = format!("BIL{:04}", records.len() + 1);
        let now = Utc::now();
        let stored = BillingRecord {
            bill_id,
            patient_id: record.patient_id,
            appointment_id: record.appointment_id,
            amount: record.amount,
            payment_date: record.payment_date.unwrap_or(now),
            payment_method: record.payment_method,
            services: record.services,
            status: record.status,
            created_at: now,
        };
        records.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> StorageResult<Vec<BillingRecord>> {
        let mut records = self.records.read().clone();
        records.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        Ok(records)
    }

    async fn in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StorageResult<Vec<BillingRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.payment_date >= start && r.payment_date <= end)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_record(amount: i64, date: &str) -> NewBillingRecord {
        let day = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        NewBillingRecord {
            patient_id: Uuid::new_v4(),
            appointment_id: None,
            amount: Decimal::from(amount),
            payment_date: Some(Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap())),
            payment_method: PaymentMethod::Card,
            services: vec![],
            status: PaymentStatus::Paid,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_bill_ids() {
        let store = InMemoryBillingStore::new();
        let first = store.insert(new_record(100, "2024-01-05")).await.unwrap();
        let second = store.insert(new_record(200, "2024-01-06")).await.unwrap();
        assert_eq!(first.bill_id, "BIL0001");
        assert_eq!(second.bill_id, "BIL0002");
    }

    #[tokio::test]
    async fn list_orders_by_payment_date_desc() {
        let store = InMemoryBillingStore::new();
        store.insert(new_record(100, "2024-01-05")).await.unwrap();
        store.insert(new_record(200, "2024-03-01")).await.unwrap();
        store.insert(new_record(300, "2024-02-10")).await.unwrap();

        let records = store.list().await.unwrap();
        let amounts: Vec<Decimal> = records.iter().map(|r| r.amount).collect();
        assert_eq!(
            amounts,
            vec![Decimal::from(200), Decimal::from(300), Decimal::from(100)]
        );
    }

    #[tokio::test]
    async fn in_range_is_inclusive_on_both_ends() {
        let store = InMemoryBillingStore::new();
        store.insert(new_record(100, "2024-01-01")).await.unwrap();
        store.insert(new_record(200, "2024-01-15")).await.unwrap();
        store.insert(new_record(300, "2024-02-01")).await.unwrap();

        let day = |d: &str| {
            let naive = chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
            Utc.from_utc_datetime(&naive.and_hms_opt(12, 0, 0).unwrap())
        };
        let records = store.in_range(day("2024-01-01"), day("2024-01-15")).await.unwrap();
        assert_eq!(records.len(), 2);
    }
}
