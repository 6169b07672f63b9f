//! Revenue aggregation over billing records.
//!
//! The entry point is [`summarize`], a pure transform from a set of billing
//! records plus a [`ReportRange`] and [`Granularity`] to a [`RevenueSummary`]
//! with a per-period breakdown. It performs no I/O, holds no state, and is
//! safe to call concurrently; callers are responsible for fetching records
//! restricted to the requested range.

use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{BillingRecord, Granularity};
use crate::range::ReportRange;

/// One calendar period (week, month, or year) in a revenue breakdown
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    /// Period label, e.g. "Week 1 (3/4/2024)", "March 2024", or "2024"
    pub period: String,
    #[schema(value_type = f64)]
    pub revenue: Decimal,
    pub bills: u64,
    /// Revenue per bill, rounded to the nearest whole unit; 0 for empty periods
    pub average: i64,
    /// Percent change versus the previous period; 0 for the first period
    pub growth: i64,
}

/// Aggregate revenue figures for a date range
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    /// Sum over every bill in range, paid or pending (billed revenue)
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
    pub total_bills: u64,
    pub paid_bills: u64,
    pub average_bill: i64,
    pub period: Granularity,
    pub breakdown: Vec<PeriodBucket>,
}

/// Paid-only revenue figures (collected, as opposed to billed)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectedTotals {
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
    pub total_bills: u64,
}

/// Compute a [`RevenueSummary`] for records already filtered to `range`.
///
/// Top-level totals are taken over the whole input set. The breakdown is
/// derived from a single monotonic cursor per granularity, so consecutive
/// buckets never overlap even though each bucket's bounds are inclusive.
/// When the range is inverted (`start > end`) the breakdown is empty and
/// the totals reflect whatever records the caller passed in.
pub fn summarize(
    records: &[BillingRecord],
    range: &ReportRange,
    granularity: Granularity,
) -> RevenueSummary {
    let total_revenue: Decimal = records.iter().map(|r| r.amount).sum();
    let total_bills = records.len() as u64;
    let paid_bills = records.iter().filter(|r| r.is_paid()).count() as u64;

    let breakdown = match granularity {
        Granularity::Weekly => weekly_breakdown(records, range),
        Granularity::Monthly => monthly_breakdown(records, range),
        Granularity::Yearly => yearly_breakdown(records, range),
    };

    tracing::debug!(
        total_bills,
        paid_bills,
        buckets = breakdown.len(),
        granularity = granularity.as_str(),
        "generated revenue summary"
    );

    RevenueSummary {
        total_revenue,
        total_bills,
        paid_bills,
        average_bill: rounded_ratio(total_revenue, total_bills),
        period: granularity,
        breakdown,
    }
}

/// Totals over paid records only.
pub fn collected_totals(records: &[BillingRecord]) -> CollectedTotals {
    let total_revenue: Decimal = records
        .iter()
        .filter(|r| r.is_paid())
        .map(|r| r.amount)
        .sum();
    let total_bills = records.iter().filter(|r| r.is_paid()).count() as u64;
    CollectedTotals {
        total_revenue,
        total_bills,
    }
}

fn weekly_breakdown(records: &[BillingRecord], range: &ReportRange) -> Vec<PeriodBucket> {
    let mut buckets = Vec::new();
    let mut cursor = range.start();
    while cursor <= range.end() {
        let week_start = cursor;
        let week_end = (cursor + Duration::days(6)).min(range.end());
        let label = format!(
            "Week {} ({}/{}/{})",
            buckets.len() + 1,
            week_start.month(),
            week_start.day(),
            week_start.year()
        );
        push_bucket(&mut buckets, records, week_start, week_end, label);
        cursor = cursor + Duration::days(7);
    }
    buckets
}

fn monthly_breakdown(records: &[BillingRecord], range: &ReportRange) -> Vec<PeriodBucket> {
    let mut buckets = Vec::new();
    let mut cursor = first_of_month(range.start());
    while cursor <= range.end() {
        let month_start = cursor;
        let next_month = cursor + Months::new(1);
        let month_end = (next_month - Duration::days(1)).min(range.end());
        let label = month_start.format("%B %Y").to_string();
        push_bucket(&mut buckets, records, month_start, month_end, label);
        cursor = next_month;
    }
    buckets
}

fn yearly_breakdown(records: &[BillingRecord], range: &ReportRange) -> Vec<PeriodBucket> {
    let mut buckets = Vec::new();
    let mut cursor = first_of_year(range.start());
    while cursor <= range.end() {
        let year_start = cursor;
        let next_year = cursor + Months::new(12);
        let year_end = (next_year - Duration::days(1)).min(range.end());
        let label = year_start.year().to_string();
        push_bucket(&mut buckets, records, year_start, year_end, label);
        cursor = next_year;
    }
    buckets
}

/// Compute stats for `[start, end]` (inclusive, day granularity) and append
/// the bucket, chaining growth off the previously appended bucket.
fn push_bucket(
    buckets: &mut Vec<PeriodBucket>,
    records: &[BillingRecord],
    start: NaiveDate,
    end: NaiveDate,
    label: String,
) {
    let mut revenue = Decimal::ZERO;
    let mut bills = 0u64;
    for record in records {
        let day = record.payment_date.date_naive();
        if day >= start && day <= end {
            revenue += record.amount;
            bills += 1;
        }
    }
    let growth = match buckets.last() {
        Some(previous) => growth_percent(revenue, previous.revenue),
        None => 0,
    };
    buckets.push(PeriodBucket {
        period: label,
        revenue,
        bills,
        average: rounded_ratio(revenue, bills),
        growth,
    });
}

/// Percent change versus the previous period. A zero baseline reports 100
/// when any revenue appeared and 0 otherwise, rather than dividing by zero.
fn growth_percent(current: Decimal, previous: Decimal) -> i64 {
    if previous.is_zero() {
        return if current > Decimal::ZERO { 100 } else { 0 };
    }
    round_half_up((current - previous) / previous * Decimal::ONE_HUNDRED)
}

fn rounded_ratio(revenue: Decimal, bills: u64) -> i64 {
    if bills == 0 {
        return 0;
    }
    round_half_up(revenue / Decimal::from(bills))
}

/// Round with halves going toward positive infinity, so a growth of -50.5%
/// reports as -50. The dashboards were built against JS `Math.round`, which
/// resolves midpoints this way for negative values too.
fn round_half_up(value: Decimal) -> i64 {
    (value + Decimal::new(5, 1)).floor().to_i64().unwrap_or(0)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    first_of_month(date).with_month(1).unwrap_or(date)
}
