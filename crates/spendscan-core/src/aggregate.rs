//! Expense aggregation - pure, stateless functions over the record
//! collection, recomputed on demand for the presentation layer.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{ExpenseRecord, MonthSection};

/// Sum of all record amounts; zero for an empty collection.
pub fn total(records: &[ExpenseRecord]) -> Decimal {
    records.iter().map(|record| record.amount).sum()
}

/// Partition records by `YYYY-MM` month key.
///
/// Within each partition, records are ordered by date descending; ties keep
/// their input order (stable sort).
pub fn group_by_month(records: &[ExpenseRecord]) -> BTreeMap<String, Vec<ExpenseRecord>> {
    let mut groups: BTreeMap<String, Vec<ExpenseRecord>> = BTreeMap::new();

    for record in records {
        groups
            .entry(record.month_key())
            .or_default()
            .push(record.clone());
    }

    for group in groups.values_mut() {
        group.sort_by(|a, b| b.date.cmp(&a.date));
    }

    groups
}

/// Subtotal within one month partition.
pub fn month_total(group: &[ExpenseRecord]) -> Decimal {
    total(group)
}

/// Render a `YYYY-MM` key as "Mon YYYY" (e.g. "Apr 2025").
///
/// A malformed key passes through unchanged; formatting is a display
/// concern and never a fatal error.
pub fn format_month_label(month_key: &str) -> String {
    let parsed = month_key.split_once('-').and_then(|(year, month)| {
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, 1)
    });

    match parsed {
        Some(date) => date.format("%b %Y").to_string(),
        None => month_key.to_string(),
    }
}

/// Display sections, newest month first, each with label and subtotal.
pub fn sections(records: &[ExpenseRecord]) -> Vec<MonthSection> {
    group_by_month(records)
        .into_iter()
        .rev()
        .map(|(key, records)| MonthSection {
            label: format_month_label(&key),
            total: month_total(&records),
            key,
            records,
        })
        .collect()
}
