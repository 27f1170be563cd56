use chrono::NaiveDate;

use crate::models::{CycleInput, CycleRecord, CycleStats};

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("malformed cycle records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the body of the cycle collection endpoint. Records arrive newest first.
pub fn parse_records(body: &str) -> Result<Vec<CycleRecord>, HistoryError> {
    let records: Vec<CycleRecord> = serde_json::from_str(body)?;
    tracing::debug!(count = records.len(), "parsed cycle records");
    Ok(records)
}

/// Mean gap between consecutive record start dates, rounded to whole days.
/// Needs at least two records.
pub fn average_cycle_length(records: &[CycleRecord]) -> Option<i32> {
    let starts: Vec<NaiveDate> = records.iter().map(|r| r.cycle_start_date).collect();
    let gaps = start_gaps(&starts);
    mean(gaps.iter().map(|&g| g as f64)).map(|avg| avg.round() as i32)
}

/// Input used when the view opens: the first record's start date and the
/// averaged cycle length. Whatever the records cannot supply comes from the
/// given lengths.
pub fn default_input(
    records: &[CycleRecord],
    cycle_length_days: i32,
    period_length_days: i32,
) -> Option<CycleInput> {
    let latest = records.first()?;

    Some(CycleInput {
        start_date: latest.cycle_start_date,
        cycle_length_days: average_cycle_length(records).unwrap_or(cycle_length_days),
        period_length_days,
    })
}

/// Input for a single record. Lengths stored on the record win over `fallback`;
/// a missing or zero length keeps the fallback.
pub fn input_for_record(record: &CycleRecord, fallback: &CycleInput) -> CycleInput {
    let pick = |stored: Option<i32>, current: i32| stored.filter(|&v| v != 0).unwrap_or(current);

    CycleInput {
        start_date: record.cycle_start_date,
        cycle_length_days: pick(record.cycle_length, fallback.cycle_length_days),
        period_length_days: pick(record.period_length, fallback.period_length_days),
    }
}

/// Compute cycle statistics for the history view.
/// Cycle lengths are the gaps between start dates in calendar order.
pub fn cycle_stats(records: &[CycleRecord]) -> CycleStats {
    let mut starts: Vec<NaiveDate> = records.iter().map(|r| r.cycle_start_date).collect();
    starts.sort();
    let gaps = start_gaps(&starts);

    let latest = records.iter().max_by_key(|r| r.cycle_start_date);

    CycleStats {
        total_cycles: records.len(),
        avg_cycle_length: mean(gaps.iter().map(|&g| g as f64)).map(|avg| avg as f32),
        avg_period_length: mean(records.iter().filter_map(bleeding_days)).map(|avg| avg as f32),
        shortest_cycle: gaps.iter().min().copied(),
        longest_cycle: gaps.iter().max().copied(),
        last_period_start: latest.map(|r| r.cycle_start_date),
        last_period_end: latest.and_then(|r| r.cycle_end_date),
    }
}

/// Absolute day gaps between neighbouring start dates, in the order given.
fn start_gaps(starts: &[NaiveDate]) -> Vec<i64> {
    starts
        .windows(2)
        .map(|w| (w[0] - w[1]).num_days().abs())
        .collect()
}

/// Inclusive day count of a finished period.
fn bleeding_days(record: &CycleRecord) -> Option<f64> {
    let end = record.cycle_end_date?;
    Some((end - record.cycle_start_date).num_days() as f64 + 1.0)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}
