use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of future periods projected by a prediction.
pub const PREDICTED_PERIODS: usize = 6;
/// Length of the fertile window, ovulation day included.
pub const FERTILE_WINDOW_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Menstrual => "Menstrual Phase",
            Phase::Follicular => "Follicular Phase",
            Phase::Ovulation => "Ovulation Phase",
            Phase::Luteal => "Luteal Phase",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Phase::Menstrual => {
                "Your period days. Take it easy, stay hydrated, and manage cramps with heat therapy."
            }
            Phase::Follicular => {
                "Energy is rising! Great time for new activities and social events."
            }
            Phase::Ovulation => "Peak fertility and energy! You're at your most confident.",
            Phase::Luteal => {
                "Energy may dip. Focus on self-care and prepare for your period."
            }
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs for one prediction. Built fresh per request and never validated here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleInput {
    pub start_date: NaiveDate,
    pub cycle_length_days: i32,
    pub period_length_days: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CyclePrediction {
    pub input: CycleInput,
    pub predicted_periods: [NaiveDate; PREDICTED_PERIODS],
    pub ovulation_date: NaiveDate,
    pub fertile_window: [NaiveDate; FERTILE_WINDOW_DAYS],
    pub phase: Phase,
    pub irregular: bool,
}

impl CyclePrediction {
    pub fn next_period(&self) -> NaiveDate {
        self.predicted_periods[0]
    }

    pub fn fertile_start(&self) -> NaiveDate {
        self.fertile_window[0]
    }

    pub fn fertile_end(&self) -> NaiveDate {
        self.fertile_window[FERTILE_WINDOW_DAYS - 1]
    }
}

/// A cycle as returned by the REST collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleRecord {
    pub id: Uuid,
    pub cycle_start_date: NaiveDate,
    #[serde(default)]
    pub cycle_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub cycle_length: Option<i32>,
    #[serde(default)]
    pub period_length: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleStats {
    pub total_cycles: usize,
    pub avg_cycle_length: Option<f32>,
    pub avg_period_length: Option<f32>,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
    pub last_period_start: Option<NaiveDate>,
    pub last_period_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TileKind {
    PeriodDay,
    FertileDay,
    OvulationDay,
}

impl TileKind {
    /// CSS class the calendar applies to the tile.
    pub fn class_name(&self) -> &'static str {
        match self {
            TileKind::PeriodDay => "period-day",
            TileKind::FertileDay => "fertile-day",
            TileKind::OvulationDay => "ovulation-day",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayTile {
    pub date: NaiveDate,
    pub kind: Option<TileKind>,
}

/// Data handed to the presentation layer for a month view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthData {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayTile>,
    pub next_period: NaiveDate,
    pub ovulation_date: NaiveDate,
}

/// Values behind the summary cards of the cycle view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleSummary {
    pub days_until_next: i64,
    pub next_period: NaiveDate,
    pub phase: Phase,
    pub phase_label: String,
    pub ovulation_date: NaiveDate,
    pub fertile_start: NaiveDate,
    pub fertile_end: NaiveDate,
    pub cycle_length_days: i32,
    pub irregularity_warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_labels() {
        assert_eq!(Phase::Luteal.to_string(), "Luteal Phase");
        assert!(Phase::Menstrual.description().starts_with("Your period days"));
    }

    #[test]
    fn record_defaults_optional_fields() {
        let record: CycleRecord = serde_json::from_str(
            r#"{"id": "6f1c1a3e-5b7d-4a57-9f5e-0c9d1f0b7a11", "cycle_start_date": "2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(record.cycle_end_date, None);
        assert_eq!(record.cycle_length, None);
    }
}
