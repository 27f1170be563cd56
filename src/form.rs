use std::ops::RangeInclusive;

use chrono::NaiveDate;

use crate::models::CycleInput;
use crate::settings::Settings;

const CYCLE_LENGTH_RANGE: RangeInclusive<i32> = 21..=45;
const PERIOD_LENGTH_RANGE: RangeInclusive<i32> = 2..=10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("last period start date is required")]
    MissingStartDate,
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("start date {0} is in the future")]
    StartInFuture(NaiveDate),
    #[error("cycle length must be between 21 and 45 days, got {0}")]
    CycleLength(i32),
    #[error("period length must be between 2 and 10 days, got {0}")]
    PeriodLength(i32),
}

/// What the user typed into the cycle form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleForm {
    /// `YYYY-MM-DD`, empty until filled in.
    pub last_period: String,
    pub cycle_length: i32,
    pub period_length: i32,
}

impl CycleForm {
    pub fn new(settings: &Settings) -> Self {
        Self {
            last_period: String::new(),
            cycle_length: settings.default_cycle_length,
            period_length: settings.default_period_length,
        }
    }

    /// Copy an input back into the form fields.
    pub fn fill(&mut self, input: &CycleInput) {
        self.last_period = input.start_date.format("%Y-%m-%d").to_string();
        self.cycle_length = input.cycle_length_days;
        self.period_length = input.period_length_days;
    }

    pub fn clear_start(&mut self) {
        self.last_period.clear();
    }

    pub fn validate(&self, today: NaiveDate) -> Result<CycleInput, FormError> {
        let raw = self.last_period.trim();
        if raw.is_empty() {
            return Err(FormError::MissingStartDate);
        }

        let start_date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(raw.to_string()))?;
        if start_date > today {
            return Err(FormError::StartInFuture(start_date));
        }
        if !CYCLE_LENGTH_RANGE.contains(&self.cycle_length) {
            return Err(FormError::CycleLength(self.cycle_length));
        }
        if !PERIOD_LENGTH_RANGE.contains(&self.period_length) {
            return Err(FormError::PeriodLength(self.period_length));
        }

        Ok(CycleInput {
            start_date,
            cycle_length_days: self.cycle_length,
            period_length_days: self.period_length,
        })
    }
}
