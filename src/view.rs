use chrono::NaiveDate;
use uuid::Uuid;

use crate::calendar::{self, CalendarError};
use crate::form::{CycleForm, FormError};
use crate::history;
use crate::models::*;
use crate::prediction::{self, IRREGULAR_CYCLE_WARNING};
use crate::settings::Settings;

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("no cycle record with id {0}")]
    UnknownRecord(Uuid),
    #[error("nothing to predict yet")]
    NoPrediction,
}

/// State owned by the cycle view: fetched records, the entry form, the
/// selected record and the prediction currently on screen.
#[derive(Debug, Clone)]
pub struct CycleView {
    pub settings: Settings,
    pub form: CycleForm,
    records: Vec<CycleRecord>,
    selected: Option<Uuid>,
    prediction: Option<CyclePrediction>,
    calendar_focus: NaiveDate,
}

impl CycleView {
    pub fn new(settings: Settings, today: NaiveDate) -> Self {
        Self {
            form: CycleForm::new(&settings),
            settings,
            records: Vec::new(),
            selected: None,
            prediction: None,
            calendar_focus: today,
        }
    }

    pub fn records(&self) -> &[CycleRecord] {
        &self.records
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn prediction(&self) -> Option<&CyclePrediction> {
        self.prediction.as_ref()
    }

    pub fn calendar_focus(&self) -> NaiveDate {
        self.calendar_focus
    }

    /// Replace the fetched records and predict from the newest one.
    pub fn load_records(&mut self, records: Vec<CycleRecord>, today: NaiveDate) {
        self.records = records;
        tracing::debug!(count = self.records.len(), "cycle records loaded");
        self.predict_from_latest(today);
    }

    /// Predict from a record in the history list and move the calendar to it.
    pub fn select(&mut self, id: Uuid, today: NaiveDate) -> Result<&CyclePrediction, ViewError> {
        let record = self
            .records
            .iter()
            .find(|r| r.id == id)
            .ok_or(ViewError::UnknownRecord(id))?;

        let fallback = CycleInput {
            start_date: record.cycle_start_date,
            cycle_length_days: self.form.cycle_length,
            period_length_days: self.form.period_length,
        };
        let input = history::input_for_record(record, &fallback);

        tracing::debug!(%id, start = %input.start_date, "cycle selected");
        self.selected = Some(id);
        self.form.fill(&input);
        self.calendar_focus = input.start_date;
        Ok(&*self.prediction.insert(prediction::predict(input, today)))
    }

    /// Drop a record after the backend deleted it.
    ///
    /// Removing the selected record clears the prediction. With nothing
    /// selected the prediction follows the newest remaining record.
    pub fn remove(&mut self, id: Uuid, today: NaiveDate) {
        self.records.retain(|r| r.id != id);

        match self.selected {
            Some(selected) if selected == id => {
                self.selected = None;
                self.form.clear_start();
                self.prediction = None;
            }
            Some(_) => {}
            None => self.predict_from_latest(today),
        }
    }

    /// Validate the form and predict from it.
    pub fn preview(&mut self, today: NaiveDate) -> Result<&CyclePrediction, ViewError> {
        let input = self.form.validate(today).map_err(|e| {
            tracing::warn!(error = %e, "cycle form rejected");
            e
        })?;
        Ok(&*self.prediction.insert(prediction::predict(input, today)))
    }

    pub fn summary(&self, today: NaiveDate) -> Option<CycleSummary> {
        let pred = self.prediction.as_ref()?;

        Some(CycleSummary {
            days_until_next: prediction::days_until_next_from(pred, today),
            next_period: pred.next_period(),
            phase: pred.phase,
            phase_label: pred.phase.label().to_string(),
            ovulation_date: pred.ovulation_date,
            fertile_start: pred.fertile_start(),
            fertile_end: pred.fertile_end(),
            cycle_length_days: pred.input.cycle_length_days,
            irregularity_warning: pred.irregular.then(|| IRREGULAR_CYCLE_WARNING.to_string()),
        })
    }

    pub fn month(&self, year: i32, month: u32) -> Result<MonthData, ViewError> {
        let pred = self.prediction.as_ref().ok_or(ViewError::NoPrediction)?;
        Ok(calendar::month_view(
            year,
            month,
            pred,
            self.settings.show_fertility,
        )?)
    }

    pub fn stats(&self) -> CycleStats {
        history::cycle_stats(&self.records)
    }

    /// Lengths the records cannot supply stay as the user last entered them.
    fn predict_from_latest(&mut self, today: NaiveDate) {
        let input = history::default_input(
            &self.records,
            self.form.cycle_length,
            self.form.period_length,
        );

        match input {
            Some(input) => {
                self.form.fill(&input);
                self.prediction = Some(prediction::predict(input, today));
            }
            None => {
                self.form.clear_start();
                self.prediction = None;
            }
        }
    }
}
