use chrono::{Duration, NaiveDate};

use crate::models::{CyclePrediction, DayTile, MonthData, TileKind};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Tile highlight for a date. Ovulation beats fertile, fertile beats period.
pub fn classify(date: NaiveDate, prediction: &CyclePrediction) -> Option<TileKind> {
    if date == prediction.ovulation_date {
        return Some(TileKind::OvulationDay);
    }
    if prediction.fertile_window.contains(&date) {
        return Some(TileKind::FertileDay);
    }
    if is_period_day(date, prediction) {
        return Some(TileKind::PeriodDay);
    }
    None
}

/// Whether `date` falls inside any predicted period, counting `period_length_days`
/// from each predicted start.
pub fn is_period_day(date: NaiveDate, prediction: &CyclePrediction) -> bool {
    let span = i64::from(prediction.input.period_length_days) - 1;
    prediction
        .predicted_periods
        .iter()
        .any(|&start| date >= start && (date - start).num_days() <= span)
}

/// Build the tiles for one calendar month.
/// With fertility hidden only period days are highlighted.
pub fn month_view(
    year: i32,
    month: u32,
    prediction: &CyclePrediction,
    show_fertility: bool,
) -> Result<MonthData, CalendarError> {
    let invalid = || CalendarError::InvalidMonth { year, month };

    let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last_day = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?
        - Duration::days(1);

    let days = first_day
        .iter_days()
        .take_while(|d| *d <= last_day)
        .map(|date| {
            let kind = if show_fertility {
                classify(date, prediction)
            } else {
                is_period_day(date, prediction).then_some(TileKind::PeriodDay)
            };
            DayTile { date, kind }
        })
        .collect();

    Ok(MonthData {
        year,
        month,
        days,
        next_period: prediction.next_period(),
        ovulation_date: prediction.ovulation_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CycleInput, Phase};
    use crate::prediction::predict;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn prediction(cycle: i32, period: i32) -> CyclePrediction {
        predict(
            CycleInput {
                start_date: date("2024-01-01"),
                cycle_length_days: cycle,
                period_length_days: period,
            },
            date("2024-01-03"),
        )
    }

    #[test]
    fn tiles_classified() {
        let pred = prediction(28, 5);
        assert_eq!(pred.phase, Phase::Menstrual);

        assert_eq!(classify(date("2024-01-15"), &pred), Some(TileKind::OvulationDay));
        assert_eq!(classify(date("2024-01-10"), &pred), Some(TileKind::FertileDay));
        assert_eq!(classify(date("2024-01-16"), &pred), Some(TileKind::FertileDay));
        assert_eq!(classify(date("2024-01-29"), &pred), Some(TileKind::PeriodDay));
        assert_eq!(classify(date("2024-02-02"), &pred), Some(TileKind::PeriodDay));
        assert_eq!(classify(date("2024-02-03"), &pred), None);
        assert_eq!(classify(date("2024-01-09"), &pred), None);
        // The current cycle's own period is not a prediction.
        assert_eq!(classify(date("2024-01-02"), &pred), None);
    }

    #[test]
    fn precedence_when_highlights_overlap() {
        // A negative cycle length puts earlier periods on top of the fertile window.
        let pred = prediction(-28, 30);
        assert_eq!(pred.ovulation_date, date("2023-11-20"));
        assert!(is_period_day(date("2023-11-20"), &pred));
        assert!(is_period_day(date("2023-11-15"), &pred));

        assert_eq!(classify(date("2023-11-20"), &pred), Some(TileKind::OvulationDay));
        assert_eq!(classify(date("2023-11-15"), &pred), Some(TileKind::FertileDay));
        assert_eq!(classify(date("2023-11-10"), &pred), Some(TileKind::PeriodDay));
    }

    #[test]
    fn every_predicted_period_is_highlighted() {
        let pred = prediction(28, 5);
        for start in pred.predicted_periods {
            assert_eq!(classify(start, &pred), Some(TileKind::PeriodDay));
        }
    }

    #[test]
    fn month_view_covers_whole_month() {
        let pred = prediction(28, 5);
        let month = month_view(2024, 2, &pred, true).unwrap();

        assert_eq!(month.days.len(), 29);
        assert_eq!(month.days[0].date, date("2024-02-01"));
        assert_eq!(month.days[0].kind, Some(TileKind::PeriodDay));
        assert_eq!(month.next_period, date("2024-01-29"));

        let december = month_view(2023, 12, &pred, true).unwrap();
        assert_eq!(december.days.len(), 31);
    }

    #[test]
    fn hidden_fertility_keeps_period_days() {
        let pred = prediction(28, 5);
        let month = month_view(2024, 1, &pred, false).unwrap();

        let kinds: Vec<_> = month.days.iter().filter_map(|d| d.kind).collect();
        assert!(kinds.iter().all(|k| *k == TileKind::PeriodDay));
        // Jan 29-31.
        assert_eq!(kinds.len(), 3);
    }

    #[test]
    fn invalid_month_rejected() {
        let pred = prediction(28, 5);
        assert_eq!(
            month_view(2024, 13, &pred, true).unwrap_err(),
            CalendarError::InvalidMonth { year: 2024, month: 13 }
        );
    }

    #[test]
    fn tile_class_names() {
        let json = serde_json::to_string(&TileKind::FertileDay).unwrap();
        assert_eq!(json, "\"fertile-day\"");
        assert_eq!(TileKind::OvulationDay.class_name(), "ovulation-day");
    }
}
