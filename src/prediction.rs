use chrono::{Duration, NaiveDate};

use crate::models::{CycleInput, CyclePrediction, Phase, FERTILE_WINDOW_DAYS, PREDICTED_PERIODS};

/// Ovulation is assumed this many days before the next period, whatever the cycle length.
const LUTEAL_PHASE_DAYS: i64 = 14;
/// First fertile day, counted back from ovulation.
const FERTILE_LEAD_DAYS: i64 = 5;

const NORMAL_CYCLE_MIN: i32 = 21;
const NORMAL_CYCLE_MAX: i32 = 35;

pub const IRREGULAR_CYCLE_WARNING: &str = "Your cycle length seems irregular. This can be a sign \
of hormonal imbalance or PCOS/PCOD. Consider consulting a healthcare provider.";

struct PhaseContext {
    diff: i64,
    cycle_length: i32,
    period_length: i32,
}

type PhaseRule = (fn(&PhaseContext) -> bool, Phase);

fn in_period(c: &PhaseContext) -> bool {
    c.diff <= i64::from(c.period_length)
}

fn before_midpoint(c: &PhaseContext) -> bool {
    (c.diff as f64) < f64::from(c.cycle_length) / 2.0
}

fn at_midpoint(c: &PhaseContext) -> bool {
    c.diff == i64::from(c.cycle_length).div_euclid(2)
}

/// Checked in order, first match wins; anything left over is luteal.
///
/// `before_midpoint` compares against the unfloored half while `at_midpoint`
/// uses the floored one. For an odd cycle length every day that could match
/// `at_midpoint` is already taken by `before_midpoint`, so ovulation is never
/// reported.
const PHASE_RULES: [PhaseRule; 3] = [
    (in_period, Phase::Menstrual),
    (before_midpoint, Phase::Follicular),
    (at_midpoint, Phase::Ovulation),
];

/// Project the next six periods, ovulation, fertile window and phase from a
/// single start date.
///
/// Inputs are used as given. Out-of-range values give meaningless dates, never
/// a panic: shifts past the calendar's range saturate.
pub fn predict(input: CycleInput, reference_date: NaiveDate) -> CyclePrediction {
    let cycle = i64::from(input.cycle_length_days);

    let predicted_periods: [NaiveDate; PREDICTED_PERIODS] =
        std::array::from_fn(|i| shift(input.start_date, cycle * (i as i64 + 1)));
    let ovulation_date = shift(predicted_periods[0], -LUTEAL_PHASE_DAYS);
    let fertile_window: [NaiveDate; FERTILE_WINDOW_DAYS] =
        std::array::from_fn(|i| shift(ovulation_date, i as i64 - FERTILE_LEAD_DAYS));

    let ctx = PhaseContext {
        diff: days_between(reference_date, input.start_date),
        cycle_length: input.cycle_length_days,
        period_length: input.period_length_days,
    };

    CyclePrediction {
        input,
        predicted_periods,
        ovulation_date,
        fertile_window,
        phase: classify_phase(&ctx),
        irregular: is_irregular(input.cycle_length_days),
    }
}

/// Predict relative to the local calendar date.
pub fn predict_today(input: CycleInput) -> CyclePrediction {
    predict(input, today())
}

/// Days left until the first predicted period, floored at zero.
/// Does not roll over to the following cycle once the date has passed.
pub fn days_until_next(prediction: &CyclePrediction) -> i64 {
    days_until_next_from(prediction, today())
}

pub fn days_until_next_from(prediction: &CyclePrediction, today: NaiveDate) -> i64 {
    days_between(prediction.next_period(), today).max(0)
}

/// Cycle lengths outside 21-35 days are flagged. Advisory only.
pub fn is_irregular(cycle_length_days: i32) -> bool {
    !(NORMAL_CYCLE_MIN..=NORMAL_CYCLE_MAX).contains(&cycle_length_days)
}

/// Signed whole days from `earlier` to `later`.
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn classify_phase(ctx: &PhaseContext) -> Phase {
    PHASE_RULES
        .iter()
        .find(|(matches, _)| matches(ctx))
        .map(|(_, phase)| *phase)
        .unwrap_or(Phase::Luteal)
}

fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|d| date.checked_add_signed(d))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}
