//! Habit records and streak arithmetic.
//!
//! # Responsibility
//! - Define the persisted habit shape.
//! - Compute streaks and tracking windows from completion dates.
//!
//! # Invariants
//! - `completed_dates` holds each date at most once.
//! - `streak` is derived; it is recomputed on every toggle or edit and never
//!   accepted from callers as truth.

use super::{new_record_id, require_text, RecordId, ValidationError};
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const DAYS_PER_WEEK: i64 = 7;
const DAYS_PER_MONTH: i64 = 30;

/// Period a habit's frequency is counted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl TrackingPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Converts an age in days to this period's unit, flooring toward
    /// negative infinity so future dates stay negative.
    fn periods_elapsed(self, days: i64) -> i64 {
        match self {
            Self::Daily => days,
            Self::Weekly => days.div_euclid(DAYS_PER_WEEK),
            Self::Monthly => days.div_euclid(DAYS_PER_MONTH),
        }
    }
}

impl std::str::FromStr for TrackingPeriod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!(
                "unknown tracking period `{other}`; expected daily|weekly|monthly"
            )),
        }
    }
}

/// Recurring behavior tracked by completion dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub frequency: u32,
    pub tracking_period: TrackingPeriod,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub completed_dates: Vec<NaiveDate>,
}

/// Editable habit fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub frequency: u32,
    pub tracking_period: TrackingPeriod,
}

impl Habit {
    /// Builds a new habit with zero streak and no completions.
    pub fn from_draft(draft: HabitDraft) -> Self {
        Self {
            id: new_record_id(),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            frequency: draft.frequency,
            tracking_period: draft.tracking_period,
            streak: 0,
            completed_dates: Vec::new(),
        }
    }

    /// Replaces editable fields and recomputes the streak against `today`.
    pub fn apply_draft(&mut self, draft: HabitDraft, today: NaiveDate) {
        self.name = draft.name;
        self.description = draft.description;
        self.category = draft.category;
        self.frequency = draft.frequency;
        self.tracking_period = draft.tracking_period;
        self.refresh_streak(today);
    }

    /// Adds `date` when absent, removes it when present, then recomputes the
    /// streak. Applying the same toggle twice restores the original list.
    ///
    /// Returns whether the date is completed after the toggle.
    pub fn toggle_date(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        let completed = match self.completed_dates.iter().position(|d| *d == date) {
            Some(index) => {
                self.completed_dates.remove(index);
                false
            }
            None => {
                self.completed_dates.push(date);
                true
            }
        };
        self.refresh_streak(today);
        completed
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    pub fn refresh_streak(&mut self, today: NaiveDate) {
        self.streak = calculate_streak(
            &self.completed_dates,
            self.frequency,
            self.tracking_period,
            today,
        );
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        if self.frequency == 0 {
            return Err(ValidationError::ZeroFrequency);
        }
        let mut seen = HashSet::with_capacity(self.completed_dates.len());
        for date in &self.completed_dates {
            if !seen.insert(*date) {
                return Err(ValidationError::Duplicate {
                    field: "completedDates",
                    value: date.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Counts completions, newest first, whose age stays within `frequency`
/// periods of `today`. Stops at the first date outside the threshold.
///
/// Age is measured in whole days; weekly uses `floor(days / 7)` and monthly
/// `floor(days / 30)`. Dates after `today` have negative age and count.
pub fn calculate_streak(
    completed_dates: &[NaiveDate],
    frequency: u32,
    period: TrackingPeriod,
    today: NaiveDate,
) -> u32 {
    let mut sorted = completed_dates.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let threshold = i64::from(frequency);
    let mut streak = 0;
    for date in sorted {
        let age_days = (today - date).num_days();
        if period.periods_elapsed(age_days) > threshold {
            break;
        }
        streak += 1;
    }
    streak
}

/// Dates shown as check-boxes for a habit, oldest first and ending at `today`.
///
/// - daily: the last 7 days
/// - weekly: 4 dates spaced 7 days apart
/// - monthly: 3 dates spaced one calendar month apart
pub fn tracking_window(period: TrackingPeriod, today: NaiveDate) -> Vec<NaiveDate> {
    let slots: u32 = match period {
        TrackingPeriod::Daily => 7,
        TrackingPeriod::Weekly => 4,
        TrackingPeriod::Monthly => 3,
    };

    (0..slots)
        .rev()
        .filter_map(|offset| match period {
            TrackingPeriod::Daily => today.checked_sub_days(Days::new(u64::from(offset))),
            TrackingPeriod::Weekly => today.checked_sub_days(Days::new(u64::from(offset) * 7)),
            TrackingPeriod::Monthly => today.checked_sub_months(Months::new(offset)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{calculate_streak, tracking_window, Habit, HabitDraft, TrackingPeriod};
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(frequency: u32, period: TrackingPeriod) -> Habit {
        Habit::from_draft(HabitDraft {
            name: "Stretch".to_string(),
            description: String::new(),
            category: "health".to_string(),
            frequency,
            tracking_period: period,
        })
    }

    #[test]
    fn daily_streak_stops_at_first_date_outside_threshold() {
        let today = day(2024, 3, 10);
        let dates = [day(2024, 3, 10), day(2024, 3, 9), day(2024, 3, 1)];
        assert_eq!(calculate_streak(&dates, 1, TrackingPeriod::Daily, today), 2);
    }

    #[test]
    fn streak_ignores_input_order() {
        let today = day(2024, 3, 10);
        let dates = [day(2024, 3, 1), day(2024, 3, 10), day(2024, 3, 9)];
        assert_eq!(calculate_streak(&dates, 1, TrackingPeriod::Daily, today), 2);
    }

    #[test]
    fn weekly_and_monthly_use_floored_periods() {
        let today = day(2024, 3, 31);
        let weekly = [day(2024, 3, 24), day(2024, 3, 18), day(2024, 2, 1)];
        assert_eq!(calculate_streak(&weekly, 1, TrackingPeriod::Weekly, today), 2);

        let monthly = [day(2024, 3, 2), day(2024, 1, 31), day(2023, 10, 1)];
        assert_eq!(calculate_streak(&monthly, 2, TrackingPeriod::Monthly, today), 2);
    }

    #[test]
    fn future_dates_count_toward_streak() {
        let today = day(2024, 3, 10);
        let dates = [day(2024, 3, 12)];
        assert_eq!(calculate_streak(&dates, 1, TrackingPeriod::Weekly, today), 1);
    }

    #[test]
    fn empty_dates_give_zero_streak() {
        assert_eq!(
            calculate_streak(&[], 3, TrackingPeriod::Daily, day(2024, 1, 1)),
            0
        );
    }

    #[test]
    fn toggle_twice_restores_dates_and_streak() {
        let today = day(2024, 5, 5);
        let mut habit = habit(3, TrackingPeriod::Daily);
        habit.toggle_date(day(2024, 5, 4), today);
        habit.toggle_date(day(2024, 5, 5), today);
        let before = habit.clone();

        assert!(habit.toggle_date(day(2024, 5, 3), today));
        assert_eq!(habit.streak, 3);
        assert!(!habit.toggle_date(day(2024, 5, 3), today));
        assert_eq!(habit, before);
    }

    #[test]
    fn validate_rejects_zero_frequency_and_duplicate_dates() {
        let zero = habit(0, TrackingPeriod::Daily);
        assert_eq!(zero.validate(), Err(ValidationError::ZeroFrequency));

        let mut duplicated = habit(1, TrackingPeriod::Daily);
        duplicated.completed_dates = vec![day(2024, 1, 1), day(2024, 1, 1)];
        assert!(matches!(
            duplicated.validate(),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn tracking_window_shapes_per_period() {
        let today = day(2024, 3, 31);

        let daily = tracking_window(TrackingPeriod::Daily, today);
        assert_eq!(daily.len(), 7);
        assert_eq!(daily.first(), Some(&day(2024, 3, 25)));
        assert_eq!(daily.last(), Some(&today));

        let weekly = tracking_window(TrackingPeriod::Weekly, today);
        assert_eq!(
            weekly,
            vec![day(2024, 3, 10), day(2024, 3, 17), day(2024, 3, 24), today]
        );

        let monthly = tracking_window(TrackingPeriod::Monthly, today);
        assert_eq!(monthly, vec![day(2024, 1, 31), day(2024, 2, 29), today]);
    }

    #[test]
    fn deserializes_legacy_shape() {
        let raw = r#"{"id":"1700000000000","name":"Walk","description":"","category":"",
            "frequency":2,"trackingPeriod":"weekly","streak":4,"completedDates":["2024-01-02"]}"#;
        let habit: Habit = serde_json::from_str(raw).unwrap();
        assert_eq!(habit.tracking_period, TrackingPeriod::Weekly);
        assert_eq!(habit.completed_dates, vec![day(2024, 1, 2)]);
    }
}
