use thiserror::Error;

use crate::models::GoalAssumptions;

/// A target assumption at or below zero is a configuration error, unlike a
/// zero stage denominator (a normal empty-window state). The UI enforces a
/// 1% floor; anything that slips past it is rejected here before any
/// funnel sizing runs.
#[derive(Debug, Error, PartialEq)]
pub enum PacingError {
    #[error("{name} must be greater than zero (got {value})")]
    InvalidAssumption { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceStatus {
    Ahead,
    Behind,
}

impl PaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceStatus::Ahead => "ahead",
            PaceStatus::Behind => "behind",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaceResult {
    pub progress_percent: f64,
    pub expected_at_this_point: f64,
    pub status: PaceStatus,
    pub pace_diff_percent: f64,
    pub days_remaining: i64,
    pub daily_amount_needed: f64,
    pub remaining: f64,
}

/// Where the period stands against its goal. Progress is capped at 100 so
/// an overshoot still reads as a full bar.
pub fn pace(current: f64, goal: f64, days_in_period: i64, days_elapsed: i64) -> PaceResult {
    let days_in_period = days_in_period.max(1);
    let progress_percent = if goal > 0.0 {
        (current / goal * 100.0).min(100.0)
    } else {
        0.0
    };

    let expected_at_this_point = goal / days_in_period as f64 * days_elapsed as f64;
    let status = if current >= expected_at_this_point {
        PaceStatus::Ahead
    } else {
        PaceStatus::Behind
    };
    let pace_diff_percent = if expected_at_this_point > 0.0 {
        (current - expected_at_this_point).abs() / expected_at_this_point * 100.0
    } else {
        0.0
    };

    let days_remaining = (days_in_period - days_elapsed).max(0);
    let daily_amount_needed = if days_remaining > 0 {
        (goal - current) / days_remaining as f64
    } else {
        0.0
    };

    PaceResult {
        progress_percent,
        expected_at_this_point,
        status,
        pace_diff_percent,
        days_remaining,
        daily_amount_needed,
        remaining: (goal - current).max(0.0),
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<f64, PacingError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(PacingError::InvalidAssumption { name, value })
    }
}

/// Validated closer-side assumptions. Construction is the only place the
/// positivity requirement is checked; the plan math below relies on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloserTargets {
    aov: f64,
    show_rate: f64,
    close_rate: f64,
}

impl CloserTargets {
    pub fn new(aov: f64, show_rate: f64, close_rate: f64) -> Result<CloserTargets, PacingError> {
        Ok(CloserTargets {
            aov: require_positive("target_aov", aov)?,
            show_rate: require_positive("target_show_rate", show_rate)?,
            close_rate: require_positive("target_close_rate", close_rate)?,
        })
    }

    pub fn from_goal(goal: &GoalAssumptions) -> Result<CloserTargets, PacingError> {
        CloserTargets::new(
            goal.target_aov.unwrap_or(0.0),
            goal.target_show_rate.unwrap_or(0.0),
            goal.target_close_rate.unwrap_or(0.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetterTargets {
    cash_per_booking: f64,
    booking_rate: f64,
    convo_rate: f64,
    response_rate: f64,
}

impl SetterTargets {
    pub fn new(
        cash_per_booking: f64,
        booking_rate: f64,
        convo_rate: f64,
        response_rate: f64,
    ) -> Result<SetterTargets, PacingError> {
        Ok(SetterTargets {
            cash_per_booking: require_positive("target_cash_per_booking", cash_per_booking)?,
            booking_rate: require_positive("target_booking_rate", booking_rate)?,
            convo_rate: require_positive("target_convo_rate", convo_rate)?,
            response_rate: require_positive("target_response_rate", response_rate)?,
        })
    }

    pub fn from_goal(goal: &GoalAssumptions) -> Result<SetterTargets, PacingError> {
        SetterTargets::new(
            goal.target_cash_per_booking.unwrap_or(0.0),
            goal.target_booking_rate.unwrap_or(0.0),
            goal.target_convo_rate.unwrap_or(0.0),
            goal.target_response_rate.unwrap_or(0.0),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloserFunnelPlan {
    pub deals_needed: u64,
    pub shows_needed: u64,
    pub bookings_needed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetterFunnelPlan {
    pub bookings_needed: u64,
    pub conversations_needed: u64,
    pub responses_needed: u64,
    pub dms_needed: u64,
}

// Needed counts always round up; a fraction of a call still has to be
// booked as a whole one.
fn ceil_div(amount: f64, rate: f64) -> u64 {
    (amount / rate).ceil() as u64
}

/// Volumes a closer must put through the funnel to cover `remaining` cash
/// under the target assumptions.
pub fn closer_plan(remaining: f64, targets: &CloserTargets) -> CloserFunnelPlan {
    let deals_needed = ceil_div(remaining, targets.aov);
    let shows_needed = ceil_div(deals_needed as f64, targets.close_rate);
    let bookings_needed = ceil_div(shows_needed as f64, targets.show_rate);
    CloserFunnelPlan {
        deals_needed,
        shows_needed,
        bookings_needed,
    }
}

/// Outbound volumes a setter must generate to cover `remaining` cash under
/// the target assumptions.
pub fn setter_plan(remaining: f64, targets: &SetterTargets) -> SetterFunnelPlan {
    let bookings_needed = ceil_div(remaining, targets.cash_per_booking);
    let conversations_needed = ceil_div(bookings_needed as f64, targets.booking_rate);
    let responses_needed = ceil_div(conversations_needed as f64, targets.convo_rate);
    let dms_needed = ceil_div(responses_needed as f64, targets.response_rate);
    SetterFunnelPlan {
        bookings_needed,
        conversations_needed,
        responses_needed,
        dms_needed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_capped_at_one_hundred() {
        let result = pace(150.0, 100.0, 30, 10);
        assert_eq!(result.progress_percent, 100.0);
        assert_eq!(result.remaining, 0.0);
    }

    #[test]
    fn ahead_and_behind_follow_expected_at_this_point() {
        let behind = pace(20000.0, 100000.0, 30, 15);
        assert_eq!(behind.expected_at_this_point, 50000.0);
        assert_eq!(behind.status, PaceStatus::Behind);
        assert_eq!(behind.pace_diff_percent, 60.0);

        let ahead = pace(60000.0, 100000.0, 30, 15);
        assert_eq!(ahead.status, PaceStatus::Ahead);
        assert_eq!(ahead.pace_diff_percent, 20.0);
    }

    #[test]
    fn daily_amount_needed_spreads_the_gap() {
        let result = pace(40000.0, 100000.0, 30, 10);
        assert_eq!(result.days_remaining, 20);
        assert_eq!(result.daily_amount_needed, 3000.0);

        let finished = pace(40000.0, 100000.0, 30, 30);
        assert_eq!(finished.days_remaining, 0);
        assert_eq!(finished.daily_amount_needed, 0.0);
    }

    #[test]
    fn zero_goal_reports_zero_progress() {
        let result = pace(500.0, 0.0, 30, 10);
        assert_eq!(result.progress_percent, 0.0);
        assert_eq!(result.pace_diff_percent, 0.0);
    }

    #[test]
    fn deals_needed_round_up() {
        let targets = CloserTargets::new(3000.0, 0.7, 0.3).unwrap();
        let plan = closer_plan(10000.0, &targets);
        assert_eq!(plan.deals_needed, 4);
    }

    #[test]
    fn closer_chain_rounds_up_at_every_stage() {
        let targets = CloserTargets::new(3000.0, 0.7, 0.25).unwrap();
        let plan = closer_plan(10000.0, &targets);
        // 4 deals, 4 / 0.25 = 16 shows, 16 / 0.7 = 22.86 -> 23 bookings.
        assert_eq!(plan.shows_needed, 16);
        assert_eq!(plan.bookings_needed, 23);
    }

    #[test]
    fn setter_chain_rounds_up_at_every_stage() {
        let targets = SetterTargets::new(1000.0, 0.1, 0.4, 0.2).unwrap();
        let plan = setter_plan(10000.0, &targets);
        assert_eq!(plan.bookings_needed, 10);
        assert_eq!(plan.conversations_needed, 100);
        assert_eq!(plan.responses_needed, 250);
        assert_eq!(plan.dms_needed, 1250);
    }

    #[test]
    fn nothing_remaining_needs_no_volume() {
        let targets = CloserTargets::new(3000.0, 0.7, 0.25).unwrap();
        let plan = closer_plan(0.0, &targets);
        assert_eq!(plan.deals_needed, 0);
        assert_eq!(plan.shows_needed, 0);
        assert_eq!(plan.bookings_needed, 0);
    }

    #[test]
    fn non_positive_targets_are_rejected() {
        let err = CloserTargets::new(0.0, 0.7, 0.25).unwrap_err();
        assert_eq!(
            err,
            PacingError::InvalidAssumption {
                name: "target_aov",
                value: 0.0
            }
        );

        assert!(SetterTargets::new(1000.0, -0.1, 0.4, 0.2).is_err());
    }

    #[test]
    fn missing_stored_targets_surface_as_invalid() {
        let goal = GoalAssumptions {
            goal_amount: 50000.0,
            target_aov: Some(3000.0),
            target_show_rate: None,
            target_close_rate: Some(0.25),
            target_cash_per_booking: None,
            target_booking_rate: None,
            target_convo_rate: None,
            target_response_rate: None,
        };
        assert!(CloserTargets::from_goal(&goal).is_err());
    }
}
