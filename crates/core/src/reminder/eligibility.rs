//! Deadline reminder eligibility.
//!
//! [`evaluate`] is a pure function of the project and the caller-supplied
//! `now`; it never mutates the project. The dispatch layer applies the
//! bookkeeping after a reminder is actually delivered.

use chrono::Duration;
use serde::Serialize;

use super::Tier;
use crate::project::{Project, ProjectStatus};
use crate::types::Timestamp;

/// Minimum whole days between two reminders for the same project.
pub const COOLDOWN_DAYS: i64 = 2;

/// Overdue reminders stop once `reminderCount` reaches this value.
pub const MAX_OVERDUE_REMINDERS: u32 = 3;

/// Days-until at or below which a reminder is `urgent`.
pub const URGENT_WINDOW_DAYS: i64 = 1;

/// Days-until at or below which a reminder is sent at all.
pub const UPCOMING_WINDOW_DAYS: i64 = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Why no reminder goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    PhaseNotGated,
    UploadsCompleted,
    Cooldown,
    OverdueCapReached,
    TooEarly,
}

impl SuppressReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::PhaseNotGated => "Project phase does not require customer action",
            Self::UploadsCompleted => "Customer already completed the uploads",
            Self::Cooldown => "A reminder was sent less than 2 days ago",
            Self::OverdueCapReached => "Maximum number of overdue reminders reached",
            Self::TooEarly => "Deadline is more than 3 days away",
        }
    }
}

/// Outcome of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    pub should_send: bool,
    pub tier: Option<Tier>,
    pub deadline: Option<Timestamp>,
    pub days_until: Option<i64>,
    pub reason: Option<SuppressReason>,
}

impl Eligibility {
    fn suppressed(reason: SuppressReason) -> Self {
        Self {
            should_send: false,
            tier: None,
            deadline: None,
            days_until: None,
            reason: Some(reason),
        }
    }

    fn suppressed_with_deadline(reason: SuppressReason, deadline: Timestamp, days: i64) -> Self {
        Self {
            deadline: Some(deadline),
            days_until: Some(days),
            ..Self::suppressed(reason)
        }
    }
}

// ---------------------------------------------------------------------------
// Deadline arithmetic
// ---------------------------------------------------------------------------

/// Days granted for a phase when the studio did not set an explicit deadline.
pub fn default_deadline_days(status: &ProjectStatus) -> i64 {
    match status {
        ProjectStatus::Onboarding => 3,
        ProjectStatus::Design => 5,
        ProjectStatus::Review => 3,
        _ => 3,
    }
}

/// Deadline for the project's current phase: the explicit one, or
/// `createdAt` plus the phase default.
pub fn resolve_deadline(project: &Project) -> Timestamp {
    project.explicit_deadline().unwrap_or_else(|| {
        project.created_at + Duration::days(default_deadline_days(&project.status))
    })
}

/// Whole days until `deadline`, rounded up. Negative once it has passed.
pub fn days_until(deadline: Timestamp, now: Timestamp) -> i64 {
    let millis = (deadline - now).num_milliseconds();
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Whole days elapsed since `then`, rounded down.
pub fn days_since(then: Timestamp, now: Timestamp) -> i64 {
    (now - then).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Decide whether `project` should get a deadline reminder at `now`.
pub fn evaluate(project: &Project, now: Timestamp) -> Eligibility {
    if !project.status.awaits_customer() {
        return Eligibility::suppressed(SuppressReason::PhaseNotGated);
    }

    let bookkeeping = &project.onboarding_data;
    if project.status == ProjectStatus::Onboarding && bookkeeping.uploads_completed {
        return Eligibility::suppressed(SuppressReason::UploadsCompleted);
    }

    let deadline = resolve_deadline(project);
    let days = days_until(deadline, now);

    if let Some(last_sent) = bookkeeping.last_reminder_sent {
        if days_since(last_sent, now) < COOLDOWN_DAYS {
            return Eligibility::suppressed_with_deadline(SuppressReason::Cooldown, deadline, days);
        }
    }

    let tier = match Tier::for_days_until(days) {
        Some(Tier::Overdue) if bookkeeping.reminder_count >= MAX_OVERDUE_REMINDERS => {
            return Eligibility::suppressed_with_deadline(
                SuppressReason::OverdueCapReached,
                deadline,
                days,
            );
        }
        Some(tier) => tier,
        None => {
            return Eligibility::suppressed_with_deadline(SuppressReason::TooEarly, deadline, days);
        }
    };

    Eligibility {
        should_send: true,
        tier: Some(tier),
        deadline: Some(deadline),
        days_until: Some(days),
        reason: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
