//! Deadline and payment reminder rules.
//!
//! - [`eligibility`] decides whether a project gets a deadline reminder now.
//! - [`copy`] holds the customer-facing action phrases and subject lines.
//! - [`payment`] defines the payment reminder template family.

pub mod copy;
pub mod eligibility;
pub mod payment;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use eligibility::{evaluate, Eligibility, SuppressReason};
pub use payment::PaymentTemplate;

/// Urgency of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Upcoming,
    Urgent,
    Overdue,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Urgent => "urgent",
            Self::Overdue => "overdue",
        }
    }

    /// Tier implied by the number of days left, ignoring cooldown and the
    /// overdue cap. `None` when the deadline is too far away to nudge.
    pub fn for_days_until(days_until: i64) -> Option<Self> {
        match days_until {
            d if d < 0 => Some(Self::Overdue),
            0..=eligibility::URGENT_WINDOW_DAYS => Some(Self::Urgent),
            d if d <= eligibility::UPCOMING_WINDOW_DAYS => Some(Self::Upcoming),
            _ => None,
        }
    }

    /// Urgent and overdue reminders use the pressing phrasing.
    pub fn is_pressing(self) -> bool {
        matches!(self, Self::Urgent | Self::Overdue)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::for_days_until(-1), Some(Tier::Overdue));
        assert_eq!(Tier::for_days_until(0), Some(Tier::Urgent));
        assert_eq!(Tier::for_days_until(1), Some(Tier::Urgent));
        assert_eq!(Tier::for_days_until(2), Some(Tier::Upcoming));
        assert_eq!(Tier::for_days_until(3), Some(Tier::Upcoming));
        assert_eq!(Tier::for_days_until(4), None);
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Tier::Overdue).unwrap(), "overdue");
    }
}
