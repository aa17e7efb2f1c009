//! Payment reminder templates.
//!
//! Payment reminders are not gated by eligibility; the caller picks a
//! template and the template fixes the wording.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::Tier;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentTemplate {
    #[default]
    Friendly,
    Urgent,
    Final,
}

impl PaymentTemplate {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Friendly => "friendly",
            Self::Urgent => "urgent",
            Self::Final => "final",
        }
    }

    /// `(days_until, tier)` used to word the email.
    pub fn wording(self) -> (i64, Tier) {
        match self {
            Self::Final => (-1, Tier::Overdue),
            Self::Urgent => (0, Tier::Urgent),
            Self::Friendly => (3, Tier::Upcoming),
        }
    }
}

impl FromStr for PaymentTemplate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "friendly" => Ok(Self::Friendly),
            "urgent" => Ok(Self::Urgent),
            "final" => Ok(Self::Final),
            other => Err(CoreError::Validation(format!(
                "Invalid payment template '{other}'. Must be one of: friendly, urgent, final"
            ))),
        }
    }
}

impl fmt::Display for PaymentTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout page for a project, used when the caller supplies no payment URL.
pub fn default_payment_url(public_base_url: &str, project_id: &str) -> String {
    format!("{}/betalen/{project_id}", public_base_url.trim_end_matches('/'))
}
