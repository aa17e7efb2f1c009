//! Customer project record as stored by the portal.
//!
//! Projects are written by the onboarding wizard and the portal as JSON
//! documents. This module reads them and writes back only the reminder
//! bookkeeping, so every type here keeps unknown keys in a flattened
//! `extra` map to survive a read-modify-write round trip untouched.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle phase of a project.
///
/// Unrecognised tags are kept verbatim in [`ProjectStatus::Other`] so they are
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    Onboarding,
    Design,
    Development,
    Review,
    Payment,
    Live,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Onboarding => "onboarding",
            Self::Design => "design",
            Self::Development => "development",
            Self::Review => "review",
            Self::Payment => "payment",
            Self::Live => "live",
            Self::Other(tag) => tag,
        }
    }

    /// Phases in which the project waits on the customer, and therefore the
    /// only phases deadline reminders are sent for.
    pub fn awaits_customer(&self) -> bool {
        matches!(self, Self::Onboarding | Self::Design | Self::Review)
    }
}

impl From<String> for ProjectStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "onboarding" => Self::Onboarding,
            "design" => Self::Design,
            "development" => Self::Development,
            "review" => Self::Review,
            "payment" => Self::Payment,
            "live" => Self::Live,
            _ => Self::Other(tag),
        }
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Project type
// ---------------------------------------------------------------------------

/// The service the customer ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectType {
    #[default]
    Website,
    Webshop,
    Logo,
    DroneVideo,
    Other(String),
}

impl ProjectType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Website => "website",
            Self::Webshop => "webshop",
            Self::Logo => "logo",
            Self::DroneVideo => "drone_video",
            Self::Other(tag) => tag,
        }
    }

    /// Drone video, including the older `drone` / `drone-video` tags, which
    /// stay in [`ProjectType::Other`] so they are written back verbatim.
    pub fn is_drone_video(&self) -> bool {
        match self {
            Self::DroneVideo => true,
            Self::Other(tag) => matches!(tag.as_str(), "drone" | "drone-video"),
            _ => false,
        }
    }
}

impl From<String> for ProjectType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "website" => Self::Website,
            "webshop" => Self::Webshop,
            "logo" => Self::Logo,
            "drone_video" => Self::DroneVideo,
            _ => Self::Other(tag),
        }
    }
}

impl From<ProjectType> for String {
    fn from(kind: ProjectType) -> Self {
        match kind {
            ProjectType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

/// Greeting used when the customer left both company and personal name empty
/// ("Hoi daar").
pub const FALLBACK_GREETING_NAME: &str = "daar";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    /// Name used to address the customer: company name, then personal name,
    /// then [`FALLBACK_GREETING_NAME`].
    pub fn display_name(&self) -> &str {
        self.company_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or_else(|| Some(self.name.trim()).filter(|name| !name.is_empty()))
            .unwrap_or(FALLBACK_GREETING_NAME)
    }

    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Onboarding bookkeeping
// ---------------------------------------------------------------------------

/// Reminder bookkeeping kept inside the project's `onboardingData` bag.
///
/// The wizard stores its own form state in the same object; those keys land
/// in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uploads_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reminder_sent: Option<Timestamp>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub reminder_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment_reminder_sent: Option<Timestamp>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub payment_reminder_count: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_zero(count: &u32) -> bool {
    *count == 0
}

/// The portal writes `null` for unset values; read it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Phase deadlines
// ---------------------------------------------------------------------------

/// Explicit per-phase deadlines set by the studio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseDeadlines {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<Timestamp>,
}

impl PhaseDeadlines {
    /// Deadline configured for `status`, if any.
    pub fn for_status(&self, status: &ProjectStatus) -> Option<Timestamp> {
        match status {
            ProjectStatus::Onboarding => self.onboarding,
            ProjectStatus::Design => self.design,
            ProjectStatus::Development => self.development,
            ProjectStatus::Review => self.review,
            ProjectStatus::Live => self.live,
            ProjectStatus::Payment | ProjectStatus::Other(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_type: ProjectType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer: Customer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_drive_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub onboarding_data: OnboardingData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_deadlines: Option<PhaseDeadlines>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Explicit deadline for the current phase, if the studio set one.
    pub fn explicit_deadline(&self) -> Option<Timestamp> {
        self.phase_deadlines
            .as_ref()
            .and_then(|deadlines| deadlines.for_status(&self.status))
    }

    /// Record a sent deadline reminder.
    pub fn record_reminder_sent(&mut self, now: Timestamp) {
        self.onboarding_data.last_reminder_sent = Some(now);
        self.onboarding_data.reminder_count += 1;
        self.updated_at = Some(now);
    }

    /// Record a sent payment reminder. Deadline bookkeeping is left alone.
    pub fn record_payment_reminder_sent(&mut self, now: Timestamp) {
        self.onboarding_data.last_payment_reminder_sent = Some(now);
        self.onboarding_data.payment_reminder_count += 1;
        self.updated_at = Some(now);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn stored_project() -> Value {
        json!({
            "id": "p-1",
            "status": "design",
            "projectType": "webshop",
            "customer": { "name": "Anna", "email": "anna@example.nl", "phone": "0612345678" },
            "onboardingData": {
                "uploadsCompleted": false,
                "reminderCount": 1,
                "lastReminderSent": "2024-01-02T09:00:00.000Z",
                "brandColors": ["#ff0000"]
            },
            "phaseDeadlines": { "design": "2024-01-10T00:00:00Z" },
            "createdAt": "2024-01-01T00:00:00Z",
            "packageName": "Pro"
        })
    }

    #[test]
    fn parses_stored_project() {
        let project: Project = serde_json::from_value(stored_project()).unwrap();
        assert_eq!(project.status, ProjectStatus::Design);
        assert_eq!(project.project_type, ProjectType::Webshop);
        assert_eq!(project.onboarding_data.reminder_count, 1);
        assert_eq!(
            project.explicit_deadline(),
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let project: Project = serde_json::from_value(stored_project()).unwrap();
        let written = serde_json::to_value(&project).unwrap();
        assert_eq!(written["packageName"], "Pro");
        assert_eq!(written["customer"]["phone"], "0612345678");
        assert_eq!(written["onboardingData"]["brandColors"][0], "#ff0000");
    }

    #[test]
    fn unknown_status_is_preserved_verbatim() {
        let mut raw = stored_project();
        raw["status"] = json!("invoiced");
        let project: Project = serde_json::from_value(raw).unwrap();
        assert_eq!(project.status, ProjectStatus::Other("invoiced".into()));
        assert!(!project.status.awaits_customer());
        let written = serde_json::to_value(&project).unwrap();
        assert_eq!(written["status"], "invoiced");
    }

    #[test]
    fn missing_bookkeeping_defaults_to_empty() {
        let project: Project = serde_json::from_value(json!({
            "id": "p-2",
            "status": "onboarding",
            "customer": { "name": "Bram", "email": "bram@example.nl" },
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(project.onboarding_data, OnboardingData::default());
        assert_eq!(project.project_type, ProjectType::Website);
        assert!(project.phase_deadlines.is_none());
    }

    #[test]
    fn display_name_prefers_company_then_name() {
        let mut customer = Customer {
            name: "Anna".into(),
            email: "anna@example.nl".into(),
            company_name: Some("Bakkerij Anna".into()),
            extra: Map::new(),
        };
        assert_eq!(customer.display_name(), "Bakkerij Anna");

        customer.company_name = Some("  ".into());
        assert_eq!(customer.display_name(), "Anna");

        customer.name.clear();
        assert_eq!(customer.display_name(), FALLBACK_GREETING_NAME);
    }

    #[test]
    fn drone_aliases_are_recognised_but_kept_verbatim() {
        for tag in ["drone", "drone-video"] {
            let kind = ProjectType::from(tag.to_string());
            assert_eq!(kind, ProjectType::Other(tag.into()));
            assert!(kind.is_drone_video());
            assert_eq!(String::from(kind), tag);
        }
        assert!(ProjectType::DroneVideo.is_drone_video());
        assert!(!ProjectType::Logo.is_drone_video());
    }

    #[test]
    fn drone_alias_survives_write_back() {
        let mut raw = stored_project();
        raw["projectType"] = json!("drone");
        let mut project: Project = serde_json::from_value(raw).unwrap();
        project.record_reminder_sent(Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap());
        let written = serde_json::to_value(&project).unwrap();
        assert_eq!(written["projectType"], "drone");
    }

    #[test]
    fn null_values_read_as_defaults() {
        let project: Project = serde_json::from_value(json!({
            "id": "p-3",
            "status": "design",
            "projectType": null,
            "customer": { "name": null, "email": "cees@example.nl", "companyName": null },
            "onboardingData": {
                "uploadsCompleted": null,
                "reminderCount": null,
                "lastReminderSent": null,
                "paymentReminderCount": null
            },
            "phaseDeadlines": null,
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(project.project_type, ProjectType::Website);
        assert_eq!(project.customer.name, "");
        assert_eq!(project.customer.display_name(), FALLBACK_GREETING_NAME);
        assert_eq!(project.onboarding_data.reminder_count, 0);
        assert_eq!(project.onboarding_data.payment_reminder_count, 0);
        assert!(!project.onboarding_data.uploads_completed);
        assert!(project.onboarding_data.extra.is_empty());
    }

    #[test]
    fn null_customer_and_bag_read_as_empty() {
        let project: Project = serde_json::from_value(json!({
            "id": "p-4",
            "status": "onboarding",
            "customer": null,
            "onboardingData": null,
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(project.customer, Customer::default());
        assert_eq!(project.onboarding_data, OnboardingData::default());
    }

    #[test]
    fn recording_reminders_touches_only_their_own_counters() {
        let mut project: Project = serde_json::from_value(stored_project()).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();

        project.record_payment_reminder_sent(now);
        assert_eq!(project.onboarding_data.payment_reminder_count, 1);
        assert_eq!(project.onboarding_data.reminder_count, 1);

        project.record_reminder_sent(now);
        assert_eq!(project.onboarding_data.reminder_count, 2);
        assert_eq!(project.onboarding_data.last_reminder_sent, Some(now));
        assert_eq!(project.updated_at, Some(now));
    }
}
