//! Customer-facing copy for reminder emails (Dutch).
//!
//! The same subject line goes into the email and into the email log, so it
//! is chosen here rather than in the mail crate.

use super::{PaymentTemplate, Tier};
use crate::project::ProjectStatus;

/// Action phrases per phase: `(default, pressing)`. Each completes the
/// sentence "we vragen je om ...".
const ACTION_TABLE: &[(&str, &str, &str)] = &[
    (
        "onboarding",
        "je teksten, logo en foto's aan te leveren via de onboarding",
        "vandaag nog je teksten, logo en foto's aan te leveren, anders schuift je planning op",
    ),
    (
        "design",
        "het ontwerp te bekijken en je feedback door te geven",
        "zo snel mogelijk je feedback op het ontwerp door te geven, zodat we kunnen starten met bouwen",
    ),
    (
        "review",
        "de website te controleren en goed te keuren",
        "direct de website te controleren en goed te keuren, zodat we live kunnen gaan",
    ),
    (
        "payment",
        "de betaling af te ronden",
        "de openstaande betaling vandaag nog af te ronden",
    ),
];

const GENERIC_ACTION: &str = "de openstaande stap in je project af te ronden";

/// Action phrase for `phase`; urgent and overdue reminders use the pressing
/// variant.
pub fn action_required(phase: &ProjectStatus, tier: Tier) -> &'static str {
    ACTION_TABLE
        .iter()
        .find(|(key, _, _)| *key == phase.as_str())
        .map(|(_, default, pressing)| if tier.is_pressing() { *pressing } else { *default })
        .unwrap_or(GENERIC_ACTION)
}

/// Action phrase for a payment reminder on behalf of `business_name`.
pub fn payment_action(business_name: &str) -> String {
    format!("de betaling voor {business_name} af te ronden")
}

/// Subject line for a reminder in `phase` at `tier`.
pub fn subject(phase: &ProjectStatus, tier: Tier) -> &'static str {
    match (phase, tier) {
        (ProjectStatus::Payment, Tier::Upcoming) => "Herinnering: je betaling staat nog open",
        (ProjectStatus::Payment, Tier::Urgent) => "Dringend: rond je betaling af",
        (ProjectStatus::Payment, Tier::Overdue) => "Laatste herinnering: je betaling is verlopen",
        (_, Tier::Upcoming) => "Herinnering: je deadline komt eraan",
        (_, Tier::Urgent) => "Dringend: je deadline is bijna verstreken",
        (_, Tier::Overdue) => "Deadline verstreken: we wachten nog op je",
    }
}

/// Free-text summary stored with a deadline reminder in the email log.
pub fn reminder_details(phase: &ProjectStatus, tier: Tier, days_until: i64) -> String {
    format!("{tier} reminder for phase {phase} ({days_until} days until deadline)")
}

/// Free-text summary stored with a payment reminder in the email log.
pub fn payment_details(template: PaymentTemplate, payment_url: &str) -> String {
    format!("{template} payment reminder, link: {payment_url}")
}
