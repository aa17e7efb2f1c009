//! Plain-text rendering of reminder emails (Dutch).

use sitecraft_core::mailer::DeadlineReminderEmail;
use sitecraft_core::project::{ProjectStatus, ProjectType};
use sitecraft_core::reminder::copy;

/// Subject and body ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Render a deadline or payment reminder.
pub fn render_reminder(email: &DeadlineReminderEmail) -> RenderedEmail {
    let subject = copy::subject(&email.phase, email.tier).to_string();

    let mut body = format!("Hoi {},\n\n", email.to_name);
    body.push_str(&timing_line(&email.phase, email.days_until));
    body.push_str("\n\n");
    body.push_str(&format!(
        "Om verder te kunnen met je {} hebben we je hulp nodig: we vragen je om {}.\n\n",
        project_type_label(&email.project_type),
        email.action_required
    ));
    body.push_str(&format!(
        "Deadline: {}\n",
        email.deadline.format("%d-%m-%Y")
    ));
    if let Some(link) = &email.link {
        body.push_str(&format!("{}: {link}\n", link_label(&email.phase)));
    }
    body.push_str("\nHeb je vragen? Beantwoord deze e-mail gerust, we helpen je graag.\n\n");
    body.push_str("Met vriendelijke groet,\nHet Sitecraft-team\n\n");
    body.push_str(&format!("Projectnummer: {}\n", email.project_id));

    RenderedEmail { subject, body }
}

fn timing_line(phase: &ProjectStatus, days_until: i64) -> String {
    let what = if *phase == ProjectStatus::Payment {
        "De betaaltermijn"
    } else {
        "De deadline voor de volgende stap in je project"
    };
    match days_until {
        d if d < -1 => format!("{what} is {} dagen geleden verstreken.", -d),
        -1 => format!("{what} is gisteren verstreken."),
        0 => format!("{what} is vandaag."),
        1 => format!("{what} is morgen."),
        d => format!("{what} is over {d} dagen."),
    }
}

fn project_type_label(kind: &ProjectType) -> &str {
    if kind.is_drone_video() {
        return "dronevideo";
    }
    match kind {
        ProjectType::Website => "website",
        ProjectType::Webshop => "webshop",
        ProjectType::Logo => "logo",
        ProjectType::DroneVideo | ProjectType::Other(_) => "project",
    }
}

fn link_label(phase: &ProjectStatus) -> &'static str {
    if *phase == ProjectStatus::Payment {
        "Betaallink"
    } else {
        "Je projectmap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sitecraft_core::reminder::Tier;

    fn email(phase: ProjectStatus, days_until: i64, tier: Tier) -> DeadlineReminderEmail {
        DeadlineReminderEmail {
            to_email: "anna@example.nl".into(),
            to_name: "Bakkerij Anna".into(),
            project_id: "p-1".into(),
            phase,
            project_type: ProjectType::Webshop,
            deadline: Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap(),
            days_until,
            tier,
            action_required: "het ontwerp te bekijken".into(),
            link: Some("https://drive.example/p-1".into()),
        }
    }

    #[test]
    fn renders_greeting_action_and_deadline() {
        let rendered = render_reminder(&email(ProjectStatus::Design, 2, Tier::Upcoming));
        assert_eq!(rendered.subject, "Herinnering: je deadline komt eraan");
        assert!(rendered.body.starts_with("Hoi Bakkerij Anna,"));
        assert!(rendered.body.contains("je webshop"));
        assert!(rendered.body.contains("het ontwerp te bekijken."));
        assert!(rendered.body.contains("Deadline: 06-01-2024"));
        assert!(rendered.body.contains("Je projectmap: https://drive.example/p-1"));
        assert!(rendered.body.contains("over 2 dagen"));
    }

    #[test]
    fn payment_reminder_labels_link_as_payment() {
        let rendered = render_reminder(&email(ProjectStatus::Payment, -1, Tier::Overdue));
        assert!(rendered.body.contains("Betaallink: "));
        assert!(rendered.body.contains("De betaaltermijn is gisteren verstreken."));
        assert_eq!(rendered.subject, "Laatste herinnering: je betaling is verlopen");
    }

    #[test]
    fn timing_line_covers_all_ranges() {
        let phase = ProjectStatus::Review;
        assert!(timing_line(&phase, -4).contains("4 dagen geleden"));
        assert!(timing_line(&phase, 0).ends_with("is vandaag."));
        assert!(timing_line(&phase, 1).ends_with("is morgen."));
    }

    #[test]
    fn legacy_drone_tag_is_labelled_as_drone_video() {
        assert_eq!(project_type_label(&ProjectType::Other("drone".into())), "dronevideo");
        assert_eq!(project_type_label(&ProjectType::DroneVideo), "dronevideo");
        assert_eq!(project_type_label(&ProjectType::Other("podcast".into())), "project");
    }

    #[test]
    fn link_line_is_omitted_without_link() {
        let mut input = email(ProjectStatus::Onboarding, 1, Tier::Urgent);
        input.link = None;
        let rendered = render_reminder(&input);
        assert!(!rendered.body.contains("Je projectmap"));
    }
}
