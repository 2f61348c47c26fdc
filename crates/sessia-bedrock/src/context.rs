//! Context builders for agent prompts.
//!
//! Assembles the client profile and recent session history into XML-style
//! blocks prepended to the user message, giving the model the record it is
//! reporting on.

use jiff::tz::TimeZone;

use sessia_core::models::client::Client;
use sessia_core::models::session::Session;

/// Build a `<client_profile>` block from the client record.
pub fn build_client_context(client: &Client) -> String {
    let mut block = String::from("<client_profile>\n");

    block.push_str(&format!("name: {}\n", client.name));
    if let Some(dob) = client.date_of_birth {
        block.push_str(&format!("date_of_birth: {dob}\n"));
    }
    if let Some(level) = client.risk_level {
        block.push_str(&format!("cached_risk_level: {level}\n"));
    }

    block.push_str("</client_profile>");
    block
}

/// Build a `<session_history>` block from the given sessions.
///
/// Returns an empty string when there are no sessions (no context to
/// inject).
pub fn build_session_context(sessions: &[Session]) -> String {
    if sessions.is_empty() {
        return String::new();
    }

    let mut block = String::from("<session_history>\n");

    for session in sessions {
        let date = session.scheduled_at.to_zoned(TimeZone::UTC).date();
        block.push_str(&format!(
            "<session date=\"{date}\" status=\"{}\">\n",
            session.status
        ));
        if let Some(mood) = session.mood_rating {
            block.push_str(&format!("mood_rating: {mood}\n"));
        }
        if let Some(notes) = &session.notes {
            block.push_str(notes);
            if !notes.ends_with('\n') {
                block.push('\n');
            }
        }
        block.push_str("</session>\n");
    }

    block.push_str("</session_history>");
    block
}
