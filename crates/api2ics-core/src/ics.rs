//! ICS/iCalendar document rendering.
//!
//! Renders normalized events into a minimal iCalendar (RFC 5545) document:
//! one `VCALENDAR` container with one `VEVENT` block per event, `\n` line
//! endings, no UID/DTSTAMP/SEQUENCE fields.
//!
//! Text values are emitted verbatim. Reserved ICS characters (commas,
//! semicolons, backslashes, newlines) are not escaped; strict consumers
//! may misparse documents built from data containing them.

use tracing::debug;

use crate::event::CalendarEvent;
use crate::time::{DateFormatError, normalize_datetime};

/// Product identifier emitted in the calendar header.
pub const PRODID: &str = "api2ics";

/// Timezone identifier emitted in the `X-WR-TIMEZONE` header.
///
/// Declarative only: DTSTART/DTEND values stay naive and carry no offset.
pub const CALENDAR_TIMEZONE: &str = "Australia/Adelaide";

/// Renders the complete ICS document for a set of events.
///
/// Events are rendered in the order given. Rendering is deterministic:
/// the same input always produces byte-identical output.
///
/// # Errors
///
/// Returns [`DateFormatError`] on the first `start` or `end` value that
/// cannot be parsed. The whole document is abandoned, including events
/// already rendered.
pub fn render_calendar(events: &[CalendarEvent]) -> Result<String, DateFormatError> {
    let mut out = format!(
        "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:{}\nCALSCALE:GREGORIAN\nX-WR-TIMEZONE:{}\n",
        PRODID, CALENDAR_TIMEZONE
    );

    for event in events {
        render_event(&mut out, event)?;
    }

    out.push_str("END:VCALENDAR");

    debug!(events = events.len(), "rendered ICS document");
    Ok(out)
}

/// Renders one VEVENT block onto the output buffer.
fn render_event(out: &mut String, event: &CalendarEvent) -> Result<(), DateFormatError> {
    let start = normalize_datetime(&event.start)?;
    let end = normalize_datetime(&event.end)?;

    out.push_str("BEGIN:VEVENT\n");
    out.push_str(&format!("SUMMARY:{}\n", event.summary));
    out.push_str(&format!(
        "LOCATION:{}\n",
        event.location.as_deref().unwrap_or("")
    ));
    out.push_str(&format!(
        "DESCRIPTION:{}\n",
        event.description.as_deref().unwrap_or("")
    ));
    out.push_str(&format!("DTSTART:{}\n", start));
    out.push_str(&format!("DTEND:{}\n", end));
    out.push_str("END:VEVENT\n");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> CalendarEvent {
        CalendarEvent::new("Test", "2023-03-07 10:00", "2023-03-07 13:00")
            .with_description("Project")
            .with_location("Online")
    }

    #[test]
    fn empty_calendar_has_framing_only() {
        let ics = render_calendar(&[]).unwrap();

        assert_eq!(
            ics,
            "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:api2ics\nCALSCALE:GREGORIAN\nX-WR-TIMEZONE:Australia/Adelaide\nEND:VCALENDAR"
        );
    }

    #[test]
    fn renders_single_event() {
        let ics = render_calendar(&[sample_event()]).unwrap();

        assert!(ics.contains("BEGIN:VEVENT\nSUMMARY:Test\nLOCATION:Online\nDESCRIPTION:Project\nDTSTART:20230307T100000\nDTEND:20230307T130000\nEND:VEVENT\n"));
        assert!(ics.ends_with("END:VCALENDAR"));
    }

    #[test]
    fn missing_optionals_render_as_empty_fields() {
        let event = CalendarEvent::new("Bare", "2023-03-07 10:00", "2023-03-07 13:00");
        let ics = render_calendar(&[event]).unwrap();

        assert!(ics.contains("LOCATION:\n"));
        assert!(ics.contains("DESCRIPTION:\n"));
    }

    #[test]
    fn preserves_event_order() {
        let events = vec![
            CalendarEvent::new("First", "2023-03-08 09:00", "2023-03-08 10:00"),
            CalendarEvent::new("Second", "2023-03-07 09:00", "2023-03-07 10:00"),
        ];
        let ics = render_calendar(&events).unwrap();

        let first = ics.find("SUMMARY:First").unwrap();
        let second = ics.find("SUMMARY:Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn rendering_is_deterministic() {
        let events = vec![sample_event(), sample_event()];
        assert_eq!(
            render_calendar(&events).unwrap(),
            render_calendar(&events).unwrap()
        );
    }

    #[test]
    fn unparseable_start_fails_whole_document() {
        let events = vec![
            sample_event(),
            CalendarEvent::new("Broken", "whenever", "2023-03-07 13:00"),
        ];

        let err = render_calendar(&events).unwrap_err();
        assert_eq!(err.value, "whenever");
    }

    #[test]
    fn reserved_characters_pass_through_verbatim() {
        let event = CalendarEvent::new("A; B, C", "2023-03-07 10:00", "2023-03-07 13:00");
        let ics = render_calendar(&[event]).unwrap();

        assert!(ics.contains("SUMMARY:A; B, C\n"));
    }
}
