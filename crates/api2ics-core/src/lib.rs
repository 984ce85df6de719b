//! Core types: calendar events, date normalization, ICS rendering

pub mod event;
pub mod ics;
pub mod time;

pub use event::CalendarEvent;
pub use ics::{CALENDAR_TIMEZONE, PRODID, render_calendar};
pub use time::{DateFormatError, ics_timestamp, normalize_datetime, parse_datetime};
