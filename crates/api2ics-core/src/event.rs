//! Calendar event type.
//!
//! This module defines [`CalendarEvent`], the normalized representation of
//! one calendar entry after the transform stage. It is the only shape the
//! ICS renderer knows about.
//!
//! The struct is serde-derived so that an untransformed API record whose
//! keys already match can be decoded into it directly (identity transform).

use serde::{Deserialize, Serialize};

/// A normalized calendar event.
///
/// `start` and `end` are kept as the strings the transform produced; they
/// are only parsed and reformatted at ICS rendering time. A `CalendarEvent`
/// exists only after a successful transform - a record that fails to map
/// never produces a partial event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The event title. Required.
    pub summary: String,

    /// Free-text description, if any.
    #[serde(default)]
    pub description: Option<String>,

    /// Event location, if any.
    #[serde(default)]
    pub location: Option<String>,

    /// Start date-time, in any format the permissive parser accepts.
    pub start: String,

    /// End date-time, in any format the permissive parser accepts.
    pub end: String,
}

impl CalendarEvent {
    /// Creates a new event with the required fields.
    pub fn new(
        summary: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            description: None,
            location: None,
            start: start.into(),
            end: end.into(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
