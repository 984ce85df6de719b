//! Command-line interface definition.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use api2ics_pipeline::hooks::{FieldMapTransformer, JsonPointerFilter, UrlTemplatePaginator};
use api2ics_pipeline::{Method, RunOptions};

/// api2ics - Convert paginated JSON APIs into an iCalendar file
#[derive(Debug, Parser)]
#[command(name = "api2ics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The URL of the API endpoint
    #[arg(env = "API2ICS_URL")]
    pub url: String,

    /// HTTP method for the request
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Request header as 'Name: value' (can be repeated)
    #[arg(long = "header", short = 'H', action = clap::ArgAction::Append)]
    pub headers: Vec<String>,

    /// Output filename
    #[arg(long, short = 'o', default_value = "download.ics")]
    pub output: PathBuf,

    /// HTTP client timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    // --- Filter flags ---
    /// JSON pointer to the records array (e.g. /results); the body itself
    /// must be an array when omitted
    #[arg(long)]
    pub records_pointer: Option<String>,

    // --- Transform flags ---
    /// Source field for the event summary
    #[arg(long)]
    pub summary_field: Option<String>,

    /// Source field for the event description
    #[arg(long)]
    pub description_field: Option<String>,

    /// Source field for the event location
    #[arg(long)]
    pub location_field: Option<String>,

    /// Source field for the event start date-time
    #[arg(long)]
    pub start_field: Option<String>,

    /// Source field for the event end date-time
    #[arg(long)]
    pub end_field: Option<String>,

    // --- Pagination flags ---
    /// Page URL template with {url}, {page} (1-based) and {index} (0-based)
    /// placeholders
    #[arg(long, requires = "max_pages")]
    pub paginate_template: Option<String>,

    /// Number of pages to fetch when paginating
    #[arg(long, requires = "paginate_template")]
    pub max_pages: Option<usize>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,
}

/// Errors turning CLI flags into run options.
#[derive(Debug, Error)]
pub enum CliError {
    /// The URL did not parse.
    #[error("invalid URL {0:?}: {1}")]
    InvalidUrl(String, #[source] url::ParseError),

    /// The method flag is not an HTTP method.
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    /// A header flag is not in 'Name: value' form.
    #[error("invalid header {0:?}, expected 'Name: value'")]
    InvalidHeader(String),
}

impl Cli {
    /// Builds the pipeline run options from the parsed flags.
    pub fn to_run_options(&self) -> Result<RunOptions, CliError> {
        url::Url::parse(&self.url)
            .map_err(|e| CliError::InvalidUrl(self.url.clone(), e))?;

        let method = Method::from_str(&self.method.to_uppercase())
            .map_err(|_| CliError::InvalidMethod(self.method.clone()))?;

        let mut options = RunOptions::new(&self.url)
            .with_method(method)
            .with_filename(&self.output)
            .with_timeout(Duration::from_secs(self.timeout_secs));

        for header in &self.headers {
            let (name, value) = parse_header(header)?;
            options = options.with_header(name, value);
        }

        if let Some(pointer) = &self.records_pointer {
            options = options.with_filter(JsonPointerFilter::new(pointer));
        }

        if let Some(mapping) = self.field_mapping() {
            options = options.with_transform(mapping);
        }

        if let (Some(template), Some(max_pages)) = (&self.paginate_template, self.max_pages) {
            options = options.with_paginate(UrlTemplatePaginator::new(template, max_pages));
        }

        Ok(options)
    }

    /// Returns the field-map transformer when any mapping flag is set.
    ///
    /// Unset flags keep their default source names, so `--summary-field
    /// title` alone still maps the remaining fields by name.
    fn field_mapping(&self) -> Option<FieldMapTransformer> {
        let any_set = self.summary_field.is_some()
            || self.description_field.is_some()
            || self.location_field.is_some()
            || self.start_field.is_some()
            || self.end_field.is_some();
        if !any_set {
            return None;
        }

        let defaults = FieldMapTransformer::default();
        Some(FieldMapTransformer {
            summary: self.summary_field.clone().unwrap_or(defaults.summary),
            description: self.description_field.clone().or(defaults.description),
            location: self.location_field.clone().or(defaults.location),
            start: self.start_field.clone().unwrap_or(defaults.start),
            end: self.end_field.clone().unwrap_or(defaults.end),
        })
    }
}

/// Splits a 'Name: value' header flag.
fn parse_header(raw: &str) -> Result<(String, String), CliError> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| CliError::InvalidHeader(raw.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidHeader(raw.to_string()));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("api2ics").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn minimal_invocation() {
        let cli = parse(&["https://api.example.com/calendar"]);
        let options = cli.to_run_options().unwrap();

        assert_eq!(options.url, "https://api.example.com/calendar");
        assert_eq!(options.method, Method::GET);
        assert_eq!(options.filename, PathBuf::from("download.ics"));
        assert!(options.filter.is_none());
        assert!(options.transform.is_none());
        assert!(options.paginate.is_none());
    }

    #[test]
    fn full_invocation() {
        let cli = parse(&[
            "https://api.example.com/calendar",
            "-X",
            "post",
            "-H",
            "Authorization: Bearer token",
            "-o",
            "calendar.ics",
            "--records-pointer",
            "/results",
            "--summary-field",
            "title",
            "--paginate-template",
            "{url}?page={page}",
            "--max-pages",
            "3",
        ]);
        let options = cli.to_run_options().unwrap();

        assert_eq!(options.method, Method::POST);
        assert_eq!(
            options.headers,
            vec![("Authorization".to_string(), "Bearer token".to_string())]
        );
        assert_eq!(options.filename, PathBuf::from("calendar.ics"));
        assert!(options.filter.is_some());
        assert!(options.transform.is_some());
        assert!(options.paginate.is_some());
    }

    #[test]
    fn header_parsing() {
        assert_eq!(
            parse_header("Accept: application/json").unwrap(),
            ("Accept".to_string(), "application/json".to_string())
        );
        assert!(parse_header("no-colon-here").is_err());
        assert!(parse_header(": empty name").is_err());
    }

    #[test]
    fn rejects_invalid_url() {
        let cli = parse(&["not a url"]);
        assert!(matches!(
            cli.to_run_options(),
            Err(CliError::InvalidUrl(_, _))
        ));
    }

    #[test]
    fn rejects_invalid_method() {
        let cli = parse(&["https://api.example.com", "-X", "G ET"]);
        assert!(matches!(
            cli.to_run_options(),
            Err(CliError::InvalidMethod(_))
        ));
    }

    #[test]
    fn paginate_template_requires_max_pages() {
        let result = Cli::try_parse_from([
            "api2ics",
            "https://api.example.com",
            "--paginate-template",
            "{url}?page={page}",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn single_mapping_flag_keeps_remaining_defaults() {
        let cli = parse(&["https://api.example.com", "--summary-field", "title"]);
        let mapping = cli.field_mapping().unwrap();

        assert_eq!(mapping.summary, "title");
        assert_eq!(mapping.start, "start");
        assert_eq!(mapping.description, Some("description".to_string()));
    }
}
