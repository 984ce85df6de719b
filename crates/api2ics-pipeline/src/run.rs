//! The pipeline run loop.
//!
//! Pages are processed strictly in sequence: a page is fully fetched,
//! decoded, filtered and transformed before the next page's request is
//! issued. Events from all pages are concatenated, rendered into one ICS
//! document and written to disk at the very end. Any stage failure aborts
//! the run after the reporter has been notified; nothing is written on
//! failure.

use std::path::PathBuf;

use api2ics_core::{CalendarEvent, render_calendar};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{RunError, RunResult, Stage};
use crate::fetch::ApiClient;
use crate::hooks::{RawRecord, records_from_array};
use crate::options::RunOptions;
use crate::reporter::Reporter;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of pages fetched.
    pub pages: usize,
    /// Number of events written to the document.
    pub events: usize,
    /// Path of the generated file.
    pub filename: PathBuf,
}

/// Executes one run: fetch all pages, render the document, write the file.
///
/// The reporter is notified at every stage boundary, including once with
/// the failure message (and, for filter failures, the decoded payload)
/// before an error is returned. Termination is the caller's decision; no
/// process exit happens here.
///
/// # Errors
///
/// Returns the first stage failure as a [`RunError`]. Every failure is
/// fatal to the run; no partial output file is produced.
pub async fn run(options: &RunOptions, reporter: &mut dyn Reporter) -> RunResult<RunSummary> {
    match run_pipeline(options, reporter).await {
        Ok(summary) => Ok(summary),
        Err(err) => {
            reporter.fail(err.stage(), &err.to_string(), err.payload());
            Err(err)
        }
    }
}

async fn run_pipeline(options: &RunOptions, reporter: &mut dyn Reporter) -> RunResult<RunSummary> {
    let client = ApiClient::new(options)?;

    let mut results: Vec<CalendarEvent> = Vec::new();
    let mut index = 0usize;
    let mut next = page_url(options, index);

    while let Some(url) = next {
        let context = options
            .paginate
            .is_some()
            .then(|| format!("page {}", index + 1));
        reporter.start(Stage::Fetch, context.as_deref());

        let decoded = client.fetch_page(&url).await?;
        let records = filter_records(options, &decoded)?;
        let events = transform_records(options, records)?;

        debug!(page = index, events = events.len(), "processed page");
        results.extend(events);

        // Advance only after the whole page succeeded.
        index += 1;
        next = page_url(options, index);
    }

    reporter.succeed(Stage::Fetch, "Finished fetching data from API!");

    reporter.start(Stage::Convert, None);
    let document = render_calendar(&results)?;
    reporter.succeed(Stage::Convert, "Finished converting data to ICS format!");

    let filename = options.filename.clone();
    reporter.start(Stage::Write, filename.to_str());
    std::fs::write(&filename, &document)?;
    reporter.succeed(
        Stage::Write,
        &format!("Generated '{}' file!", filename.display()),
    );

    info!(pages = index, events = results.len(), file = %filename.display(), "run complete");

    Ok(RunSummary {
        pages: index,
        events: results.len(),
        filename,
    })
}

/// Returns the URL for page `index`, or `None` when the sequence ends.
///
/// Without a paginator the sequence is exactly one page: the base URL.
fn page_url(options: &RunOptions, index: usize) -> Option<String> {
    match &options.paginate {
        Some(paginator) => paginator.page_url(&options.url, index),
        None => (index == 0).then(|| options.url.clone()),
    }
}

fn filter_records(options: &RunOptions, decoded: &Value) -> RunResult<Vec<RawRecord>> {
    let filtered = match &options.filter {
        Some(filterer) => filterer.filter(decoded),
        None => records_from_array(decoded),
    };

    filtered.map_err(|e| RunError::Filter {
        message: e.to_string(),
        payload: decoded.clone(),
    })
}

fn transform_records(
    options: &RunOptions,
    records: Vec<RawRecord>,
) -> RunResult<Vec<CalendarEvent>> {
    records
        .into_iter()
        .map(|record| match &options.transform {
            Some(transformer) => {
                transformer
                    .transform(record)
                    .map_err(|e| RunError::Transform {
                        message: e.to_string(),
                    })
            }
            None => {
                serde_json::from_value(Value::Object(record)).map_err(|e| RunError::Transform {
                    message: e.to_string(),
                })
            }
        })
        .collect()
}
