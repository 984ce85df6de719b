//! Fetch/filter/transform pipeline.
//!
//! One run drives four stages in strict sequence:
//!
//! ```text
//! ┌───────────┐   ┌──────────┐   ┌───────────────┐   ┌────────────────┐
//! │ Paginator │──▶│ Fetcher  │──▶│ Record Mapper │──▶│ ICS Serializer │
//! │ page URLs │   │ GET+JSON │   │ filter/xform  │   │  one document  │
//! └───────────┘   └──────────┘   └───────────────┘   └────────────────┘
//! ```
//!
//! Results from all pages are concatenated before serialization; any
//! stage failure aborts the run with a typed [`RunError`] after the
//! [`Reporter`] has been notified.
//!
//! # Example
//!
//! ```ignore
//! use api2ics_pipeline::{run, JsonPointerFilter, NullReporter, RunOptions};
//!
//! let options = RunOptions::new("https://api.example.com/calendar")
//!     .with_filter(JsonPointerFilter::new("/results"));
//! let summary = run(&options, &mut NullReporter).await?;
//! ```

pub mod error;
mod fetch;
pub mod hooks;
pub mod options;
pub mod reporter;
pub mod run;

pub use error::{RunError, RunResult, Stage};
pub use hooks::{
    FieldMapTransformer, Filterer, HookError, JsonPointerFilter, Paginator, RawRecord,
    Transformer, UrlTemplatePaginator, filter_fn, paginate_fn, transform_fn,
};
pub use options::{DEFAULT_FILENAME, DEFAULT_TIMEOUT, RunOptions};
pub use reqwest::Method;
pub use reporter::{NullReporter, Reporter};
pub use run::{RunSummary, run};
