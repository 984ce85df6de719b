//! Run configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::hooks::{Filterer, Paginator, Transformer};

/// Default output filename when none is configured.
pub const DEFAULT_FILENAME: &str = "download.ics";

/// Default request timeout for the HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for one pipeline run.
///
/// Built once by the caller and never mutated afterwards. The three hooks
/// are optional; see the [`hooks`](crate::hooks) module for their
/// contracts and for what happens when each is omitted.
pub struct RunOptions {
    /// Base URL of the API endpoint.
    pub url: String,
    /// HTTP method. Defaults to GET.
    pub method: reqwest::Method,
    /// Request headers, sent in order with every page request.
    pub headers: Vec<(String, String)>,
    /// Output path for the generated document.
    pub filename: PathBuf,
    /// HTTP client timeout.
    pub timeout: Duration,
    /// Selects raw records from a decoded body.
    pub filter: Option<Box<dyn Filterer>>,
    /// Maps raw records into calendar events.
    pub transform: Option<Box<dyn Transformer>>,
    /// Produces the page URL sequence.
    pub paginate: Option<Box<dyn Paginator>>,
}

impl RunOptions {
    /// Creates options for the given URL with all defaults.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: reqwest::Method::GET,
            headers: Vec::new(),
            filename: PathBuf::from(DEFAULT_FILENAME),
            timeout: DEFAULT_TIMEOUT,
            filter: None,
            transform: None,
            paginate: None,
        }
    }

    /// Builder method to set the HTTP method.
    pub fn with_method(mut self, method: reqwest::Method) -> Self {
        self.method = method;
        self
    }

    /// Builder method to add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Builder method to set the output filename.
    pub fn with_filename(mut self, filename: impl AsRef<Path>) -> Self {
        self.filename = filename.as_ref().to_path_buf();
        self
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method to set the filter hook.
    pub fn with_filter(mut self, filter: impl Filterer + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Builder method to set the transform hook.
    pub fn with_transform(mut self, transform: impl Transformer + 'static) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Builder method to set the pagination hook.
    pub fn with_paginate(mut self, paginate: impl Paginator + 'static) -> Self {
        self.paginate = Some(Box::new(paginate));
        self
    }
}

impl std::fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunOptions")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("filename", &self.filename)
            .field("timeout", &self.timeout)
            .field("filter", &self.filter.is_some())
            .field("transform", &self.transform.is_some())
            .field("paginate", &self.paginate.is_some())
            .finish()
    }
}
