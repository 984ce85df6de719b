//! Hook capability traits.
//!
//! The pipeline takes three optional hooks, each modeled as a small trait
//! so callers can supply concrete implementations or plain closures:
//!
//! - [`Filterer`] selects the array of raw records from a decoded body
//! - [`Transformer`] maps one raw record into a [`CalendarEvent`]
//! - [`Paginator`] produces the page URL sequence
//!
//! Hooks fail by returning an error; any hook failure aborts the run.
//! Declarative implementations are provided for the common cases the CLI
//! exposes (JSON pointer selection, field renaming, URL templates).

use api2ics_core::CalendarEvent;
use serde_json::Value;

/// Raw record as decoded from one page: an open-ended key/value mapping.
///
/// No schema is assumed; the filter and transform hooks are the schema
/// boundary.
pub type RawRecord = serde_json::Map<String, Value>;

/// Error type for hook failures.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Selects and flattens raw records out of a decoded response body.
pub trait Filterer: Send + Sync {
    /// Returns the records contained in `decoded`, in output order.
    ///
    /// # Errors
    ///
    /// Any error aborts the run as a filter failure; the decoded body is
    /// handed to the reporter for diagnosis.
    fn filter(&self, decoded: &Value) -> Result<Vec<RawRecord>, HookError>;
}

/// Wraps a closure as a [`Filterer`].
pub fn filter_fn<F>(f: F) -> FilterFn<F>
where
    F: Fn(&Value) -> Result<Vec<RawRecord>, HookError> + Send + Sync,
{
    FilterFn(f)
}

/// A [`Filterer`] backed by a closure. See [`filter_fn`].
#[derive(Clone)]
pub struct FilterFn<F>(F);

impl<F> Filterer for FilterFn<F>
where
    F: Fn(&Value) -> Result<Vec<RawRecord>, HookError> + Send + Sync,
{
    fn filter(&self, decoded: &Value) -> Result<Vec<RawRecord>, HookError> {
        (self.0)(decoded)
    }
}

/// Maps one raw record into a normalized calendar event.
pub trait Transformer: Send + Sync {
    /// Transforms `record`. The first failing record aborts the whole
    /// page and the run; there is no partial-success mode.
    ///
    /// # Errors
    ///
    /// Any error aborts the run as a transform failure.
    fn transform(&self, record: RawRecord) -> Result<CalendarEvent, HookError>;
}

/// Wraps a closure as a [`Transformer`].
pub fn transform_fn<F>(f: F) -> TransformFn<F>
where
    F: Fn(RawRecord) -> Result<CalendarEvent, HookError> + Send + Sync,
{
    TransformFn(f)
}

/// A [`Transformer`] backed by a closure. See [`transform_fn`].
#[derive(Clone)]
pub struct TransformFn<F>(F);

impl<F> Transformer for TransformFn<F>
where
    F: Fn(RawRecord) -> Result<CalendarEvent, HookError> + Send + Sync,
{
    fn transform(&self, record: RawRecord) -> Result<CalendarEvent, HookError> {
        (self.0)(record)
    }
}

/// Produces the lazy sequence of page URLs.
pub trait Paginator: Send + Sync {
    /// Returns the URL for page `index` (0-based), or `None` to end the
    /// sequence. The hook sees only the base URL and the index, never a
    /// response, so cursor-based pagination is out of scope.
    fn page_url(&self, base_url: &str, index: usize) -> Option<String>;
}

/// Wraps a closure as a [`Paginator`].
pub fn paginate_fn<F>(f: F) -> PaginateFn<F>
where
    F: Fn(&str, usize) -> Option<String> + Send + Sync,
{
    PaginateFn(f)
}

/// A [`Paginator`] backed by a closure. See [`paginate_fn`].
#[derive(Clone)]
pub struct PaginateFn<F>(F);

impl<F> Paginator for PaginateFn<F>
where
    F: Fn(&str, usize) -> Option<String> + Send + Sync,
{
    fn page_url(&self, base_url: &str, index: usize) -> Option<String> {
        (self.0)(base_url, index)
    }
}

/// Filter that selects a records array by JSON pointer.
///
/// `/results` picks the `results` key at the top level; an empty pointer
/// selects the body itself. The target must be an array of objects.
#[derive(Debug, Clone)]
pub struct JsonPointerFilter {
    pointer: String,
}

impl JsonPointerFilter {
    /// Creates a filter for the given RFC 6901 pointer.
    pub fn new(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
        }
    }
}

impl Filterer for JsonPointerFilter {
    fn filter(&self, decoded: &Value) -> Result<Vec<RawRecord>, HookError> {
        let target = decoded
            .pointer(&self.pointer)
            .ok_or_else(|| format!("no value at pointer {:?}", self.pointer))?;

        records_from_array(target)
    }
}

/// Interprets a JSON value as an array of raw records.
///
/// This is also the identity filter applied when no filter hook is
/// configured.
pub fn records_from_array(value: &Value) -> Result<Vec<RawRecord>, HookError> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("expected an array of records, got {}", json_kind(value)))?;

    items
        .iter()
        .map(|item| {
            item.as_object()
                .cloned()
                .ok_or_else(|| format!("expected a record object, got {}", json_kind(item)).into())
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Transformer that renames source keys onto [`CalendarEvent`] fields.
///
/// `summary`, `start` and `end` sources are required and must hold string
/// values; `description` and `location` are copied when present.
#[derive(Debug, Clone)]
pub struct FieldMapTransformer {
    /// Source key for the event summary.
    pub summary: String,
    /// Source key for the description, if mapped.
    pub description: Option<String>,
    /// Source key for the location, if mapped.
    pub location: Option<String>,
    /// Source key for the start date-time.
    pub start: String,
    /// Source key for the end date-time.
    pub end: String,
}

impl Default for FieldMapTransformer {
    fn default() -> Self {
        Self {
            summary: "summary".to_string(),
            description: Some("description".to_string()),
            location: Some("location".to_string()),
            start: "start".to_string(),
            end: "end".to_string(),
        }
    }
}

impl FieldMapTransformer {
    fn required(&self, record: &RawRecord, key: &str) -> Result<String, HookError> {
        let value = record
            .get(key)
            .ok_or_else(|| format!("record has no {:?} field", key))?;
        string_value(value).ok_or_else(|| {
            format!("field {:?} is not a string: {}", key, json_kind(value)).into()
        })
    }

    fn optional(&self, record: &RawRecord, key: Option<&str>) -> Option<String> {
        record.get(key?).and_then(string_value)
    }
}

fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(String::from)
}

impl Transformer for FieldMapTransformer {
    fn transform(&self, record: RawRecord) -> Result<CalendarEvent, HookError> {
        let mut event = CalendarEvent::new(
            self.required(&record, &self.summary)?,
            self.required(&record, &self.start)?,
            self.required(&record, &self.end)?,
        );
        event.description = self.optional(&record, self.description.as_deref());
        event.location = self.optional(&record, self.location.as_deref());

        Ok(event)
    }
}

/// Paginator that substitutes the page index into a URL template.
///
/// `{index}` expands to the 0-based index, `{page}` to the 1-based page
/// number, `{url}` to the base URL. The sequence ends after `max_pages`
/// pages.
#[derive(Debug, Clone)]
pub struct UrlTemplatePaginator {
    template: String,
    max_pages: usize,
}

impl UrlTemplatePaginator {
    /// Creates a paginator for the given template and page cap.
    pub fn new(template: impl Into<String>, max_pages: usize) -> Self {
        Self {
            template: template.into(),
            max_pages,
        }
    }
}

impl Paginator for UrlTemplatePaginator {
    fn page_url(&self, base_url: &str, index: usize) -> Option<String> {
        if index >= self.max_pages {
            return None;
        }

        Some(
            self.template
                .replace("{url}", base_url)
                .replace("{index}", &index.to_string())
                .replace("{page}", &(index + 1).to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn pointer_filter_selects_nested_array() {
        let body = json!({"data": {"results": [{"title": "A"}, {"title": "B"}]}});
        let filter = JsonPointerFilter::new("/data/results");

        let records = filter.filter(&body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["title"], "A");
    }

    #[test]
    fn pointer_filter_rejects_missing_key() {
        let body = json!({"error": "not found"});
        let filter = JsonPointerFilter::new("/results");

        let err = filter.filter(&body).unwrap_err();
        assert!(err.to_string().contains("/results"));
    }

    #[test]
    fn pointer_filter_rejects_non_array_target() {
        let body = json!({"results": "oops"});
        let filter = JsonPointerFilter::new("/results");

        let err = filter.filter(&body).unwrap_err();
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn identity_filter_requires_array_of_objects() {
        assert!(records_from_array(&json!([{"a": 1}])).is_ok());
        assert!(records_from_array(&json!({"a": 1})).is_err());
        assert!(records_from_array(&json!([1, 2])).is_err());
    }

    #[test]
    fn field_map_renames_keys() {
        let transformer = FieldMapTransformer {
            summary: "title".to_string(),
            ..Default::default()
        };

        let event = transformer
            .transform(record(json!({
                "title": "Digital Microelectronics",
                "description": "Computer Exercise",
                "location": "Smith Hall - Room 236",
                "start": "08-03-2023 13:00",
                "end": "08-03-2023 15:00"
            })))
            .unwrap();

        assert_eq!(event.summary, "Digital Microelectronics");
        assert_eq!(event.location, Some("Smith Hall - Room 236".to_string()));
    }

    #[test]
    fn field_map_missing_required_field_fails() {
        let transformer = FieldMapTransformer::default();
        let err = transformer
            .transform(record(json!({"start": "x", "end": "y"})))
            .unwrap_err();

        assert!(err.to_string().contains("summary"));
    }

    #[test]
    fn field_map_non_string_field_fails() {
        let transformer = FieldMapTransformer::default();
        let err = transformer
            .transform(record(json!({"summary": 42, "start": "x", "end": "y"})))
            .unwrap_err();

        assert!(err.to_string().contains("not a string"));
    }

    #[test]
    fn field_map_optional_fields_may_be_absent() {
        let transformer = FieldMapTransformer::default();
        let event = transformer
            .transform(record(json!({
                "summary": "Test",
                "start": "2023-03-07 10:00",
                "end": "2023-03-07 13:00"
            })))
            .unwrap();

        assert!(event.description.is_none());
        assert!(event.location.is_none());
    }

    #[test]
    fn url_template_substitutes_placeholders() {
        let paginator = UrlTemplatePaginator::new("{url}?page={page}&offset={index}", 3);

        assert_eq!(
            paginator.page_url("https://api.example.com", 0),
            Some("https://api.example.com?page=1&offset=0".to_string())
        );
        assert_eq!(
            paginator.page_url("https://api.example.com", 2),
            Some("https://api.example.com?page=3&offset=2".to_string())
        );
        assert_eq!(paginator.page_url("https://api.example.com", 3), None);
    }

    #[test]
    fn closure_hooks_satisfy_the_traits() {
        let filter = filter_fn(|decoded: &Value| records_from_array(&decoded["items"]));
        let paginate = paginate_fn(|url: &str, index| (index < 1).then(|| url.to_string()));

        let records = filter.filter(&json!({"items": [{"a": 1}]})).unwrap();
        assert_eq!(records.len(), 1);

        assert_eq!(paginate.page_url("u", 0), Some("u".to_string()));
        assert_eq!(paginate.page_url("u", 1), None);
    }
}
