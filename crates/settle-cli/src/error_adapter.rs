//! Error adapter for converting SettleError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Malformed JSON in
//! the input export is reported with a labeled snippet of the input.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use settle::{ConfigurationError, SettleError};
use settle_dataset::DatasetError;

/// Adapter for a JSON syntax error in the input export.
pub struct JsonAdapter<'a> {
    err: &'a DatasetError,
    src: &'a str,
    span: SourceSpan,
}

impl<'a> JsonAdapter<'a> {
    /// Create a new JSON adapter, locating the error within `src`.
    ///
    /// Returns `None` unless `err` is a JSON error that carries a position.
    pub fn new(err: &'a DatasetError, src: &'a str) -> Option<Self> {
        let DatasetError::Json(json) = err else {
            return None;
        };
        let offset = byte_offset(src, json.line(), json.column())?;
        let len = src[offset..].chars().next().map_or(0, char::len_utf8);
        Some(Self {
            err,
            src,
            span: SourceSpan::new(offset.into(), len),
        })
    }
}

impl fmt::Debug for JsonAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonAdapter")
            .field("err", &self.err)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for JsonAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for JsonAdapter<'_> {}

impl MietteDiagnostic for JsonAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("settle::dataset"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "The input must be an activity export: a JSON array of objects",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), self.span),
        )))
    }
}

/// Adapter for [`SettleError`] variants without source positions.
pub struct ErrorAdapter<'a>(pub &'a SettleError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SettleError::Io(_) => "settle::io",
            SettleError::Dataset(_) => "settle::dataset",
            SettleError::Configuration(_) => "settle::config",
            SettleError::ConfigFile(_) => "settle::config_file",
            SettleError::Export(_) => "settle::export",
            SettleError::Serialize(_) => "settle::serialize",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            SettleError::Configuration(ConfigurationError::EmptyNodes) => {
                "The export produced no products or clusters to lay out"
            }
            SettleError::Configuration(ConfigurationError::OutOfRange { .. })
            | SettleError::Configuration(ConfigurationError::InvalidBounds(_)) => {
                "Check the [simulation] and [canvas] sections of the configuration file"
            }
            SettleError::Dataset(DatasetError::NotAnArray)
            | SettleError::Dataset(DatasetError::NotAnObject { .. }) => {
                "The input must be an activity export: a JSON array of objects"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A JSON syntax error with its location in the input.
    Json(JsonAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Json(j) => fmt::Display::fmt(j, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Json(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Json(j) => j.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Json(j) => j.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Json(j) => j.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Json(j) => j.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Byte offset of a 1-based line and byte column, clamped to the line.
fn byte_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let line_text = src[line_start..].lines().next().unwrap_or_default();

    let mut within = column.saturating_sub(1).min(line_text.len());
    while !line_text.is_char_boundary(within) {
        within -= 1;
    }

    Some((line_start + within).min(src.len()))
}

/// Convert a [`SettleError`] into a reportable error.
///
/// When `src` is the input export and the error is a JSON syntax error, the
/// result carries a labeled span into `src`.
pub fn to_reportable<'a>(err: &'a SettleError, src: Option<&'a str>) -> Reportable<'a> {
    if let (SettleError::Dataset(dataset_err), Some(src)) = (err, src) {
        if let Some(adapter) = JsonAdapter::new(dataset_err, src) {
            return Reportable::Json(adapter);
        }
    }
    Reportable::Error(ErrorAdapter(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error(src: &str) -> SettleError {
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        SettleError::Dataset(DatasetError::Json(err))
    }

    #[test]
    fn test_json_error_is_located() {
        let src = "[\n  {\"a\": 1},\n  {\"b\": ]\n]";
        let err = json_error(src);

        let reportable = to_reportable(&err, Some(src));
        let Reportable::Json(adapter) = &reportable else {
            panic!("Expected Json reportable");
        };

        let line_start = src.find("  {\"b\"").unwrap();
        let offset = adapter.span.offset();
        assert!(offset >= line_start && offset <= src.len());
        assert_eq!(
            reportable.code().map(|c| c.to_string()),
            Some("settle::dataset".to_string())
        );
        assert_eq!(reportable.labels().map(Iterator::count), Some(1));
    }

    #[test]
    fn test_json_error_without_source() {
        let err = json_error("[1, 2");
        assert!(matches!(to_reportable(&err, None), Reportable::Error(_)));
    }

    #[test]
    fn test_error_codes() {
        let cases = [
            (
                SettleError::Configuration(ConfigurationError::EmptyNodes),
                "settle::config",
            ),
            (SettleError::Export("boom".to_string()), "settle::export"),
            (
                SettleError::ConfigFile("bad".to_string()),
                "settle::config_file",
            ),
            (SettleError::Dataset(DatasetError::NotAnArray), "settle::dataset"),
        ];

        for (err, expected) in cases {
            let reportable = to_reportable(&err, Some("[]"));
            assert!(matches!(reportable, Reportable::Error(_)));
            assert_eq!(reportable.code().map(|c| c.to_string()).as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_help_for_empty_scene() {
        let err = SettleError::Configuration(ConfigurationError::EmptyNodes);
        let reportable = to_reportable(&err, None);
        assert!(reportable.help().is_some());
        assert!(reportable.source_code().is_none());
    }

    #[test]
    fn test_byte_offset() {
        let src = "ab\ncdé\nf";
        assert_eq!(byte_offset(src, 1, 1), Some(0));
        assert_eq!(byte_offset(src, 2, 3), Some(5));
        // Inside the two-byte 'é'
        assert_eq!(byte_offset(src, 2, 4), Some(5));
        assert_eq!(byte_offset(src, 3, 1), Some(src.len() - 1));
        assert_eq!(byte_offset(src, 3, 9), Some(src.len()));
        assert_eq!(byte_offset(src, 0, 0), None);
    }
}
