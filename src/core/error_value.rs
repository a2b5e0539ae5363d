//! Rendering of errors attached to a log record
//!
//! An attached error becomes the `err` field. Errors that expose a
//! structured form are embedded as nested JSON; everything else is embedded
//! as a JSON string holding the error's description.

use serde::Serialize;
use std::fmt;

/// Something that can be attached to a log record as its error.
///
/// Every `std::error::Error` qualifies and is rendered from its `Display`
/// output. Wrap a `Serialize` value in [`Structured`] to have it embedded as
/// structured JSON instead.
pub trait ErrorValue: fmt::Display {
    /// Structured representation, if the type has one.
    ///
    /// `Some(Err(_))` means the type has a structured form but refused to
    /// produce it this time.
    fn structured(&self) -> Option<serde_json::Result<serde_json::Value>> {
        None
    }
}

impl<E: std::error::Error> ErrorValue for E {}

/// Attaches a serializable error so that its full structure (cause chains
/// included) is embedded in the record.
///
/// ```
/// use logops::core::{format_error, Structured};
/// use serde::Serialize;
/// use std::fmt;
///
/// #[derive(Serialize)]
/// struct Nested {
///     text: String,
///     cause: Option<Box<Nested>>,
/// }
///
/// impl fmt::Display for Nested {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(&self.text)
///     }
/// }
///
/// let err = Nested { text: "outer".into(), cause: None };
/// assert_eq!(format_error(&Structured(err)), r#"{"text":"outer","cause":null}"#);
/// ```
#[derive(Debug, Clone)]
pub struct Structured<E>(pub E);

impl<E: fmt::Display> fmt::Display for Structured<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<E: Serialize + fmt::Display> ErrorValue for Structured<E> {
    fn structured(&self) -> Option<serde_json::Result<serde_json::Value>> {
        Some(serde_json::to_value(&self.0))
    }
}

/// Render `err` as a JSON fragment that can be spliced into a record.
///
/// Never fails: when serialization is refused the result is a JSON string
/// `"<description> (<serialization error>)"`.
pub fn format_error(err: &dyn ErrorValue) -> String {
    match err.structured() {
        Some(Ok(value)) => value.to_string(),
        Some(Err(json_err)) => json_string(&format!("{} ({})", err, json_err)),
        None => json_string(&err.to_string()),
    }
}

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::{Error as _, Serializer};

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct NestedError {
        text: String,
        cause: Option<Box<NestedError>>,
    }

    impl fmt::Display for NestedError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a nested error instance")
        }
    }

    struct NotJsonable;

    impl fmt::Display for NotJsonable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a not JSONable error")
        }
    }

    impl Serialize for NotJsonable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("JSON not supported"))
        }
    }

    fn chain(texts: &[&str]) -> Option<Box<NestedError>> {
        texts.split_first().map(|(first, rest)| {
            Box::new(NestedError {
                text: first.to_string(),
                cause: chain(rest),
            })
        })
    }

    #[test]
    fn test_nested_error_serializes_every_level() {
        let err = *chain(&["1", "2", "3"]).unwrap();
        let rendered = format_error(&Structured(err));

        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let expected = serde_json::json!({
            "Text": "1",
            "Cause": {"Text": "2", "Cause": {"Text": "3", "Cause": null}}
        });
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_refused_serialization_falls_back_to_string() {
        let rendered = format_error(&Structured(NotJsonable));

        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, "a not JSONable error (JSON not supported)");
    }

    #[test]
    fn test_plain_error_is_a_json_string() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, r#"disk "full""#);
        let rendered = format_error(&err);

        assert_eq!(rendered, r#""disk \"full\"""#);
    }
}
