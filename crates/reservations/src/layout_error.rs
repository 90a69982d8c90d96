// ---------------------------------------------------------------------------
// LayoutError: failures while reading a floor layout file
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while loading a floor layout.
///
/// Only the host boundary (file and JSON reading) can fail. Everything past
/// a successfully loaded layout degrades to defaults or no-ops instead.
#[derive(Debug)]
pub enum LayoutError {
    /// I/O error (file not found, permission denied, etc.)
    Io(std::io::Error),
    /// The document is not valid JSON or doesn't match the layout shape.
    Parse(serde_json::Error),
    /// Two tables share the same id, so picks and lookups would be ambiguous.
    DuplicateTableId(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Io(e) => write!(f, "I/O error: {e}"),
            LayoutError::Parse(e) => write!(f, "Layout parse error: {e}"),
            LayoutError::DuplicateTableId(id) => write!(f, "Duplicate table id: {id}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::Io(e) => Some(e),
            LayoutError::Parse(e) => Some(e),
            LayoutError::DuplicateTableId(_) => None,
        }
    }
}

impl From<std::io::Error> for LayoutError {
    fn from(e: std::io::Error) -> Self {
        LayoutError::Io(e)
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        LayoutError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_display_io() {
        let err = LayoutError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let msg = format!("{err}");
        assert!(msg.contains("I/O error"), "got: {msg}");
        assert!(msg.contains("file not found"), "got: {msg}");
    }

    #[test]
    fn test_layout_error_display_duplicate() {
        let err = LayoutError::DuplicateTableId("7".to_string());
        assert_eq!(format!("{err}"), "Duplicate table id: 7");
    }

    #[test]
    fn test_layout_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LayoutError = serde_err.into();
        assert!(matches!(err, LayoutError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
