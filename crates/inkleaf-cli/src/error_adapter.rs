//! Error adapter for converting InkleafError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use inkleaf::InkleafError;

/// Adapter implementing [`MietteDiagnostic`] for an [`InkleafError`].
pub struct ErrorAdapter<'a>(pub &'a InkleafError);

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
            InkleafError::Io(_) => "inkleaf::io",
            InkleafError::Record(_) => "inkleaf::record",
            InkleafError::Config(_) => "inkleaf::config",
            InkleafError::Export(_) => "inkleaf::export",
            InkleafError::Image(_) => "inkleaf::image",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            InkleafError::Config(_) => {
                "check the [canvas], [tools] and [style] tables of the TOML file"
            }
            InkleafError::Image(_) => "placed images must be PNG, JPEG, GIF, WebP or BMP",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::{error::Error, io};

    use miette::{GraphicalReportHandler, GraphicalTheme};

    use super::*;

    #[test]
    fn test_codes_follow_variant() {
        let err = InkleafError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "inkleaf::io");
        assert!(adapter.help().is_none());
        assert!(adapter.source().is_some());

        let err = InkleafError::Config("bad".to_string());
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "inkleaf::config");
        assert!(adapter.help().is_some());
        assert_eq!(adapter.to_string(), "Configuration error: bad");
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = InkleafError::Export("page numbers start at 1".to_string());
        let mut out = String::new();
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();

        assert!(out.contains("inkleaf::export"));
        assert!(out.contains("page numbers start at 1"));
    }
}
