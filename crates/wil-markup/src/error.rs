use thiserror::Error;

use crate::toolkit::ToolkitError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while loading or querying a `.wil` document.
///
/// Any error aborts the whole load: a half-built widget tree has no
/// meaning, so nothing partial is ever returned.
#[derive(Debug, Error)]
pub enum Error {
    /// A line does not match `<spaces><key>: <value>`, or its indentation is
    /// inconsistent with the rest of the document.
    #[error("wil syntax error at line {line}: {reason}: {text:?}")]
    Syntax {
        /// 1-based source line number.
        line: usize,
        /// The offending line, verbatim.
        text: String,
        reason: String,
    },

    /// The lines are individually valid but do not form a single widget tree.
    #[error("wil structure error{}: {reason}", fmt_line(.line))]
    Structure { line: Option<usize>, reason: String },

    /// A breadcrumb path segment has no matching direct child.
    #[error("could not find widget with id {segment:?} ({path})")]
    Lookup {
        segment: String,
        /// The part of the path walked so far, including the failing segment.
        path: String,
    },

    /// An `on_*` attribute names a handler the registry does not contain.
    #[error("no handler named {handler:?} for event {event:?} of the widget at line {line}")]
    UnresolvedHandler {
        line: usize,
        event: String,
        handler: String,
    },

    /// The toolkit refused to build or attach a widget.
    #[error("toolkit failed on {widget} at line {line}: {source}")]
    Toolkit {
        line: usize,
        widget: String,
        #[source]
        source: ToolkitError,
    },
}

fn fmt_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {line}"),
        None => String::new(),
    }
}

impl Error {
    pub(crate) fn syntax(line: usize, text: &str, reason: impl Into<String>) -> Self {
        Self::Syntax { line, text: text.to_string(), reason: reason.into() }
    }

    pub(crate) fn structure(line: impl Into<Option<usize>>, reason: impl Into<String>) -> Self {
        Self::Structure { line: line.into(), reason: reason.into() }
    }

    /// The source line the error points at, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. }
            | Self::UnresolvedHandler { line, .. }
            | Self::Toolkit { line, .. } => Some(*line),
            Self::Structure { line, .. } => *line,
            Self::Lookup { .. } => None,
        }
    }
}
