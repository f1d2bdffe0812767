//! Errors surfaced by a page run.

use crate::figure::FigureError;
use crate::render::RenderError;
use crate::stats::StatsError;
use std::fmt;

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Anything that stops one render. None of these abort the process.
#[derive(Debug)]
pub enum PageError {
    /// An input is missing, of the wrong type, or out of range.
    Validation { name: String, message: String },
    /// The distribution math rejected the inputs.
    Stats(StatsError),
    /// The figure could not be assembled.
    Figure(FigureError),
    /// The render surface failed to display the output.
    Render(RenderError),
    /// Parameter file could not be read or parsed.
    Config(String),
    /// No page registered under this id.
    UnknownPage(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { name, message } => {
                write!(f, "Invalid value for '{}': {}", name, message)
            }
            Self::Stats(e) => write!(f, "{}", e),
            Self::Figure(e) => write!(f, "{}", e),
            Self::Render(e) => write!(f, "Render failed: {}", e),
            Self::Config(msg) => write!(f, "Invalid parameters: {}", msg),
            Self::UnknownPage(id) => write!(f, "Unknown page '{}'", id),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stats(e) => Some(e),
            Self::Figure(e) => Some(e),
            Self::Render(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StatsError> for PageError {
    fn from(e: StatsError) -> Self {
        Self::Stats(e)
    }
}

impl From<FigureError> for PageError {
    fn from(e: FigureError) -> Self {
        Self::Figure(e)
    }
}

impl From<RenderError> for PageError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}
