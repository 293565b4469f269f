use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// pdfium failed to bind, load, rasterize, or the PNG encoder failed
    #[error("{}", render_message(*page, message))]
    Render {
        page: Option<usize>,
        message: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to parse PDF {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub fn render(page: Option<usize>, message: impl std::fmt::Display) -> Self {
        Error::Render {
            page,
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

fn render_message(page: Option<usize>, message: &str) -> String {
    match page {
        // Pages are reported 1-based, as in progress output
        Some(index) => format!("failed to render page {}: {}", index + 1, message),
        None => format!("render error: {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message_is_one_based() {
        let err = Error::render(Some(0), "bad stream");
        assert_eq!(err.to_string(), "failed to render page 1: bad stream");
    }

    #[test]
    fn test_render_message_without_page() {
        let err = Error::render(None, "no library");
        assert_eq!(err.to_string(), "render error: no library");
    }

    #[test]
    fn test_not_found_names_path() {
        let err = Error::NotFound(PathBuf::from("missing.pdf"));
        assert_eq!(err.to_string(), "PDF file not found at missing.pdf");
    }
}
