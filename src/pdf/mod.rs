pub mod document;
pub mod render;

pub use document::PdfDocument;
pub use render::{PageRenderer, PdfiumRenderer};
