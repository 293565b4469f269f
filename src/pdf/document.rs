use lopdf::{Document, Object};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A PDF opened for inspection only; rasterizing goes through [`super::render`].
pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = ensure_exists(path.as_ref())?;
        let bytes = std::fs::read(&path).map_err(|e| Error::io(&path, e))?;
        Self::from_bytes(&bytes, path)
    }

    pub fn from_bytes(bytes: &[u8], path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = Document::load_mem(bytes).map_err(|source| Error::Document {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), pages = doc.get_pages().len(), "opened document");
        Ok(PdfDocument { doc, path })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// The `/Title` entry of the info dictionary, if the document sets one.
    pub fn title(&self) -> Option<String> {
        let Ok(Object::Reference(info_id)) = self.doc.trailer.get(b"Info") else {
            return None;
        };
        let dict = self.doc.get_dictionary(*info_id).ok()?;
        match dict.get(b"Title").ok()? {
            Object::String(bytes, _) => decode_text_string(bytes).filter(|t| !t.trim().is_empty()),
            _ => None,
        }
    }
}

/// Fail with [`Error::NotFound`] before handing a missing path to a PDF backend.
pub fn ensure_exists(path: &Path) -> Result<PathBuf> {
    match path.try_exists() {
        Ok(true) => Ok(path.to_path_buf()),
        Ok(false) => Err(Error::NotFound(path.to_path_buf())),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// UTF-16BE when the BOM is present, otherwise PDFDocEncoding read as Latin-1.
fn decode_text_string(bytes: &[u8]) -> Option<String> {
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).ok()
        }
        None => Some(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}
