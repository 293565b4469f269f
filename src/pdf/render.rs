use image::ImageFormat;
use pdfium_render::prelude::{
    PdfDocument as PdfiumDocument, PdfDocumentMetadataTagType, PdfRenderConfig, Pdfium,
};
use std::io::Cursor;
use std::path::Path;

use crate::error::{Error, Result};

/// Rasterizes pages of one open document.
pub trait PageRenderer {
    fn page_count(&self) -> usize;

    /// Document title, shown in progress output when present.
    fn title(&self) -> Option<String> {
        None
    }

    /// Render a zero-based page to PNG bytes. `scale` is the zoom relative to 72 dpi.
    fn render_png(&self, page_index: usize, scale: f32) -> Result<Vec<u8>>;
}

/// Bind to pdfium: an explicit library path if given, else the platform
/// library in the working directory, else the system one.
pub fn bind_pdfium(library: Option<&Path>) -> Result<Pdfium> {
    let bindings = match library {
        Some(path) => Pdfium::bind_to_library(path),
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| Error::render(None, format!("failed to bind to Pdfium library: {}", e)))?;

    Ok(Pdfium::new(bindings))
}

pub struct PdfiumRenderer<'a> {
    document: PdfiumDocument<'a>,
}

impl<'a> PdfiumRenderer<'a> {
    pub fn open(pdfium: &'a Pdfium, path: &Path) -> Result<Self> {
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::render(None, format!("unable to load {}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), pages = document.pages().len(), "loaded document into pdfium");
        Ok(PdfiumRenderer { document })
    }
}

impl PageRenderer for PdfiumRenderer<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn title(&self) -> Option<String> {
        self.document
            .metadata()
            .get(PdfDocumentMetadataTagType::Title)
            .map(|tag| tag.value().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    fn render_png(&self, page_index: usize, scale: f32) -> Result<Vec<u8>> {
        let total = self.page_count();
        if page_index >= total {
            return Err(Error::invalid(format!(
                "page index {} is out of range (0-{})",
                page_index,
                total.saturating_sub(1)
            )));
        }
        let index = u16::try_from(page_index)
            .map_err(|_| Error::invalid(format!("page index {} is too large", page_index)))?;

        let page = self
            .document
            .pages()
            .get(index)
            .map_err(|e| Error::render(Some(page_index), e))?;

        let image = page
            .render_with_config(&PdfRenderConfig::new().scale_page_by_factor(scale))
            .map_err(|e| Error::render(Some(page_index), e))?
            .as_image();

        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| Error::render(Some(page_index), format!("PNG encoding failed: {}", e)))?;

        tracing::trace!(page = page_index, bytes = buffer.get_ref().len(), "rendered page");
        Ok(buffer.into_inner())
    }
}
