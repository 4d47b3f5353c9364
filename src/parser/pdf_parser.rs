//! PDF loading: file → [`PageLayer`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

use super::backend::{LopdfBackend, PageId, PdfBackend};
use super::content::extract_page_spans;
use super::layer::{PageLayer, PageText};
use super::options::{ErrorMode, ParseOptions};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Check whether bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Check the first bytes of a file for a PDF header.
pub fn check_pdf_header<P: AsRef<Path>>(path: P) -> Result<()> {
    let mut header = [0u8; 8];
    let mut file = File::open(path)?;
    let n = file.read(&mut header)?;
    if is_pdf_bytes(&header[..n]) {
        Ok(())
    } else {
        Err(Error::UnknownFormat)
    }
}

/// PDF document parser.
pub struct PdfParser<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ParseOptions,
}

impl PdfParser<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        check_pdf_header(path)?;
        let backend = LopdfBackend::load_file(path)?;
        if backend.is_encrypted() {
            log::warn!("{} is encrypted; text may be unreadable", path.display());
        }
        Ok(Self { backend, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        if !is_pdf_bytes(data) {
            return Err(Error::UnknownFormat);
        }
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self { backend, options })
    }
}

impl<B: PdfBackend> PdfParser<B> {
    /// Wrap an existing backend.
    pub fn with_backend(backend: B, options: ParseOptions) -> Self {
        Self { backend, options }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.backend.pages().len()
    }

    /// Extract every page into a text layer.
    pub fn parse(&self) -> Result<PageLayer> {
        let mut layer = PageLayer::default();
        for (index, page_id) in self.backend.pages().into_values().enumerate() {
            layer.push_page(self.parse_page(page_id, index)?);
        }
        Ok(layer)
    }

    fn parse_page(&self, page_id: PageId, index: usize) -> Result<PageText> {
        let (width, height) = self.backend.page_size(page_id);
        match extract_page_spans(&self.backend, page_id, index) {
            Ok(spans) => Ok(PageText::new(width, height, spans)),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to extract text from page {}: {}", index, e);
                Ok(PageText::new(width, height, Vec::new()))
            }
            Err(e) => Err(e),
        }
    }
}
