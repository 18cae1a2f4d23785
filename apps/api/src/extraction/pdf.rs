//! PDF decoding adapter: turns raw upload bytes into positioned fragments.
//!
//! `lopdf` parses the document and `pdf-extract` walks its content streams,
//! reporting every glyph through the `OutputDev` callbacks. Glyphs on one
//! baseline are merged into runs; a run breaks on a baseline change, a
//! backwards jump, or a column-sized gap. Word spaces the producer encoded
//! as positioning (rather than space glyphs) are restored inside a run.
//!
//! Coordinates leave here in page units (`points / 16`) with y growing
//! downward, which is the scale the reconstruction tolerances assume.
//!
//! Decoding is CPU-bound: async callers go through `extract_text_blocking`.

use bytes::Bytes;
use lopdf::Document;
use pdf_extract::{output_doc, MediaBox, OutputDev, OutputError, Transform};
use thiserror::Error;
use tracing::debug;

use super::fragment::{Page, PositionedFragment};
use super::reconstruct::{reconstruct, LINE_TOLERANCE};

const PDF_MAGIC: &[u8] = b"%PDF-";
/// Producers may put junk before the header; readers accept it within 1 KiB.
const MAGIC_SEARCH_WINDOW: usize = 1024;
const POINTS_PER_UNIT: f64 = 16.0;
/// Gap, in ems, above which two glyphs in one run are separate words.
const WORD_GAP_EMS: f64 = 0.2;
/// Gap, in ems, above which a run is split into separate fragments.
const COLUMN_GAP_EMS: f64 = 3.0;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Uploaded file is not a PDF document")]
    NotAPdf,

    #[error("PDF could not be parsed: {0}")]
    Malformed(String),

    #[error("PDF text could not be decoded: {0}")]
    Decode(String),

    #[error("PDF decoding task failed: {0}")]
    Join(String),
}

/// Decodes every page of a PDF into unordered positioned fragments.
pub fn decode_pages(bytes: &[u8]) -> Result<Vec<Page>, ExtractError> {
    if !has_pdf_magic(bytes) {
        return Err(ExtractError::NotAPdf);
    }

    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Malformed(e.to_string()))?;

    let mut collector = FragmentCollector::default();
    output_doc(&doc, &mut collector).map_err(|e| ExtractError::Decode(format!("{e:?}")))?;

    let pages = collector.finish();
    debug!(
        pages = pages.len(),
        fragments = pages.iter().map(|p| p.fragments.len()).sum::<usize>(),
        "Decoded PDF fragments"
    );
    Ok(pages)
}

/// Decodes a PDF and reconstructs its reading-order text.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    decode_pages(bytes).map(|pages| reconstruct(&pages))
}

/// Runs `extract_text` on the blocking pool. A panic inside the decoder is
/// reported as a decode failure of this document.
pub async fn extract_text_blocking(bytes: Bytes) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| {
            if e.is_panic() {
                ExtractError::Decode("decoder aborted on malformed content".to_string())
            } else {
                ExtractError::Join(e.to_string())
            }
        })?
}

fn has_pdf_magic(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(MAGIC_SEARCH_WINDOW)];
    window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

// ────────────────────────────────────────────────────────────────────────────
// OutputDev implementation
// ────────────────────────────────────────────────────────────────────────────

/// Glyph run being accumulated, in PDF points.
struct OpenRun {
    text: String,
    x: f64,
    y: f64,
    end_x: f64,
    em: f64,
}

struct PageBuilder {
    left: f64,
    top: f64,
    fragments: Vec<PositionedFragment>,
    run: Option<OpenRun>,
}

impl PageBuilder {
    fn close_run(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        if run.text.trim().is_empty() {
            return;
        }
        self.fragments.push(PositionedFragment::from_glyphs(
            &run.text,
            (run.x - self.left) / POINTS_PER_UNIT,
            (self.top - run.y) / POINTS_PER_UNIT,
            (run.end_x - run.x).max(0.0) / POINTS_PER_UNIT,
        ));
    }

    fn push_glyph(&mut self, glyph: &str, x: f64, y: f64, advance: f64, em: f64) {
        let baseline_tolerance = LINE_TOLERANCE * POINTS_PER_UNIT;

        if let Some(run) = self.run.as_mut() {
            let gap = x - run.end_x;
            let continues = (y - run.y).abs() <= baseline_tolerance
                && gap >= -run.em * 0.5
                && gap <= run.em * COLUMN_GAP_EMS;
            if continues {
                let starts_word = !glyph.starts_with(char::is_whitespace);
                if gap > run.em * WORD_GAP_EMS
                    && starts_word
                    && !run.text.ends_with(char::is_whitespace)
                {
                    run.text.push(' ');
                }
                run.text.push_str(glyph);
                run.end_x = x + advance;
                return;
            }
        }

        self.close_run();
        self.run = Some(OpenRun {
            text: glyph.to_string(),
            x,
            y,
            end_x: x + advance,
            em,
        });
    }
}

#[derive(Default)]
struct FragmentCollector {
    pages: Vec<Page>,
    current: Option<PageBuilder>,
}

impl FragmentCollector {
    fn flush_page(&mut self) {
        if let Some(mut page) = self.current.take() {
            page.close_run();
            self.pages.push(Page::new(page.fragments));
        }
    }

    fn finish(mut self) -> Vec<Page> {
        self.flush_page();
        self.pages
    }
}

impl OutputDev for FragmentCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.flush_page();
        self.current = Some(PageBuilder {
            left: media_box.llx,
            top: media_box.ury,
            fragments: Vec::new(),
            run: None,
        });
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush_page();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        let Some(page) = self.current.as_mut() else {
            return Ok(());
        };
        let scale = trm.m11.abs().max(trm.m22.abs());
        let em = if scale > 0.0 {
            font_size * scale
        } else {
            font_size
        };
        let advance = ((width * font_size + spacing) * trm.m11).max(0.0);
        page.push_glyph(char, trm.m31, trm.m32, advance, em.max(1.0));
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}
