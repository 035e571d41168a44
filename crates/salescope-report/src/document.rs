//! Paginated PDF assembly.
//!
//! Charts are placed top-down with a cursor; a chart that would cross the
//! bottom margin opens a new page instead. Placement planning is a pure
//! function so the pagination rules are testable without touching the PDF
//! backend.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument};

use crate::chart::{CHART_HEIGHT_PX, CHART_WIDTH_PX};
use crate::error::{ReportError, Result};

/// US letter, in millimetres.
pub const PAGE_WIDTH_MM: f64 = 215.9;
pub const PAGE_HEIGHT_MM: f64 = 279.4;
pub const MARGIN_MM: f64 = 18.0;
/// Vertical gap between charts on the same page.
pub const CHART_GAP_MM: f64 = 8.0;
/// Charts are embedded at this resolution.
pub const CHART_DPI: f64 = 150.0;

const MM_PER_INCH: f64 = 25.4;
/// Vertical room reserved for the first page's title line.
const TITLE_ADVANCE_MM: f64 = 12.0;

/// Chart height on paper at `CHART_DPI`.
pub fn chart_height_mm() -> f64 {
    f64::from(CHART_HEIGHT_PX) * MM_PER_INCH / CHART_DPI
}

pub fn chart_width_mm() -> f64 {
    f64::from(CHART_WIDTH_PX) * MM_PER_INCH / CHART_DPI
}

/// Where one chart lands: page index (0-based) and the position of its top
/// edge, measured from the page bottom as the PDF coordinate system does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub top_mm: f64,
}

/// Plan placements for `count` charts.
///
/// The cursor starts under the title on page 0 and at the top margin on
/// every later page. A chart whose fixed height would cross the bottom
/// margin moves to a fresh page before being placed — a chart is never
/// split across pages and two charts never overlap.
pub fn plan(count: usize) -> Vec<Placement> {
    let height = chart_height_mm();
    let mut placements = Vec::with_capacity(count);
    let mut page = 0usize;
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM - TITLE_ADVANCE_MM;
    for _ in 0..count {
        if y - height < MARGIN_MM {
            page += 1;
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        placements.push(Placement { page, top_mm: y });
        y -= height + CHART_GAP_MM;
    }
    placements
}

/// Assemble `images` (in input order) into a PDF at `out`.
///
/// A zero-image input still produces a single page carrying the title line.
pub fn assemble(title: &str, images: &[PathBuf], out: &Path) -> Result<()> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Sales Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "charts",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(to_document_error)?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    layers[0].use_text(
        title,
        14.0,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - MARGIN_MM),
        &font,
    );

    for (path, placement) in images.iter().zip(plan(images.len())) {
        while layers.len() <= placement.page {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "charts");
            layers.push(doc.get_page(page).get_layer(layer));
        }

        let file = File::open(path)?;
        let decoder = PngDecoder::new(file).map_err(to_document_error)?;
        let image = Image::try_from(decoder).map_err(to_document_error)?;
        image.add_to_layer(
            layers[placement.page].clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(placement.top_mm - chart_height_mm())),
                dpi: Some(CHART_DPI),
                ..ImageTransform::default()
            },
        );
    }

    let file = File::create(out)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(to_document_error)?;
    Ok(())
}

fn to_document_error<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Document(e.to_string())
}
