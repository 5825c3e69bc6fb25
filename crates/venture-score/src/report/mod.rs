//! Paginated PDF rendering of assessment results.

mod assembler;
pub mod layout;
mod pdf;
pub mod wrap;

pub use assembler::{
    next_steps, recommendation, report_file_name, ReportAssembler, ReportDocument, ReportOptions,
    DEFAULT_BRAND, DEFAULT_DETAIL_LIMIT,
};
pub use layout::{paginate, Block, PageGeometry, PageLayout, PlacedBlock};
pub use pdf::render_pdf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report layout failed: {0}")]
    Layout(String),
    #[error("pdf rendering failed: {0}")]
    Pdf(String),
}
