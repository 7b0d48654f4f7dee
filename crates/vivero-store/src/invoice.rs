//! # Invoice Rendering
//!
//! Turns an assembled [`InvoiceRecord`] into a document on disk. The
//! rendering target sits behind a trait so a PDF or HTML backend can
//! slot in without touching the assembly step; the shipped backend
//! writes plain text.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use vivero_core::InvoiceRecord;

use crate::error::StoreResult;

/// A backend that writes an invoice document and reports its path.
pub trait InvoiceRenderer {
    fn render(&self, invoice: &InvoiceRecord) -> StoreResult<PathBuf>;
}

/// Plain-text invoice backend.
#[derive(Debug, Clone)]
pub struct TextInvoiceRenderer {
    output_dir: PathBuf,
}

impl TextInvoiceRenderer {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        TextInvoiceRenderer {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// The full document body, also usable for on-screen preview.
    pub fn document(invoice: &InvoiceRecord) -> String {
        let mut doc = String::new();
        doc.push_str("Factura de Venta - Vivero Andalucía\n");
        doc.push_str("===================================\n\n");
        doc.push_str(&format!("Cliente: {}\n", invoice.customer));
        doc.push_str(&format!("Fecha: {}\n\n", invoice.date.format("%Y-%m-%d %H:%M:%S")));
        for line in &invoice.lines {
            doc.push_str(&format!(
                "{} x{} @ {} = {}\n",
                line.name, line.quantity, line.unit_price, line.line_total
            ));
        }
        doc.push_str(&format!("\nTotal: {}\n", invoice.grand_total));
        doc
    }
}

impl InvoiceRenderer for TextInvoiceRenderer {
    /// Writes `{sanitized stem}.txt` under the output directory.
    fn render(&self, invoice: &InvoiceRecord) -> StoreResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.txt", invoice.file_stem()));
        fs::write(&path, Self::document(invoice))?;

        info!(path = %path.display(), "Rendered invoice");
        Ok(path)
    }
}
