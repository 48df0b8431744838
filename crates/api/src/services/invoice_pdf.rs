//! Invoice PDF rendering.
//!
//! Renders a materialized invoice into a single-page A4 document. Layout
//! and money formatting are presentation concerns that live entirely here;
//! totals arrive already computed.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use thiserror::Error;

use domain::models::{Invoice, Job, LineItem};

/// Rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Too many line items for a single page ({0})")]
    TooManyItems(usize),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Everything the renderer needs to lay out one invoice document.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub invoice: Invoice,
    pub job: Job,
    pub company_name: String,
    pub company_address: Option<String>,
    pub recipient_text: String,
    pub items: Vec<LineItem>,
    pub total: f64,
}

/// Formats an amount with thousands separators and two decimals.
fn format_money(v: f64) -> String {
    let s = format!("{:.2}", v.abs());
    let parts = s.split('.').collect::<Vec<_>>();
    let int_part = parts[0];
    let dec_part = parts.get(1).copied().unwrap_or("00");

    let mut out = String::new();
    let chars: Vec<char> = int_part.chars().collect();
    let mut cnt = 0;
    for i in (0..chars.len()).rev() {
        if cnt == 3 {
            out.push(',');
            cnt = 0;
        }
        out.push(chars[i]);
        cnt += 1;
    }
    let int_with_sep: String = out.chars().rev().collect();
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, int_with_sep, dec_part)
}

fn push_line(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(text, font_size, Mm(x), Mm(y), font);
}

fn divider(layer: &PdfLayerReference, y: f32) {
    layer.add_line(printpdf::Line {
        points: vec![
            (printpdf::Point::new(Mm(15.0), Mm(y)), false),
            (printpdf::Point::new(Mm(195.0), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Renders the invoice document to PDF bytes.
pub fn render_invoice(doc_data: &InvoiceDocument) -> Result<Vec<u8>, RenderError> {
    // Single-page layout; more rows than this would run off the page.
    const MAX_ITEMS: usize = 30;
    if doc_data.items.len() > MAX_ITEMS {
        return Err(RenderError::TooManyItems(doc_data.items.len()));
    }

    let (doc, page1, layer1) = PdfDocument::new("Invoice", Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut y: f32 = 285.0;

    // Header: issuing company (left)
    push_line(&layer, &font_bold, &doc_data.company_name, 16.0, 15.0, y);
    y -= 7.0;
    if let Some(address) = &doc_data.company_address {
        push_line(&layer, &font, address, 10.0, 15.0, y);
        y -= 5.0;
    }

    // Header: title (right)
    push_line(&layer, &font_bold, "INVOICE", 24.0, 145.0, 285.0);
    push_line(
        &layer,
        &font_bold,
        &format!("Job {}", doc_data.job.id),
        9.0,
        145.0,
        277.0,
    );

    y = 265.0;
    divider(&layer, y);

    // Recipient boilerplate + invoice details
    y -= 10.0;
    push_line(&layer, &font, &doc_data.recipient_text, 11.0, 15.0, y);
    push_line(&layer, &font_bold, "Details:", 12.0, 120.0, y);

    y -= 7.0;
    push_line(
        &layer,
        &font,
        &format!("Invoice date: {}", doc_data.invoice.invoice_date),
        10.0,
        120.0,
        y,
    );
    y -= 5.0;
    if let Some(due) = doc_data.invoice.due_date {
        push_line(&layer, &font, &format!("Due date: {}", due), 10.0, 120.0, y);
        y -= 5.0;
    }
    push_line(
        &layer,
        &font,
        &format!("Status: {}", doc_data.invoice.status),
        10.0,
        120.0,
        y,
    );

    // Job details (left column)
    let mut job_y = 253.0;
    push_line(
        &layer,
        &font,
        &format!("Work: {}", doc_data.job.job_type),
        10.0,
        15.0,
        job_y,
    );
    job_y -= 5.0;
    push_line(
        &layer,
        &font,
        &format!("Location: {}", doc_data.job.location),
        10.0,
        15.0,
        job_y,
    );
    job_y -= 5.0;
    if let (Some(start), Some(end)) = (doc_data.job.start_date, doc_data.job.end_date) {
        push_line(
            &layer,
            &font,
            &format!("Period: {} to {}", start, end),
            10.0,
            15.0,
            job_y,
        );
    }

    y = 230.0;

    // Items table header
    push_line(&layer, &font_bold, "Items", 12.0, 15.0, y);
    y -= 6.0;

    // Table columns (x positions)
    let x_desc = 15.0;
    let x_qty = 120.0;
    let x_unit = 145.0;
    let x_total = 175.0;

    push_line(&layer, &font_bold, "Description", 10.0, x_desc, y);
    push_line(&layer, &font_bold, "Qty", 10.0, x_qty, y);
    push_line(&layer, &font_bold, "Unit price", 10.0, x_unit, y);
    push_line(&layer, &font_bold, "Total", 10.0, x_total, y);

    y -= 3.5;
    divider(&layer, y);
    y -= 7.0;

    // Rows
    for (idx, item) in doc_data.items.iter().enumerate() {
        let desc = format!("{}. {}", idx + 1, item.description);
        push_line(&layer, &font, &desc, 10.0, x_desc, y);
        push_line(&layer, &font, &format!("{:.2}", item.quantity), 10.0, x_qty, y);
        push_line(&layer, &font, &format_money(item.unit_price), 10.0, x_unit, y);
        push_line(&layer, &font_bold, &format_money(item.total()), 10.0, x_total, y);

        y -= 6.0;
    }

    y -= 4.0;
    divider(&layer, y);

    // Total
    y -= 10.0;
    push_line(&layer, &font_bold, "TOTAL:", 13.0, 145.0, y);
    push_line(&layer, &font_bold, &format_money(doc_data.total), 13.0, 170.0, y);

    // Notes
    if let Some(notes) = &doc_data.job.notes {
        if !notes.trim().is_empty() {
            y -= 14.0;
            push_line(&layer, &font_bold, "Notes:", 11.0, 15.0, y);
            y -= 6.0;

            let mut current_y = y;
            for line in notes.lines() {
                if current_y < 20.0 {
                    break;
                }
                push_line(&layer, &font, line, 10.0, 15.0, current_y);
                current_y -= 5.0;
            }
        }
    }

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use domain::models::{InvoiceStatus, JobStatus};
    use serde_json::json;
    use uuid::Uuid;

    fn test_document(items: Vec<LineItem>) -> InvoiceDocument {
        let total = domain::models::calculate_total(&items);
        let job_id = Uuid::new_v4();
        let subcontractor_id = Uuid::new_v4();
        InvoiceDocument {
            invoice: Invoice {
                id: Uuid::new_v4(),
                job_id,
                subcontractor_id,
                invoice_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                due_date: None,
                status: InvoiceStatus::Unpaid,
                total_amount: total,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            job: Job {
                id: job_id,
                subcontractor_id,
                job_type: "Tiling".to_string(),
                location: "Basel".to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 4, 1),
                end_date: NaiveDate::from_ymd_opt(2025, 4, 15),
                status: JobStatus::Completed,
                notes: Some("Second floor bathroom".to_string()),
                line_items: json!([]),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            company_name: "Muster Bau GmbH".to_string(),
            company_address: Some("Bahnhofstrasse 1, 8001 Zurich".to_string()),
            recipient_text: "To Whom It May Concern,".to_string(),
            items,
            total,
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(150.0), "150.00");
        assert_eq!(format_money(1234.5), "1,234.50");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(-50.0), "-50.00");
    }

    #[test]
    fn test_render_invoice_produces_pdf_bytes() {
        let doc = test_document(vec![LineItem {
            description: "Tiling".to_string(),
            quantity: 10.0,
            unit_price: 15.0,
        }]);
        let bytes = render_invoice(&doc).unwrap();
        // Every PDF starts with the %PDF magic.
        assert!(bytes.starts_with(b"%PDF"));
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_render_invoice_empty_items() {
        let doc = test_document(vec![]);
        let bytes = render_invoice(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_invoice_too_many_items() {
        let items: Vec<LineItem> = (0..31)
            .map(|i| LineItem {
                description: format!("Item {}", i),
                quantity: 1.0,
                unit_price: 1.0,
            })
            .collect();
        let doc = test_document(items);
        let result = render_invoice(&doc);
        assert!(matches!(result, Err(RenderError::TooManyItems(31))));
    }

    #[test]
    fn test_render_invoice_at_item_limit() {
        let items: Vec<LineItem> = (0..30)
            .map(|i| LineItem {
                description: format!("Item {}", i),
                quantity: 1.0,
                unit_price: 1.0,
            })
            .collect();
        let doc = test_document(items);
        assert!(render_invoice(&doc).is_ok());
    }
}
