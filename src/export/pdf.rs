//! PDF encoding of transaction lists.
//!
//! Produces an A4 document with a title, a generation date and a paginated
//! table. This is a plain encoder over an already-filtered list; it does
//! not consult the ledger itself.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
    PolygonMode, Rgb, WindingOrder,
};
use time::{Date, macros::format_description};

use crate::{
    Error,
    transaction::{Transaction, TransactionType},
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const ROW_HEIGHT: f32 = 7.0;
/// Vertical position of the first table row on each page.
const TABLE_TOP: f32 = PAGE_HEIGHT - 45.0;
/// Rows stop here and overflow onto a fresh page.
const TABLE_BOTTOM: f32 = 18.0;

/// Left edge of each table column, in mm.
const COLUMNS: [(f32, &str); 6] = [
    (MARGIN + 2.0, "Date"),
    (MARGIN + 30.0, "Name"),
    (MARGIN + 80.0, "Category"),
    (MARGIN + 112.0, "Type"),
    (MARGIN + 132.0, "Amount (DZD)"),
    (MARGIN + 162.0, "Notes"),
];

/// How many table rows fit on one page.
pub(crate) fn rows_per_page() -> usize {
    ((TABLE_TOP - TABLE_BOTTOM) / ROW_HEIGHT) as usize
}

/// Encode `transactions` as a PDF document.
///
/// `generated_on` is printed under the title as the export date. Rows keep
/// the order given and flow onto additional pages as needed.
pub fn transactions_to_pdf(
    transactions: &[Transaction],
    generated_on: Date,
) -> Result<Vec<u8>, Error> {
    let (document, first_page, first_layer) =
        PdfDocument::new("Masroofy Transactions", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "table");
    let regular = document
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|error| Error::ExportFailed(error.to_string()))?;
    let bold = document
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|error| Error::ExportFailed(error.to_string()))?;

    let layer = document.get_page(first_page).get_layer(first_layer);
    draw_title(&layer, &bold, &regular, generated_on)?;
    draw_table_header(&layer, &bold);

    let mut layer = layer;
    let mut y = TABLE_TOP - ROW_HEIGHT;
    for transaction in transactions {
        if y < TABLE_BOTTOM {
            let (page, new_layer) = document.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "table");
            layer = document.get_page(page).get_layer(new_layer);
            draw_table_header(&layer, &bold);
            y = TABLE_TOP - ROW_HEIGHT;
        }

        draw_row(&layer, &regular, transaction, y)?;
        y -= ROW_HEIGHT;
    }

    document
        .save_to_bytes()
        .map_err(|error| Error::ExportFailed(error.to_string()))
}

fn draw_title(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    regular: &IndirectFontRef,
    generated_on: Date,
) -> Result<(), Error> {
    layer.set_fill_color(text_color());
    layer.use_text(
        "Masroofy Transactions",
        18.0,
        Mm(MARGIN),
        Mm(PAGE_HEIGHT - 20.0),
        bold,
    );
    layer.use_text(
        format!("Generated on {}", format_date(generated_on)?),
        10.0,
        Mm(MARGIN),
        Mm(PAGE_HEIGHT - 27.0),
        regular,
    );

    Ok(())
}

fn draw_table_header(layer: &PdfLayerReference, bold: &IndirectFontRef) {
    layer.set_fill_color(header_color());
    layer.add_polygon(header_bar());

    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
    for (x, label) in COLUMNS {
        layer.use_text(label, 9.0, Mm(x), Mm(TABLE_TOP + 2.0), bold);
    }
}

/// The filled bar behind the column labels, as a closed polygon.
fn header_bar() -> Polygon {
    let corners = vec![
        (Point::new(Mm(MARGIN), Mm(TABLE_TOP)), false),
        (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(TABLE_TOP)), false),
        (
            Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(TABLE_TOP + ROW_HEIGHT)),
            false,
        ),
        (Point::new(Mm(MARGIN), Mm(TABLE_TOP + ROW_HEIGHT)), false),
    ];

    Polygon {
        rings: vec![corners],
        mode: PolygonMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}

fn draw_row(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    transaction: &Transaction,
    y: f32,
) -> Result<(), Error> {
    layer.set_fill_color(text_color());

    let cells = [
        format_date(transaction.date)?,
        clip(&transaction.name, 28),
        transaction.category.as_str().to_owned(),
        transaction.transaction_type.as_str().to_owned(),
        format_signed_amount(transaction),
        clip(&transaction.notes, 22),
    ];
    for ((x, _), text) in COLUMNS.iter().zip(cells) {
        layer.use_text(text, 9.0, Mm(*x), Mm(y + 2.0), regular);
    }

    Ok(())
}

/// The indigo header bar, 63/81/181 out of 255.
fn header_color() -> Color {
    Color::Rgb(Rgb::new(63.0 / 255.0, 81.0 / 255.0, 181.0 / 255.0, None))
}

fn text_color() -> Color {
    Color::Rgb(Rgb::new(0.13, 0.13, 0.13, None))
}

/// Amounts carry their sign and exactly two decimals, e.g. `-5.00`.
fn format_signed_amount(transaction: &Transaction) -> String {
    let sign = match transaction.transaction_type {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };

    format!("{sign}{:.2}", transaction.amount)
}

/// Dates are printed as e.g. `Mar 01 2024`.
fn format_date(date: Date) -> Result<String, Error> {
    date.format(format_description!("[month repr:short] [day] [year]"))
        .map_err(|error| Error::ExportFailed(error.to_string()))
}

/// Keep cell text inside its column.
fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let clipped: String = text.chars().take(max_chars - 1).collect();
    format!("{clipped}\u{2026}")
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{Category, Transaction, TransactionId, TransactionType};

    use super::{clip, format_signed_amount, rows_per_page, transactions_to_pdf};

    fn transaction(name: &str, transaction_type: TransactionType) -> Transaction {
        Transaction {
            id: TransactionId::from_remote("doc1"),
            user_id: None,
            name: name.to_owned(),
            amount: 5.0,
            date: date!(2024 - 03 - 01),
            category: Category::Other,
            transaction_type,
            notes: String::new(),
        }
    }

    #[test]
    fn produces_a_pdf_document_with_the_title() {
        let document =
            transactions_to_pdf(&[transaction("Coffee", TransactionType::Expense)], date!(2024 - 03 - 02))
                .unwrap();

        assert!(document.starts_with(b"%PDF"));
        let haystack = String::from_utf8_lossy(&document);
        assert!(haystack.contains("Masroofy Transactions"));
    }

    #[test]
    fn long_lists_overflow_onto_additional_pages() {
        let transactions: Vec<_> = (0..rows_per_page() + 1)
            .map(|i| transaction(&format!("row {i}"), TransactionType::Expense))
            .collect();

        let document = transactions_to_pdf(&transactions, date!(2024 - 03 - 02)).unwrap();

        let haystack = String::from_utf8_lossy(&document);
        assert!(
            haystack.contains("/Count 2"),
            "expected a two-page document"
        );
    }

    #[test]
    fn amounts_are_signed_with_two_decimals() {
        let expense = transaction("Coffee", TransactionType::Expense);
        let mut income = transaction("Salary", TransactionType::Income);
        income.amount = 1200.5;

        assert_eq!(format_signed_amount(&expense), "-5.00");
        assert_eq!(format_signed_amount(&income), "+1200.50");
    }

    #[test]
    fn clip_shortens_only_overlong_text() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("exactly ten", 11), "exactly ten");
        assert_eq!(clip("rather too long", 8), "rather \u{2026}");
    }
}
