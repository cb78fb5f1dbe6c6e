//! CSV encoding of transaction lists.

use crate::{Error, transaction::Transaction};

/// The column headers, written unquoted.
const HEADER: &str = "Date,Name,Category,Type,Amount (DZD),Notes";

/// Encode `transactions` as a CSV document.
///
/// The header row is unquoted; every data cell is quoted. Amounts keep
/// their shortest decimal form (`5`, not `5.00`) and dates are the ISO
/// `YYYY-MM-DD` form. Rows come out in the order given.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<Vec<u8>, Error> {
    let mut document = Vec::from(HEADER.as_bytes());
    document.push(b'\n');

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(document);

    for transaction in transactions {
        writer.write_record([
            transaction.date.to_string().as_str(),
            &transaction.name,
            transaction.category.as_str(),
            transaction.transaction_type.as_str(),
            &transaction.amount.to_string(),
            &transaction.notes,
        ])?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::ExportFailed(error.to_string()))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{Category, Transaction, TransactionId, TransactionType};

    use super::transactions_to_csv;

    fn coffee() -> Transaction {
        Transaction {
            id: TransactionId::from_remote("doc1"),
            user_id: None,
            name: "Coffee".to_owned(),
            amount: 5.0,
            date: date!(2024 - 03 - 01),
            category: Category::Other,
            transaction_type: TransactionType::Expense,
            notes: String::new(),
        }
    }

    #[test]
    fn header_row_is_unquoted() {
        let document = transactions_to_csv(&[]).unwrap();

        assert_eq!(
            String::from_utf8(document).unwrap(),
            "Date,Name,Category,Type,Amount (DZD),Notes\n"
        );
    }

    #[test]
    fn data_cells_are_quoted_and_amounts_keep_their_shortest_form() {
        let document = transactions_to_csv(&[coffee()]).unwrap();

        let text = String::from_utf8(document).unwrap();
        let mut lines = text.lines();
        lines.next();
        assert_eq!(
            lines.next(),
            Some(r#""2024-03-01","Coffee","Other","expense","5","""#)
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn fractional_amounts_are_not_padded() {
        let mut transaction = coffee();
        transaction.amount = 1234.5;

        let document = transactions_to_csv(&[transaction]).unwrap();

        let text = String::from_utf8(document).unwrap();
        assert!(text.contains(r#""1234.5""#), "got: {text}");
    }

    #[test]
    fn rows_preserve_input_order() {
        let mut second = coffee();
        second.name = "Cinema".to_owned();
        second.notes = "with friends".to_owned();

        let document = transactions_to_csv(&[coffee(), second]).unwrap();

        let text = String::from_utf8(document).unwrap();
        let names: Vec<_> = text
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(1).unwrap())
            .collect();
        assert_eq!(names, [r#""Coffee""#, r#""Cinema""#]);
    }
}
