//! Derived reports over the transaction ledger.
//!
//! Everything in this module is a pure fold over a ledger snapshot and is
//! re-derived on every render; there is no cached or incremental
//! aggregation to invalidate.

use std::collections::BTreeMap;

use time::{Date, Month};

use crate::transaction::{Category, Transaction, TransactionType};

/// Sum of the amounts of all income records.
pub fn total_income(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Income)
        .map(|t| t.amount)
        .sum()
}

/// Sum of the amounts of all expense records.
pub fn total_expense(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
        .map(|t| t.amount)
        .sum()
}

/// Income minus expenses.
pub fn balance(transactions: &[Transaction]) -> f64 {
    total_income(transactions) - total_expense(transactions)
}

/// Per-category totals of expense records.
///
/// Income records are excluded from the breakdown. Categories with no
/// expenses are absent; the map iterates in [Category] declaration order.
pub fn category_totals(transactions: &[Transaction]) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();

    for transaction in transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
    {
        *totals.entry(transaction.category).or_insert(0.0) += transaction.amount;
    }

    totals
}

/// Income and expense totals bucketed by calendar month.
///
/// Buckets are keyed by the transaction date clamped to the first of its
/// month, so the same month in different years stays distinct.
#[derive(Debug, Default, PartialEq)]
pub struct MonthlyTotals {
    pub income: BTreeMap<Date, f64>,
    pub expenses: BTreeMap<Date, f64>,
}

impl MonthlyTotals {
    /// Every month that appears in either map, in chronological order.
    pub fn months(&self) -> Vec<Date> {
        let mut months: Vec<Date> = self.income.keys().chain(self.expenses.keys()).copied().collect();
        months.sort();
        months.dedup();
        months
    }
}

/// Bucket transactions into monthly income and expense totals.
pub fn monthly_totals(transactions: &[Transaction]) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();

    for transaction in transactions {
        let month = month_of(transaction.date);
        let bucket = match transaction.transaction_type {
            TransactionType::Income => &mut totals.income,
            TransactionType::Expense => &mut totals.expenses,
        };
        *bucket.entry(month).or_insert(0.0) += transaction.amount;
    }

    totals
}

/// The first day of `date`'s month.
fn month_of(date: Date) -> Date {
    // Day 1 is valid for every month, so replace_day cannot fail here.
    date.replace_day(1).unwrap_or(date)
}

/// The three-letter label for a month bucket, e.g. "Jan".
pub fn month_label(date: Date) -> &'static str {
    match date.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{Category, Transaction, TransactionId, TransactionType};

    use super::{
        balance, category_totals, month_label, monthly_totals, total_expense, total_income,
    };

    fn transaction(
        transaction_type: TransactionType,
        amount: f64,
        date: time::Date,
        category: Category,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new_local(),
            user_id: None,
            name: "test".to_owned(),
            amount,
            date,
            category,
            transaction_type,
            notes: String::new(),
        }
    }

    /// The worked example: income 100 on Jan 5, expense 40 on Jan 10,
    /// income 20 on Feb 1.
    fn example_transactions() -> Vec<Transaction> {
        vec![
            transaction(
                TransactionType::Income,
                100.0,
                date!(2024 - 01 - 05),
                Category::Salary,
            ),
            transaction(
                TransactionType::Expense,
                40.0,
                date!(2024 - 01 - 10),
                Category::Groceries,
            ),
            transaction(
                TransactionType::Income,
                20.0,
                date!(2024 - 02 - 01),
                Category::Investment,
            ),
        ]
    }

    #[test]
    fn totals_match_worked_example() {
        let transactions = example_transactions();

        assert_eq!(total_income(&transactions), 120.0);
        assert_eq!(total_expense(&transactions), 40.0);
        assert_eq!(balance(&transactions), 80.0);
    }

    #[test]
    fn monthly_totals_match_worked_example() {
        let totals = monthly_totals(&example_transactions());

        assert_eq!(totals.income[&date!(2024 - 01 - 01)], 100.0);
        assert_eq!(totals.income[&date!(2024 - 02 - 01)], 20.0);
        assert_eq!(totals.expenses[&date!(2024 - 01 - 01)], 40.0);
        assert_eq!(totals.expenses.len(), 1);
        assert_eq!(month_label(date!(2024 - 01 - 01)), "Jan");
        assert_eq!(month_label(date!(2024 - 02 - 01)), "Feb");
    }

    #[test]
    fn monthly_totals_keep_years_distinct() {
        let transactions = vec![
            transaction(
                TransactionType::Income,
                100.0,
                date!(2023 - 01 - 15),
                Category::Salary,
            ),
            transaction(
                TransactionType::Income,
                50.0,
                date!(2024 - 01 - 15),
                Category::Salary,
            ),
        ];

        let totals = monthly_totals(&transactions);

        assert_eq!(totals.income[&date!(2023 - 01 - 01)], 100.0);
        assert_eq!(totals.income[&date!(2024 - 01 - 01)], 50.0);
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let transactions = vec![
            transaction(
                TransactionType::Income,
                12.5,
                date!(2024 - 05 - 01),
                Category::Salary,
            ),
            transaction(
                TransactionType::Expense,
                40.0,
                date!(2024 - 05 - 02),
                Category::Housing,
            ),
        ];

        assert_eq!(
            balance(&transactions),
            total_income(&transactions) - total_expense(&transactions)
        );
    }

    #[test]
    fn category_totals_exclude_income() {
        let transactions = vec![
            transaction(
                TransactionType::Expense,
                30.0,
                date!(2024 - 01 - 05),
                Category::Groceries,
            ),
            transaction(
                TransactionType::Expense,
                12.0,
                date!(2024 - 01 - 08),
                Category::Groceries,
            ),
            transaction(
                TransactionType::Expense,
                99.0,
                date!(2024 - 01 - 09),
                Category::Housing,
            ),
            transaction(
                TransactionType::Income,
                500.0,
                date!(2024 - 01 - 10),
                Category::Salary,
            ),
        ];

        let totals = category_totals(&transactions);

        assert_eq!(totals[&Category::Groceries], 42.0);
        assert_eq!(totals[&Category::Housing], 99.0);
        assert!(!totals.contains_key(&Category::Salary));
    }

    #[test]
    fn category_totals_sum_to_total_expense() {
        let transactions = example_transactions();

        let sum: f64 = category_totals(&transactions).values().sum();

        assert_eq!(sum, total_expense(&transactions));
    }

    #[test]
    fn empty_ledger_aggregates_to_zero() {
        assert_eq!(total_income(&[]), 0.0);
        assert_eq!(total_expense(&[]), 0.0);
        assert_eq!(balance(&[]), 0.0);
        assert!(category_totals(&[]).is_empty());
        assert!(monthly_totals(&[]).months().is_empty());
    }
}
