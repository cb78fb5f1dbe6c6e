//! The shared form for creating and editing transactions.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
};

use super::model::{Category, Transaction, TransactionDraft, TransactionType};

/// The form data for creating or editing a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    /// Text describing the transaction, e.g. "Weekly groceries".
    pub name: String,
    /// The unsigned size of the transaction in dinars.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    pub category: Category,
    /// Whether the amount counts toward income or expenses.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub notes: String,
}

impl TransactionForm {
    /// Validate the submitted fields.
    pub fn into_draft(self) -> Result<TransactionDraft, Error> {
        TransactionDraft::new(
            self.name,
            self.amount,
            self.date,
            self.category,
            self.transaction_type,
            self.notes,
        )
    }
}

/// The values the form is pre-filled with.
pub(crate) struct FormValues<'a> {
    pub name: &'a str,
    pub amount: Option<f64>,
    pub date: Date,
    pub category: Category,
    pub transaction_type: TransactionType,
    pub notes: &'a str,
}

impl FormValues<'_> {
    /// An empty expense dated `today`, for the new transaction page.
    pub fn empty(today: Date) -> FormValues<'static> {
        FormValues {
            name: "",
            amount: None,
            date: today,
            category: Category::Groceries,
            transaction_type: TransactionType::Expense,
            notes: "",
        }
    }

    pub fn from_transaction(transaction: &Transaction) -> FormValues<'_> {
        FormValues {
            name: &transaction.name,
            amount: Some(transaction.amount),
            date: transaction.date,
            category: transaction.category,
            transaction_type: transaction.transaction_type,
            notes: &transaction.notes,
        }
    }
}

/// Render the transaction form.
///
/// `method_attr` decides whether submitting creates or updates, e.g.
/// `("hx-post", endpoints::POST_TRANSACTION)`.
pub(crate) fn transaction_form(
    method_attr: (&str, &str),
    submit_label: &str,
    max_date: Date,
    values: &FormValues,
) -> Markup {
    let (method, action) = method_attr;

    html! {
        form
            hx-post=[(method == "hx-post").then_some(action)]
            hx-put=[(method == "hx-put").then_some(action)]
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6 w-full"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }
                input
                    type="text"
                    name="name"
                    id="name"
                    placeholder="Weekly groceries"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    value=(values.name);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount (DZD)" }
                input
                    type="number"
                    name="amount"
                    id="amount"
                    min="0"
                    step="0.01"
                    placeholder="0.00"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=[values.amount];
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    type="date"
                    name="date"
                    id="date"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    max=(max_date)
                    value=(values.date);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in Category::ALL
                    {
                        option
                            value=(category.as_str())
                            selected[category == values.category]
                        {
                            (category.as_str())
                        }
                    }
                }
            }

            div
            {
                label class=(FORM_LABEL_STYLE) { "Type" }
                div class="flex gap-4"
                {
                    label class="flex items-center gap-2 text-sm text-gray-900 dark:text-white"
                    {
                        input
                            type="radio"
                            name="type"
                            value="expense"
                            checked[values.transaction_type == TransactionType::Expense];
                        "Expense"
                    }
                    label class="flex items-center gap-2 text-sm text-gray-900 dark:text-white"
                    {
                        input
                            type="radio"
                            name="type"
                            value="income"
                            checked[values.transaction_type == TransactionType::Income];
                        "Income"
                    }
                }
            }

            div
            {
                label for="notes" class=(FORM_LABEL_STYLE) { "Notes (optional)" }
                textarea
                    name="notes"
                    id="notes"
                    rows="2"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (values.notes)
                }
            }

            button
                type="submit" id="submit-button" tabindex="0"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                (submit_label)
            }
        }
    }
}
