//! CSV rendering of expense reports.

use anyhow::{Context, Result};
use csv::Writer;

use super::aggregation::CategoryIndex;
use super::models::Expense;

pub const CSV_HEADER: [&str; 6] = ["date", "name", "category", "amount", "payment_method", "description"];

/// File name for a report over `[start_date, end_date]`
pub fn csv_filename(start_date: &str, end_date: &str) -> String {
    format!("expenses-{}-{}.csv", start_date, end_date)
}

/// Render expenses as CSV, one row each, in the order given
pub fn render_expenses_csv(expenses: &[&Expense], categories: &CategoryIndex<'_>) -> Result<String> {
    let mut csv_writer = Writer::from_writer(Vec::new());

    csv_writer.write_record(CSV_HEADER)?;

    for expense in expenses {
        let category = categories.label(&expense.category_id);
        csv_writer.write_record([
            expense.date.as_str(),
            expense.name.as_str(),
            category.name.as_str(),
            format!("{:.2}", expense.amount).as_str(),
            expense.payment_method.as_str(),
            expense.description.as_deref().unwrap_or(""),
        ])?;
    }

    csv_writer.flush()?;
    let bytes = csv_writer.into_inner().context("Failed to finish CSV document")?;
    String::from_utf8(bytes).context("CSV document is not valid UTF-8")
}
