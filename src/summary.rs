//! Per-category totals and the pie chart geometry derived from them.

use crate::models::{Category, Expense};

pub const PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Sums amounts per category, keeping categories in first-seen order.
///
/// Amounts that do not parse are skipped.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        let Ok(amount) = expense.amount.trim().parse::<f64>() else {
            log::warn!(
                "expense {} has a non-numeric amount '{}'",
                expense.id,
                expense.amount
            );
            continue;
        };
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => entry.total += amount,
            None => totals.push(CategoryTotal {
                category: expense.category,
                total: amount,
            }),
        }
    }
    totals
}

/// One wedge of the pie, drawn as a dashed stroke on a circle.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub category: Category,
    pub total: f64,
    pub fraction: f64,
    pub color: &'static str,
    /// Visible stroke length.
    pub dash: f64,
    /// Where the stroke starts along the circumference.
    pub offset: f64,
}

pub fn pie_slices(totals: &[CategoryTotal], circumference: f64) -> Vec<PieSlice> {
    let sum: f64 = totals.iter().map(|t| t.total).sum();
    if sum <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    totals
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let fraction = entry.total / sum;
            let dash = fraction * circumference;
            let slice = PieSlice {
                category: entry.category,
                total: entry.total,
                fraction,
                color: PALETTE[idx % PALETTE.len()],
                dash,
                offset: start,
            };
            start += dash;
            slice
        })
        .collect()
}

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$1,234.50` style label for chart legends.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, format_with_commas(cents / 100), cents % 100)
}
