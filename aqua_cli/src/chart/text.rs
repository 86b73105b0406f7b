//! Static text chart, used when output is not an interactive terminal.

use aqua_core::CategoryTotals;

use super::{FOOTER, TITLE, X_LABEL, Y_LABEL};

const BAR_WIDTH: usize = 40;

/// Create a simple text bar for visualization.
fn create_bar(value: u64, max_value: u64, width: usize) -> String {
    if max_value == 0 {
        return "░".repeat(width);
    }

    let filled = ((value as f64 / max_value as f64) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Render totals as a plain horizontal bar chart
pub fn render(totals: &CategoryTotals) -> String {
    let max = totals.max();
    let mut output = String::new();

    output.push_str(&format!("{}\n{}\n\n{}\n", TITLE, FOOTER, Y_LABEL));
    for (category, total) in totals.entries() {
        output.push_str(&format!(
            "  {:<9}│{}│ {} L\n",
            category.name(),
            create_bar(total, max, BAR_WIDTH),
            total
        ));
    }
    output.push_str(&format!("{:>width$}\n", X_LABEL, width = 12 + X_LABEL.len()));

    output
}
