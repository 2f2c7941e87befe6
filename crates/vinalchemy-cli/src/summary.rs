use std::path::Path;

use vinalchemy_core::{COLUMNS, WineRecord};
use vinalchemy_generate::GenerationReport;

/// Console summary printed after a run: size, columns, a few rows and
/// where the CSV went.
pub fn render_summary(
    records: &[WineRecord],
    report: &GenerationReport,
    out: &Path,
    bytes: u64,
    preview: usize,
) -> String {
    let mut text = format!(
        "Generated {} rows (incl. ~5% duplicates)\n",
        records.len()
    );
    text.push_str(&format!("Columns: {}\n", COLUMNS.join(", ")));

    let shown = preview.min(records.len());
    if shown > 0 {
        text.push_str(&format!("\nFirst {shown} rows:\n"));
        text.push_str(&format!("{}\n", COLUMNS.join(" | ")));
        for record in records.iter().take(shown) {
            text.push_str(&format!("{}\n", record.csv_fields().join(" | ")));
        }
    }

    if !report.is_clean() {
        text.push_str(&format!(
            "\nWarning: {} dataset check(s) failed, see the logs\n",
            report.violations.len()
        ));
    }

    text.push_str(&format!("\nSaved to {} ({bytes} bytes)\n", out.display()));
    text
}
