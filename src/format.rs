//! Format plans, sweep reports, and settings as text.

use crate::classify::{ClassificationResult, SweepPlan, Verdict};
use crate::config::SweepSettings;
use crate::sweep::{attachment_noun, DeletionOutcome, RelocationOutcome, SweepReport};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn verdict_label(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Relocate { destination } => format!("move to {}", destination),
        Verdict::BannerExempt => "banner (kept)".to_string(),
        Verdict::Referenced { note } => format!("referenced by {}", note),
        Verdict::NoSiblingNotes => "no sibling notes".to_string(),
        Verdict::Unreferenced => "not referenced".to_string(),
    }
}

fn scope_label(result: &ClassificationResult) -> String {
    match result.scope_key.as_deref() {
        Some("") => "(none)".to_string(),
        Some(key) => key.to_string(),
        None => "-".to_string(),
    }
}

fn results_table(results: &[ClassificationResult]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Attachment", "Scope", "Reason"]);
    for result in results {
        table.add_row(vec![
            result.file.path.clone(),
            scope_label(result),
            verdict_label(&result.verdict),
        ]);
    }
    table
}

/// Format a classification plan.
///
/// Used attachments are only listed when `include_used` is set.
pub fn format_plan_text(plan: &SweepPlan, include_used: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Attachment Scan")));
    out.push_str(&format!("  Notes indexed: {}\n", plan.notes_indexed));
    out.push_str(&format!("  Attachments: {}\n", plan.attachment_count()));
    out.push_str(&format!("  Used: {}\n", plan.used.len()));
    out.push_str(&format!("  Unused: {}\n", plan.unused.len()));
    out.push_str(&format!("  To relocate: {}\n", plan.relocate.len()));
    if plan.read_failures > 0 {
        out.push_str(&format!(
            "  Unreadable note reads: {}\n",
            plan.read_failures.yellow()
        ));
    }
    out.push('\n');

    if !plan.relocate.is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("Relocate")));
        out.push_str(&format!("{}\n\n", results_table(&plan.relocate)));
    }
    if !plan.unused.is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("Unused")));
        out.push_str(&format!("{}\n\n", results_table(&plan.unused)));
    }
    if include_used && !plan.used.is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("Used")));
        out.push_str(&format!("{}\n\n", results_table(&plan.used)));
    }
    out.trim_end().to_string()
}

/// Format the result of `clean`.
pub fn format_report_text(report: &SweepReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Sweep")));
    out.push_str(&format!(
        "  Attachments scanned: {}\n",
        report.plan.attachment_count()
    ));

    if !report.relocations.is_empty() {
        out.push('\n');
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["From", "To", "Result"]);
        for outcome in &report.relocations {
            let (from, to, status) = match outcome {
                RelocationOutcome::Moved { from, to } => (from, to, "moved".to_string()),
                RelocationOutcome::SkippedCollision { from, to } => {
                    (from, to, "skipped: destination exists".to_string())
                }
                RelocationOutcome::Failed { from, to, error } => {
                    (from, to, format!("failed: {}", error))
                }
                RelocationOutcome::Planned { from, to } => (from, to, "planned".to_string()),
            };
            table.add_row(vec![from.clone(), to.clone(), status]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if let DeletionOutcome::Completed { failed, .. } = &report.deletion {
        if !failed.is_empty() {
            out.push('\n');
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Not deleted", "Error"]);
            for failure in failed {
                table.add_row(vec![failure.path.clone(), failure.error.clone()]);
            }
            out.push_str(&format!("{}\n", table));
        }
    }

    out.push('\n');
    for notice in &report.notices {
        out.push_str(notice);
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Format effective sweep settings.
pub fn format_settings_text(settings: &SweepSettings, source: &str) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec![
        "move-banners-to-root".to_string(),
        settings.move_banners_to_root.to_string(),
    ]);
    table.add_row(vec!["note-extension".to_string(), settings.note_extension.clone()]);
    table.add_row(vec![
        "read-concurrency".to_string(),
        settings.read_concurrency.to_string(),
    ]);
    table.add_row(vec![
        "delete-mode".to_string(),
        format!("{:?}", settings.delete_mode).to_lowercase(),
    ]);
    format!(
        "{}\n\n{}\n\nVault settings file: {}",
        format_section_heading("Settings"),
        table,
        source
    )
}

/// One-line summary, e.g. for logs.
pub fn summarize_plan(plan: &SweepPlan) -> String {
    format!(
        "{} unused {}, {} to relocate, {} in use",
        plan.unused.len(),
        attachment_noun(plan.unused.len()),
        plan.relocate.len(),
        plan.used.len()
    )
}
