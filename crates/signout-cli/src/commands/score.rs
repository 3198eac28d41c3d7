//! The `signout score` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use signout_core::model::HandoffRecord;
use signout_core::rubric::{self, RubricResult};

pub fn execute(submission_path: PathBuf, format: String) -> Result<()> {
    let draft = super::load_submission(&submission_path)?;
    let record = HandoffRecord::new(draft);
    let result = rubric::score(&record);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", result.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => print_text(&record, &result),
    }

    Ok(())
}

fn print_text(record: &HandoffRecord, result: &RubricResult) {
    println!(
        "Case {} ({}), rubric {}",
        record.case_id, record.illness_severity, result.rubric_version
    );

    let mut table = Table::new();
    table.set_header(vec!["Domain", "Score", "Max"]);
    for (domain, score) in &result.subscores {
        table.add_row(vec![
            Cell::new(domain),
            Cell::new(score),
            Cell::new(domain.max_score()),
        ]);
    }
    table.add_row(vec![
        Cell::new("total"),
        Cell::new(result.total_score),
        Cell::new(RubricResult::max_total()),
    ]);
    println!("{table}");

    for (heading, notes) in [
        ("Missing critical", &result.missing_critical),
        ("Strengths", &result.strengths),
        ("Improvements", &result.improvements),
    ] {
        if notes.is_empty() {
            continue;
        }
        println!("\n{heading}:");
        for note in notes {
            println!("  - {note}");
        }
    }
}
