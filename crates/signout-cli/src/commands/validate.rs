//! The `signout validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(submission_path: PathBuf) -> Result<()> {
    let draft = super::load_submission(&submission_path)?;

    println!(
        "Submission valid: case {} ({})",
        draft.case_id, draft.illness_severity
    );

    for (label, items) in [
        ("action_list", &draft.action_list),
        ("situational_awareness", &draft.situational_awareness),
        ("contingency_plans", &draft.contingency_plans),
    ] {
        println!("{label} ({} items)", items.len());
        for item in items {
            println!("  - {item}");
        }
    }

    if draft.patient_summary.trim().is_empty() {
        println!("WARNING: patient_summary is empty");
    }
    if draft.receiver_synthesis.trim().is_empty() {
        println!("WARNING: receiver_synthesis is empty");
    }

    Ok(())
}
