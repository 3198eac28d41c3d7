//! The `signout init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing("signout.toml", SAMPLE_CONFIG)?;
    write_if_missing("sample-signout.json", SAMPLE_SUBMISSION)?;

    println!("\nNext steps:");
    println!("  1. Point cases_file in signout.toml at your case catalog");
    println!("  2. Run: signout score --submission sample-signout.json");
    println!("  3. Run: signout serve");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content).with_context(|| format!("failed to write {path}"))?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# signout configuration

bind_addr = "127.0.0.1:8000"
cases_file = "data/cases.json"
default_page_limit = 50
max_page_limit = 200
allowed_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]
"#;

const SAMPLE_SUBMISSION: &str = r#"{
  "case_id": "case-001",
  "illness_severity": "Watcher",
  "patient_summary": "68F admitted for urosepsis, febrile overnight, on IV ceftriaxone",
  "action_list": "Follow up blood cultures\nRecheck lactate at 2200",
  "situational_awareness": ["Borderline BP, trending down", "Daughter is the contact"],
  "contingency_plans": ["If MAP < 65 after 2L fluids, call ICU"],
  "receiver_synthesis": "I will recheck the lactate and page ICU if pressures drop",
  "free_text": null
}
"#;
