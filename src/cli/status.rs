//! Status commands: request a change, finish the completion flow.

use std::fs;
use std::path::Path;

use tome::flow::{self, DetourOutcome, Executed, Plan};
use tome::model::{Deadline, ReviewData, Status};
use tome::transition::{self, Decision};

use super::document;
use super::format::{format_decision, format_step};

fn load_reviews(path: Option<&Path>) -> Result<ReviewData, String> {
    let Some(path) = path else {
        return Ok(ReviewData::default());
    };
    let json = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("invalid reviews in {}: {e}", path.display()))
}

pub(super) fn cmd_status(
    file: &Path,
    target: Status,
    reviews: Option<&Path>,
    answer: Option<bool>,
    out: Option<&Path>,
) -> Result<(), String> {
    let mut deadline = document::load(file)?;
    let reviews = load_reviews(reviews)?;
    let current = deadline.current_status();

    let decision = flow::request(&deadline, target, &reviews).map_err(|e| e.to_string())?;
    eprintln!("{}", format_decision(current, target, &decision));

    let plan = match (&decision, answer) {
        (Decision::Confirm(confirmation), Some(yes)) => {
            flow::answer(confirmation, yes).map_err(|e| e.to_string())?
        }
        (Decision::Confirm(_), None) => return print_decision(&decision),
        _ => Plan::from_decision(&decision).unwrap_or_default(),
    };

    apply(&mut deadline, &plan, out)
}

pub(super) fn cmd_finish(
    file: &Path,
    target: Status,
    final_progress: Option<u32>,
    review: bool,
    out: Option<&Path>,
) -> Result<(), String> {
    let mut deadline = document::load(file)?;
    let current = deadline.current_status();
    let progress = deadline.current_progress();

    let decision = transition::classify(current, target, progress, deadline.total_quantity, &[])
        .map_err(|e| e.to_string())?;
    let Decision::Detour(detour) = decision else {
        return Err(format!("no completion flow for {current} → {target}"));
    };

    let outcome = if review {
        DetourOutcome::AwaitReviews { final_progress }
    } else {
        DetourOutcome::Finalize { final_progress }
    };
    let plan = flow::finish_detour(&detour, outcome, progress, deadline.total_quantity)
        .map_err(|e| e.to_string())?;

    apply(&mut deadline, &plan, out)
}

/// Run a plan against the document and emit the result.
fn apply(deadline: &mut Deadline, plan: &Plan, out: Option<&Path>) -> Result<(), String> {
    if plan.is_empty() {
        eprintln!("Nothing changed");
        return Ok(());
    }

    let id = deadline.id;
    match flow::execute(deadline, id, plan).map_err(|e| e.to_string())? {
        Executed::Done { .. } => {
            for step in &plan.steps {
                eprintln!("  {}", format_step(step));
            }
            document::emit(deadline, out)
        }
        Executed::Detoured(detour) => {
            eprintln!(
                "Completion flow needed: run `tome finish <file> {}`",
                detour.requested.as_str().replace('_', "-")
            );
            Ok(())
        }
    }
}

fn print_decision(decision: &Decision) -> Result<(), String> {
    let json = serde_json::to_string_pretty(decision)
        .map_err(|e| format!("failed to serialize decision: {e}"))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_reviews_path_means_none() {
        assert_eq!(load_reviews(None).unwrap(), ReviewData::default());
    }

    #[test]
    fn reads_reviews_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reviews.json");
        fs::write(
            &path,
            r#"{"platforms":[{"id":"ng","platformName":"NetGalley","posted":false,"postedDate":null,"reviewUrl":null}]}"#,
        )
        .unwrap();

        let reviews = load_reviews(Some(&path)).unwrap();
        assert_eq!(reviews.unposted(), vec!["NetGalley".to_string()]);
        assert!(!reviews.is_loading);
    }
}
