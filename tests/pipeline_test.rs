//! End-to-end tests over directories of generated PDFs.

mod common;

use docsift::{AnalyzeOptions, Analyzer, Docsift, HashedEmbedder, JsonFormat};
use tempfile::TempDir;

const PERSONA: &str = "Travel Planner";
const JOB: &str = "Plan a trip of 4 days for a group of 10 college friends.";

fn three_documents(dir: &std::path::Path) {
    common::single_topic(
        dir,
        "a_cuisine.pdf",
        "Local Cuisine",
        "Taste bouillabaisse and socca near the harbor.",
    );
    common::single_topic(
        dir,
        "b_group_trips.pdf",
        "Group Trip Tips for Friends",
        "Book shared apartments early for large groups.",
    );
    common::single_topic(
        dir,
        "c_history.pdf",
        "Roman History",
        "Amphitheaters and aqueducts dot the region.",
    );
}

#[test]
fn test_end_to_end_report() {
    let dir = TempDir::new().unwrap();
    three_documents(dir.path());

    let run = Docsift::new().analyze(dir.path(), PERSONA, JOB).unwrap();
    let report = &run.report;
    assert!(run.failures.is_empty());

    assert_eq!(
        report.metadata.input_documents,
        vec!["a_cuisine.pdf", "b_group_trips.pdf", "c_history.pdf"]
    );
    assert_eq!(report.metadata.persona, PERSONA);
    assert_eq!(report.metadata.job_to_be_done, JOB);

    assert_eq!(report.extracted_sections.len(), 3);
    let mut ranks: Vec<usize> = report
        .extracted_sections
        .iter()
        .map(|s| s.importance_rank)
        .collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert!(report.subsection_analysis.len() <= 3);
    assert!(report
        .subsection_analysis
        .iter()
        .all(|s| !s.refined_text.trim().is_empty()));
}

#[test]
fn test_best_match_ranks_first_and_is_refined() {
    let dir = TempDir::new().unwrap();
    three_documents(dir.path());

    let run = Docsift::new().analyze(dir.path(), PERSONA, JOB).unwrap();
    let top = &run.report.extracted_sections[0];
    assert_eq!(top.document, "b_group_trips.pdf");
    assert_eq!(top.importance_rank, 1);
    assert_eq!(top.page_number, 0);

    let refined = run
        .report
        .subsection_analysis
        .iter()
        .find(|s| s.document == "b_group_trips.pdf")
        .unwrap();
    assert!(refined.refined_text.contains("apartments"));
    assert!(!refined.refined_text.contains("Field Notes"));
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = TempDir::new().unwrap();
    three_documents(dir.path());
    let embedder = HashedEmbedder::default();

    let sequential = Analyzer::new(&embedder)
        .analyze_dir(dir.path(), PERSONA, JOB)
        .unwrap();
    let parallel = Analyzer::with_options(&embedder, AnalyzeOptions::new().with_parallel(true))
        .analyze_dir(dir.path(), PERSONA, JOB)
        .unwrap();

    assert_eq!(
        sequential.report.extracted_sections,
        parallel.report.extracted_sections
    );
    assert_eq!(
        sequential.report.subsection_analysis,
        parallel.report.subsection_analysis
    );
}

#[test]
fn test_broken_document_does_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    three_documents(dir.path());
    std::fs::write(dir.path().join("0_broken.pdf"), "not really a pdf").unwrap();

    let run = Docsift::new().analyze(dir.path(), PERSONA, JOB).unwrap();
    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.failures[0].document, "0_broken.pdf");
    assert_eq!(run.report.metadata.input_documents.len(), 4);
    assert_eq!(run.report.extracted_sections.len(), 3);
}

#[test]
fn test_heading_without_body_has_no_subsection() {
    let dir = TempDir::new().unwrap();
    common::write_pdf(
        &dir.path().join("only_heading.pdf"),
        &[vec![common::item("Group Trip Checklist", 18, 40)]],
    );

    let run = Docsift::new().analyze(dir.path(), PERSONA, JOB).unwrap();
    assert_eq!(run.report.extracted_sections.len(), 1);
    assert_eq!(
        run.report.extracted_sections[0].section_title,
        "Group Trip Checklist"
    );
    assert!(run.report.subsection_analysis.is_empty());
}

#[test]
fn test_report_json_layout() {
    let dir = TempDir::new().unwrap();
    three_documents(dir.path());

    let json = Docsift::new()
        .analyze(dir.path(), PERSONA, JOB)
        .unwrap()
        .to_json(JsonFormat::Pretty)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let mut keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["extracted_sections", "metadata", "subsection_analysis"]
    );
    let timestamp = value["metadata"]["processing_timestamp"].as_str().unwrap();
    assert_eq!(timestamp.len(), "2024-01-01T00:00:00.000000".len());
    assert_eq!(&timestamp[10..11], "T");
}
