//! End-to-end inventory workflow tests: scan, summarize, write the report.

use std::path::PathBuf;

use tempfile::TempDir;

use ranger_tools::inventory::{scan, summarize_extensions};
use ranger_tools::report::ReportWriter;

fn create_test_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    std::fs::create_dir_all(root.join("docs/archive")).unwrap();

    std::fs::write(root.join("video.mkv"), vec![0u8; 1_500_000]).unwrap();
    std::fs::write(root.join("docs/report.pdf"), vec![0u8; 80_000]).unwrap();
    std::fs::write(root.join("docs/archive/old.pdf"), vec![0u8; 20_000]).unwrap();
    std::fs::write(root.join("docs/notes.txt"), vec![0u8; 750]).unwrap();

    temp_dir
}

#[test]
fn test_report_lists_every_file_with_formatted_sizes() {
    let temp_dir = create_test_tree();
    let output = temp_dir.path().join("outputs/map_files.txt");

    let entries = scan(temp_dir.path(), None).unwrap();
    let summaries = summarize_extensions(&entries);
    ReportWriter::new(output.clone())
        .write(temp_dir.path(), &entries, &summaries)
        .unwrap();

    let report = std::fs::read_to_string(&output).unwrap();

    assert!(report.contains("video.mkv"));
    assert!(report.contains("report.pdf"));
    assert!(report.contains("old.pdf"));
    assert!(report.contains("notes.txt"));

    assert!(report.contains("1.5 MB"));
    assert!(report.contains("80.0 KB"));
    assert!(report.contains("750 B"));

    // Sorted by raw size descending
    let mkv_at = report.find("video.mkv").unwrap();
    let pdf_at = report.find("report.pdf").unwrap();
    let txt_at = report.find("notes.txt").unwrap();
    assert!(mkv_at < pdf_at);
    assert!(pdf_at < txt_at);
}

#[test]
fn test_report_summary_aggregates_per_extension() {
    let temp_dir = create_test_tree();

    let entries = scan(temp_dir.path(), None).unwrap();
    let summaries = summarize_extensions(&entries);

    // .pdf leads: two files beat one regardless of size
    assert_eq!(summaries[0].extension, ".pdf");
    assert_eq!(summaries[0].count, 2);
    assert_eq!(summaries[0].total_size, 100_000);

    let total: u64 = summaries.iter().map(|s| s.total_size).sum();
    let scanned: u64 = entries.iter().map(|e| e.size).sum();
    assert_eq!(total, scanned);
}

#[test]
fn test_extension_filter_narrows_scan_and_report() {
    let temp_dir = create_test_tree();
    let output = temp_dir.path().join("filtered.txt");

    let entries = scan(temp_dir.path(), Some("pdf")).unwrap();
    assert_eq!(entries.len(), 2);

    let summaries = summarize_extensions(&entries);
    ReportWriter::new(output.clone())
        .write(temp_dir.path(), &entries, &summaries)
        .unwrap();

    let report = std::fs::read_to_string(&output).unwrap();
    assert!(report.contains("report.pdf"));
    assert!(!report.contains("video.mkv"));
}

#[test]
fn test_report_writer_creates_output_directory() {
    let temp_dir = create_test_tree();
    let output: PathBuf = temp_dir.path().join("deep/nested/outputs/map_files.txt");

    let entries = scan(temp_dir.path(), None).unwrap();
    let summaries = summarize_extensions(&entries);
    ReportWriter::new(output.clone())
        .write(temp_dir.path(), &entries, &summaries)
        .unwrap();

    assert!(output.exists());
}
