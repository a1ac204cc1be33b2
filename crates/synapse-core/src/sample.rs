//! Built-in sample workspace used when no manifest is configured

use chrono::NaiveDate;
use std::collections::HashMap;
use synapse_types::{FileMetadata, Node};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// The default "Workspace" tree and its metadata side-table
pub fn sample_workspace() -> (Node, HashMap<String, FileMetadata>) {
    let root = Node::folder(
        "root",
        "Workspace",
        vec![
            Node::folder(
                "1",
                "Documents",
                vec![
                    Node::file("1-1", "Q4_Report.pdf"),
                    Node::file("1-2", "Budget_2024.xlsx"),
                    Node::file("1-3", "Meeting_Notes.docx"),
                ],
            ),
            Node::folder(
                "2",
                "Research",
                vec![
                    Node::file("2-1", "AI_Analysis.pdf"),
                    Node::file("2-2", "Data_Summary.txt"),
                ],
            ),
            Node::file("3", "Project_Brief.md"),
        ],
    );

    let metadata = HashMap::from([
        (
            "1-1".to_string(),
            FileMetadata::new(
                "Fourth quarter financial report covering revenue growth, operating costs and regional performance.",
                date(2024, 1, 15),
                "2.4 MB",
            )
            .with_tags(["finance", "quarterly", "report"]),
        ),
        (
            "1-2".to_string(),
            FileMetadata::new(
                "Annual spending plan with departmental allocations and forecast assumptions.",
                date(2024, 2, 3),
                "856 KB",
            )
            .with_tags(["finance", "planning"]),
        ),
        (
            "1-3".to_string(),
            FileMetadata::new(
                "Notes from the weekly team meeting: action items, owners and deadlines.",
                date(2024, 3, 12),
                "124 KB",
            )
            .with_tags(["meetings"]),
        ),
        (
            "2-1".to_string(),
            FileMetadata::new(
                "Analysis of machine learning adoption across the industry with model benchmarks.",
                date(2023, 11, 20),
                "3.1 MB",
            )
            .with_tags(["ai", "research"]),
        ),
        (
            "2-2".to_string(),
            FileMetadata::new(
                "Summary statistics for the customer dataset, including churn and retention figures.",
                date(2023, 12, 8),
                "45 KB",
            )
            .with_tags(["data", "research"]),
        ),
        (
            "3".to_string(),
            FileMetadata::new(
                "Project brief outlining goals, scope, milestones and stakeholders.",
                date(2024, 1, 5),
                "18 KB",
            )
            .with_tags(["project", "overview"]),
        ),
    ]);

    (root, metadata)
}
