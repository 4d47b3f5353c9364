//! Output records of an analysis run.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// File names of every input document
    pub input_documents: Vec<String>,
    /// Persona description
    pub persona: String,
    /// Job to be done
    pub job_to_be_done: String,
    /// ISO-8601 local timestamp
    pub processing_timestamp: String,
}

impl Metadata {
    /// Create metadata stamped with the given time.
    pub fn new(
        input_documents: Vec<String>,
        persona: impl Into<String>,
        job: impl Into<String>,
        at: DateTime<Local>,
    ) -> Self {
        Self {
            input_documents,
            persona: persona.into(),
            job_to_be_done: job.into(),
            processing_timestamp: format_timestamp(at),
        }
    }
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.ffffff` in local time.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// The winning section of one document, with its global rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Document file name
    pub document: String,
    /// Heading text of the section
    pub section_title: String,
    /// Dense rank, 1 is most relevant
    pub importance_rank: usize,
    /// Page index (0-based)
    pub page_number: usize,
}

/// Cleaned body text found beneath a ranked section's heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Document file name
    pub document: String,
    /// Cleaned text, never empty
    pub refined_text: String,
    /// Page index (0-based)
    pub page_number: usize,
}

/// The complete JSON report of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: Metadata,
    pub extracted_sections: Vec<RankedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(format_timestamp(at), "2024-03-09T14:05:07.000000");
    }

    #[test]
    fn test_report_field_names() {
        let at = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let report = AnalysisReport {
            metadata: Metadata::new(vec!["a.pdf".into()], "Travel Planner", "Plan", at),
            extracted_sections: vec![RankedSection {
                document: "a.pdf".into(),
                section_title: "Nightlife".into(),
                importance_rank: 1,
                page_number: 3,
            }],
            subsection_analysis: vec![],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["metadata"]["job_to_be_done"], "Plan");
        assert_eq!(value["extracted_sections"][0]["importance_rank"], 1);
        assert_eq!(value["extracted_sections"][0]["page_number"], 3);
        assert!(value["extracted_sections"][0].get("score").is_none());
        assert!(value["subsection_analysis"].as_array().unwrap().is_empty());
    }
}
