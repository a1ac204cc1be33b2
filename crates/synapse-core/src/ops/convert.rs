//! Simulated file format conversion

use super::{OperationKind, ProgressReporter, SimulatedOperation};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;

/// Formats a file with the given extension can be converted to
pub fn available_targets(format: &str) -> &'static [&'static str] {
    match format.trim_start_matches('.').to_lowercase().as_str() {
        "pdf" => &["docx", "txt", "html"],
        "docx" => &["pdf", "txt", "html"],
        "xlsx" => &["csv", "pdf"],
        "txt" => &["pdf", "docx"],
        "md" => &["pdf", "docx", "html"],
        _ => &[],
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub file_name: String,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    /// Build a request from a file name; the source format is its extension
    pub fn for_file(file_name: impl Into<String>, to: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let from = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        Self {
            file_name,
            from,
            to: to.into().trim_start_matches('.').to_lowercase(),
        }
    }

    pub fn is_supported(&self) -> bool {
        available_targets(&self.from).contains(&self.to.as_str())
    }

    fn output_name(&self) -> String {
        let stem = match self.file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => self.file_name.as_str(),
        };
        format!("{}.{}", stem, self.to)
    }
}

/// Result of a finished conversion. The workspace tree is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedFile {
    pub source: String,
    pub file_name: String,
    pub format: String,
}

/// Advances progress by `step` every `tick`, then settles before succeeding
#[derive(Debug, Clone)]
pub struct FormatConversion {
    tick: Duration,
    step: u8,
    settle: Duration,
}

impl FormatConversion {
    pub fn new(tick: Duration, step: u8, settle: Duration) -> Self {
        Self {
            tick,
            step: step.max(1),
            settle,
        }
    }
}

#[async_trait]
impl SimulatedOperation for FormatConversion {
    type Input = ConversionRequest;
    type Output = ConvertedFile;

    fn kind(&self) -> OperationKind {
        OperationKind::Conversion
    }

    async fn run(
        &self,
        request: ConversionRequest,
        progress: &ProgressReporter<ConvertedFile>,
    ) -> Result<ConvertedFile, String> {
        if !request.is_supported() {
            return Err(format!(
                "Cannot convert {} from {} to {}",
                request.file_name, request.from, request.to
            ));
        }

        let mut percent: u8 = 0;
        progress.report(percent);
        while percent < 100 {
            sleep(self.tick).await;
            percent = percent.saturating_add(self.step).min(100);
            progress.report(percent);
        }
        sleep(self.settle).await;

        Ok(ConvertedFile {
            file_name: request.output_name(),
            format: request.to,
            source: request.file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::start;
    use std::sync::Arc;

    fn conversion() -> Arc<FormatConversion> {
        Arc::new(FormatConversion::new(
            Duration::from_millis(200),
            10,
            Duration::from_millis(500),
        ))
    }

    #[test]
    fn test_conversion_table() {
        assert_eq!(available_targets("pdf"), &["docx", "txt", "html"]);
        assert_eq!(available_targets(".XLSX"), &["csv", "pdf"]);
        assert!(available_targets("png").is_empty());
    }

    #[test]
    fn test_request_from_file_name() {
        let request = ConversionRequest::for_file("Q4_Report.pdf", ".DOCX");
        assert_eq!(request.from, "pdf");
        assert_eq!(request.to, "docx");
        assert!(request.is_supported());
        assert_eq!(request.output_name(), "Q4_Report.docx");

        assert!(!ConversionRequest::for_file("Q4_Report.pdf", "csv").is_supported());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_runs_to_completion() {
        let started = tokio::time::Instant::now();
        let handle = start(conversion(), ConversionRequest::for_file("Q4_Report.pdf", "docx"));

        let mut seen = Vec::new();
        let converted = handle.wait_with_progress(|p| seen.push(p)).await.unwrap();

        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(converted.file_name, "Q4_Report.docx");
        assert_eq!(converted.format, "docx");
        // Ten ticks plus the settle delay
        assert!(started.elapsed() >= Duration::from_millis(2500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsupported_target_fails() {
        let handle = start(conversion(), ConversionRequest::for_file("notes.txt", "xlsx"));
        assert!(handle.wait().await.is_err());
    }
}
