// src/types/upload.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::error::ValidationError;
use crate::utils::{content_type_for, format_file_size};

/// A document picked by the user, held in memory until submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content: Vec<u8>,
    pub media_type: String,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = content_type_for(&name).to_string();
        Self {
            name,
            content,
            media_type,
        }
    }

    /// Load a document from disk, naming it after the file.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .with_context(|| format!("Invalid file name: {}", path.display()))?;

        Ok(Self::new(name, content))
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            size: format_file_size(self.size()),
        }
    }
}

/// Metadata displayed next to the file picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size: String,
}

/// Everything needed for one scoring request.
#[derive(Debug, Clone, Default)]
pub struct SubmissionRequest {
    pub file: Option<UploadFile>,
    pub job_description: String,
}

impl SubmissionRequest {
    pub fn new(file: Option<UploadFile>, job_description: impl Into<String>) -> Self {
        Self {
            file,
            job_description: job_description.into(),
        }
    }

    /// Split into file and job description, or report what is missing.
    pub fn validate(self) -> Result<(UploadFile, String), ValidationError> {
        let file = self.file.ok_or(ValidationError::MissingFile)?;
        if self.job_description.trim().is_empty() {
            return Err(ValidationError::BlankJobDescription);
        }
        Ok((file, self.job_description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_info_uses_human_readable_size() {
        let file = UploadFile::new("resume.pdf", vec![0u8; 1536]);
        assert_eq!(file.media_type, "application/pdf");
        assert_eq!(
            file.info(),
            FileInfo {
                name: "resume.pdf".to_string(),
                size: "1.50 KB".to_string(),
            }
        );
    }

    #[test]
    fn validate_requires_file_first() {
        let request = SubmissionRequest::new(None, "   ");
        assert_eq!(request.validate().unwrap_err(), ValidationError::MissingFile);
    }

    #[test]
    fn validate_rejects_whitespace_description() {
        let file = UploadFile::new("resume.pdf", vec![1, 2, 3]);
        let request = SubmissionRequest::new(Some(file), " \n\t ");
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::BlankJobDescription
        );
    }

    #[test]
    fn validate_keeps_description_verbatim() {
        let file = UploadFile::new("resume.pdf", vec![1, 2, 3]);
        let (file, description) = SubmissionRequest::new(Some(file), " Senior Engineer ")
            .validate()
            .unwrap();
        assert_eq!(file.name, "resume.pdf");
        assert_eq!(description, " Senior Engineer ");
    }

    #[tokio::test]
    async fn from_path_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.docx");
        std::fs::write(&path, b"docx bytes").unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "cv.docx");
        assert_eq!(file.size(), 10);
        assert!(file.media_type.contains("wordprocessingml"));
    }
}
