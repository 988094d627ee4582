// src/core/service_client.rs
//! HTTP client for the resume scoring service

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{error, info, trace};

use crate::error::SubmissionError;
use crate::types::{HealthStatus, ScoringResponse, UploadFile};

const RATER_ENDPOINT: &str = "/rater";
const HEALTH_ENDPOINT: &str = "/health";

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// The network boundary the submission controller talks to.
#[async_trait]
pub trait ScoringEndpoint: Send + Sync {
    /// Send one document and job description, get back the analysis.
    async fn score(
        &self,
        file: &UploadFile,
        job_description: &str,
    ) -> Result<ScoringResponse, SubmissionError>;
}

pub struct ScoringClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScoringClient {
    /// No client-side timeout: the transport's own error behavior applies.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the scoring service is up
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}{}", self.base_url, HEALTH_ENDPOINT);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<HealthStatus>()
                .await
                .context("Failed to parse health response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
    }

    fn build_form(file: &UploadFile, job_description: &str) -> Result<Form, SubmissionError> {
        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|e| SubmissionError::Transport(format!("Failed to create multipart: {}", e)))?;

        Ok(Form::new()
            .part(RESUME_FIELD, part)
            .text(JOB_DESCRIPTION_FIELD, job_description.to_string()))
    }
}

#[async_trait]
impl ScoringEndpoint for ScoringClient {
    async fn score(
        &self,
        file: &UploadFile,
        job_description: &str,
    ) -> Result<ScoringResponse, SubmissionError> {
        let url = format!("{}{}", self.base_url, RATER_ENDPOINT);
        let form = Self::build_form(file, job_description)?;

        info!(
            "Calling resume scoring service: {} (file: {}, {} bytes, job description: {} chars)",
            url,
            file.name,
            file.size(),
            job_description.chars().count()
        );

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("Scoring service error response {}: {}", status, error_text);
            return Err(SubmissionError::HttpStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let response_text = response.text().await?;
        trace!("Raw scoring service response: {}", response_text);

        ScoringResponse::parse(&response_text)
    }
}
