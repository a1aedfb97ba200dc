//! Resume evaluation — the one flow this service exists for.
//!
//! Flow: read form → rasterize page 1 → JPEG → base64 → Gemini → text.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::Part;
use crate::pdf::ResumeImage;
use crate::state::AppState;

pub mod form;
pub mod handlers;
pub mod prompts;

/// Shown instead of an evaluation when a button is pressed without a file.
pub const MISSING_RESUME_MESSAGE: &str = "Please upload the resume";

/// The two canned evaluations offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    Review,
    PercentageMatch,
}

impl Evaluation {
    pub fn prompt(self) -> &'static str {
        match self {
            Evaluation::Review => prompts::REVIEW_PROMPT,
            Evaluation::PercentageMatch => prompts::PERCENTAGE_MATCH_PROMPT,
        }
    }

    /// Button label in the form.
    pub fn label(self) -> &'static str {
        match self {
            Evaluation::Review => "Tell Me About the Resume",
            Evaluation::PercentageMatch => "Percentage match",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Evaluation::Review => "review",
            Evaluation::PercentageMatch => "percentage_match",
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Evaluation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "review" => Ok(Evaluation::Review),
            "percentage_match" | "match" => Ok(Evaluation::PercentageMatch),
            other => Err(AppError::Validation(format!(
                "Unknown evaluation '{other}'; expected 'review' or 'percentage_match'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationOutcome {
    pub evaluation: Evaluation,
    pub response: String,
}

/// Runs one evaluation of an uploaded resume against a job description.
pub async fn evaluate_resume(
    state: &AppState,
    job_description: &str,
    pdf: Bytes,
    evaluation: Evaluation,
) -> Result<EvaluationOutcome, AppError> {
    let started = Instant::now();
    let pdf_len = pdf.len();

    let jpeg = state.rasterizer.first_page_jpeg(pdf).await?;
    let image = ResumeImage::from_jpeg(&jpeg);
    info!(
        "Resume rasterized: pdf={}B jpeg={}B evaluation={}",
        pdf_len,
        jpeg.len(),
        evaluation
    );

    let response = state
        .llm
        .generate(build_parts(job_description, &image, evaluation))
        .await?;

    info!(
        "Evaluation {} completed in {}ms ({} chars)",
        evaluation,
        started.elapsed().as_millis(),
        response.len()
    );

    Ok(EvaluationOutcome {
        evaluation,
        response,
    })
}

/// Job description, resume image, instruction prompt. A blank job description
/// is left out since the API rejects empty text parts.
fn build_parts<'a>(
    job_description: &'a str,
    image: &'a ResumeImage,
    evaluation: Evaluation,
) -> Vec<Part<'a>> {
    let mut parts = Vec::with_capacity(3);
    if !job_description.trim().is_empty() {
        parts.push(Part::Text {
            text: job_description,
        });
    }
    parts.push(Part::InlineData { inline_data: image });
    parts.push(Part::Text {
        text: evaluation.prompt(),
    });
    parts
}
