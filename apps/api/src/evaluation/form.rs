use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::evaluation::Evaluation;

/// Multipart field names shared by the HTML form and the JSON endpoint.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const RESUME_FIELD: &str = "resume";
pub const ACTION_FIELD: &str = "action";

#[derive(Debug)]
pub struct UploadedResume {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct EvaluationForm {
    pub job_description: String,
    /// `None` when no file was chosen. Browsers still send an empty part then.
    pub resume: Option<UploadedResume>,
    /// Which button was pressed, if any.
    pub evaluation: Option<Evaluation>,
}

pub async fn read_form(mut multipart: Multipart) -> Result<EvaluationForm, AppError> {
    let mut form = EvaluationForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            JOB_DESCRIPTION_FIELD => form.job_description = field.text().await?,
            RESUME_FIELD => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                let bytes = field.bytes().await?;
                form.resume = (!bytes.is_empty()).then_some(UploadedResume { file_name, bytes });
            }
            ACTION_FIELD => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    form.evaluation = Some(value.parse()?);
                }
            }
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}
