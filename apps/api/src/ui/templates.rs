use minijinja::Environment;
use serde::Serialize;

use crate::evaluation::form::EvaluationForm;
use crate::evaluation::Evaluation;

pub const INDEX_TEMPLATE: &str = "index.html";

/// Compiles the page templates. `.html` names get HTML auto-escaping.
pub fn build_templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
    Ok(env)
}

#[derive(Debug, Serialize)]
pub struct ButtonView {
    pub value: &'static str,
    pub label: &'static str,
}

/// Everything the single page shows.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub job_description: String,
    pub uploaded: bool,
    pub uploaded_file_name: Option<String>,
    pub buttons: Vec<ButtonView>,
    pub warning: Option<&'static str>,
    pub response: Option<String>,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            job_description: String::new(),
            uploaded: false,
            uploaded_file_name: None,
            buttons: [Evaluation::Review, Evaluation::PercentageMatch]
                .into_iter()
                .map(|e| ButtonView {
                    value: e.as_str(),
                    label: e.label(),
                })
                .collect(),
            warning: None,
            response: None,
        }
    }
}

impl PageView {
    /// Echoes back what the user submitted.
    pub fn from_form(form: &EvaluationForm) -> Self {
        Self {
            job_description: form.job_description.clone(),
            uploaded: form.resume.is_some(),
            uploaded_file_name: form.resume.as_ref().and_then(|r| r.file_name.clone()),
            ..Self::default()
        }
    }
}

pub fn render_page(env: &Environment<'_>, view: &PageView) -> Result<String, minijinja::Error> {
    env.get_template(INDEX_TEMPLATE)?.render(view)
}
