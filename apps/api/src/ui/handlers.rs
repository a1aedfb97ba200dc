use axum::{
    extract::{Multipart, State},
    response::Html,
};
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::form::read_form;
use crate::evaluation::{evaluate_resume, MISSING_RESUME_MESSAGE};
use crate::state::AppState;
use crate::ui::templates::{render_page, PageView};

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(render_page(&state.templates, &PageView::default())?))
}

/// POST /
///
/// Re-renders the page with the outcome of whichever button was pressed.
/// A button pressed without a file shows a warning instead of calling the model.
pub async fn handle_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let form = read_form(multipart).await?;
    let mut view = PageView::from_form(&form);

    match (form.evaluation, form.resume) {
        (None, _) => {}
        (Some(evaluation), None) => {
            info!("Evaluation {evaluation} requested without a resume");
            view.warning = Some(MISSING_RESUME_MESSAGE);
        }
        (Some(evaluation), Some(resume)) => {
            let outcome =
                evaluate_resume(&state, &form.job_description, resume.bytes, evaluation).await?;
            view.response = Some(outcome.response);
        }
    }

    Ok(Html(render_page(&state.templates, &view)?))
}
