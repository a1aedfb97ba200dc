// Browser-facing single page: the job description form and its results.

pub mod handlers;
pub mod templates;
