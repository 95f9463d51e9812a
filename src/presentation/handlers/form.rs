use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;

use crate::domain::{ConversationTurn, FormState, UploadedFile};

/// A parsed submission: the form state plus the optional PDF upload.
#[derive(Debug)]
pub struct Submission {
    pub form: FormState,
    pub file: Option<UploadedFile>,
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("failed to read multipart: {0}")]
    Multipart(#[from] MultipartError),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

fn invalid(field: &str, reason: impl Into<String>) -> FormError {
    FormError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Reads every multipart part. Blank enum fields fall back to defaults or
/// stay unset; unknown part names are ignored.
pub async fn read_submission(mut multipart: Multipart) -> Result<Submission, FormError> {
    let mut form = FormState::default();
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "pdf" {
            let filename = field.file_name().unwrap_or("upload.pdf").to_string();
            let content_type = field.content_type().map(String::from);
            let data = field.bytes().await?;
            if !data.is_empty() {
                tracing::debug!(filename = %filename, bytes = data.len(), "PDF part received");
                file = Some(UploadedFile::new(filename, content_type, data));
            }
            continue;
        }

        let value = field.text().await?;
        let trimmed = value.trim().to_string();

        match name.as_str() {
            "mode" if !trimmed.is_empty() => {
                form.mode = trimmed.parse().map_err(|e| invalid("mode", e))?;
            }
            "message" => form.chat.message = value,
            "topic" => form.study_plan.topic = value,
            "goal" => form.study_plan.goal = value,
            "current_level" if !trimmed.is_empty() => {
                form.study_plan.current_level =
                    Some(trimmed.parse().map_err(|e| invalid("current_level", e))?);
            }
            "learning_method" if !trimmed.is_empty() => {
                form.study_plan.learning_method =
                    Some(trimmed.parse().map_err(|e| invalid("learning_method", e))?);
            }
            "available_time_hours_per_week" if !trimmed.is_empty() => {
                let hours: f64 = trimmed.parse().map_err(|_| {
                    invalid("available_time_hours_per_week", "expected a number")
                })?;
                if !hours.is_finite() {
                    return Err(invalid("available_time_hours_per_week", "expected a number"));
                }
                // `max` keeps -0.0, which would render as "-0".
                let hours = if hours > 0.0 { hours } else { 0.0 };
                form.study_plan.available_time_hours_per_week = Some(hours);
            }
            "language" if !trimmed.is_empty() => {
                form.style.language = trimmed.parse().map_err(|e| invalid("language", e))?;
            }
            "tone" if !trimmed.is_empty() => {
                form.style.tone = trimmed.parse().map_err(|e| invalid("tone", e))?;
            }
            "history" if !trimmed.is_empty() => {
                form.history = serde_json::from_str::<Vec<ConversationTurn>>(&trimmed)
                    .map_err(|e| invalid("history", e.to_string()))?;
            }
            _ => {}
        }
    }

    Ok(Submission { form, file })
}
