use crate::domain::{FieldId, FormState, Mode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field is empty: {0}")]
    MissingField(FieldId),
}

/// Presence check for the fields of the active mode. Only applied when
/// strict validation is switched on; the default policy is lenient.
pub fn validate_form(form: &FormState) -> Result<(), ValidationError> {
    match form.mode {
        Mode::Chat => {
            if form.chat.message.trim().is_empty() {
                return Err(ValidationError::MissingField(FieldId::Message));
            }
        }
        Mode::StudyPlan => {
            let plan = &form.study_plan;
            if plan.topic.trim().is_empty() {
                return Err(ValidationError::MissingField(FieldId::Topic));
            }
            if plan.current_level.is_none() {
                return Err(ValidationError::MissingField(FieldId::CurrentLevel));
            }
            if plan.available_time_hours_per_week.is_none() {
                return Err(ValidationError::MissingField(
                    FieldId::AvailableTimeHoursPerWeek,
                ));
            }
            if plan.learning_method.is_none() {
                return Err(ValidationError::MissingField(FieldId::LearningMethod));
            }
            if plan.goal.trim().is_empty() {
                return Err(ValidationError::MissingField(FieldId::Goal));
            }
        }
    }
    Ok(())
}
