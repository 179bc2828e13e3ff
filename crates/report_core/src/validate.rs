use thiserror::Error;

use crate::cascade::detail_indicator_required;
use crate::{Field, UserInput};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' must be selected or filled in.")]
    MissingField(Field),
}

/// Checks required fields in declared order and stops at the first blank one.
pub fn validate_input(input: &UserInput) -> Result<(), ValidationError> {
    for field in Field::ALL {
        if !input.get(field).trim().is_empty() {
            continue;
        }
        if field == Field::EvaluationDetailIndicator && !detail_indicator_required(input) {
            continue;
        }
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}
