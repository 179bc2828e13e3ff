//! Cascading selection fields.
//!
//! Two independent chains: objective → initiative → task and
//! category → indicator → detailed indicator. A child's options are a pure
//! function of its parent's current value, so they are computed on read and
//! never stored.

use crate::catalog::{
    lookup, DETAILS_BY_INDICATOR, EVALUATION_CATEGORIES, INDICATORS_BY_CATEGORY,
    INITIATIVES_BY_OBJECTIVE, NATIONAL_OBJECTIVES, TASKS_BY_INITIATIVE,
};
use crate::{Field, UserInput};

/// Options currently available for `field`. Free-text fields have none.
pub fn options_for(field: Field, input: &UserInput) -> &'static [&'static str] {
    match field {
        Field::NationalObjective => NATIONAL_OBJECTIVES,
        Field::StrategicInitiative => lookup(INITIATIVES_BY_OBJECTIVE, &input.national_objective),
        Field::NationalTask => lookup(TASKS_BY_INITIATIVE, &input.strategic_initiative),
        Field::EvaluationCategory => EVALUATION_CATEGORIES,
        Field::EvaluationIndicator => lookup(INDICATORS_BY_CATEGORY, &input.evaluation_category),
        Field::EvaluationDetailIndicator => {
            lookup(DETAILS_BY_INDICATOR, &input.evaluation_indicator)
        }
        Field::CoreActivity
        | Field::InnovativeMeans
        | Field::OrganizationalPerformance
        | Field::BeneficiaryPerformance => &[],
    }
}

/// Fields that depend on `field`, nearest first.
pub fn descendants(field: Field) -> &'static [Field] {
    match field {
        Field::NationalObjective => &[Field::StrategicInitiative, Field::NationalTask],
        Field::StrategicInitiative => &[Field::NationalTask],
        Field::EvaluationCategory => &[
            Field::EvaluationIndicator,
            Field::EvaluationDetailIndicator,
        ],
        Field::EvaluationIndicator => &[Field::EvaluationDetailIndicator],
        _ => &[],
    }
}

/// Sets `field` and clears its descendants in one step. Returns whether the
/// input changed.
pub fn apply_field_change(input: &mut UserInput, field: Field, value: String) -> bool {
    if input.get(field) == value {
        return false;
    }
    *input.slot_mut(field) = value;
    for child in descendants(field) {
        input.slot_mut(*child).clear();
    }
    true
}

/// The detailed indicator may stay empty when the selected indicator has no
/// breakdown.
pub fn detail_indicator_required(input: &UserInput) -> bool {
    !options_for(Field::EvaluationDetailIndicator, input).is_empty()
}
