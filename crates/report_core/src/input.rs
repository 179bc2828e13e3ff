use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference document passed through to the generator untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    /// Base64-encoded file contents.
    pub data: String,
}

/// Every editable text field of the input form, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    NationalObjective,
    StrategicInitiative,
    NationalTask,
    EvaluationCategory,
    EvaluationIndicator,
    EvaluationDetailIndicator,
    CoreActivity,
    InnovativeMeans,
    OrganizationalPerformance,
    BeneficiaryPerformance,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::NationalObjective,
        Field::StrategicInitiative,
        Field::NationalTask,
        Field::EvaluationCategory,
        Field::EvaluationIndicator,
        Field::EvaluationDetailIndicator,
        Field::CoreActivity,
        Field::InnovativeMeans,
        Field::OrganizationalPerformance,
        Field::BeneficiaryPerformance,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::NationalObjective => "national_objective",
            Field::StrategicInitiative => "strategic_initiative",
            Field::NationalTask => "national_task",
            Field::EvaluationCategory => "evaluation_category",
            Field::EvaluationIndicator => "evaluation_indicator",
            Field::EvaluationDetailIndicator => "evaluation_detail_indicator",
            Field::CoreActivity => "core_activity",
            Field::InnovativeMeans => "innovative_means",
            Field::OrganizationalPerformance => "organizational_performance",
            Field::BeneficiaryPerformance => "beneficiary_performance",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::NationalObjective => "National objective",
            Field::StrategicInitiative => "Strategic initiative",
            Field::NationalTask => "National task",
            Field::EvaluationCategory => "Evaluation category",
            Field::EvaluationIndicator => "Indicator",
            Field::EvaluationDetailIndicator => "Detailed indicator",
            Field::CoreActivity => "Core activity",
            Field::InnovativeMeans => "Innovative means",
            Field::OrganizationalPerformance => "Organizational performance",
            Field::BeneficiaryPerformance => "Beneficiary performance",
        }
    }

    /// Selection fields take their value from an option list; the rest are free text.
    pub fn is_selection(self) -> bool {
        matches!(
            self,
            Field::NationalObjective
                | Field::StrategicInitiative
                | Field::NationalTask
                | Field::EvaluationCategory
                | Field::EvaluationIndicator
                | Field::EvaluationDetailIndicator
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The report writer's form input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserInput {
    pub national_objective: String,
    pub strategic_initiative: String,
    pub national_task: String,
    pub evaluation_category: String,
    pub evaluation_indicator: String,
    pub evaluation_detail_indicator: String,
    pub core_activity: String,
    pub innovative_means: String,
    pub organizational_performance: String,
    pub beneficiary_performance: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl UserInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::NationalObjective => &self.national_objective,
            Field::StrategicInitiative => &self.strategic_initiative,
            Field::NationalTask => &self.national_task,
            Field::EvaluationCategory => &self.evaluation_category,
            Field::EvaluationIndicator => &self.evaluation_indicator,
            Field::EvaluationDetailIndicator => &self.evaluation_detail_indicator,
            Field::CoreActivity => &self.core_activity,
            Field::InnovativeMeans => &self.innovative_means,
            Field::OrganizationalPerformance => &self.organizational_performance,
            Field::BeneficiaryPerformance => &self.beneficiary_performance,
        }
    }

    /// Raw setter. Cascading resets live in `cascade::apply_field_change`.
    pub(crate) fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::NationalObjective => &mut self.national_objective,
            Field::StrategicInitiative => &mut self.strategic_initiative,
            Field::NationalTask => &mut self.national_task,
            Field::EvaluationCategory => &mut self.evaluation_category,
            Field::EvaluationIndicator => &mut self.evaluation_indicator,
            Field::EvaluationDetailIndicator => &mut self.evaluation_detail_indicator,
            Field::CoreActivity => &mut self.core_activity,
            Field::InnovativeMeans => &mut self.innovative_means,
            Field::OrganizationalPerformance => &mut self.organizational_performance,
            Field::BeneficiaryPerformance => &mut self.beneficiary_performance,
        }
    }
}
