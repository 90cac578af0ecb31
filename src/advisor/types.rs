use serde::{Deserialize, Serialize};

/// Structured answer produced by the model. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineResponse {
    pub medicine_name: String,
    pub summary: String,
    pub dosage_guidance: String,
    pub common_side_effects: Vec<String>,
    pub serious_side_effects: Vec<String>,
    pub age_specific_warnings: String,
    pub disclaimer: String,
}
