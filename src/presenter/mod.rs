//! View models and plain-text rendering for results, errors and the quota notice.

use crate::advisor::MedicineResponse;
use crate::quota::IMAGE_UPLOAD_LIMIT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SUBSCRIPTION_STUB_MESSAGE: &str = "Subscription feature is coming soon!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Neutral,
    Caution,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum SectionBody {
    Text(String),
    /// Rendered as an ordered list, preserving the model's order.
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub title: String,
    pub tone: Tone,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineReport {
    pub medicine_name: String,
    pub patient_age: u8,
    pub summary: String,
    pub sections: Vec<ReportSection>,
    pub disclaimer: String,
}

impl MedicineReport {
    pub fn new(response: &MedicineResponse, patient_age: u8) -> Self {
        let section = |title: &str, tone, body| ReportSection {
            title: title.to_string(),
            tone,
            body,
        };

        Self {
            medicine_name: response.medicine_name.clone(),
            patient_age,
            summary: response.summary.clone(),
            sections: vec![
                section(
                    "Dosage Guidance",
                    Tone::Neutral,
                    SectionBody::Text(response.dosage_guidance.clone()),
                ),
                section(
                    "Age-Specific Warnings",
                    Tone::Caution,
                    SectionBody::Text(response.age_specific_warnings.clone()),
                ),
                section(
                    "Common Side Effects",
                    Tone::Neutral,
                    SectionBody::List(response.common_side_effects.clone()),
                ),
                section(
                    "Serious Side Effects",
                    Tone::Danger,
                    SectionBody::List(response.serious_side_effects.clone()),
                ),
            ],
            disclaimer: response.disclaimer.clone(),
        }
    }

    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.title == title)
    }

    pub fn render_text(&self) -> String {
        let mut lines = vec![
            format!("{} (Patient Age: {})", self.medicine_name, self.patient_age),
            self.summary.clone(),
        ];

        for section in &self.sections {
            lines.push(String::new());
            lines.push(section.title.clone());
            match &section.body {
                SectionBody::Text(text) => lines.push(format!("  {text}")),
                SectionBody::List(items) => lines.extend(
                    items
                        .iter()
                        .enumerate()
                        .map(|(idx, item)| format!("  {}. {}", idx + 1, item)),
                ),
            }
        }

        lines.push(String::new());
        lines.push("AI Generated Disclaimer".to_string());
        lines.push(format!("  {}", self.disclaimer));
        lines.join("\n")
    }
}

pub fn render_error_banner(message: &str) -> String {
    format!("Analysis Failed\n{message}")
}

pub fn render_quota_notice(unlock_at: Option<DateTime<Utc>>) -> String {
    let notice = format!(
        "Upload Limit Reached\nYou have reached the limit of {IMAGE_UPLOAD_LIMIT} free image uploads. \
         To continue using the image analysis feature, please subscribe or wait for the cooldown period to end."
    );
    match unlock_at {
        Some(unlock_at) => format!(
            "{notice}\nNext upload available at: {}",
            unlock_at.format("%H:%M UTC")
        ),
        None => notice,
    }
}
