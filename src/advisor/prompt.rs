use crate::llm::{Content, GenerateContentRequest, GenerationConfig, Part};
use crate::request::MedicineRequest;
use serde_json::{Value, json};

pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Field names the model must return, in schema order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "medicineName",
    "summary",
    "dosageGuidance",
    "commonSideEffects",
    "seriousSideEffects",
    "ageSpecificWarnings",
    "disclaimer",
];

pub fn build_instruction(request: &MedicineRequest) -> String {
    let mut lines = vec!["Act as a professional medical assistant.".to_string()];

    if request.has_image() {
        let hint = request
            .medicine_name
            .as_deref()
            .map(|name| format!(" The user refers to it as \"{name}\"."))
            .unwrap_or_default();
        lines.push(format!("Analyze the medicine shown in the image.{hint}"));
        lines.push(
            "First, identify the medicine accurately from the image text or appearance."
                .to_string(),
        );
        lines.push(format!(
            "Then, for a patient aged {}, provide dosage guidance, side effects, and warnings.",
            request.age
        ));
    } else {
        lines.push(format!(
            "Analyze the medicine \"{}\" for a patient aged {}.",
            request.medicine_name.as_deref().unwrap_or_default(),
            request.age
        ));
        lines.push("Provide dosage guidance, side effects, and warnings.".to_string());
    }

    lines.push(format!(
        "Translate the entire response into {}.",
        request.language
    ));
    lines.push("Ensure the tone is helpful, professional, and clear.".to_string());
    lines.push("CRITICAL: You MUST strictly follow the JSON schema provided.".to_string());

    lines.join("\n")
}

pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "medicineName": {
                "type": "STRING",
                "description": "The standardized name of the medicine identified"
            },
            "summary": {
                "type": "STRING",
                "description": "A brief 1-sentence summary of what the medicine is used for"
            },
            "dosageGuidance": {
                "type": "STRING",
                "description": "General dosage guidance appropriate for the specified age. Do not prescribe, only guide."
            },
            "commonSideEffects": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of common, less serious side effects"
            },
            "seriousSideEffects": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of serious side effects requiring immediate attention"
            },
            "ageSpecificWarnings": {
                "type": "STRING",
                "description": "Warnings specific to the patient's age group (e.g., children, elderly)"
            },
            "disclaimer": {
                "type": "STRING",
                "description": "A mandatory medical disclaimer in the target language stating this is AI generated and not medical advice."
            }
        },
        "required": REQUIRED_FIELDS
    })
}

/// One user turn: the image first when present, then the instruction.
pub fn build_generate_request(request: &MedicineRequest) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(2);
    if let Some(image) = &request.image {
        parts.push(Part::inline_data(image.mime_type.clone(), image.to_base64()));
    }
    parts.push(Part::text(build_instruction(request)));

    GenerateContentRequest {
        contents: vec![Content::user(parts)],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some(RESPONSE_MIME_TYPE.to_string()),
            response_schema: Some(response_schema()),
        }),
    }
}
