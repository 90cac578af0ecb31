use super::mocks::{ManualClock, MockLlmClient};
use medicheck::{
    advisor::MedicineAdvisor,
    app::Controller,
    config::{Config, GeminiConfig, LogsConfig, ServerConfig},
    quota::{KeyValueStore, QuotaState, QuotaTracker, STORAGE_KEY},
    request::{Language, MedicineForm},
};
use std::sync::Arc;

/// 2023-11-14T22:13:20Z
pub const NOW: i64 = 1_700_000_000_000;

pub const HOUR_MS: i64 = 60 * 60 * 1000;

/// "hello" in base64, used as a stand-in image.
pub const IMAGE_B64: &str = "aGVsbG8=";

pub const IBUPROFEN_JSON: &str = r#"{
    "medicineName": "Ibuprofen",
    "summary": "A nonsteroidal anti-inflammatory drug used to relieve pain and fever.",
    "dosageGuidance": "200-400 mg every 4 to 6 hours as needed; do not exceed 1200 mg per day without advice.",
    "commonSideEffects": ["Nausea", "Heartburn", "Dizziness"],
    "seriousSideEffects": ["Stomach bleeding", "Kidney problems"],
    "ageSpecificWarnings": "Adults should take it with food.",
    "disclaimer": "This information is AI generated and is not medical advice."
}"#;

pub fn create_test_config() -> Config {
    Config {
        gemini: GeminiConfig {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: "test-api-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: ":memory:".to_string(),
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
    }
}

pub fn text_form(name: &str, age: u32) -> MedicineForm {
    MedicineForm {
        medicine_name: Some(name.to_string()),
        age: Some(age),
        language: Language::English,
        image: None,
        image_mime_type: None,
    }
}

pub fn image_form(age: u32) -> MedicineForm {
    MedicineForm {
        medicine_name: None,
        age: Some(age),
        language: Language::English,
        image: Some(format!("data:image/png;base64,{IMAGE_B64}")),
        image_mime_type: Some("image/png".to_string()),
    }
}

pub async fn seed_quota(store: &dyn KeyValueStore, count: u32, last_upload_time: i64) {
    let raw = serde_json::to_string(&QuotaState {
        count,
        last_upload_time,
    })
    .unwrap();
    store.set(STORAGE_KEY, &raw).await.unwrap();
}

pub async fn read_quota(store: &dyn KeyValueStore) -> Option<QuotaState> {
    store
        .get(STORAGE_KEY)
        .await
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

pub fn create_controller(
    llm: Arc<MockLlmClient>,
    store: Arc<dyn KeyValueStore>,
    clock: ManualClock,
) -> Controller {
    let advisor = MedicineAdvisor::new(llm);
    let quota = QuotaTracker::new(store, Arc::new(clock));
    Controller::new(advisor, quota)
}
