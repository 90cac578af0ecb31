use async_trait::async_trait;
use medicheck::{
    Error, Result,
    llm::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, LlmClient, Part, Role},
    quota::{Clock, KeyValueStore, MemoryStore, StorageError},
};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<GenerateContentResponse>>>,
    pub requests: Arc<Mutex<Vec<GenerateContentRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_responses(self, responses: Vec<GenerateContentResponse>) -> Self {
        *self.responses.lock().unwrap() = responses;
        self
    }

    /// Queues one model reply per text, in order.
    pub fn with_texts(self, texts: &[&str]) -> Self {
        let responses = texts.iter().map(|text| model_response(text)).collect();
        self.with_responses(responses)
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn model_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some(Role::Model),
                parts: vec![Part::text(text)],
            }),
            finish_reason: Some("STOP".to_string()),
        }],
        usage_metadata: None,
        model_version: Some("gemini-2.5-flash".to_string()),
    }
}

/// Store wrapper that counts reads and writes.
#[derive(Debug, Clone, Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub reads: Arc<AtomicUsize>,
    pub writes: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn accesses(&self) -> usize {
        self.reads() + self.writes()
    }
}

#[async_trait]
impl KeyValueStore for CountingStore {
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }
}

/// Store whose reads and/or writes always fail.
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl FailingStore {
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("quota exceeded on disk".to_string()));
        }
        self.inner.set(key, value).await
    }
}

/// Clock under test control.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn at(now_ms: i64) -> Self {
        Self {
            now_ms: Arc::new(AtomicI64::new(now_ms)),
        }
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// LLM client that holds every call until the gate is opened.
pub struct GatedLlmClient {
    pub gate: Arc<tokio::sync::Notify>,
    pub inner: MockLlmClient,
}

impl GatedLlmClient {
    pub fn new(inner: MockLlmClient) -> Self {
        Self {
            gate: Arc::new(tokio::sync::Notify::new()),
            inner,
        }
    }
}

#[async_trait]
impl LlmClient for GatedLlmClient {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.gate.notified().await;
        self.inner.generate_content(request).await
    }
}

/// Store whose reads announce themselves on `entered` and then wait for `gate`.
#[derive(Debug, Default)]
pub struct GatedStore {
    pub inner: MemoryStore,
    pub entered: Arc<tokio::sync::Notify>,
    pub gate: Arc<tokio::sync::Notify>,
}

#[async_trait]
impl KeyValueStore for GatedStore {
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        self.entered.notify_one();
        self.gate.notified().await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        self.inner.set(key, value).await
    }
}
