use crate::{Error, Result, advisor::MedicineResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AppState {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Submit,
    ResponseReceived,
    RequestFailed,
    QuotaBlocked,
    DismissQuotaModal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppContext {
    pub result: Option<MedicineResponse>,
    pub error: Option<String>,
    /// Age of the request that produced the current result.
    pub patient_age: Option<u8>,
    /// Set while the quota modal is shown.
    pub quota_unlock_at: Option<DateTime<Utc>>,
    pub show_quota_modal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub state: AppState,
    #[serde(flatten)]
    pub context: AppContext,
}

pub struct AppStateMachine {
    state: AppState,
    pub context: AppContext,
}

impl Default for AppStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStateMachine {
    pub fn new() -> Self {
        Self {
            state: AppState::Idle,
            context: AppContext::default(),
        }
    }

    pub fn current_state(&self) -> AppState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == AppState::Loading
    }

    pub fn transition(&mut self, event: AppEvent) -> Result<()> {
        let old_state = self.state;
        debug!("FSM processing event {:?} in state {:?}", event, old_state);

        let new_state = match (self.state, event) {
            (AppState::Loading, AppEvent::ResponseReceived) => AppState::Success,
            (AppState::Loading, AppEvent::RequestFailed) => AppState::Error,
            (state, AppEvent::DismissQuotaModal) => state,
            (AppState::Loading, _) => {
                return Err(self.invalid(event));
            }
            (_, AppEvent::Submit) => AppState::Loading,
            (state, AppEvent::QuotaBlocked) => state,
            _ => {
                return Err(self.invalid(event));
            }
        };

        if old_state != new_state {
            info!(
                "FSM state transition: {:?} -> {:?} (event: {:?})",
                old_state, new_state, event
            );
        }

        self.state = new_state;
        Ok(())
    }

    fn invalid(&self, event: AppEvent) -> Error {
        warn!(
            "Invalid FSM transition from {:?} with event {:?}",
            self.state, event
        );
        Error::InvalidTransition {
            current: format!("{:?}", self.state),
            requested: format!("{:?}", event),
        }
    }

    /// Enters `Loading`, clearing any previous result or error.
    pub fn begin(&mut self, patient_age: u8) -> Result<()> {
        self.transition(AppEvent::Submit)?;
        self.context.result = None;
        self.context.error = None;
        self.context.patient_age = Some(patient_age);
        Ok(())
    }

    pub fn succeed(&mut self, response: MedicineResponse) -> Result<()> {
        self.transition(AppEvent::ResponseReceived)?;
        self.context.result = Some(response);
        Ok(())
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<()> {
        self.transition(AppEvent::RequestFailed)?;
        self.context.result = None;
        self.context.error = Some(message.into());
        Ok(())
    }

    /// Shows the quota modal without leaving the current state.
    pub fn block(&mut self, unlock_at: Option<DateTime<Utc>>) -> Result<()> {
        self.transition(AppEvent::QuotaBlocked)?;
        self.context.show_quota_modal = true;
        self.context.quota_unlock_at = unlock_at;
        Ok(())
    }

    pub fn dismiss_quota_modal(&mut self) -> Result<()> {
        self.transition(AppEvent::DismissQuotaModal)?;
        self.context.show_quota_modal = false;
        Ok(())
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            state: self.state,
            context: self.context.clone(),
        }
    }
}
