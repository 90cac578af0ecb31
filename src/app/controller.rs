use super::fsm::{AppSnapshot, AppStateMachine};
use crate::{
    Error, Result,
    advisor::MedicineAdvisor,
    presenter::MedicineReport,
    quota::{QuotaDecision, QuotaStatus, QuotaTracker},
    request::{MedicineForm, MedicineRequest},
};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Drives a submission through validation, the quota gate and the advisor,
/// keeping the UI state machine in step.
///
/// Only one request may be loading at a time; a second submission is
/// rejected with [`Error::Busy`] rather than queued.
pub struct Controller {
    advisor: MedicineAdvisor,
    quota: QuotaTracker,
    machine: Mutex<AppStateMachine>,
}

impl Controller {
    pub fn new(advisor: MedicineAdvisor, quota: QuotaTracker) -> Self {
        Self {
            advisor,
            quota,
            machine: Mutex::new(AppStateMachine::new()),
        }
    }

    fn machine(&self) -> Result<MutexGuard<'_, AppStateMachine>> {
        self.machine
            .lock()
            .map_err(|e| Error::internal(format!("Mutex lock failed: {e}")))
    }

    pub async fn submit(&self, form: MedicineForm) -> Result<MedicineReport> {
        let request = MedicineRequest::build(form)?;
        let request_id = Uuid::new_v4();
        info!(
            "Submission {} (image: {}, language: {})",
            request_id,
            request.has_image(),
            request.language
        );

        if self.machine()?.is_loading() {
            return Err(Error::Busy);
        }

        if request.has_image() {
            let decision = self.quota.check_allowed().await;
            if let QuotaDecision::Blocked { .. } = decision {
                let unlock_at = decision.unlock_time();
                {
                    // Another submission may have started during the quota check.
                    let mut machine = self.machine()?;
                    if machine.is_loading() {
                        return Err(Error::Busy);
                    }
                    machine.block(unlock_at)?;
                }
                info!("Submission {} blocked by upload quota", request_id);
                return Err(Error::QuotaExceeded {
                    unlock_at: unlock_at.unwrap_or_else(Utc::now),
                });
            }
        }

        {
            let mut machine = self.machine()?;
            if machine.is_loading() {
                return Err(Error::Busy);
            }
            machine.begin(request.age)?;
        }

        match self.advisor.fetch_medicine_info(&request).await {
            Ok(response) => {
                let report = MedicineReport::new(&response, request.age);
                self.machine()?.succeed(response)?;

                if request.has_image() {
                    match self.quota.record_upload().await {
                        Ok(state) => debug!("Upload count is now {}", state.count),
                        Err(e) => warn!("Error incrementing upload count: {}", e),
                    }
                }

                info!("Submission {} succeeded", request_id);
                Ok(report)
            }
            Err(e) => {
                self.machine()?.fail(e.to_string())?;
                info!("Submission {} failed", request_id);
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> Result<AppSnapshot> {
        Ok(self.machine()?.snapshot())
    }

    /// The report for the current result, if the last submission succeeded.
    pub fn current_report(&self) -> Result<Option<MedicineReport>> {
        let machine = self.machine()?;
        let context = &machine.context;
        Ok(context
            .result
            .as_ref()
            .map(|result| MedicineReport::new(result, context.patient_age.unwrap_or_default())))
    }

    pub fn dismiss_quota_modal(&self) -> Result<()> {
        self.machine()?.dismiss_quota_modal()
    }

    pub async fn quota_status(&self) -> QuotaStatus {
        self.quota.status().await
    }
}
