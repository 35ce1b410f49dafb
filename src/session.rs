//! Calculation session state
//!
//! Holds the latest result, the busy flag and the last error message. A
//! failed calculation records the error and leaves the previous result in
//! place; only a successful one replaces it.

use crate::client::AllocationService;
use crate::errors::{AllocatorError, Result};
use crate::request::AllocationRequest;
use crate::response::normalize;
use crate::types::{AllocationResult, CampaignInput};
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// Snapshot of what the user currently sees
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub results: Option<AllocationResult>,
    pub is_calculating: bool,
    pub error: Option<String>,
}

/// Runs calculations against an [`AllocationService`], one at a time
pub struct CalculationSession<S: AllocationService> {
    service: S,
    busy: AtomicBool,
    state: Mutex<SessionState>,
}

/// Clears the busy flag when the calculation ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: AllocationService> CalculationSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            busy: AtomicBool::new(false),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Whether a calculation is in flight
    pub fn is_calculating(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Current state snapshot
    pub async fn snapshot(&self) -> SessionState {
        let mut state = self.state.lock().await.clone();
        state.is_calculating = self.is_calculating();
        state
    }

    /// Latest successful result, if any
    pub async fn results(&self) -> Option<AllocationResult> {
        self.state.lock().await.results.clone()
    }

    /// Request an allocation for `input` and store the normalized result
    ///
    /// Returns [`AllocatorError::Busy`] without touching state when another
    /// calculation is still running.
    pub async fn calculate(&self, input: &CampaignInput) -> Result<AllocationResult> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AllocatorError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        self.state.lock().await.error = None;

        let request = AllocationRequest::from_input(input);
        match self.service.allocate(&request).await {
            Ok(raw) => {
                let result = normalize(&raw);
                info!(
                    "Allocation for {} received: {:.2} allocated, {} projected conversions",
                    input.company_name,
                    result.total_allocated(),
                    result.total_conversions()
                );
                self.state.lock().await.results = Some(result.clone());
                Ok(result)
            }
            Err(e) => {
                error!("Allocation request failed: {}", e);
                self.state.lock().await.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
