use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    /// Single-flight gate: at most one analysis may be outstanding.
    pub analysis_gate: AnalysisGate,
}

/// Admits at most one analysis at a time. The server-side counterpart of a
/// submit control that is disabled while a request is loading: while a permit
/// is held, further submissions are rejected before any model call is made.
#[derive(Clone, Default)]
pub struct AnalysisGate {
    in_flight: Arc<AtomicBool>,
}

impl AnalysisGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to start an analysis. Returns `None` when one is already
    /// in flight. The returned permit releases the gate on drop, so both
    /// success and failure paths reset to idle.
    pub fn try_begin(&self) -> Option<AnalysisPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| AnalysisPermit {
                in_flight: self.in_flight.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// RAII permit for one analysis. Dropping it returns the gate to idle.
pub struct AnalysisPermit {
    in_flight: Arc<AtomicBool>,
}

impl Drop for AnalysisPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
