use crate::{WorkflowError, WorkflowResult};

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use log::debug;

/// Targets with a mutating request still pending.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    targets: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `target`, failing if another request for it is pending.
    /// The claim is released when the guard drops.
    #[track_caller]
    pub fn acquire(&self, target: impl Into<String>) -> WorkflowResult<InFlightGuard> {
        let target = target.into();
        let mut targets = self.targets.lock().unwrap_or_else(|e| e.into_inner());

        if !targets.insert(target.clone()) {
            debug!("Rejected duplicate request for {}", target);
            return Err(WorkflowError::in_flight(target));
        }

        Ok(InFlightGuard {
            registry: self.clone(),
            target,
        })
    }

    pub fn is_pending(&self, target: &str) -> bool {
        self.targets
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(target)
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    registry: InFlight,
    target: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry
            .targets
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.target);
    }
}
