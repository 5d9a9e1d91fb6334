use crate::{WorkflowError, WorkflowResult};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lifetime of one view instance.
///
/// Fetches take a [`ViewTicket`] before awaiting. Leaving the view bumps the
/// generation, so every ticket taken earlier stops being current and its
/// result is discarded instead of applied.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    generation: Arc<AtomicU64>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> ViewTicket {
        ViewTicket {
            scope: self.clone(),
            generation: self.generation.load(Ordering::Acquire),
        }
    }

    pub fn leave(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

#[derive(Debug)]
pub struct ViewTicket {
    scope: ViewScope,
    generation: u64,
}

impl ViewTicket {
    pub fn is_current(&self) -> bool {
        self.scope.generation.load(Ordering::Acquire) == self.generation
    }

    #[track_caller]
    pub fn check(&self) -> WorkflowResult<()> {
        if self.is_current() {
            Ok(())
        } else {
            Err(WorkflowError::stale_view())
        }
    }
}
