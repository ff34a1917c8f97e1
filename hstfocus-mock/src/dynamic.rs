use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hstfocus_core::{FocusError, FocusModelProvider, ModelTableRequest};

/// Instruction for how the next `model_table` call should behave.
#[derive(Clone)]
pub enum MockBehavior {
    /// Return the provided table text.
    Table(String),
    /// Fail immediately with the provided error.
    Fail(FocusError),
}

#[derive(Default)]
struct InternalState {
    /// One-shot behaviors consumed in FIFO order before the default applies.
    queue: VecDeque<MockBehavior>,
    default: Option<MockBehavior>,
    requests: Vec<ModelTableRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Queue a one-shot behavior for the next un-scripted call.
    pub async fn push_behavior(&self, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.queue.push_back(behavior);
    }

    /// Set the behavior applied once the queue is exhausted.
    pub async fn set_default_behavior(&self, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.default = Some(behavior);
    }

    /// Return a copy of every request the provider has received, in order.
    pub async fn requests(&self) -> Vec<ModelTableRequest> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Clear queued behaviors, the default, and the request log.
    pub async fn clear(&self) {
        let mut guard = self.state.lock().await;
        guard.queue.clear();
        guard.default = None;
        guard.requests.clear();
    }
}

/// A provider that defers all behavior to an external controller.
pub struct DynamicMockProvider {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockProvider {
    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller() -> (Arc<dyn FocusModelProvider>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { state });
        (me as Arc<dyn FocusModelProvider>, controller)
    }
}

#[async_trait]
impl FocusModelProvider for DynamicMockProvider {
    fn name(&self) -> &'static str {
        "dynamic-mock"
    }

    async fn model_table(&self, req: &ModelTableRequest) -> Result<String, FocusError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(req.clone());
            guard.queue.pop_front().or_else(|| guard.default.clone())
        };
        match behavior {
            Some(MockBehavior::Table(text)) => Ok(text),
            Some(MockBehavior::Fail(e)) => Err(e),
            None => Err(FocusError::unsupported("model-table")),
        }
    }
}
