use std::collections::VecDeque;

use alloy_primitives::Bytes;

use crate::{CallExecutor, CallRequest, CallReverted};

/// A hook invoked for every call, in place of the queued outcomes.
pub type CallHook = Box<dyn FnMut(&CallRequest) -> Result<Bytes, CallReverted>>;

/// A [`CallExecutor`] recording every call it receives.
///
/// Calls are answered by the hook if one is set, otherwise by the next queued outcome, otherwise
/// by the fallback outcome (empty output by default).
#[derive(derive_more::Debug)]
pub struct MockExecutor {
    calls: Vec<CallRequest>,
    outcomes: VecDeque<Result<Bytes, CallReverted>>,
    fallback: Result<Bytes, CallReverted>,
    #[debug(ignore)]
    hook: Option<CallHook>,
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            outcomes: VecDeque::new(),
            fallback: Ok(Bytes::new()),
            hook: None,
        }
    }
}

impl MockExecutor {
    /// Creates an executor failing every call with `output`.
    pub fn reverting(output: Bytes) -> Self {
        Self { fallback: Err(CallReverted { output }), ..Default::default() }
    }

    /// Answers calls with `output` by default.
    pub fn with_output(mut self, output: Bytes) -> Self {
        self.fallback = Ok(output);
        self
    }

    /// Queues the outcome of the next unanswered call.
    pub fn push_outcome(&mut self, outcome: Result<Bytes, CallReverted>) {
        self.outcomes.push_back(outcome);
    }

    /// Answers every call through `hook`.
    pub fn with_hook(
        mut self,
        hook: impl FnMut(&CallRequest) -> Result<Bytes, CallReverted> + 'static,
    ) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Returns the calls received so far.
    pub fn calls(&self) -> &[CallRequest] {
        &self.calls
    }
}

impl CallExecutor for MockExecutor {
    fn call(&mut self, request: CallRequest) -> Result<Bytes, CallReverted> {
        let outcome = match self.hook.as_mut() {
            Some(hook) => hook(&request),
            None => self.outcomes.pop_front().unwrap_or_else(|| self.fallback.clone()),
        };
        self.calls.push(request);
        outcome
    }
}
