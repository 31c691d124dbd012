//! Logging utilities for pipeline execution.
//!
//! Structured `tracing` events for node invocation, branch selection and parallel
//! fan-out. Leaf failures are logged at `warn`; a combinator only notes at `debug`
//! that it aborted, so one failure is not reported once per nesting level.

use crate::error::RunnableError;
use crate::runnable::NodeKind;

/// Log node invocation start.
pub fn log_invoke_start(kind: NodeKind, name: &str) {
    tracing::debug!(kind = %kind, node = name, "Invoking node");
}

/// Log node invocation completion.
pub fn log_invoke_complete(kind: NodeKind, name: &str) {
    tracing::debug!(kind = %kind, node = name, "Node invocation complete");
}

/// Log node invocation failure.
pub fn log_invoke_error(kind: NodeKind, name: &str, error: &RunnableError) {
    if kind.is_leaf() {
        tracing::warn!(kind = %kind, node = name, %error, "Node invocation failed");
    } else {
        tracing::debug!(kind = %kind, node = name, "Aborted after child failure");
    }
}

/// Log which case a branch node selected; `None` means the default.
pub fn log_branch_selected(name: &str, case: Option<usize>) {
    match case {
        Some(index) => tracing::debug!(node = name, case = index, "Branch case selected"),
        None => tracing::debug!(node = name, "Branch default selected"),
    }
}

/// Log parallel fan-out.
pub fn log_parallel_fan_out(name: &str, branches: usize) {
    tracing::trace!(node = name, branches, "Fanning out to parallel branches");
}
