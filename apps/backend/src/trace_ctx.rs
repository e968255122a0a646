//! Task-local trace context for web requests.
//!
//! Holds the current request's trace id in Tokio task-local storage so
//! that error responses and log lines can carry it without threading it
//! through every call. Web-boundary only; services never import this.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Trace id of the current task, or "unknown" outside a request context.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .cloned()
                .unwrap_or_else(|| "unknown".to_string())
        })
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future with the given trace id in scope. Used by the
/// request-trace middleware.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_outside_context() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn visible_within_context() {
        let id = "trace-abc".to_string();
        with_trace_id(id.clone(), async {
            assert_eq!(trace_id(), id);
        })
        .await;
        assert_eq!(trace_id(), "unknown");
    }
}
