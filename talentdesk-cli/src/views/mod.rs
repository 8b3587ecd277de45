//! Stateful dashboard screens
//!
//! Each view owns its data and a [`Lifecycle`]. Once a view is disposed,
//! responses that are still in flight are dropped on arrival.

pub mod detail;
pub mod list;
pub mod profile;

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Shown wherever an optional descriptive field is missing
pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, Default)]
pub struct Lifecycle(CancellationToken);

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear the view down. Pending loads finish without touching it.
    pub fn dispose(&self) {
        self.0.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.0.is_cancelled()
    }

    /// Await `fut` unless the view is disposed first
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.0.cancelled() => {
                tracing::debug!("View disposed, discarding response");
                None
            }
            output = fut => Some(output),
        }
    }
}

fn or_not_specified(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => NOT_SPECIFIED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test_log::test(tokio::test)]
    async fn test_guard_passes_output_through() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.guard(async { 42 }).await, Some(42));
    }

    #[test_log::test(tokio::test)]
    async fn test_guard_drops_output_after_dispose() {
        let lifecycle = Lifecycle::new();
        let handle = lifecycle.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.dispose();
        });

        let output = lifecycle
            .guard(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                42
            })
            .await;

        assert_eq!(output, None);
        assert!(lifecycle.is_disposed());
    }

    #[test]
    fn test_blank_is_not_specified() {
        assert_eq!(or_not_specified(None), NOT_SPECIFIED);
        assert_eq!(or_not_specified(Some("  ")), NOT_SPECIFIED);
        assert_eq!(or_not_specified(Some("3 months")), "3 months");
    }
}
