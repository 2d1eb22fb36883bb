#![allow(dead_code)]

pub mod mock_runtime;

pub use mock_runtime::{container, MockContainerRuntime, MockEventSource};

use std::time::Duration;

/// Polls `condition` until it holds or two seconds pass.
pub async fn wait_until(condition: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
