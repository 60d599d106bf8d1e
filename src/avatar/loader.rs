//! Asynchronous avatar asset loading.
//!
//! The parser itself is an external collaborator; this layer runs it off
//! the async runtime's worker threads and exposes load progress (0-100) and
//! the final result through channels. A failed load reports upward and
//! never disturbs an already-loaded avatar.

use tokio::sync::{oneshot, watch};
use tracing::{debug, warn};

use crate::error::{AssetError, Result};

use super::Avatar;

/// External collaborator: parses an avatar asset into a live [`Avatar`].
///
/// `report_progress` takes 0-100; implementations call it as parsing
/// advances. The call is synchronous and is run on a blocking task.
pub trait AvatarLoader: Send + 'static {
    fn load(&self, source: &str, report_progress: &dyn Fn(u8)) -> Result<Avatar>;
}

/// Handle to an in-flight avatar load.
pub struct AvatarLoadHandle {
    /// Load progress, 0-100
    pub progress: watch::Receiver<u8>,
    result: oneshot::Receiver<Result<Avatar>>,
}

impl AvatarLoadHandle {
    /// Wait for the load to finish.
    pub async fn wait(self) -> Result<Avatar> {
        match self.result.await {
            Ok(result) => result,
            Err(_) => Err(AssetError::Load("loader task dropped before completing".into()).into()),
        }
    }
}

/// Start loading an avatar asset on a blocking task.
pub fn spawn_load<L: AvatarLoader>(loader: L, source: String) -> AvatarLoadHandle {
    let (progress_tx, progress_rx) = watch::channel(0u8);
    let (result_tx, result_rx) = oneshot::channel();

    tokio::task::spawn_blocking(move || {
        debug!("Loading avatar asset: {}", source);
        let report = |pct: u8| {
            let _ = progress_tx.send(pct.min(100));
        };

        let result = loader.load(&source, &report);
        match &result {
            Ok(_) => {
                report(100);
                debug!("Avatar asset loaded: {}", source);
            }
            Err(e) => warn!("Avatar asset load failed: {}: {}", source, e),
        }
        let _ = result_tx.send(result);
    });

    AvatarLoadHandle {
        progress: progress_rx,
        result: result_rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::SkeletonBinding;

    struct StubLoader {
        fail: bool,
    }

    impl AvatarLoader for StubLoader {
        fn load(&self, source: &str, report_progress: &dyn Fn(u8)) -> Result<Avatar> {
            report_progress(25);
            report_progress(50);
            if self.fail {
                return Err(AssetError::NotFound(source.to_string()).into());
            }
            report_progress(90);
            Ok(Avatar::new(SkeletonBinding::complete()))
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_successful_load_reports_full_progress() {
        let handle = spawn_load(StubLoader { fail: false }, "model.vrm".to_string());
        let progress = handle.progress.clone();

        let avatar = handle.wait().await.expect("load should succeed");
        assert!(avatar.binding.is_bound(crate::skeleton::BoneId::Hips));

        // Final progress value is 100
        assert_eq!(*progress.borrow(), 100);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_load_reports_error() {
        let handle = spawn_load(StubLoader { fail: true }, "missing.vrm".to_string());
        let progress = handle.progress.clone();

        let err = handle.wait().await.expect_err("load should fail");
        assert!(matches!(
            err,
            crate::error::KagamiError::Asset(AssetError::NotFound(_))
        ));

        // Progress stopped where the loader gave up
        assert!(*progress.borrow() < 100);
    }
}
