use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::errors::CoreError;

/// Lifetime of one mounted view.
///
/// Controllers run every request through `run`, so closing the scope when
/// the view goes away resolves pending requests as `CoreError::Cancelled`
/// and keeps late responses from writing into dead state. Clones share the
/// same lifetime.
#[derive(Clone, Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the view as unmounted. Idempotent.
    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` unless the scope closes first.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        if self.is_closed() {
            return Err(CoreError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(CoreError::Cancelled),
            result = fut => result,
        }
    }
}
