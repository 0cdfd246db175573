use async_trait::async_trait;

/// Asks the user a yes/no question before a destructive action.
///
/// The rendering layer supplies the dialog; tests supply a scripted answer.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every question the same way. For non-interactive hosts.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Confirm for FixedAnswer {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
