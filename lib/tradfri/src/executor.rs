use async_trait::async_trait;
use serde_json::Value;

use crate::{Command, Result};

/// Submits commands to the hub.
///
/// Implemented by the transport that talks to the hub; failure modes are
/// opaque to callers and surface as `Error::Transport`.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: Command) -> Result<Value>;
}
