use async_trait::async_trait;
use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::{Device, Group, Result};

/// Push-subscription side of the hub connection.
///
/// A subscription delivers fully refreshed resources; the transport is
/// expected to run its own delivery task and drop the sender when the
/// subscription dies, which surfaces as `None` from `next`.
#[async_trait]
pub trait ObservationService: Send + Sync {
    async fn observe_device(&self, device: u32) -> Result<Subscription<Device>>;
    async fn observe_group(&self, group: u32) -> Result<Subscription<Group>>;
}

pub struct Subscription<T> {
    rx: Receiver<T>,
}

impl<T> Subscription<T> {
    pub fn channel(capacity: usize) -> (Sender<T>, Subscription<T>) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Subscription { rx })
    }

    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}
