use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;

use tradfri::ObservationService;

use crate::{ErasedError, Group, GroupSnapshot, Light, LightSnapshot};

const INITIAL_DELAY: Duration = Duration::from_secs(2);
const MAX_DELAY: Duration = Duration::from_secs(60);

/// Fresh snapshot pushed to the host after every refresh.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Update {
    Light(LightSnapshot),
    Group(GroupSnapshot),
}

/// The host's "state changed, re-publish" sink.
#[async_trait]
pub trait StateSink: Send + Sync {
    async fn publish(&self, update: Update) -> std::result::Result<(), ErasedError>;
}

/// Doubling delay between re-subscription attempts, capped at `max` and
/// reset once a subscription delivers again.
#[derive(Copy, Clone, Debug)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    delay: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Backoff {
        Backoff {
            initial,
            max,
            delay: initial,
        }
    }

    pub fn reset(&mut self) {
        self.delay = self.initial;
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.delay;
        self.delay = (self.delay * 2).min(self.max);

        delay
    }
}

impl Default for Backoff {
    fn default() -> Backoff {
        Backoff::new(INITIAL_DELAY, MAX_DELAY)
    }
}

/// Keeps a light fresh: subscribes to push updates, refreshes the adapter
/// on every delivered resource and hands the new snapshot to the sink.
/// A failed or ended subscription is re-established after the backoff
/// delay. The task runs until the returned handle is aborted.
pub fn observe_light(
    light: Arc<Mutex<Light>>,
    service: Arc<dyn ObservationService>,
    sink: Arc<dyn StateSink>,
    mut backoff: Backoff,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (id, name) = {
            let light = light.lock().await;
            (light.id(), light.name().to_string())
        };

        loop {
            let mut subscription = match service.observe_device(id).await {
                Ok(subscription) => subscription,
                Err(err) => {
                    let delay = backoff.next_delay();
                    warn!("observation of {name} failed: {err}, retrying in {delay:?}");
                    time::sleep(delay).await;
                    continue;
                }
            };

            while let Some(device) = subscription.next().await {
                backoff.reset();

                let update = {
                    let mut light = light.lock().await;

                    if let Err(err) = light.refresh(&device) {
                        warn!("dropping update for {name}: {err}");
                        continue;
                    }

                    Update::Light(light.snapshot().clone())
                };

                if let Err(err) = sink.publish(update).await {
                    warn!("failed to publish state of {name}: {err}");
                }
            }

            let delay = backoff.next_delay();
            warn!("observation of {name} ended, resubscribing in {delay:?}");
            time::sleep(delay).await;
        }
    })
}

/// Group analog of `observe_light`.
pub fn observe_group(
    group: Arc<Mutex<Group>>,
    service: Arc<dyn ObservationService>,
    sink: Arc<dyn StateSink>,
    mut backoff: Backoff,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (id, name) = {
            let group = group.lock().await;
            (group.id(), group.name().to_string())
        };

        loop {
            let mut subscription = match service.observe_group(id).await {
                Ok(subscription) => subscription,
                Err(err) => {
                    let delay = backoff.next_delay();
                    warn!("observation of {name} failed: {err}, retrying in {delay:?}");
                    time::sleep(delay).await;
                    continue;
                }
            };

            while let Some(resource) = subscription.next().await {
                backoff.reset();

                let update = {
                    let mut group = group.lock().await;
                    group.refresh(&resource);

                    Update::Group(group.snapshot().clone())
                };

                if let Err(err) = sink.publish(update).await {
                    warn!("failed to publish state of {name}: {err}");
                }
            }

            let delay = backoff.next_delay();
            warn!("observation of {name} ended, resubscribing in {delay:?}");
            time::sleep(delay).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    use serde_json::{json, Value};
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use tradfri::{
        Command, CommandExecutor, Device, LightControl, LightState, Result, Subscription,
    };

    use super::*;

    struct NullExecutor;

    #[async_trait]
    impl CommandExecutor for NullExecutor {
        async fn execute(&self, _command: Command) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    struct FlakyService {
        failures: AtomicUsize,
        device: Device,
        senders: StdMutex<Vec<mpsc::Sender<Device>>>,
    }

    impl FlakyService {
        fn new(failures: usize, device: Device) -> Arc<FlakyService> {
            Arc::new(FlakyService {
                failures: AtomicUsize::new(failures),
                device,
                senders: StdMutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ObservationService for FlakyService {
        async fn observe_device(&self, _device: u32) -> Result<Subscription<Device>> {
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(tradfri::Error::UnexpectedResponse("observe refused"));
            }

            let (tx, subscription) = Subscription::channel(8);
            tx.send(self.device.clone()).await.unwrap();
            self.senders.lock().unwrap().push(tx);

            Ok(subscription)
        }

        async fn observe_group(&self, _group: u32) -> Result<Subscription<tradfri::Group>> {
            Err(tradfri::Error::UnexpectedResponse("not a group service"))
        }
    }

    struct ChannelSink {
        tx: mpsc::Sender<Update>,
    }

    #[async_trait]
    impl StateSink for ChannelSink {
        async fn publish(&self, update: Update) -> std::result::Result<(), ErasedError> {
            self.tx.send(update).await.map_err(|_| "sink closed".into())
        }
    }

    fn device(name: &str, dimmer: u8) -> Device {
        Device {
            id: 65537,
            name: name.to_string(),
            reachable: true,
            light_control: Some(LightControl {
                can_set_dimmer: true,
                can_set_mireds: false,
                can_set_color: false,
                min_mireds: None,
                max_mireds: None,
                lights: vec![LightState {
                    on: true,
                    dimmer,
                    color_temp: None,
                    xy: None,
                }],
            }),
        }
    }

    #[test]
    fn test_backoff_doubles_up_to_the_cap() {
        let mut backoff = Backoff::new(Duration::from_secs(2), Duration::from_secs(60));

        assert_eq!(backoff.next_delay(), Duration::from_secs(2));
        assert_eq!(backoff.next_delay(), Duration::from_secs(4));
        assert_eq!(backoff.next_delay(), Duration::from_secs(8));
        assert_eq!(backoff.next_delay(), Duration::from_secs(16));
        assert_eq!(backoff.next_delay(), Duration::from_secs(32));
        assert_eq!(backoff.next_delay(), Duration::from_secs(60));
        assert_eq!(backoff.next_delay(), Duration::from_secs(60));

        backoff.reset();
        assert_eq!(backoff.next_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_default_backoff_bounds() {
        let mut backoff = Backoff::default();

        assert_eq!(backoff.next_delay(), Duration::from_secs(2));
        for _ in 0..10 {
            backoff.next_delay();
        }
        assert_eq!(backoff.next_delay(), Duration::from_secs(60));
    }

    #[test]
    fn test_update_serialization() {
        let update = Update::Group(GroupSnapshot {
            id: 131073,
            name: "Kitchen".to_string(),
            on: true,
            brightness: 254,
        });

        let serialized = serde_json::to_value(&update).unwrap();
        assert_eq!(
            serialized,
            json!({"group": {"id": 131073, "name": "Kitchen", "on": true, "brightness": 254}})
        );

        let deserialized: Update = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, update);
    }

    #[tokio::test]
    async fn test_failed_subscription_recovers_without_losing_updates() {
        let light = Light::new(&device("Bedroom", 100), Arc::new(NullExecutor)).unwrap();
        let light = Arc::new(Mutex::new(light));

        let service = FlakyService::new(1, device("Bedroom", 200));
        let (tx, mut rx) = mpsc::channel(8);
        let sink = Arc::new(ChannelSink { tx });

        let handle = observe_light(
            light.clone(),
            service.clone(),
            sink,
            Backoff::new(Duration::from_millis(1), Duration::from_millis(5)),
        );

        // First subscription attempt is refused; the one queued update of
        // the successful retry must still arrive, exactly once.
        let update = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        match update.unwrap() {
            Update::Light(snapshot) => assert_eq!(snapshot.brightness, 200),
            other => panic!("unexpected update {other:?}"),
        }

        assert!(timeout(Duration::from_millis(50), rx.recv()).await.is_err());
        assert_eq!(light.lock().await.brightness(), 200);

        // Subscription is still live after the recovery.
        let sender = service.senders.lock().unwrap()[0].clone();
        sender.send(device("Bedroom", 30)).await.unwrap();

        let update = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        match update.unwrap() {
            Update::Light(snapshot) => assert_eq!(snapshot.brightness, 30),
            other => panic!("unexpected update {other:?}"),
        }

        handle.abort();
    }

    struct GroupService {
        resource: tradfri::Group,
        senders: StdMutex<Vec<mpsc::Sender<tradfri::Group>>>,
    }

    #[async_trait]
    impl ObservationService for GroupService {
        async fn observe_device(&self, _device: u32) -> Result<Subscription<Device>> {
            Err(tradfri::Error::UnexpectedResponse("not a device service"))
        }

        async fn observe_group(&self, _group: u32) -> Result<Subscription<tradfri::Group>> {
            let (tx, subscription) = Subscription::channel(8);
            tx.send(self.resource.clone()).await.unwrap();
            self.senders.lock().unwrap().push(tx);

            Ok(subscription)
        }
    }

    #[tokio::test]
    async fn test_group_updates_reach_the_sink() {
        let resource = tradfri::Group {
            id: 131073,
            name: "Kitchen".to_string(),
            on: true,
            dimmer: 60,
        };

        let group = Group::new(
            &tradfri::Group {
                dimmer: 10,
                ..resource.clone()
            },
            Arc::new(NullExecutor),
        );
        let group = Arc::new(Mutex::new(group));

        let service = Arc::new(GroupService {
            resource,
            senders: StdMutex::new(Vec::new()),
        });
        let (tx, mut rx) = mpsc::channel(8);
        let sink = Arc::new(ChannelSink { tx });

        let handle = observe_group(
            group.clone(),
            service,
            sink,
            Backoff::new(Duration::from_millis(1), Duration::from_millis(5)),
        );

        let update = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        match update.unwrap() {
            Update::Group(snapshot) => assert_eq!(snapshot.brightness, 60),
            other => panic!("unexpected update {other:?}"),
        }

        assert_eq!(group.lock().await.brightness(), 60);

        handle.abort();
    }
}
