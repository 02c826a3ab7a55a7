use std::sync::Arc;

use log::debug;

use crate::{Command, CommandExecutor, Device, Group, Result};

/// Typed facade over the hub's listing commands.
#[derive(Clone)]
pub struct Gateway {
    executor: Arc<dyn CommandExecutor>,
}

impl Gateway {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> Arc<dyn CommandExecutor> {
        self.executor.clone()
    }

    pub async fn devices(&self) -> Result<Vec<Device>> {
        let response = self.executor.execute(Command::ListDevices).await?;
        let devices: Vec<Device> = serde_json::from_value(response)?;

        debug!("hub reported {} devices", devices.len());

        Ok(devices)
    }

    /// Devices that expose light control.
    pub async fn lights(&self) -> Result<Vec<Device>> {
        let devices = self.devices().await?;

        Ok(devices
            .into_iter()
            .filter(Device::has_light_control)
            .collect())
    }

    pub async fn groups(&self) -> Result<Vec<Group>> {
        let response = self.executor.execute(Command::ListGroups).await?;
        let groups: Vec<Group> = serde_json::from_value(response)?;

        debug!("hub reported {} groups", groups.len());

        Ok(groups)
    }
}
