use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use tradfri::{Command, CommandExecutor, GroupCommand};

use crate::{Capabilities, Result, TurnOn};

/// Point-in-time copy of a group's state, replaced wholesale on refresh.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GroupSnapshot {
    pub id: u32,
    pub name: String,
    pub on: bool,
    pub brightness: u8,
}

/// Wraps one hub-defined group of lights.
///
/// Groups expose no per-light color control; only power and brightness are
/// translated.
pub struct Group {
    executor: Arc<dyn CommandExecutor>,
    snapshot: GroupSnapshot,
}

impl Group {
    pub fn new(group: &tradfri::Group, executor: Arc<dyn CommandExecutor>) -> Group {
        debug!("new group adapter for {}", group.name);

        Group {
            executor,
            snapshot: project(group),
        }
    }

    pub fn id(&self) -> u32 {
        self.snapshot.id
    }

    pub fn name(&self) -> &str {
        &self.snapshot.name
    }

    pub fn is_on(&self) -> bool {
        self.snapshot.on
    }

    pub fn brightness(&self) -> u8 {
        self.snapshot.brightness
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_group()
    }

    pub fn snapshot(&self) -> &GroupSnapshot {
        &self.snapshot
    }

    pub fn refresh(&mut self, group: &tradfri::Group) {
        debug!("refreshed group {}", group.name);

        self.snapshot = project(group);
    }

    pub async fn turn_off(&self) -> Result<()> {
        self.submit(GroupCommand::SetPower(false)).await
    }

    pub async fn turn_on(&self, request: TurnOn) -> Result<()> {
        let command = match request.brightness {
            Some(brightness) => {
                let value = if brightness == 255 { 254 } else { brightness };

                GroupCommand::SetBrightness {
                    value,
                    transition_time: request.transition_time(),
                }
            }
            None => GroupCommand::SetPower(true),
        };

        self.submit(command).await
    }

    async fn submit(&self, command: GroupCommand) -> Result<()> {
        let command = Command::Group {
            group: self.snapshot.id,
            command,
        };

        debug!("submitting {} to {}", command.name(), self.snapshot.name);

        self.executor.execute(command).await?;

        Ok(())
    }
}

fn project(group: &tradfri::Group) -> GroupSnapshot {
    GroupSnapshot {
        id: group.id,
        name: group.name.clone(),
        on: group.on,
        brightness: group.dimmer,
    }
}
