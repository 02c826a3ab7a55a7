use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use tradfri::{Command, CommandExecutor, Device, LightCommand};

use crate::{rgb_to_xy, Capabilities, Error, Result, TurnOn};

/// Point-in-time copy of a light device's state.
///
/// Always replaced wholesale, never patched field by field, so every read
/// is consistent with the resource it was taken from.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LightSnapshot {
    pub id: u32,
    pub name: String,
    pub reachable: bool,
    pub on: bool,
    pub brightness: u8,
    pub color_temp: Option<u16>,
    pub xy_color: Option<(f32, f32)>,
    pub min_mireds: Option<u16>,
    pub max_mireds: Option<u16>,
}

/// Wraps one light device behind the hub.
pub struct Light {
    executor: Arc<dyn CommandExecutor>,
    snapshot: LightSnapshot,
    capabilities: Capabilities,
}

impl Light {
    pub fn new(device: &Device, executor: Arc<dyn CommandExecutor>) -> Result<Light> {
        let (snapshot, capabilities) = project(device)?;

        debug!("new light adapter for {}", snapshot.name);

        Ok(Light {
            executor,
            snapshot,
            capabilities,
        })
    }

    pub fn id(&self) -> u32 {
        self.snapshot.id
    }

    pub fn name(&self) -> &str {
        &self.snapshot.name
    }

    pub fn is_available(&self) -> bool {
        self.snapshot.reachable
    }

    pub fn is_on(&self) -> bool {
        self.snapshot.on
    }

    pub fn brightness(&self) -> u8 {
        self.snapshot.brightness
    }

    pub fn color_temp(&self) -> Option<u16> {
        self.snapshot.color_temp
    }

    pub fn xy_color(&self) -> Option<(f32, f32)> {
        self.snapshot.xy_color
    }

    pub fn min_mireds(&self) -> Option<u16> {
        self.snapshot.min_mireds
    }

    pub fn max_mireds(&self) -> Option<u16> {
        self.snapshot.max_mireds
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn snapshot(&self) -> &LightSnapshot {
        &self.snapshot
    }

    /// Replaces the snapshot and capability flags from a fresh resource.
    pub fn refresh(&mut self, device: &Device) -> Result<()> {
        let (snapshot, capabilities) = project(device)?;

        debug!("refreshed light {}", snapshot.name);

        self.snapshot = snapshot;
        self.capabilities = capabilities;

        Ok(())
    }

    pub async fn turn_off(&self) -> Result<()> {
        self.submit(vec![LightCommand::SetPower(false)]).await
    }

    pub async fn turn_on(&self, request: TurnOn) -> Result<()> {
        self.submit(translate(&request)).await
    }

    /// Commands are submitted one by one; a failure does not cancel the
    /// remaining commands, and the first failure is reported once all have
    /// been submitted.
    async fn submit(&self, commands: Vec<LightCommand>) -> Result<()> {
        let device = self.snapshot.id;
        let mut failed = None;

        for command in commands {
            let command = Command::Light { device, command };

            debug!("submitting {} to {}", command.name(), self.snapshot.name);

            if let Err(err) = self.executor.execute(command).await {
                failed.get_or_insert(err);
            }
        }

        match failed {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

fn project(device: &Device) -> Result<(LightSnapshot, Capabilities)> {
    let control = device
        .light_control
        .as_ref()
        .ok_or(Error::NotALight(device.id))?;
    let light = control.lights.first().ok_or(Error::NotALight(device.id))?;

    let snapshot = LightSnapshot {
        id: device.id,
        name: device.name.clone(),
        reachable: device.reachable,
        on: light.on,
        brightness: light.dimmer,
        color_temp: light.color_temp,
        xy_color: light.xy,
        min_mireds: control.min_mireds,
        max_mireds: control.max_mireds,
    };

    Ok((snapshot, Capabilities::for_light(control)))
}

fn translate(request: &TurnOn) -> Vec<LightCommand> {
    let transition_time = request.transition_time();

    // Color and color-temperature commands drop the transition when a
    // brightness change rides along in the same request.
    let color_transition_time = if request.brightness.is_some() {
        None
    } else {
        transition_time
    };

    let mut commands = Vec::new();

    let xy = request
        .xy_color
        .or_else(|| request.rgb_color.map(|(r, g, b)| rgb_to_xy(r, g, b)));

    if let Some((x, y)) = xy {
        commands.push(LightCommand::SetXyColor {
            x,
            y,
            transition_time: color_transition_time,
        });
    }

    if let Some(mireds) = request.color_temp {
        commands.push(LightCommand::SetColorTemperature {
            mireds,
            transition_time: color_transition_time,
        });
    }

    if let Some(brightness) = request.brightness {
        let value = if brightness == 255 { 254 } else { brightness };

        commands.push(LightCommand::SetBrightness {
            value,
            transition_time,
        });
    }

    if commands.is_empty() {
        commands.push(LightCommand::SetPower(true));
    }

    commands
}
