use serde::{Deserialize, Serialize};

/// A request submitted to the hub through a `CommandExecutor`.
///
/// Transition times are in the hub's unit, tenths of a second.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListDevices,
    ListGroups,
    Light { device: u32, command: LightCommand },
    Group { group: u32, command: GroupCommand },
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LightCommand {
    SetPower(bool),
    SetBrightness {
        value: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transition_time: Option<u32>,
    },
    SetColorTemperature {
        mireds: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transition_time: Option<u32>,
    },
    SetXyColor {
        x: f32,
        y: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transition_time: Option<u32>,
    },
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum GroupCommand {
    SetPower(bool),
    SetBrightness {
        value: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transition_time: Option<u32>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListDevices => "list_devices",
            Command::ListGroups => "list_groups",
            Command::Light { command, .. } => command.name(),
            Command::Group { command, .. } => command.name(),
        }
    }
}

impl LightCommand {
    pub fn name(&self) -> &'static str {
        match self {
            LightCommand::SetPower(_) => "set_power",
            LightCommand::SetBrightness { .. } => "set_brightness",
            LightCommand::SetColorTemperature { .. } => "set_color_temperature",
            LightCommand::SetXyColor { .. } => "set_xy_color",
        }
    }
}

impl GroupCommand {
    pub fn name(&self) -> &'static str {
        match self {
            GroupCommand::SetPower(_) => "set_power",
            GroupCommand::SetBrightness { .. } => "set_brightness",
        }
    }
}
