use serde::{Deserialize, Serialize};

/// A device resource as reported by the hub.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Device {
    pub id: u32,
    pub name: String,
    pub reachable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_control: Option<LightControl>,
}

impl Device {
    pub fn has_light_control(&self) -> bool {
        self.light_control.is_some()
    }
}

/// Declared control metadata plus the per-bulb state of a light device.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LightControl {
    pub can_set_dimmer: bool,
    pub can_set_mireds: bool,
    pub can_set_color: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_mireds: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mireds: Option<u16>,
    pub lights: Vec<LightState>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LightState {
    pub on: bool,
    pub dimmer: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_temp: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xy: Option<(f32, f32)>,
}
