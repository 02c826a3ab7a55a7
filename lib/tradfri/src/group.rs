use serde::{Deserialize, Serialize};

/// A group resource as reported by the hub.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Group {
    pub id: u32,
    pub name: String,
    pub on: bool,
    pub dimmer: u8,
}
