use log::info;

use tradfri::Gateway;

use crate::{Group, Light, Result};

/// Discovers the hub's lights and wraps them in adapters; hub-defined
/// groups are wrapped only when `allow_groups` is set. Registering the
/// returned adapters with the platform is the caller's job.
pub async fn setup(gateway: &Gateway, allow_groups: bool) -> Result<(Vec<Light>, Vec<Group>)> {
    let executor = gateway.executor();

    let mut lights = Vec::new();
    for device in gateway.lights().await? {
        lights.push(Light::new(&device, executor.clone())?);
    }

    let mut groups = Vec::new();
    if allow_groups {
        for group in gateway.groups().await? {
            groups.push(Group::new(&group, executor.clone()));
        }
    }

    info!("set up {} lights and {} groups", lights.len(), groups.len());

    Ok((lights, groups))
}
