use serde::{Deserialize, Serialize};
use tradfri::LightControl;

/// What a wrapped resource can be asked to do.
///
/// Derived from declared control metadata only, never from observed state.
#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Capabilities {
    pub brightness: bool,
    pub transition: bool,
    pub color_temp: bool,
    pub xy_color: bool,
    pub rgb_color: bool,
}

impl Capabilities {
    pub fn for_light(control: &LightControl) -> Capabilities {
        Capabilities {
            brightness: true,
            transition: true,
            color_temp: control.can_set_mireds,
            xy_color: control.can_set_color,
            rgb_color: control.can_set_color,
        }
    }

    pub fn for_group() -> Capabilities {
        Capabilities {
            brightness: true,
            transition: true,
            ..Capabilities::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(can_set_mireds: bool, can_set_color: bool) -> LightControl {
        LightControl {
            can_set_dimmer: true,
            can_set_mireds,
            can_set_color,
            min_mireds: None,
            max_mireds: None,
            lights: Vec::new(),
        }
    }

    #[test]
    fn test_white_spectrum_light() {
        let capabilities = Capabilities::for_light(&control(true, false));

        assert!(capabilities.brightness);
        assert!(capabilities.transition);
        assert!(capabilities.color_temp);
        assert!(!capabilities.xy_color);
        assert!(!capabilities.rgb_color);
    }

    #[test]
    fn test_color_light() {
        let capabilities = Capabilities::for_light(&control(true, true));

        assert!(capabilities.xy_color);
        assert!(capabilities.rgb_color);
    }

    #[test]
    fn test_group() {
        let capabilities = Capabilities::for_group();

        assert!(capabilities.brightness);
        assert!(capabilities.transition);
        assert!(!capabilities.color_temp);
        assert!(!capabilities.xy_color);
        assert!(!capabilities.rgb_color);
    }

    #[test]
    fn test_equal_metadata_yields_equal_flags() {
        assert_eq!(
            Capabilities::for_light(&control(true, true)),
            Capabilities::for_light(&control(true, true))
        );
    }
}
