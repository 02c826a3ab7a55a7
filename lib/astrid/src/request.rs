use std::time::Duration;

/// A "turn on" request in the platform's generic light model.
///
/// Brightness is the platform's 0–255 scale; the hub's maximum is 254 and
/// 255 is normalized down on translation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnOn {
    pub brightness: Option<u8>,
    pub color_temp: Option<u16>,
    pub xy_color: Option<(f32, f32)>,
    pub rgb_color: Option<(u8, u8, u8)>,
    pub transition: Option<Duration>,
}

impl TurnOn {
    /// Transition in the hub's unit, tenths of a second. Whole seconds
    /// only, matching the platform's integer transition attribute.
    pub(crate) fn transition_time(&self) -> Option<u32> {
        self.transition
            .map(|transition| transition.as_secs() as u32 * 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_conversion() {
        let request = TurnOn {
            transition: Some(Duration::from_secs(2)),
            ..TurnOn::default()
        };

        assert_eq!(request.transition_time(), Some(20));
    }

    #[test]
    fn test_transition_truncates_to_whole_seconds() {
        let request = TurnOn {
            transition: Some(Duration::from_millis(2500)),
            ..TurnOn::default()
        };

        assert_eq!(request.transition_time(), Some(20));
    }

    #[test]
    fn test_no_transition() {
        assert_eq!(TurnOn::default().transition_time(), None);
    }
}
