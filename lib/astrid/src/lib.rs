mod capability;
pub use capability::Capabilities;

mod color;
pub use color::rgb_to_xy;

mod request;
pub use request::TurnOn;

mod light;
pub use light::{Light, LightSnapshot};

mod group;
pub use group::{Group, GroupSnapshot};

mod observe;
pub use observe::{observe_group, observe_light, Backoff, StateSink, Update};

mod setup;
pub use setup::setup;

mod error;
pub use error::Error;

pub type ErasedError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
