mod command;
pub use command::{Command, GroupCommand, LightCommand};

mod device;
pub use device::{Device, LightControl, LightState};

mod group;
pub use group::Group;

mod executor;
pub use executor::CommandExecutor;

mod gateway;
pub use gateway::Gateway;

mod observe;
pub use observe::{ObservationService, Subscription};

mod error;
pub use error::{Error, TransportError};

pub type Result<T> = std::result::Result<T, Error>;
