use std::fmt;

#[derive(Debug)]
pub enum Error {
    Tradfri(tradfri::Error),
    NotALight(u32),
}

impl From<tradfri::Error> for Error {
    fn from(err: tradfri::Error) -> Self {
        Self::Tradfri(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tradfri(err) => write!(f, "tradfri error: {err}"),
            Self::NotALight(device) => write!(f, "device {device} has no light control"),
        }
    }
}

impl std::error::Error for Error {}
