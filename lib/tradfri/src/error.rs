use std::fmt;

pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum Error {
    Transport(TransportError),
    Json(serde_json::Error),
    UnexpectedResponse(&'static str),
}

impl Error {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<TransportError>,
    {
        Self::Transport(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::UnexpectedResponse(what) => write!(f, "unexpected response: {what}"),
        }
    }
}

impl std::error::Error for Error {}
