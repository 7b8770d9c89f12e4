use std::fmt;

#[derive(Debug, Eq, PartialEq)]
pub enum IdError {
    WrongLength(usize),
    NonDigit,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IdError::WrongLength(len) => write!(f, "expected 17 digits, got {} characters", len),
            IdError::NonDigit => write!(f, "SteamID64 may only contain digits"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ApiError {
    ParsingError(String),
    RequestError(String),
    Status(u16),
    Unauthorized,
    NoPlayerData,
    Unknown(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::ParsingError(err) => write!(f, "Steam returned an unparseable response: {}", err),
            ApiError::RequestError(err) => write!(f, "request failed: {}", err),
            ApiError::Status(code) => write!(f, "Steam responded with HTTP {}", code),
            ApiError::Unauthorized => write!(f, "Steam rejected the provided API key"),
            ApiError::NoPlayerData => write!(f, "No player data found for this SteamID."),
            ApiError::Unknown(err) => write!(f, "{}", err),
        }
    }
}

/// Collapsed failure of one lookup, carrying the message shown to the user.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LookupFailure(pub String);

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ApiError> for LookupFailure {
    fn from(e: ApiError) -> Self {
        LookupFailure(e.to_string())
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum ConfigError {
    MissingApiKey,
    InvalidValue { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::MissingApiKey => write!(
                f,
                "no Steam Web API key configured (set STEAM_API_KEY or pass --api-key)"
            ),
            ConfigError::InvalidValue { name, value } => {
                write!(f, "invalid value for {}: {:?}", name, value)
            }
        }
    }
}
