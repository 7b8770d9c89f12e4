use serde::Deserialize;

/// Envelope used by most endpoints: `{"response": ...}`
#[derive(Clone, Deserialize)]
pub struct ApiResult<T> {
    pub response: T,
}

/// `GetPlayerBans` has no envelope, the list sits at the top level
#[derive(Clone, Deserialize)]
pub struct PlayersResult<T> {
    pub players: Vec<T>,
}
