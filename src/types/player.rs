use serde::Deserialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Visibility {
    Public,
    Private,
}

impl From<i64> for Visibility {
    fn from(code: i64) -> Self {
        match code {
            3 => Visibility::Public,
            _ => Visibility::Private,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Visibility::Public => f.write_str("Public"),
            Visibility::Private => f.write_str("Private"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PersonaState {
    Offline,
    Online,
    Busy,
    Away,
    Snooze,
    LookingToTrade,
    LookingToPlay,
    Unknown,
}

impl From<i64> for PersonaState {
    fn from(code: i64) -> Self {
        match code {
            0 => PersonaState::Offline,
            1 => PersonaState::Online,
            2 => PersonaState::Busy,
            3 => PersonaState::Away,
            4 => PersonaState::Snooze,
            5 => PersonaState::LookingToTrade,
            6 => PersonaState::LookingToPlay,
            _ => PersonaState::Unknown,
        }
    }
}

impl fmt::Display for PersonaState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            PersonaState::Offline => "Offline",
            PersonaState::Online => "Online",
            PersonaState::Busy => "Busy",
            PersonaState::Away => "Away",
            PersonaState::Snooze => "Snooze",
            PersonaState::LookingToTrade => "Looking to Trade",
            PersonaState::LookingToPlay => "Looking to Play",
            PersonaState::Unknown => "Unknown",
        };
        f.write_str(text)
    }
}

fn default_persona_state() -> i64 {
    0
}

/// One entry of `GetPlayerSummaries`
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerSummary {
    #[serde(rename = "personaname")]
    pub persona_name: String,
    #[serde(rename = "profileurl")]
    pub profile_url: String,
    #[serde(rename = "avatarfull")]
    pub avatar_full: String,
    #[serde(rename = "communityvisibilitystate")]
    pub visibility_state: i64,
    // Missing for some accounts, Steam treats that as offline
    #[serde(rename = "personastate", default = "default_persona_state")]
    pub persona_state: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SummaryList {
    #[serde(default = "Vec::new")]
    pub players: Vec<PlayerSummary>,
}

/// One entry of `GetPlayerBans`
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerBans {
    #[serde(rename = "NumberOfVACBans")]
    pub vac_bans: u32,
    #[serde(rename = "NumberOfGameBans")]
    pub game_bans: u32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OwnedGames {
    pub game_count: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SteamLevel {
    pub player_level: Option<u32>,
}

/// `{"response": {}}` and a missing `response` key both mean "no data"
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OptionalResult<T: Default> {
    #[serde(default)]
    pub response: T,
}
