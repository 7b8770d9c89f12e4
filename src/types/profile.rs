use std::fmt;

use crate::types::id::PlayerIdentifier;
use crate::types::player::{PersonaState, PlayerBans, PlayerSummary, Visibility};

/// A value from an optional endpoint that may not have come back
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Availability<T> {
    Available(T),
    Unavailable,
}

impl<T> From<Option<T>> for Availability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Availability::Available(v),
            None => Availability::Unavailable,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Availability<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Availability::Available(v) => write!(f, "{}", v),
            Availability::Unavailable => f.write_str("N/A"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileRecord {
    pub steam_id: PlayerIdentifier,
    pub display_name: String,
    pub profile_url: String,
    pub avatar_url: String,
    pub visibility: Visibility,
    pub persona_state: PersonaState,
    pub vac_ban_count: u32,
    pub game_ban_count: u32,
    pub owned_games_count: Availability<u32>,
    pub steam_level: Availability<u32>,
}

impl ProfileRecord {
    /**
    Normalize the raw endpoint data into one record

    # Arguments
    - `steam_id`: The identifier that was looked up
    - `summary`: First entry of the summary endpoint
    - `bans`: First entry of the bans endpoint
    - `owned_games`: Game count, if the owned-games call produced one
    - `steam_level`: Level, if the level call produced one
    */
    pub fn new(
        steam_id: PlayerIdentifier,
        summary: PlayerSummary,
        bans: PlayerBans,
        owned_games: Option<u32>,
        steam_level: Option<u32>,
    ) -> Self {
        ProfileRecord {
            steam_id,
            display_name: summary.persona_name,
            profile_url: summary.profile_url,
            avatar_url: summary.avatar_full,
            visibility: Visibility::from(summary.visibility_state),
            persona_state: PersonaState::from(summary.persona_state),
            vac_ban_count: bans.vac_bans,
            game_ban_count: bans.game_bans,
            owned_games_count: owned_games.into(),
            steam_level: steam_level.into(),
        }
    }
}
