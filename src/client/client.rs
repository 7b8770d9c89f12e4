use futures_util::future::join;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

use crate::client::constants::{OWNED_GAMES, PLAYER_BANS, PLAYER_SUMMARIES, STEAM_LEVEL};
use crate::client::http::{IdParam, Transport};
use crate::client::utils::build_http;
use crate::config::Config;
use crate::error::ApiError;
use crate::types::http::{ApiResult, PlayersResult};
use crate::types::id::PlayerIdentifier;
use crate::types::player::{OptionalResult, OwnedGames, PlayerBans, SteamLevel, SummaryList};
use crate::types::profile::ProfileRecord;

pub struct Client<T: Transport = reqwest::Client> {
    pub(crate) http: T,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) limiter: DefaultDirectRateLimiter,
}

impl Client<reqwest::Client> {
    /**
    Constructs a new client backed by `reqwest`

    # Arguments
    - `config`: API key, base URL, timeout and request quota

    # Returns
    A client, or `ApiError::Unknown` if the TLS backend could not be initialised
    */
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = build_http(config.request_timeout)?;
        Ok(Client::with_transport(http, config))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(http: T, config: &Config) -> Self {
        Client {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::direct(Quota::per_second(config.requests_per_second)),
        }
    }

    /**
    Fetch everything the profile card shows for one player

    # Notes
    Summary and bans are required and fetched first; owned games and level are
    fetched together afterwards and fall back to `Unavailable` on any failure

    # Arguments
    - `id`: A validated SteamID64

    # Returns
    The normalized record, or `ApiError::NoPlayerData` if Steam knows no such player
    */
    pub async fn fetch_profile(&self, id: &PlayerIdentifier) -> Result<ProfileRecord, ApiError> {
        let summaries: ApiResult<SummaryList> = self
            .call_api(PLAYER_SUMMARIES, IdParam::Many(id.as_str()))
            .await?;
        let summary = summaries
            .response
            .players
            .into_iter()
            .next()
            .ok_or(ApiError::NoPlayerData)?;

        let bans: PlayersResult<PlayerBans> = self
            .call_api(PLAYER_BANS, IdParam::Many(id.as_str()))
            .await?;
        let bans = bans.players.into_iter().next().ok_or(ApiError::NoPlayerData)?;

        let (owned, level) = join(
            self.call_api::<OptionalResult<OwnedGames>>(OWNED_GAMES, IdParam::One(id.as_str())),
            self.call_api::<OptionalResult<SteamLevel>>(STEAM_LEVEL, IdParam::One(id.as_str())),
        )
        .await;

        let owned_games = optional_field("game_count", owned.map(|r| r.response.game_count));
        let steam_level = optional_field("player_level", level.map(|r| r.response.player_level));

        Ok(ProfileRecord::new(
            id.clone(),
            summary,
            bans,
            owned_games,
            steam_level,
        ))
    }

    /**
    Download an image, typically the `avatarfull` URL of a profile

    # Returns
    The raw, undecoded bytes
    */
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        if url.is_empty() {
            return Err(ApiError::Unknown("Profile has no avatar URL".to_string()));
        }
        tracing::debug!(url, "downloading avatar");
        self.http.get(url).await
    }
}

// Absent field and failed call look the same to the user, only the log tells them apart
fn optional_field(field: &str, result: Result<Option<u32>, ApiError>) -> Option<u32> {
    match result {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            tracing::debug!(field, "field missing from response, showing N/A");
            None
        }
        Err(e) => {
            tracing::warn!(field, error = %e, "optional endpoint failed, showing N/A");
            None
        }
    }
}
