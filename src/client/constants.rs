use std::num::{NonZero, NonZeroU32};
use std::time::Duration;

pub const BASE_URL: &str = "https://api.steampowered.com";

pub(crate) const PLAYER_SUMMARIES: &str = "/ISteamUser/GetPlayerSummaries/v2/";
pub(crate) const PLAYER_BANS: &str = "/ISteamUser/GetPlayerBans/v1/";
pub(crate) const OWNED_GAMES: &str = "/IPlayerService/GetOwnedGames/v1/";
pub(crate) const STEAM_LEVEL: &str = "/IPlayerService/GetSteamLevel/v1/";

pub const REQUESTS_PER_SECOND: NonZeroU32 = NonZero::new(3).unwrap();
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
