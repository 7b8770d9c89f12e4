mod client;

use std::io::Cursor;
use std::num::NonZeroU32;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{Client, Transport};
use crate::config::Config;
use crate::error::ApiError;

pub(crate) const TEST_ID: &str = "76561197960287930";
pub(crate) const AVATAR_URL: &str = "https://avatars.test/rabscuttle_full.jpg";

pub(crate) const SUMMARY: &str = r#"{"response":{"players":[{
    "steamid":"76561197960287930",
    "personaname":"Rabscuttle",
    "profileurl":"https://steamcommunity.com/id/rabscuttle/",
    "avatarfull":"https://avatars.test/rabscuttle_full.jpg",
    "communityvisibilitystate":3,
    "personastate":1
}]}}"#;
pub(crate) const EMPTY_SUMMARY: &str = r#"{"response":{"players":[]}}"#;
pub(crate) const BANS: &str = r#"{"players":[{
    "SteamId":"76561197960287930",
    "CommunityBanned":false,
    "VACBanned":false,
    "NumberOfVACBans":0,
    "DaysSinceLastBan":0,
    "NumberOfGameBans":0,
    "EconomyBan":"none"
}]}"#;
pub(crate) const OWNED_GAMES: &str = r#"{"response":{"game_count":50,"games":[]}}"#;
pub(crate) const STEAM_LEVEL: &str = r#"{"response":{"player_level":12}}"#;

/// Canned replies keyed by a substring of the request URL, every call is recorded
pub(crate) struct ScriptedTransport {
    replies: Vec<(&'static str, Result<Vec<u8>, ApiError>)>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        ScriptedTransport {
            replies: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// All four endpoints and the avatar answer successfully
    pub(crate) fn happy() -> Self {
        ScriptedTransport::new()
            .reply("GetPlayerSummaries", SUMMARY)
            .reply("GetPlayerBans", BANS)
            .reply("GetOwnedGames", OWNED_GAMES)
            .reply("GetSteamLevel", STEAM_LEVEL)
            .reply_bytes("avatars.test", png_avatar())
    }

    pub(crate) fn reply(self, key: &'static str, body: &str) -> Self {
        self.reply_bytes(key, body.as_bytes().to_vec())
    }

    pub(crate) fn reply_bytes(mut self, key: &'static str, body: Vec<u8>) -> Self {
        self.replies.retain(|(k, _)| *k != key);
        self.replies.push((key, Ok(body)));
        self
    }

    pub(crate) fn fail(mut self, key: &'static str, err: ApiError) -> Self {
        self.replies.retain(|(k, _)| *k != key);
        self.replies.push((key, Err(err)));
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls_to(&self, key: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.contains(key))
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.calls.lock().unwrap().push(url.to_string());

        self.replies
            .iter()
            .find(|(key, _)| url.contains(key))
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Err(ApiError::Status(404)))
    }
}

pub(crate) fn test_config() -> Config {
    let mut config = Config::new("test-key");
    config.base_url = "https://api.test".to_string();
    config.requests_per_second = NonZeroU32::new(1000).unwrap();
    config
}

pub(crate) fn test_client(transport: ScriptedTransport) -> Client<ScriptedTransport> {
    Client::with_transport(transport, &test_config())
}

pub(crate) fn png_avatar() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(64, 64, image::Rgba([0, 170, 255, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}
