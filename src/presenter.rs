/*!
# Presenter

Owns every visible field of the lookup window. Only the presentation thread
touches it; results from the worker arrive through the controller.
*/

use chrono::{DateTime, Local};
use image::imageops::FilterType;

use crate::types::profile::ProfileRecord;

pub const AVATAR_SIZE: u32 = 180;

pub const STEAM_LEVEL: &str = "Steam Level";
pub const STATUS: &str = "Status";
pub const VAC_BANS: &str = "VAC Bans";
pub const GAME_BANS: &str = "Game Bans";
pub const VISIBILITY: &str = "Visibility";
pub const OWNED_GAMES: &str = "Owned Games";

/// Info card layout, two columns of three
pub const LEFT_COLUMN: [&str; 3] = [STEAM_LEVEL, VAC_BANS, VISIBILITY];
pub const RIGHT_COLUMN: [&str; 3] = [STATUS, GAME_BANS, OWNED_GAMES];

/// Decoded avatar, always `AVATAR_SIZE` square RGBA
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Avatar {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Avatar {
    pub fn decode(bytes: &[u8]) -> Result<Self, String> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode avatar: {}", e))?;
        let img = img
            .resize_exact(AVATAR_SIZE, AVATAR_SIZE, FilterType::Triangle)
            .to_rgba8();

        Ok(Avatar {
            width: img.width(),
            height: img.height(),
            pixels: img.into_raw(),
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InfoField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct UiState {
    pub lookup_enabled: bool,
    pub display_name: String,
    pub avatar: Option<Avatar>,
    pub profile_enabled: bool,
    pub profile_url: Option<String>,
    pub info: Vec<InfoField>,
    pub notification: Option<Notification>,
    pub updated_at: Option<DateTime<Local>>,
    /// Set whenever a field changed since the last redraw
    pub dirty: bool,
}

impl Default for UiState {
    fn default() -> Self {
        let info = LEFT_COLUMN
            .iter()
            .chain(RIGHT_COLUMN.iter())
            .map(|&label| InfoField {
                label,
                value: String::new(),
            })
            .collect();

        UiState {
            lookup_enabled: true,
            display_name: String::new(),
            avatar: None,
            profile_enabled: false,
            profile_url: None,
            info,
            notification: None,
            updated_at: None,
            dirty: true,
        }
    }
}

impl UiState {
    pub fn field(&self, label: &str) -> Option<&str> {
        self.info
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    fn set_field(&mut self, label: &str, value: String) {
        if let Some(field) = self.info.iter_mut().find(|f| f.label == label) {
            field.value = value;
        }
    }
}

#[derive(Default)]
pub struct Presenter {
    ui: UiState,
}

impl Presenter {
    pub fn new() -> Self {
        Presenter::default()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn lookup_enabled(&self) -> bool {
        self.ui.lookup_enabled
    }

    pub(crate) fn begin_lookup(&mut self) {
        self.ui.lookup_enabled = false;
        self.ui.dirty = true;
    }

    /**
    Show a successful lookup

    # Notes
    The avatar is decoded before any field is touched, so a bad image leaves the
    previous result on screen and shows an error instead

    # Arguments
    - `record`: The normalized profile
    - `avatar`: Raw bytes of the avatar image
    */
    pub fn render(&mut self, record: ProfileRecord, avatar: &[u8]) {
        let avatar = match Avatar::decode(avatar) {
            Ok(avatar) => avatar,
            Err(message) => {
                tracing::warn!(steam_id = %record.steam_id, "{}", message);
                return self.render_error(&message);
            }
        };

        self.ui.avatar = Some(avatar);
        self.ui.display_name = record.display_name;
        self.ui.profile_url = Some(record.profile_url);
        self.ui.profile_enabled = true;

        self.ui.set_field(STEAM_LEVEL, record.steam_level.to_string());
        self.ui.set_field(STATUS, record.persona_state.to_string());
        self.ui.set_field(VAC_BANS, record.vac_ban_count.to_string());
        self.ui.set_field(GAME_BANS, record.game_ban_count.to_string());
        self.ui.set_field(VISIBILITY, record.visibility.to_string());
        self.ui.set_field(OWNED_GAMES, record.owned_games_count.to_string());

        self.ui.updated_at = Some(Local::now());
        self.ui.lookup_enabled = true;
        self.ui.dirty = true;
    }

    /// Show a failed lookup and hand the lookup button back to the user
    pub fn render_error(&mut self, message: &str) {
        self.ui.notification = Some(Notification {
            title: "Error".to_string(),
            message: format!("Failed to fetch Steam data: {}", message),
        });
        self.ui.lookup_enabled = true;
        self.ui.dirty = true;
    }

    pub fn render_invalid(&mut self) {
        self.ui.notification = Some(Notification {
            title: "Invalid SteamID64".to_string(),
            message: "Please enter a valid 17-digit SteamID64.".to_string(),
        });
        self.ui.dirty = true;
    }

    /// Pop the pending modal, the front end shows it until dismissed
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.ui.notification.take()
    }

    /// Profile link target, only once a lookup has succeeded
    pub fn profile_url(&self) -> Option<&str> {
        if self.ui.profile_enabled {
            self.ui.profile_url.as_deref()
        } else {
            None
        }
    }

    /// Returns whether a redraw is due and clears the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.ui.dirty, false)
    }
}
