use std::fmt;
use std::str::FromStr;

use crate::error::IdError;

pub const STEAM_ID_LEN: usize = 17;

/**
A syntactically valid SteamID64.

Existence is not checked here, the summary endpoint decides that later.
*/
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PlayerIdentifier(String);

impl PlayerIdentifier {
    /**
    Validate user input as a SteamID64

    # Arguments
    - `input`: Raw text from the input field, surrounding whitespace is ignored

    # Returns
    The identifier, or why it was rejected
    */
    pub fn parse(input: &str) -> Result<Self, IdError> {
        let input = input.trim();

        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::NonDigit);
        }
        if input.len() != STEAM_ID_LEN {
            return Err(IdError::WrongLength(input.chars().count()));
        }

        Ok(PlayerIdentifier(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn validate(input: &str) -> Result<PlayerIdentifier, IdError> {
    PlayerIdentifier::parse(input)
}

impl FromStr for PlayerIdentifier {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerIdentifier::parse(s)
    }
}

impl fmt::Display for PlayerIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
