/*!
# Steam Web API Structures
Raw response shapes of the four endpoints, plus the normalized `ProfileRecord` handed to the presenter
*/

pub mod http;
pub mod id;
pub mod player;
pub mod profile;
