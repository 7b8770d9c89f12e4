/*!
Provides `Client` struct for interacting with the Steam Web API.

# Examples

Fetching a profile:
```rust,no_run
use steamid_lookup::{
    client::Client,
    config::Config,
    types::id::PlayerIdentifier,
};

#[tokio::main]
async fn main() {
    let client = Client::new(&Config::new("YOUR_API_KEY")).unwrap();
    let id = PlayerIdentifier::parse("76561197960287930").unwrap();

    let profile = client.fetch_profile(&id).await.unwrap();
    println!("{} is {}", profile.display_name, profile.persona_state);
}
```
*/

mod client;
pub mod constants;
pub(super) mod utils;
pub mod http;

pub use client::*;
pub use http::Transport;
