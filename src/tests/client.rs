use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::client::Client;
use crate::error::{ApiError, LookupFailure};
use crate::tests::{
    AVATAR_URL, BANS, EMPTY_SUMMARY, OWNED_GAMES, STEAM_LEVEL, SUMMARY, ScriptedTransport, TEST_ID,
    png_avatar, test_client, test_config,
};
use crate::types::id::PlayerIdentifier;
use crate::types::player::{PersonaState, Visibility};
use crate::types::profile::Availability;

fn test_id() -> PlayerIdentifier {
    PlayerIdentifier::parse(TEST_ID).unwrap()
}

#[tokio::test]
async fn test_fetch_profile() {
    let client = test_client(ScriptedTransport::happy());

    let profile = client.fetch_profile(&test_id()).await.unwrap();

    assert_eq!(profile.steam_id.as_str(), TEST_ID);
    assert_eq!(profile.display_name, "Rabscuttle");
    assert_eq!(profile.profile_url, "https://steamcommunity.com/id/rabscuttle/");
    assert_eq!(profile.avatar_url, AVATAR_URL);
    assert_eq!(profile.visibility, Visibility::Public);
    assert_eq!(profile.persona_state, PersonaState::Online);
    assert_eq!(profile.vac_ban_count, 0);
    assert_eq!(profile.game_ban_count, 0);
    assert_eq!(profile.owned_games_count, Availability::Available(50));
    assert_eq!(profile.steam_level, Availability::Available(12));
}

#[tokio::test]
async fn test_query_parameters() {
    let client = test_client(ScriptedTransport::happy());
    client.fetch_profile(&test_id()).await.unwrap();

    let calls = client.http.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 4);

    let summary = calls.iter().find(|u| u.contains("GetPlayerSummaries")).unwrap();
    assert!(summary.starts_with("https://api.test/ISteamUser/GetPlayerSummaries/v2/?"));
    assert!(summary.contains("key=test-key"));
    assert!(summary.contains(&format!("steamids={}", TEST_ID)));

    let level = calls.iter().find(|u| u.contains("GetSteamLevel")).unwrap();
    assert!(level.contains(&format!("steamid={}", TEST_ID)));
    assert!(!level.contains("steamids="));
}

#[tokio::test]
async fn test_missing_game_count() {
    let transport = ScriptedTransport::happy().reply("GetOwnedGames", r#"{"response":{}}"#);
    let client = test_client(transport);

    let profile = client.fetch_profile(&test_id()).await.unwrap();

    assert_eq!(profile.owned_games_count, Availability::Unavailable);
    assert_eq!(profile.steam_level, Availability::Available(12));
}

#[tokio::test]
async fn test_optional_endpoints_failing() {
    let transport = ScriptedTransport::happy()
        .fail("GetOwnedGames", ApiError::RequestError("connection reset".to_string()))
        .reply("GetSteamLevel", "<html>not json</html>");
    let client = test_client(transport);

    let profile = client.fetch_profile(&test_id()).await.unwrap();

    assert_eq!(profile.owned_games_count, Availability::Unavailable);
    assert_eq!(profile.steam_level, Availability::Unavailable);
}

#[tokio::test]
async fn test_empty_player_list() {
    let transport = ScriptedTransport::happy().reply("GetPlayerSummaries", EMPTY_SUMMARY);
    let client = test_client(transport);

    let err = client.fetch_profile(&test_id()).await.unwrap_err();
    assert_eq!(err, ApiError::NoPlayerData);
    assert!(LookupFailure::from(err).0.contains("No player data"));

    // Nothing after the summary is worth asking for
    assert_eq!(client.http.call_count(), 1);
}

#[tokio::test]
async fn test_ban_transport_error() {
    let transport = ScriptedTransport::happy()
        .fail("GetPlayerBans", ApiError::RequestError("timed out".to_string()));
    let client = test_client(transport);

    let err = client.fetch_profile(&test_id()).await.unwrap_err();

    assert_eq!(err, ApiError::RequestError("timed out".to_string()));
    assert_eq!(client.http.calls_to("GetOwnedGames"), 0);
    assert_eq!(client.http.calls_to("GetSteamLevel"), 0);
}

#[tokio::test]
async fn test_malformed_summary() {
    let transport = ScriptedTransport::happy()
        .reply("GetPlayerSummaries", r#"{"response":{"players":[{"personaname":"x"}]}}"#);
    let client = test_client(transport);

    match client.fetch_profile(&test_id()).await {
        Err(ApiError::ParsingError(msg)) => assert!(msg.contains("GetPlayerSummaries")),
        other => panic!("Expected ParsingError, got {:?}", other.map(|p| p.display_name)),
    }
}

#[tokio::test]
async fn test_unauthorized_key() {
    let transport = ScriptedTransport::happy().fail("GetPlayerSummaries", ApiError::Unauthorized);
    let client = test_client(transport);

    let err = client.fetch_profile(&test_id()).await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
}

#[tokio::test]
async fn test_fetch_image() {
    let client = test_client(ScriptedTransport::happy());

    let bytes = client.fetch_image(AVATAR_URL).await.unwrap();
    assert_eq!(bytes, png_avatar());

    assert!(client.fetch_image("").await.is_err());
}

// Status line and body per request path, `None` never answers
fn canned_reply(path: &str) -> Option<(&'static str, &'static str)> {
    if path.starts_with("/forbidden") {
        return Some(("403 Forbidden", ""));
    }
    if path.starts_with("/unauthorized") {
        return Some(("401 Unauthorized", ""));
    }
    if path.starts_with("/broken") {
        return Some(("500 Internal Server Error", "oops"));
    }
    if path.starts_with("/hang") {
        return None;
    }

    let body = [
        ("GetPlayerSummaries", SUMMARY),
        ("GetPlayerBans", BANS),
        ("GetOwnedGames", OWNED_GAMES),
        ("GetSteamLevel", STEAM_LEVEL),
    ]
    .iter()
    .find(|(key, _)| path.contains(key))
    .map(|(_, body)| *body);

    match body {
        Some(body) => Some(("200 OK", body)),
        None => Some(("404 Not Found", "")),
    }
}

/// Minimal HTTP/1.1 server on loopback, returns its base URL
async fn serve_canned() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let Some((status, body)) = canned_reply(&path) else {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    return;
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

fn loopback_client(base_url: &str, timeout: Duration) -> Client {
    let mut config = test_config();
    config.base_url = base_url.to_string();
    config.request_timeout = timeout;

    // Loopback must not be routed through a proxy from the environment
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(config.request_timeout)
        .build()
        .unwrap();
    Client::with_transport(http, &config)
}

#[tokio::test]
async fn test_http_transport_success() {
    let base = serve_canned().await;
    let client = loopback_client(&base, Duration::from_secs(5));

    let profile = client.fetch_profile(&test_id()).await.unwrap();

    assert_eq!(profile.display_name, "Rabscuttle");
    assert_eq!(profile.owned_games_count, Availability::Available(50));
    assert_eq!(profile.steam_level, Availability::Available(12));
}

#[tokio::test]
async fn test_http_transport_statuses() {
    let base = serve_canned().await;
    let client = loopback_client(&base, Duration::from_secs(5));

    let forbidden = client.fetch_image(&format!("{}/forbidden", base)).await;
    assert_eq!(forbidden, Err(ApiError::Unauthorized));

    let unauthorized = client.fetch_image(&format!("{}/unauthorized", base)).await;
    assert_eq!(unauthorized, Err(ApiError::Unauthorized));

    let broken = client.fetch_image(&format!("{}/broken", base)).await;
    assert_eq!(broken, Err(ApiError::Status(500)));

    let missing = client.fetch_image(&format!("{}/nothing-here", base)).await;
    assert_eq!(missing, Err(ApiError::Status(404)));
}

#[tokio::test]
async fn test_http_server_error_fails_lookup() {
    let base = serve_canned().await;
    let client = loopback_client(&format!("{}/broken", base), Duration::from_secs(5));

    let err = client.fetch_profile(&test_id()).await.unwrap_err();

    assert_eq!(err, ApiError::Status(500));
    assert!(LookupFailure::from(err).0.contains("500"));
}

#[tokio::test]
async fn test_http_transport_timeout() {
    let base = serve_canned().await;
    let client = loopback_client(&base, Duration::from_secs(1));

    let result = client.fetch_image(&format!("{}/hang", base)).await;

    assert!(matches!(result, Err(ApiError::RequestError(_))), "{:?}", result);
}

#[tokio::test]
async fn test_http_connection_refused() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = loopback_client(&format!("http://{}", addr), Duration::from_secs(5));
    let result = client.fetch_profile(&test_id()).await;

    match result {
        Err(ApiError::RequestError(msg)) => assert!(!msg.contains("test-key")),
        other => panic!("Expected RequestError, got {:?}", other.map(|p| p.display_name)),
    }
}
