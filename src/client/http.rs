use async_trait::async_trait;
use reqwest::StatusCode;

use crate::client::Client;
use crate::client::utils::Query;
use crate::error::ApiError;

/**
The one HTTP operation the client needs. Implemented for `reqwest::Client`;
tests substitute a scripted implementation.
*/
#[async_trait]
pub trait Transport: Send + Sync {
    /**
    GET `url` and return the raw body

    # Returns
    - The body bytes of a 2xx response
    - `ApiError::Unauthorized` on 401/403, `ApiError::Status` on any other non-2xx,
      `ApiError::RequestError` when the request never completed
    */
    async fn get(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        // without_url(): the query string carries the API key
        let resp = reqwest::Client::get(self, url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.without_url().to_string()))?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(ApiError::Unauthorized),
            status if !status.is_success() => return Err(ApiError::Status(status.as_u16())),
            _ => {}
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::RequestError(e.without_url().to_string()))?;

        Ok(body.to_vec())
    }
}

/// Which query parameter carries the identifier, the `ISteamUser` endpoints take a list
pub(crate) enum IdParam<'a> {
    Many(&'a str),
    One(&'a str),
}

impl<T: Transport> Client<T> {
    /**
    INTERNAL: Makes a GET request to an API endpoint, returning the response as a deserialized type.

    # Arguments
    - `path`: The path to the API endpoint. (e.g., "/ISteamUser/GetPlayerBans/v1/").
    - `id`: The identifier, sent as `steamids` or `steamid`

    # Returns
    - A `Result` containing the deserialized response or an `ApiError` on failure.
    */
    pub(crate) async fn call_api<R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        id: IdParam<'_>,
    ) -> Result<R, ApiError> {
        let (steamids, steamid) = match id {
            IdParam::Many(ids) => (Some(ids), None),
            IdParam::One(id) => (None, Some(id)),
        };
        let query = serde_urlencoded::to_string(Query {
            key: &self.api_key,
            steamids,
            steamid,
            format: "json",
        })
        .map_err(|_| ApiError::ParsingError("Unable to serialize query".to_string()))?;

        self.limiter.until_ready().await;
        tracing::debug!(endpoint = path, "calling Steam Web API");

        let url = format!("{}{}?{}", self.base_url, path, query);
        let body = self.http.get(&url).await?;

        serde_json::from_slice::<R>(&body)
            .map_err(|err| ApiError::ParsingError(format!("{}: {}", path, err)))
    }
}
