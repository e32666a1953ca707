//! Blocking HTTP implementation of [`MusicService`] against the Spotify Web API.
//!
//! Authorization is bearer-token based. The token comes from
//! `SPOTIFY_ACCESS_TOKEN`, or is minted from `SPOTIFY_REFRESH_TOKEN` through
//! the accounts service on first use and again whenever the API answers 401.

use log::{debug, info, warn};
use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::cell::RefCell;
use std::time::Duration;

use super::models::{AudioFeatures, Playback, Playlist};
use super::{MusicService, ServiceError, SCOPES};
use crate::config::SpotifyCredentials;

pub const API_BASE: &str = "https://api.spotify.com/v1";
pub const ACCOUNTS_BASE: &str = "https://accounts.spotify.com";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct SpotifyClient {
    http: Client,
    credentials: SpotifyCredentials,
    api_base: String,
    accounts_base: String,
    access_token: RefCell<Option<String>>,
}

impl SpotifyClient {
    /// Builds the client. No network traffic happens until the first call.
    pub fn new(credentials: SpotifyCredentials, timeout: Duration) -> Result<Self, ServiceError> {
        let http = Client::builder().timeout(timeout).build()?;
        let access_token = RefCell::new(credentials.access_token.clone());

        Ok(Self {
            http,
            credentials,
            api_base: API_BASE.to_string(),
            accounts_base: ACCOUNTS_BASE.to_string(),
            access_token,
        })
    }

    /// Points the client at different hosts (a local mock server, a proxy).
    pub fn with_base_urls(mut self, api_base: &str, accounts_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self.accounts_base = accounts_base.trim_end_matches('/').to_string();
        self
    }

    /// Authorization-code URL the user must visit to grant [`SCOPES`].
    pub fn authorize_url(&self) -> String {
        let base = format!("{}/authorize", self.accounts_base);
        Url::parse_with_params(
            &base,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
                ("scope", SCOPES),
            ],
        )
        .map(|url| url.to_string())
        .unwrap_or(base)
    }

    fn token(&self) -> Result<String, ServiceError> {
        if let Some(token) = self.access_token.borrow().as_ref() {
            return Ok(token.clone());
        }
        if self.credentials.refresh_token.is_some() {
            return self.refresh_access_token();
        }
        Err(ServiceError::NotAuthorized {
            authorize_url: self.authorize_url(),
        })
    }

    fn refresh_access_token(&self) -> Result<String, ServiceError> {
        let Some(refresh_token) = self.credentials.refresh_token.as_deref() else {
            return Err(ServiceError::NotAuthorized {
                authorize_url: self.authorize_url(),
            });
        };

        info!("Requesting a new Spotify access token");
        let response = self
            .http
            .post(format!("{}/api/token", self.accounts_base))
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()?;

        let body = read_body(response)?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        *self.access_token.borrow_mut() = Some(token.access_token.clone());
        Ok(token.access_token)
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, ServiceError> {
        let url = format!("{}{}", self.api_base, path);
        debug!("GET {url}");

        let token = self.token()?;
        let response = self.http.get(&url).query(query).bearer_auth(&token).send()?;

        if response.status() == StatusCode::UNAUTHORIZED
            && self.credentials.refresh_token.is_some()
        {
            warn!("Spotify rejected the access token, refreshing");
            let token = self.refresh_access_token()?;
            return Ok(self.http.get(&url).query(query).bearer_auth(&token).send()?);
        }

        Ok(response)
    }
}

/// Body of a successful response, or a [`ServiceError::Status`] carrying the
/// API's own error message when it sent one.
fn read_body(response: Response) -> Result<String, ServiceError> {
    let status = response.status();
    let body = response.text()?;

    if status.is_success() {
        return Ok(body);
    }

    Err(ServiceError::Status {
        status: status.as_u16(),
        message: error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        }),
    })
}

/// Web API errors look like `{"error": {"status": 401, "message": "..."}}`,
/// accounts errors like `{"error": "invalid_grant", "error_description": "..."}`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value["error"]["message"]
        .as_str()
        .or_else(|| value["error_description"].as_str())
        .or_else(|| value["error"].as_str())
        .map(str::to_string)
}

impl MusicService for SpotifyClient {
    fn current_playback(&self) -> Result<Option<Playback>, ServiceError> {
        let response = self.get("/me/player", &[])?;
        if response.status() == StatusCode::NO_CONTENT {
            debug!("No active playback session");
            return Ok(None);
        }

        let body = read_body(response)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn audio_features(&self, track_id: &str) -> Result<Option<AudioFeatures>, ServiceError> {
        let response = self.get(&format!("/audio-features/{track_id}"), &[])?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("No audio features for {track_id}");
            return Ok(None);
        }

        let body = read_body(response)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn playlist(&self, playlist_id: &str, market: &str) -> Result<Playlist, ServiceError> {
        let response = self.get(&format!("/playlists/{playlist_id}"), &[("market", market)])?;
        let body = read_body(response)?;
        Ok(serde_json::from_str(&body)?)
    }
}
