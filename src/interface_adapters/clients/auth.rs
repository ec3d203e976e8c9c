use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Guest session issued by the auth service; the token rides in the channel
// join payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GuestSession {
    pub token: String,
    pub expires_at: u64,
}

#[derive(Debug, Serialize)]
struct GuestLoginRequest<'a> {
    guest_id: &'a str,
    display_name: &'a str,
    metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug)]
pub enum LoginError {
    Rejected { message: String },
    UpstreamUnavailable,
}

// Thin reqwest client for the auth service's guest login.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub async fn guest_login(
        &self,
        guest_id: &str,
        display_name: &str,
    ) -> Result<GuestSession, LoginError> {
        let url = format!("{}/auth/guest", self.base_url);
        let response = self
            .http
            .post(url)
            .json(&GuestLoginRequest {
                guest_id,
                display_name,
                metadata: None,
            })
            .send()
            .await
            .map_err(|_| LoginError::UpstreamUnavailable)?;

        if response.status().is_success() {
            return response
                .json::<GuestSession>()
                .await
                .map_err(|_| LoginError::UpstreamUnavailable);
        }

        if response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNAUTHORIZED
        {
            let error = response
                .json::<ErrorResponse>()
                .await
                .map_err(|_| LoginError::UpstreamUnavailable)?;
            return Err(LoginError::Rejected {
                message: error.message,
            });
        }

        Err(LoginError::UpstreamUnavailable)
    }
}
