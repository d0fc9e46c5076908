//! Typed HTTP client for the events CRUD endpoints.

use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::objects::events::{
    AckResponse, EventCreatedResponse, EventListResponse, EventPayload, EventResponse,
};

/// Typed HTTP client for the public events API.
///
/// Wraps the five CRUD endpoints exposed by the server. The API is
/// unauthenticated; all the client adds over raw `reqwest` is URL
/// handling and response envelope deserialization.
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: Client,
    base_url: Url,
}

impl EventsClient {
    /// Create a new `EventsClient`.
    ///
    /// * `base_url` – root URL of the events server (e.g. `http://localhost:8080`).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /events` – list all events.
    pub async fn list(&self) -> Result<EventListResponse, ClientError> {
        let url = self.base_url.join("/events")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /events/{id}` – fetch one event by id.
    pub async fn get(&self, id: i64) -> Result<EventResponse, ClientError> {
        let url = self.base_url.join(&format!("/events/{id}"))?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /events` – create a new event from the given fields.
    pub async fn create(&self, payload: &EventPayload) -> Result<EventCreatedResponse, ClientError> {
        let url = self.base_url.join("/events")?;
        let resp = self.http.post(url).json(payload).send().await?;
        parse_response(resp).await
    }

    /// `PUT /events/{id}` – overwrite the given fields of an event.
    pub async fn update(&self, id: i64, payload: &EventPayload) -> Result<AckResponse, ClientError> {
        let url = self.base_url.join(&format!("/events/{id}"))?;
        let resp = self.http.put(url).json(payload).send().await?;
        parse_response(resp).await
    }

    /// `DELETE /events/{id}` – delete an event.
    pub async fn delete(&self, id: i64) -> Result<AckResponse, ClientError> {
        let url = self.base_url.join(&format!("/events/{id}"))?;
        let resp = self.http.delete(url).send().await?;
        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
