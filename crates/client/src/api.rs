//! HTTP client for the events endpoint.

use std::path::PathBuf;

use eventboard_core::types::DbId;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode, Url};

use crate::draft::Submission;
use crate::model::{ApiErrorBody, EventItem};

/// Shown when a failed response carries no usable `error` field.
const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never got a response, or the body was unreadable.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The chosen image file could not be read.
    #[error("Could not read image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Thin wrapper over `reqwest::Client` bound to one events endpoint.
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: reqwest::Client,
    api_url: Url,
}

impl EventsClient {
    pub fn new(api_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
        }
    }

    fn url_with_id(&self, id: DbId) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("id", &id.to_string());
        url
    }

    /// `GET` every event, in the order the API returns them.
    pub async fn list(&self) -> Result<Vec<EventItem>, ClientError> {
        let response = self.http.get(self.api_url.clone()).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// `POST` a create or update, depending on whether the submission has an id.
    pub async fn submit(&self, submission: &Submission) -> Result<EventItem, ClientError> {
        let mut form = Form::new()
            .text("title", submission.title.clone())
            .text("description", submission.description.clone())
            .text("date", submission.date.clone());

        if let Some(id) = submission.id {
            form = form.text("id", id.to_string());
        }

        if let Some(path) = &submission.image {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| ClientError::Image {
                    path: path.clone(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            form = form.part("image", Part::bytes(bytes).file_name(file_name));
        } else if submission.remove_image {
            form = form.text("remove_image", "1");
        }

        tracing::debug!(id = ?submission.id, "Submitting event");
        let response = self
            .http
            .post(self.api_url.clone())
            .multipart(form)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// `DELETE ?id=N`.
    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let response = self.http.delete(self.url_with_id(id)).send().await?;
        check(response).await?;
        Ok(())
    }
}

/// Pass successful responses through; turn failures into [`ClientError::Api`].
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
    tracing::warn!(%status, %message, "API request failed");
    Err(ClientError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_replaces_existing_query() {
        let url = Url::parse("http://localhost:3000/api/v1/events?id=1").unwrap();
        let client = EventsClient::new(url);
        assert_eq!(
            client.url_with_id(42).as_str(),
            "http://localhost:3000/api/v1/events?id=42"
        );
    }

    #[test]
    fn api_error_displays_server_message() {
        let err = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Event with id 3 not found".into(),
        };
        assert_eq!(err.to_string(), "Event with id 3 not found");
    }
}
