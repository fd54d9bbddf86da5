//! Handlers for the `/events` resource.
//!
//! The resource is served from a single URL. Every request is first turned
//! into an [`EventRequest`] (method + `?id=` + multipart body), then
//! [`dispatch`] handles each variant.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventboard_core::error::CoreError;
use eventboard_core::events::{
    resolve_image_action, validate_event_fields, ImageAction, ENTITY_EVENT,
};
use eventboard_core::images::extension_of;
use eventboard_core::types::{parse_id, DbId};
use eventboard_db::models::event::{CreateEvent, UpdateEvent};
use eventboard_db::repositories::EventRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::{MessageResponse, UpdatedEventResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request model
// ---------------------------------------------------------------------------

/// `?id=` query parameter. Kept as raw text so garbage degrades to "no id".
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// A file received in the `image` form field.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Filename as sent by the client.
    pub file_name: String,
    pub bytes: Bytes,
}

/// Fields of a POST body (`multipart/form-data`).
#[derive(Debug, Default)]
pub struct EventForm {
    pub id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub date: String,
    /// Set when a `remove_image` field is present, whatever its value.
    pub remove_image: bool,
    pub image: Option<UploadedImage>,
}

impl EventForm {
    /// Drain a multipart stream into a form. Unknown fields are skipped.
    ///
    /// An `image` part with no filename or no content is treated as "no
    /// file chosen".
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();
        let mut raw_id: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().unwrap_or("").to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    if !file_name.is_empty() && !bytes.is_empty() {
                        form.image = Some(UploadedImage { file_name, bytes });
                    }
                }
                "remove_image" => form.remove_image = true,
                "id" | "title" | "description" | "date" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    match name.as_str() {
                        "id" => raw_id = Some(text),
                        "title" => form.title = text,
                        "description" => form.description = text,
                        _ => form.date = text,
                    }
                }
                _ => {}
            }
        }

        form.id = parse_id(raw_id.as_deref());
        Ok(form)
    }
}

/// Every request the events endpoint understands.
#[derive(Debug)]
pub enum EventRequest {
    /// `OPTIONS`: CORS preflight, answered with an empty 200.
    Preflight,
    /// `GET` without an id.
    List,
    /// `GET ?id=N`.
    GetOne(DbId),
    /// `POST` whose form carries no id.
    Create(EventForm),
    /// `POST` whose form carries an id.
    Update(DbId, EventForm),
    /// `DELETE`; the id may be missing, which is a client error.
    Delete(Option<DbId>),
    /// `PUT` is never used for updates.
    UpdateViaPut,
    Unsupported(Method),
}

impl<S> FromRequest<S> for EventRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query_id = Query::<IdQuery>::try_from_uri(req.uri())
            .ok()
            .and_then(|Query(q)| parse_id(q.id.as_deref()));
        let method = req.method().clone();

        let request = if method == Method::OPTIONS {
            Self::Preflight
        } else if method == Method::GET {
            query_id.map_or(Self::List, Self::GetOne)
        } else if method == Method::POST {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            let form = EventForm::read(multipart).await?;
            match form.id {
                Some(id) => Self::Update(id, form),
                None => Self::Create(form),
            }
        } else if method == Method::PUT {
            Self::UpdateViaPut
        } else if method == Method::DELETE {
            Self::Delete(query_id)
        } else {
            Self::Unsupported(method)
        };

        Ok(request)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// ANY /api/v1/events
///
/// ```text
/// OPTIONS                 -> 200, empty body
/// GET                     -> list, ordered by date
/// GET    ?id=N            -> one event or 404
/// POST   (form, no id)    -> create
/// POST   (form, id)       -> update
/// DELETE ?id=N            -> delete
/// PUT / anything else     -> 405
/// ```
pub async fn dispatch(
    State(state): State<AppState>,
    request: EventRequest,
) -> AppResult<Response> {
    match request {
        EventRequest::Preflight => Ok(StatusCode::OK.into_response()),
        EventRequest::List => list(&state).await,
        EventRequest::GetOne(id) => get_by_id(&state, id).await,
        EventRequest::Create(form) => create(&state, form).await,
        EventRequest::Update(id, form) => update(&state, id, form).await,
        EventRequest::Delete(id) => delete(&state, id).await,
        EventRequest::UpdateViaPut => Err(AppError::MethodNotAllowed(
            "Use POST with 'id' for updating".into(),
        )),
        EventRequest::Unsupported(method) => {
            tracing::debug!(%method, "Rejected unsupported method");
            Err(AppError::MethodNotAllowed("Unsupported request method".into()))
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_EVENT,
        id,
    })
}

async fn list(state: &AppState) -> AppResult<Response> {
    let events = EventRepo::list(&state.pool).await?;
    Ok(Json(events).into_response())
}

async fn get_by_id(state: &AppState, id: DbId) -> AppResult<Response> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(event).into_response())
}

async fn create(state: &AppState, form: EventForm) -> AppResult<Response> {
    let date = validate_event_fields(&form.title, &form.date)?;
    let url = store_upload(state, form.image).await;

    let input = CreateEvent {
        title: form.title,
        description: form.description,
        date,
        url,
    };
    let event = EventRepo::create(&state.pool, &input).await?;

    tracing::info!(
        event_id = event.id,
        has_image = event.url.is_some(),
        "Event created"
    );
    Ok(Json(event).into_response())
}

async fn update(state: &AppState, id: DbId, form: EventForm) -> AppResult<Response> {
    let date = validate_event_fields(&form.title, &form.date)?;
    let existing = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let new_url = store_upload(state, form.image).await;
    let action = resolve_image_action(new_url.is_some(), form.remove_image);
    let url = match action {
        ImageAction::Replace => {
            discard_image(state, existing.url.as_deref()).await;
            new_url
        }
        ImageAction::Remove => {
            discard_image(state, existing.url.as_deref()).await;
            None
        }
        ImageAction::Keep => existing.url,
    };

    let input = UpdateEvent {
        title: form.title,
        description: form.description,
        date,
        url,
    };
    // The row may have vanished since the lookup; a file stored above then
    // stays orphaned.
    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(event_id = id, ?action, "Event updated");
    Ok(Json(UpdatedEventResponse {
        message: "Event updated",
        event,
    })
    .into_response())
}

async fn delete(state: &AppState, id: Option<DbId>) -> AppResult<Response> {
    let id = id.ok_or_else(|| AppError::BadRequest("ID is required for deletion".into()))?;

    if let Some(event) = EventRepo::find_by_id(&state.pool, id).await? {
        discard_image(state, event.url.as_deref()).await;
    }

    if !EventRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(event_id = id, "Event deleted");
    Ok(Json(MessageResponse {
        message: "Event deleted",
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Persist an uploaded image and return its url.
///
/// A failed write degrades to "no image" instead of failing the request.
async fn store_upload(state: &AppState, image: Option<UploadedImage>) -> Option<String> {
    let image = image?;
    let ext = extension_of(&image.file_name);
    match state.files.store(&image.bytes, ext).await {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(
                error = %e,
                file_name = %image.file_name,
                "Failed to store upload, continuing without image"
            );
            None
        }
    }
}

/// Best-effort removal of a previously stored image.
async fn discard_image(state: &AppState, url: Option<&str>) {
    let Some(url) = url else { return };
    match state.files.remove(url).await {
        Ok(true) => {}
        Ok(false) => tracing::debug!(%url, "Image already absent"),
        Err(e) => tracing::warn!(error = %e, %url, "Failed to remove image"),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::body::Body;

    use super::*;

    async fn classify(method: Method, uri: &str) -> EventRequest {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        EventRequest::from_request(req, &()).await.unwrap()
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request {
        let boundary = "XBOUNDARYX";
        let mut body = String::new();
        for (name, file_name, value) in parts {
            body.push_str(&format!("--{boundary}\r\n"));
            match file_name {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        Request::builder()
            .method(Method::POST)
            .uri("/events")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn options_is_preflight() {
        assert_matches!(classify(Method::OPTIONS, "/events").await, EventRequest::Preflight);
    }

    #[tokio::test]
    async fn get_without_id_lists() {
        assert_matches!(classify(Method::GET, "/events").await, EventRequest::List);
        assert_matches!(classify(Method::GET, "/events?id=abc").await, EventRequest::List);
        assert_matches!(classify(Method::GET, "/events?id=0").await, EventRequest::List);
    }

    #[tokio::test]
    async fn get_with_id_fetches_one() {
        assert_matches!(classify(Method::GET, "/events?id=7").await, EventRequest::GetOne(7));
    }

    #[tokio::test]
    async fn negative_id_is_still_an_id() {
        assert_matches!(classify(Method::GET, "/events?id=-3").await, EventRequest::GetOne(-3));
        assert_matches!(
            classify(Method::DELETE, "/events?id=-3").await,
            EventRequest::Delete(Some(-3))
        );

        let req = multipart_request(&[
            ("id", None, "-3"),
            ("title", None, "Launch"),
            ("date", None, "2025-01-10"),
        ]);
        let parsed = EventRequest::from_request(req, &()).await.unwrap();
        assert_matches!(parsed, EventRequest::Update(-3, _));
    }

    #[tokio::test]
    async fn delete_keeps_optional_id() {
        assert_matches!(
            classify(Method::DELETE, "/events?id=3").await,
            EventRequest::Delete(Some(3))
        );
        assert_matches!(classify(Method::DELETE, "/events").await, EventRequest::Delete(None));
    }

    #[tokio::test]
    async fn put_and_unknown_methods_are_rejected_variants() {
        assert_matches!(classify(Method::PUT, "/events?id=1").await, EventRequest::UpdateViaPut);
        assert_matches!(
            classify(Method::PATCH, "/events").await,
            EventRequest::Unsupported(m) if m == Method::PATCH
        );
    }

    #[tokio::test]
    async fn post_without_id_is_create() {
        let req = multipart_request(&[
            ("title", None, "Launch"),
            ("date", None, "2025-01-10"),
        ]);
        let parsed = EventRequest::from_request(req, &()).await.unwrap();
        assert_matches!(parsed, EventRequest::Create(form) => {
            assert_eq!(form.title, "Launch");
            assert_eq!(form.date, "2025-01-10");
            assert_eq!(form.description, "");
            assert!(!form.remove_image);
            assert!(form.image.is_none());
        });
    }

    #[tokio::test]
    async fn post_with_id_is_update_and_reads_flags() {
        let req = multipart_request(&[
            ("id", None, "12"),
            ("title", None, "Launch"),
            ("date", None, "2025-01-10"),
            ("remove_image", None, ""),
            ("image", Some("photo.png"), "PNGDATA"),
        ]);
        let parsed = EventRequest::from_request(req, &()).await.unwrap();
        assert_matches!(parsed, EventRequest::Update(12, form) => {
            assert!(form.remove_image);
            let image = form.image.expect("image part");
            assert_eq!(image.file_name, "photo.png");
            assert_eq!(&image.bytes[..], b"PNGDATA");
        });
    }

    #[tokio::test]
    async fn empty_file_part_counts_as_no_upload() {
        let req = multipart_request(&[
            ("title", None, "Launch"),
            ("date", None, "2025-01-10"),
            ("image", Some(""), ""),
        ]);
        let parsed = EventRequest::from_request(req, &()).await.unwrap();
        assert_matches!(parsed, EventRequest::Create(form) if form.image.is_none());
    }

    #[tokio::test]
    async fn post_without_multipart_body_is_bad_request() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/events")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let err = EventRequest::from_request(req, &()).await.unwrap_err();
        assert_matches!(err, AppError::BadRequest(_));
    }
}
