//! Naming rules for stored event images.
//!
//! Stored files live in a single directory and are referenced from the
//! `events.url` column by a relative path of the form
//! `event-image/img_<token>[.<ext>]`.

use std::path::{Component, Path};

/// Directory (relative to the storage root) holding uploaded images.
pub const IMAGE_DIR: &str = "event-image";

/// Prefix of every generated image filename.
const FILENAME_PREFIX: &str = "img_";

/// Extract the extension of an uploaded file's base name.
///
/// Only the final path component is considered, so client-supplied
/// directories are ignored. Returns `None` when there is no suffix or the
/// suffix contains anything other than ASCII alphanumerics.
pub fn extension_of(original_name: &str) -> Option<&str> {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

/// Generate a fresh filename for a stored image.
///
/// The token is a UUID v7 (millisecond timestamp plus random bits), so
/// concurrent uploads never collide.
pub fn generate_filename(ext: Option<&str>) -> String {
    let token = uuid::Uuid::now_v7().simple();
    match ext {
        Some(ext) => format!("{FILENAME_PREFIX}{token}.{ext}"),
        None => format!("{FILENAME_PREFIX}{token}"),
    }
}

/// Relative url stored in the database for a filename.
pub fn url_for(filename: &str) -> String {
    format!("{IMAGE_DIR}/{filename}")
}

/// Return the filename part of a stored url, or `None` if the url does not
/// point directly inside [`IMAGE_DIR`].
pub fn filename_from_url(url: &str) -> Option<&str> {
    let filename = url.strip_prefix(IMAGE_DIR)?.strip_prefix('/')?;
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(filename),
        _ => None,
    }
}
