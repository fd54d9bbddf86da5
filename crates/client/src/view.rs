//! Plain-text rendering of the list and the form.

use crate::config::ClientConfig;
use crate::draft::DraftState;
use crate::model::EventItem;

/// Render the event list in the order given.
pub fn render_events(events: &[EventItem], config: &ClientConfig) -> String {
    if events.is_empty() {
        return "No events yet.\n".to_string();
    }

    let mut out = String::new();
    for event in events {
        out.push_str(&format!("#{} {} - {}\n", event.id, event.title, event.date));
        if !event.description.is_empty() {
            out.push_str(&format!("    {}\n", event.description));
        }
        if let Some(url) = event.url.as_deref() {
            out.push_str(&format!("    image: {}\n", image_link(url, config)));
        }
    }
    out
}

/// Render the form, including which image will be kept, replaced or dropped.
pub fn render_form(state: &DraftState, config: &ClientConfig) -> String {
    let form = &state.form;
    let mut out = String::new();

    let heading = match state.editing_id {
        Some(id) => format!("Editing event #{id} (submit to update, cancel to discard)"),
        None => "New event (submit to add)".to_string(),
    };
    out.push_str(&format!("{heading}\n"));
    out.push_str(&format!("  title:       {}\n", form.title));
    out.push_str(&format!("  description: {}\n", form.description));
    out.push_str(&format!("  date:        {}\n", form.date));

    let image = match (&form.image, &form.image_url) {
        (Some(path), _) => format!("new file {}", path.display()),
        (None, Some(url)) => format!("current {}", image_link(url, config)),
        (None, None) if state.is_editing() => "none (existing image will be removed)".to_string(),
        (None, None) => "none".to_string(),
    };
    out.push_str(&format!("  image:       {image}\n"));
    out
}

fn image_link(url: &str, config: &ClientConfig) -> String {
    config
        .image_url(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|| url.to_string())
}
