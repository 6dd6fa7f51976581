pub mod http;

// Crux's built-in Render capability is used directly; it covers everything
// the shell needs to know about view updates.
pub use crux_core::render::Render;
pub use crux_http::Http;

pub use self::http::{UrlError, ValidatedUrl};

use crate::event::Event;

/// HTTP capability as seen by the fetch helpers.
pub type AppHttp = Http<Event>;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
