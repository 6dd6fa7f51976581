#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod event;
pub mod list_cache;
pub mod model;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use catalog::{CatalogEntry, CatalogError, FetchOutcome, PageResult, RequestId};
pub use config::{CatalogConfig, ConfigError, ValidatedConfig};
pub use crux_core::{render::Render, App as CruxApp};
pub use detail::{DetailView, PokemonDetail, StatBar};
pub use event::Event;
pub use list_cache::{ListItem, ENTRIES_PER_ROW};
pub use model::Model;
pub use view::{ListView, ViewModel};

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
