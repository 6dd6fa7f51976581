use tracing::{debug, info, warn};

use crate::capabilities::Capabilities;
use crate::catalog::{self, CatalogError};
use crate::detail::DetailState;
use crate::event::Event;
use crate::list_cache::ListState;
use crate::model::Model;
use crate::view::{build_view, ViewModel};

#[derive(Default)]
pub struct App;

impl App {
    /// `loadNextPage`. Returns whether a request was issued.
    fn load_next_page(model: &mut Model, caps: &Capabilities) -> bool {
        let Some(list) = model.list.as_mut() else {
            debug!("no list screen open, ignoring page load");
            return false;
        };
        let Some(page) = list.begin_page_load() else {
            return false;
        };

        let request = page.request;
        let issued = model
            .config
            .validate()
            .map_err(CatalogError::from)
            .and_then(|config| {
                catalog::fetch_page(&caps.http, &config, page.limit, page.offset, move |result| {
                    Event::PageLoaded {
                        request,
                        result: Box::new(result),
                    }
                })
            });

        if let Err(e) = issued {
            warn!(error = %e, "could not issue page request");
            list.fail_page_load(request, &e);
        }
        true
    }

    fn fetch_detail(model: &mut Model, caps: &Capabilities) -> bool {
        let Some(detail) = model.detail.as_mut() else {
            return false;
        };
        let Some(request) = detail.begin_fetch() else {
            debug!(name = detail.name(), "detail already in flight");
            return false;
        };

        let issued = model
            .config
            .validate()
            .map_err(CatalogError::from)
            .and_then(|config| {
                catalog::fetch_detail(&caps.http, &config, detail.name(), move |result| {
                    Event::DetailLoaded {
                        request,
                        result: Box::new(result),
                    }
                })
            });

        if let Err(e) = issued {
            warn!(error = %e, name = detail.name(), "could not issue detail request");
            detail.fail(request, &e);
        }
        true
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(event = event.name(), user = event.is_user_initiated(), "update");

        match event {
            Event::Configure(config) => match config.validate() {
                Ok(validated) => {
                    info!(
                        api = validated.api_base().as_str(),
                        page_size = validated.page_size(),
                        "catalog configured"
                    );
                    model.config = config;
                    caps.render.render();
                }
                Err(e) => {
                    warn!(error = %e, "configuration rejected, keeping previous");
                    if let Some(list) = model.list.as_mut() {
                        list.report_error(&CatalogError::from(e));
                        caps.render.render();
                    }
                }
            },

            Event::ListScreenOpened => {
                let page_size = model.page_size();
                info!(page_size, "list screen opened");
                model.list = Some(ListState::new(page_size));
                Self::load_next_page(model, caps);
                caps.render.render();
            }

            Event::ListScreenClosed => {
                if model.list.take().is_some() {
                    info!("list screen closed");
                    caps.render.render();
                }
            }

            Event::LoadNextPage => {
                if Self::load_next_page(model, caps) {
                    caps.render.render();
                }
            }

            Event::RowRendered { index } => {
                let wants_page = model
                    .list
                    .as_ref()
                    .is_some_and(|list| list.should_paginate(index));
                if wants_page && Self::load_next_page(model, caps) {
                    caps.render.render();
                }
            }

            Event::SearchChanged { query } => {
                if let Some(list) = model.list.as_mut() {
                    list.search(&query);
                    caps.render.render();
                }
            }

            Event::PageLoaded { request, result } => {
                let Some(list) = model.list.as_mut() else {
                    debug!(%request, "list screen gone, dropping page");
                    return;
                };
                let outcome = catalog::into_outcome(*result);
                let applied = match model.config.validate() {
                    Ok(config) => list.apply_page(request, outcome, &config),
                    Err(e) => {
                        list.fail_page_load(request, &CatalogError::from(e));
                        true
                    }
                };
                if applied {
                    caps.render.render();
                }
            }

            Event::DetailRequested { name } => {
                let already_pending = model.detail.as_ref().is_some_and(|detail| {
                    detail.in_flight().is_some()
                        && catalog::normalize_name(detail.name()) == catalog::normalize_name(&name)
                });
                if already_pending {
                    debug!(name = name.as_str(), "detail already in flight");
                    return;
                }

                info!(name = name.as_str(), "detail requested");
                model.detail = Some(DetailState::new(name));
                Self::fetch_detail(model, caps);
                caps.render.render();
            }

            Event::RetryDetail => {
                if Self::fetch_detail(model, caps) {
                    caps.render.render();
                }
            }

            Event::DetailLoaded { request, result } => {
                let Some(detail) = model.detail.as_mut() else {
                    debug!(%request, "detail screen gone, dropping response");
                    return;
                };
                let outcome = catalog::into_outcome(*result);
                if let Some(message) = outcome.error_message() {
                    warn!(name = detail.name(), %message, "detail fetch failed");
                }
                if detail.complete(request, outcome) {
                    caps.render.render();
                } else {
                    debug!(%request, "dropping stale detail response");
                }
            }

            Event::DetailClosed => {
                if model.detail.take().is_some() {
                    caps.render.render();
                }
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        build_view(model)
    }
}
