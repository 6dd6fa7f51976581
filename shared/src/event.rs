use serde::{Deserialize, Serialize};

use crate::catalog::{DetailResponse, PageResponse, RequestId};
use crate::config::CatalogConfig;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Event {
    Configure(CatalogConfig),

    ListScreenOpened,
    ListScreenClosed,
    LoadNextPage,
    RowRendered {
        index: usize,
    },
    SearchChanged {
        query: String,
    },

    DetailRequested {
        name: String,
    },
    RetryDetail,
    DetailClosed,

    // Responses from the HTTP capability; never sent by the shell.
    #[serde(skip)]
    PageLoaded {
        request: RequestId,
        result: Box<PageResponse>,
    },
    #[serde(skip)]
    DetailLoaded {
        request: RequestId,
        result: Box<DetailResponse>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configure(_) => "configure",
            Self::ListScreenOpened => "list_screen_opened",
            Self::ListScreenClosed => "list_screen_closed",
            Self::LoadNextPage => "load_next_page",
            Self::RowRendered { .. } => "row_rendered",
            Self::SearchChanged { .. } => "search_changed",
            Self::DetailRequested { .. } => "detail_requested",
            Self::RetryDetail => "retry_detail",
            Self::DetailClosed => "detail_closed",
            Self::PageLoaded { .. } => "page_loaded",
            Self::DetailLoaded { .. } => "detail_loaded",
        }
    }

    /// Events that originate from the shell rather than from a capability.
    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(self, Self::PageLoaded { .. } | Self::DetailLoaded { .. })
    }
}
