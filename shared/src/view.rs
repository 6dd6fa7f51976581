use serde::{Deserialize, Serialize};

use crate::catalog::FetchOutcome;
use crate::detail::{build_detail_view, DetailView};
use crate::list_cache::{ListItem, ListState};
use crate::model::Model;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ViewModel {
    pub list: Option<ListView>,
    pub detail: Option<FetchOutcome<DetailView>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListView {
    pub entries: Vec<ListItem>,
    pub row_count: usize,
    pub is_loading: bool,
    /// Empty when the last page load succeeded.
    pub load_error: String,
    pub end_reached: bool,
    pub is_searching: bool,
}

impl ListView {
    pub fn from_state(state: &ListState) -> Self {
        Self {
            entries: state.displayed().to_vec(),
            row_count: state.row_count(),
            is_loading: state.is_loading(),
            load_error: state.load_error().unwrap_or_default().to_string(),
            end_reached: state.end_reached(),
            is_searching: state.is_searching(),
        }
    }
}

pub fn build_view(model: &Model) -> ViewModel {
    let detail = model.detail.as_ref().map(|state| {
        match model.validated_config() {
            Ok(config) => state
                .outcome()
                .clone()
                .map(|detail| build_detail_view(&detail, &config)),
            Err(e) => FetchOutcome::Error(e.to_string()),
        }
    });

    ViewModel {
        list: model.list.as_ref().map(ListView::from_state),
        detail,
    }
}
