use crate::config::{CatalogConfig, ConfigError, ValidatedConfig};
use crate::detail::DetailState;
use crate::list_cache::ListState;

/// Core state. The list and detail screens each own their state for as long
/// as the screen is open; closing a screen drops it.
#[derive(Debug, Default)]
pub struct Model {
    pub config: CatalogConfig,
    pub list: Option<ListState>,
    pub detail: Option<DetailState>,
}

impl Model {
    pub fn validated_config(&self) -> Result<ValidatedConfig, ConfigError> {
        self.config.validate()
    }

    /// Page size for a freshly opened list. Falls back to the default when
    /// the configured one is out of range; the fetch itself reports the error.
    pub fn page_size(&self) -> u32 {
        self.validated_config()
            .map_or(crate::config::DEFAULT_PAGE_SIZE, |c| c.page_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_has_no_screens() {
        let model = Model::default();
        assert!(model.list.is_none());
        assert!(model.detail.is_none());
        assert_eq!(model.page_size(), 20);
    }

    #[test]
    fn out_of_range_page_size_falls_back() {
        let model = Model {
            config: CatalogConfig {
                page_size: 0,
                ..CatalogConfig::default()
            },
            ..Model::default()
        };
        assert!(model.validated_config().is_err());
        assert_eq!(model.page_size(), 20);
    }
}
