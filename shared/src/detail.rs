use serde::{Deserialize, Serialize};

use crate::capitalize;
use crate::catalog::{CatalogError, FetchOutcome, RequestId};
use crate::config::ValidatedConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokeType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

/// Detail record as returned by `GET pokemon/{name}`. Height is in
/// decimetres, weight in hectograms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokeStat>,
    #[serde(default)]
    pub types: Vec<PokeType>,
    #[serde(default)]
    pub sprites: Sprites,
}

/// Detail screen state. Lives from `DetailRequested` until `DetailClosed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    name: String,
    outcome: FetchOutcome<PokemonDetail>,
    in_flight: Option<RequestId>,
}

impl DetailState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: FetchOutcome::InProgress,
            in_flight: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outcome(&self) -> &FetchOutcome<PokemonDetail> {
        &self.outcome
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Returns the id for a new request, or `None` if one is already pending.
    pub fn begin_fetch(&mut self) -> Option<RequestId> {
        if self.in_flight.is_some() {
            return None;
        }
        let request = RequestId::generate();
        self.in_flight = Some(request);
        self.outcome = FetchOutcome::InProgress;
        Some(request)
    }

    /// Applies a finished fetch. Responses for any other request are ignored.
    pub fn complete(&mut self, request: RequestId, outcome: FetchOutcome<PokemonDetail>) -> bool {
        if self.in_flight != Some(request) {
            return false;
        }
        self.in_flight = None;
        self.outcome = outcome;
        true
    }

    /// Fails a fetch that never reached the network.
    pub fn fail(&mut self, request: RequestId, error: &CatalogError) {
        if self.in_flight == Some(request) {
            self.in_flight = None;
            self.outcome = FetchOutcome::from_error(error);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBar {
    pub name: String,
    pub abbreviation: String,
    pub value: u32,
    pub max_value: u32,
    pub fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub id: u32,
    pub title: String,
    pub display_name: String,
    pub image_url: String,
    /// Small front sprite, when the catalog has one.
    pub sprite_url: Option<String>,
    pub types: Vec<String>,
    /// Lower-case key of the first-slot type; the shell maps it to a colour.
    pub primary_type: Option<String>,
    pub weight_kg: f32,
    pub height_m: f32,
    pub weight_text: String,
    pub height_text: String,
    pub stats: Vec<StatBar>,
}

pub fn stat_abbreviation(stat_name: &str) -> String {
    match stat_name {
        "hp" => "HP".into(),
        "attack" => "Atk".into(),
        "defense" => "Def".into(),
        "special-attack" => "SpAtk".into(),
        "special-defense" => "SpDef".into(),
        "speed" => "Spd".into(),
        other => capitalize(other),
    }
}

// Both API units are tenths of the displayed unit.
#[allow(clippy::cast_precision_loss)]
fn tenths(value: u32) -> f32 {
    value as f32 * 100.0 / 1000.0
}

#[allow(clippy::cast_precision_loss)]
pub fn build_detail_view(detail: &PokemonDetail, config: &ValidatedConfig) -> DetailView {
    let display_name = capitalize(&detail.name);

    let mut types: Vec<&PokeType> = detail.types.iter().collect();
    types.sort_by_key(|t| t.slot);

    let max_value = detail.stats.iter().map(|s| s.base_stat).max().unwrap_or(0);
    let stats = detail
        .stats
        .iter()
        .map(|s| StatBar {
            name: s.stat.name.clone(),
            abbreviation: stat_abbreviation(&s.stat.name),
            value: s.base_stat,
            max_value,
            fraction: if max_value == 0 {
                0.0
            } else {
                s.base_stat as f32 / max_value as f32
            },
        })
        .collect();

    let weight_kg = tenths(detail.weight);
    let height_m = tenths(detail.height);

    DetailView {
        id: detail.id,
        title: format!("#{} {}", detail.id, display_name),
        display_name,
        image_url: config.image_url(detail.id),
        sprite_url: detail.sprites.front_default.clone(),
        types: types.iter().map(|t| capitalize(&t.kind.name)).collect(),
        primary_type: types.first().map(|t| t.kind.name.to_lowercase()),
        weight_kg,
        height_m,
        weight_text: format!("{weight_kg:.1}kg"),
        height_text: format!("{height_m:.1}m"),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    fn pikachu() -> PokemonDetail {
        serde_json::from_str(
            r#"{
                "id": 25,
                "name": "pikachu",
                "height": 4,
                "weight": 60,
                "base_experience": 112,
                "order": 35,
                "stats": [
                    {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/"}},
                    {"base_stat": 55, "effort": 0, "stat": {"name": "attack", "url": "https://pokeapi.co/api/v2/stat/2/"}},
                    {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": "https://pokeapi.co/api/v2/stat/6/"}}
                ],
                "types": [
                    {"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}
                ],
                "sprites": {"front_default": "https://example.com/25.png", "back_default": null}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn decodes_api_detail() {
        let detail = pikachu();
        assert_eq!(detail.id, 25);
        assert_eq!(detail.stats.len(), 3);
        assert_eq!(detail.types[0].kind.name, "electric");
        assert_eq!(detail.sprites.front_default.as_deref(), Some("https://example.com/25.png"));
    }

    #[test]
    fn view_converts_units_and_stats() {
        let config = CatalogConfig::default().validate().unwrap();
        let view = build_detail_view(&pikachu(), &config);

        assert_eq!(view.title, "#25 Pikachu");
        assert_eq!(view.weight_text, "6.0kg");
        assert_eq!(view.height_text, "0.4m");
        assert_eq!(view.types, vec!["Electric".to_string()]);
        assert_eq!(view.primary_type.as_deref(), Some("electric"));
        assert!(view.image_url.ends_with("/25.png"));
        assert_eq!(view.sprite_url.as_deref(), Some("https://example.com/25.png"));

        let speed = view.stats.iter().find(|s| s.name == "speed").unwrap();
        assert_eq!(speed.abbreviation, "Spd");
        assert_eq!(speed.max_value, 90);
        assert!((speed.fraction - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn types_follow_slot_order() {
        let config = CatalogConfig::default().validate().unwrap();
        let mut detail = pikachu();
        detail.types = vec![
            PokeType {
                slot: 2,
                kind: NamedResource { name: "poison".into() },
            },
            PokeType {
                slot: 1,
                kind: NamedResource { name: "grass".into() },
            },
        ];

        let view = build_detail_view(&detail, &config);
        assert_eq!(view.types, vec!["Grass".to_string(), "Poison".to_string()]);
        assert_eq!(view.primary_type.as_deref(), Some("grass"));
    }

    #[test]
    fn no_stats_means_zero_fraction() {
        let config = CatalogConfig::default().validate().unwrap();
        let mut detail = pikachu();
        detail.stats = vec![PokeStat {
            base_stat: 0,
            stat: NamedResource { name: "hp".into() },
        }];

        let view = build_detail_view(&detail, &config);
        assert_eq!(view.stats[0].fraction, 0.0);
    }

    #[test]
    fn missing_sprite_maps_to_none() {
        let config = CatalogConfig::default().validate().unwrap();
        let mut detail = pikachu();
        detail.sprites = Sprites::default();

        let view = build_detail_view(&detail, &config);
        assert_eq!(view.sprite_url, None);
    }

    #[test]
    fn unknown_stat_is_capitalized() {
        assert_eq!(stat_abbreviation("accuracy"), "Accuracy");
        assert_eq!(stat_abbreviation("special-attack"), "SpAtk");
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut state = DetailState::new("pikachu");
        let request = state.begin_fetch().unwrap();
        assert!(state.begin_fetch().is_none());

        let stale = RequestId::generate();
        assert!(!state.complete(stale, FetchOutcome::Error("late".into())));
        assert!(state.outcome().is_in_progress());

        assert!(state.complete(request, FetchOutcome::Success(pikachu())));
        assert_eq!(state.outcome().success().map(|d| d.id), Some(25));
        assert!(state.in_flight().is_none());
    }

    #[test]
    fn failed_issue_becomes_error_outcome() {
        let mut state = DetailState::new("");
        let request = state.begin_fetch().unwrap();
        state.fail(
            request,
            &CatalogError::InvalidRequest {
                reason: "name must not be empty".into(),
            },
        );
        assert_eq!(
            state.outcome().error_message(),
            Some("Some Error Occurred: invalid request: name must not be empty")
        );
        assert!(state.begin_fetch().is_some());
    }
}
