//! PokeAPI client

use std::sync::OnceLock;

use serde::Deserialize;

use crate::config::DEFAULT_API_BASE;
use crate::error::PokedexError;
use crate::state::{BaseStats, CreatureRecord, StatKind};

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    sprites: PokemonSprites,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonSprites {
    front_default: Option<String>,
}

/// Thin wrapper over a `reqwest::Client` bound to one API base URL.
#[derive(Clone, Debug)]
pub struct PokeApi {
    base: String,
    client: reqwest::Client,
}

impl PokeApi {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    pub fn creature_url(&self, key: &str) -> String {
        format!("{}/pokemon/{key}", self.base)
    }

    /// Fetch and normalize one creature. No caching happens here.
    pub async fn fetch_creature(&self, key: &str) -> Result<CreatureRecord, PokedexError> {
        let body = self.fetch_pokemon_body(key).await?;
        let record = parse_creature(key, &body);
        if let Err(error) = &record {
            if error.is_malformed() {
                tracing::error!(%key, %error, "pokemon response is missing required fields");
            }
        }
        record
    }

    /// Alternate (shiny) sprite URL for `id`, read straight from the raw
    /// response so the normalized record never needs to carry it.
    pub async fn fetch_shiny_sprite(&self, id: u32) -> Result<Option<String>, PokedexError> {
        let key = id.to_string();
        let body = self.fetch_pokemon_body(&key).await?;
        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|err| PokedexError::MalformedResponse {
                key: key.clone(),
                reason: err.to_string(),
            })?;
        Ok(pointer_string(&value, "/sprites/front_shiny"))
    }

    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| err.to_string())?;
        let response = response.error_for_status().map_err(|err| err.to_string())?;
        let bytes = response.bytes().await.map_err(|err| err.to_string())?;
        Ok(bytes.to_vec())
    }

    async fn fetch_pokemon_body(&self, key: &str) -> Result<Vec<u8>, PokedexError> {
        let url = self.creature_url(key);
        tracing::debug!(%url, "requesting pokemon");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| PokedexError::TransientNetwork {
                key: key.to_string(),
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%key, status = status.as_u16(), "pokemon lookup rejected");
            return Err(PokedexError::NotFound {
                key: key.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| PokedexError::TransientNetwork {
                key: key.to_string(),
                reason: err.to_string(),
            })?;
        Ok(bytes.to_vec())
    }
}

impl Default for PokeApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

static SHARED: OnceLock<PokeApi> = OnceLock::new();

/// Install the client used by effect tasks. Only the first call wins.
pub fn install(api: PokeApi) {
    if SHARED.set(api).is_err() {
        tracing::warn!("api client already installed; keeping the first one");
    }
}

pub fn shared() -> &'static PokeApi {
    SHARED.get_or_init(PokeApi::default)
}

/// Normalize a `/pokemon/{key}` body. Every field except the sprite is required.
pub fn parse_creature(key: &str, body: &[u8]) -> Result<CreatureRecord, PokedexError> {
    let malformed = |reason: String| PokedexError::MalformedResponse {
        key: key.to_string(),
        reason,
    };

    let response: PokemonResponse =
        serde_json::from_slice(body).map_err(|err| malformed(err.to_string()))?;

    let stat = |kind: StatKind| -> Result<u16, PokedexError> {
        response
            .stats
            .iter()
            .find(|slot| slot.stat.name == kind.api_name())
            .map(|slot| slot.base_stat)
            .ok_or_else(|| malformed(format!("missing stat {}", kind.api_name())))
    };

    let stats = BaseStats {
        hp: stat(StatKind::Hp)?,
        attack: stat(StatKind::Attack)?,
        defense: stat(StatKind::Defense)?,
        special_attack: stat(StatKind::SpecialAttack)?,
        special_defense: stat(StatKind::SpecialDefense)?,
        speed: stat(StatKind::Speed)?,
    };

    let types: Vec<String> = response
        .types
        .iter()
        .map(|slot| slot.type_info.name.clone())
        .collect();
    if types.is_empty() {
        return Err(malformed("no types".to_string()));
    }

    Ok(CreatureRecord {
        id: response.id,
        name: response.name,
        types,
        sprite: response.sprites.front_default,
        stats,
        height_m: f64::from(response.height) / 10.0,
        weight_kg: f64::from(response.weight) / 10.0,
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
    })
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
