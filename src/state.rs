//! Application state - single source of truth

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::cache::ResultCache;
use crate::config::Config;
use crate::sprite::SpriteArt;

/// Animation tick for the floating sprite.
pub const TICK_MS: u64 = 120;
/// Ticks per half of the float cycle.
pub const FLOAT_TICKS: u64 = 6;

/// The six base stats, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Hp,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpecialAttack,
        StatKind::SpecialDefense,
        StatKind::Speed,
    ];

    /// Name used by the API in `stats[].stat.name`.
    pub fn api_name(self) -> &'static str {
        match self {
            StatKind::Hp => "hp",
            StatKind::Attack => "attack",
            StatKind::Defense => "defense",
            StatKind::SpecialAttack => "special-attack",
            StatKind::SpecialDefense => "special-defense",
            StatKind::Speed => "speed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::SpecialAttack => "Sp. Atk",
            StatKind::SpecialDefense => "Sp. Def",
            StatKind::Speed => "Speed",
        }
    }

    /// Bar calibration: the value drawn as a full bar. Real stats may exceed it.
    pub fn ceiling(self) -> u16 {
        match self {
            StatKind::Hp => 255,
            StatKind::Attack => 190,
            StatKind::Defense => 230,
            StatKind::SpecialAttack => 194,
            StatKind::SpecialDefense => 230,
            StatKind::Speed => 200,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn get(&self, kind: StatKind) -> u16 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.special_attack,
            StatKind::SpecialDefense => self.special_defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, u16)> + '_ {
        StatKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Normalized creature, as cached and rendered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub sprite: Option<String>,
    pub stats: BaseStats,
    pub height_m: f64,
    pub weight_kg: f64,
    pub abilities: Vec<String>,
}

/// Navigation/session bookkeeping. Only the reducer mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub current_id: u32,
    /// Set by an empty search. Nothing renders from it; kept for session introspection.
    pub error: bool,
    pub shiny_enabled: bool,
}

impl Session {
    pub fn new(start_id: u32) -> Self {
        Self {
            current_id: start_id,
            error: false,
            shiny_enabled: true,
        }
    }

    pub fn reject_empty_search(&mut self) {
        self.error = true;
        self.shiny_enabled = false;
    }

    pub fn accept_search(&mut self, id: u32) {
        self.error = false;
        self.shiny_enabled = true;
        self.current_id = id;
    }

    pub fn move_to(&mut self, id: u32) {
        self.current_id = id;
    }

    pub fn accept_random(&mut self, id: u32) {
        self.current_id = id;
        self.shiny_enabled = true;
    }
}

/// The user-facing operation a lookup was issued for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Initial { target: u32 },
    Search { query: String },
    Navigate { target: u32 },
    Random { target: u32 },
}

impl Operation {
    pub fn failure_message(&self, catalog_size: u32) -> String {
        match self {
            Operation::Initial { target } => format!(
                "Failed to load initial Pokemon #{target}. Search for another name or number."
            ),
            Operation::Search { query } => format!(
                "Pokemon \"{query}\" not found. Try another name or number (1-{catalog_size})"
            ),
            Operation::Navigate { target } => format!("Could not load Pokemon #{target}"),
            Operation::Random { target } => format!("Could not load random Pokemon #{target}"),
        }
    }
}

/// The lookup whose result is allowed to render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingLookup {
    pub seq: u64,
    pub key: String,
    pub operation: Operation,
}

/// What the sprite region should show for the displayed record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteSlot {
    pub url: Option<String>,
    pub shiny: bool,
}

pub const EMPTY_SEARCH_MESSAGE: &str = "Please enter a Pokemon name or number";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub catalog_size: u32,
    pub start_id: u32,
    pub session: Session,
    pub cache: ResultCache,
    /// Loading / Display / Error, as drawn by the device screens.
    pub screen: DataResource<CreatureRecord>,
    pub sprite: SpriteSlot,
    pub sprite_art: HashMap<String, SpriteArt>,
    pub sprite_errors: HashSet<String>,
    pub search_text: String,
    pub request_seq: u64,
    pub pending: Option<PendingLookup>,
    pub tick: u64,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            catalog_size: config.catalog_size,
            start_id: config.start_id,
            session: Session::new(config.start_id),
            cache: ResultCache::default(),
            screen: DataResource::Empty,
            sprite: SpriteSlot::default(),
            sprite_art: HashMap::new(),
            sprite_errors: HashSet::new(),
            search_text: String::new(),
            request_seq: 0,
            pending: None,
            tick: 0,
        }
    }

    pub fn displayed(&self) -> Option<&CreatureRecord> {
        self.screen.data()
    }

    pub fn current_sprite_art(&self) -> Option<&SpriteArt> {
        self.sprite
            .url
            .as_ref()
            .and_then(|url| self.sprite_art.get(url))
    }

    pub fn sprite_failed(&self) -> bool {
        self.sprite
            .url
            .as_ref()
            .is_some_and(|url| self.sprite_errors.contains(url))
    }

    /// Vertical offset of the floating sprite, 0 or 1 rows.
    pub fn float_offset(&self) -> u16 {
        ((self.tick / FLOAT_TICKS) % 2) as u16
    }

    pub fn next_seq(&mut self) -> u64 {
        self.request_seq += 1;
        self.request_seq
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let screen = if self.screen.is_loading() {
            "loading"
        } else if self.screen.is_loaded() {
            "display"
        } else if self.screen.is_failed() {
            "error"
        } else {
            "empty"
        };
        vec![
            DebugSection::new("Session")
                .entry("current_id", ron_string(&self.session.current_id))
                .entry("error", ron_string(&self.session.error))
                .entry("shiny_enabled", ron_string(&self.session.shiny_enabled))
                .entry("catalog_size", ron_string(&self.catalog_size)),
            DebugSection::new("Lookup")
                .entry("screen", ron_string(&screen))
                .entry("request_seq", ron_string(&self.request_seq))
                .entry("pending", ron_string(&self.pending))
                .entry("cached", ron_string(&self.cache.len())),
            DebugSection::new("Sprite")
                .entry("url", ron_string(&self.sprite.url))
                .entry("shiny", ron_string(&self.sprite.shiny))
                .entry("decoded", ron_string(&self.sprite_art.len())),
            DebugSection::new("Input").entry("search", ron_string(&self.search_text)),
        ]
    }
}
