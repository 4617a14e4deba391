//! Actions: user intents from the device keys and results of async lookups

use serde::{Deserialize, Serialize};

use crate::error::PokedexError;
use crate::navigation::Direction;
use crate::sprite::SpriteArt;
use crate::state::CreatureRecord;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    /// Load the start creature
    Init,

    // ===== Search field =====
    /// Keypad or keyboard character appended to the search text
    InputPush(char),
    InputBackspace,
    InputClear,

    /// Submit the current search text
    SearchSubmit,

    // ===== Navigation =====
    Navigate(Direction),
    RandomPick,
    /// A random id has been drawn for a pending `RandomPick`
    RandomDidPick(u32),

    // ===== Lookup results =====
    CreatureDidLoad {
        key: String,
        seq: u64,
        record: CreatureRecord,
    },
    CreatureDidError {
        key: String,
        seq: u64,
        error: PokedexError,
    },

    // ===== Shiny variant =====
    ShinyRequest,
    ShinyDidLoad {
        id: u32,
        url: Option<String>,
    },
    ShinyDidError {
        id: u32,
        error: PokedexError,
    },

    // ===== Sprite artwork =====
    SpriteDidLoad {
        url: String,
        art: SpriteArt,
    },
    SpriteDidError {
        url: String,
        error: String,
    },

    Tick,
    Quit,
}
