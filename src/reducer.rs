//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::navigation::{is_search_char, normalize_query, step};
use crate::state::{
    AppState, CreatureRecord, Operation, PendingLookup, SpriteSlot, EMPTY_SEARCH_MESSAGE,
    FLOAT_TICKS,
};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let target = state.start_id;
            resolve(state, target.to_string(), Operation::Initial { target })
        }

        // ===== Search field =====
        Action::InputPush(ch) => {
            if !is_search_char(ch) {
                return DispatchResult::unchanged();
            }
            state.search_text.push(ch);
            DispatchResult::changed()
        }

        Action::InputBackspace => {
            if state.search_text.pop().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::InputClear => {
            if state.search_text.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search_text.clear();
            DispatchResult::changed()
        }

        Action::SearchSubmit => match normalize_query(&state.search_text) {
            Ok(key) => {
                let query = state.search_text.trim().to_string();
                resolve(state, key, Operation::Search { query })
            }
            Err(_) => {
                state.next_seq();
                state.pending = None;
                state.session.reject_empty_search();
                state.screen = DataResource::Failed(EMPTY_SEARCH_MESSAGE.to_string());
                state.sprite = SpriteSlot::default();
                DispatchResult::changed()
            }
        },

        // ===== Navigation =====
        Action::Navigate(direction) => {
            let target = step(state.session.current_id, direction, state.catalog_size);
            resolve(state, target.to_string(), Operation::Navigate { target })
        }

        Action::RandomPick => DispatchResult::changed_with(Effect::PickRandom {
            catalog_size: state.catalog_size,
        }),

        Action::RandomDidPick(id) => {
            let target = id.clamp(1, state.catalog_size.max(1));
            resolve(state, target.to_string(), Operation::Random { target })
        }

        // ===== Lookup results =====
        Action::CreatureDidLoad { key, seq, record } => {
            state.cache.store(key.clone(), record.clone());
            match take_pending(state, seq) {
                Some(pending) => apply_success(state, pending.operation, record),
                None => {
                    tracing::debug!(%key, seq, "stale lookup result cached but not rendered");
                    DispatchResult::changed()
                }
            }
        }

        Action::CreatureDidError { key, seq, error } => {
            let Some(pending) = take_pending(state, seq) else {
                tracing::debug!(%key, seq, %error, "stale lookup failure ignored");
                return DispatchResult::unchanged();
            };
            tracing::warn!(%key, %error, "lookup failed");
            let message = pending.operation.failure_message(state.catalog_size);
            state.screen = DataResource::Failed(message);
            state.sprite = SpriteSlot::default();
            DispatchResult::changed()
        }

        // ===== Shiny variant =====
        Action::ShinyRequest => {
            if !state.session.shiny_enabled {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(Effect::FetchShinySprite {
                id: state.session.current_id,
            })
        }

        Action::ShinyDidLoad { id, url } => {
            let Some(url) = url else {
                return DispatchResult::unchanged();
            };
            if id != state.session.current_id {
                tracing::debug!(id, "shiny sprite for a previous creature dropped");
                return DispatchResult::unchanged();
            }
            state.sprite = SpriteSlot {
                url: Some(url),
                shiny: true,
            };
            with_sprite_effect(state)
        }

        Action::ShinyDidError { .. } => DispatchResult::unchanged(),

        // ===== Sprite artwork =====
        Action::SpriteDidLoad { url, art } => {
            let visible = state.sprite.url.as_deref() == Some(url.as_str());
            state.sprite_errors.remove(&url);
            state.sprite_art.insert(url, art);
            if visible {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SpriteDidError { url, error } => {
            tracing::warn!(%url, %error, "sprite unavailable");
            let visible = state.sprite.url.as_deref() == Some(url.as_str());
            state.sprite_errors.insert(url);
            if visible {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            if !state.screen.is_loaded() || state.current_sprite_art().is_none() {
                return DispatchResult::unchanged();
            }
            state.tick = state.tick.wrapping_add(1);
            if state.tick % FLOAT_TICKS == 0 {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Cache check, then either render immediately or go to Loading and fetch.
fn resolve(state: &mut AppState, key: String, operation: Operation) -> DispatchResult<Effect> {
    let seq = state.next_seq();
    if let Some(record) = state.cache.get(&key).cloned() {
        tracing::debug!(%key, "cache hit");
        state.pending = None;
        return apply_success(state, operation, record);
    }

    state.pending = Some(PendingLookup {
        seq,
        key: key.clone(),
        operation,
    });
    state.screen = DataResource::Loading;
    state.sprite = SpriteSlot::default();
    DispatchResult::changed_with(Effect::FetchCreature { key, seq })
}

fn take_pending(state: &mut AppState, seq: u64) -> Option<PendingLookup> {
    if state.pending.as_ref().is_some_and(|pending| pending.seq == seq) {
        state.pending.take()
    } else {
        None
    }
}

fn apply_success(
    state: &mut AppState,
    operation: Operation,
    record: CreatureRecord,
) -> DispatchResult<Effect> {
    match operation {
        Operation::Initial { target } | Operation::Navigate { target } => {
            state.session.move_to(target)
        }
        Operation::Search { .. } => state.session.accept_search(record.id),
        Operation::Random { target } => state.session.accept_random(target),
    }
    state.sprite = SpriteSlot {
        url: record.sprite.clone(),
        shiny: false,
    };
    state.tick = 0;
    state.screen = DataResource::Loaded(record);
    with_sprite_effect(state)
}

fn with_sprite_effect(state: &AppState) -> DispatchResult<Effect> {
    match state.sprite.url.as_ref() {
        Some(url) if !state.sprite_art.contains_key(url) && !state.sprite_errors.contains(url) => {
            DispatchResult::changed_with(Effect::LoadSprite { url: url.clone() })
        }
        _ => DispatchResult::changed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PokedexError;
    use crate::navigation::Direction;
    use crate::state::BaseStats;

    fn record(id: u32, name: &str) -> CreatureRecord {
        CreatureRecord {
            id,
            name: name.to_string(),
            types: vec!["normal".into()],
            sprite: None,
            stats: BaseStats::default(),
            height_m: 1.0,
            weight_kg: 10.0,
            abilities: vec!["run-away".into()],
        }
    }

    fn fetch_seq(result: &DispatchResult<Effect>) -> u64 {
        match result.effects.as_slice() {
            [Effect::FetchCreature { seq, .. }] => *seq,
            other => panic!("expected a single FetchCreature, got {other:?}"),
        }
    }

    #[test]
    fn test_init_fetches_start_id() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert!(state.screen.is_loading());
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::FetchCreature { key, .. }] if key == "25"
        ));
    }

    #[test]
    fn test_cache_hit_skips_loading_and_network() {
        let mut state = AppState::default();
        state.cache.store("26", record(26, "raichu"));

        let result = reducer(&mut state, Action::Navigate(Direction::Next));

        assert!(result.effects.is_empty());
        assert!(state.screen.is_loaded());
        assert_eq!(state.session.current_id, 26);
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_stale_result_is_cached_but_not_rendered() {
        let mut state = AppState::default();
        state.search_text = "mew".into();
        let first = fetch_seq(&reducer(&mut state, Action::SearchSubmit));
        let second = fetch_seq(&reducer(&mut state, Action::Navigate(Direction::Next)));
        assert!(second > first);

        reducer(
            &mut state,
            Action::CreatureDidLoad {
                key: "mew".into(),
                seq: first,
                record: record(151, "mew"),
            },
        );
        assert!(state.cache.contains("mew"));
        assert!(state.screen.is_loading());
        assert_eq!(state.session.current_id, 25);

        reducer(
            &mut state,
            Action::CreatureDidLoad {
                key: "26".into(),
                seq: second,
                record: record(26, "raichu"),
            },
        );
        assert_eq!(state.displayed().map(|r| r.id), Some(26));
        assert_eq!(state.session.current_id, 26);
    }

    #[test]
    fn test_stale_error_is_ignored() {
        let mut state = AppState::default();
        let first = fetch_seq(&reducer(&mut state, Action::Init));
        state.cache.store("26", record(26, "raichu"));
        reducer(&mut state, Action::Navigate(Direction::Next));

        let result = reducer(
            &mut state,
            Action::CreatureDidError {
                key: "25".into(),
                seq: first,
                error: PokedexError::NotFound {
                    key: "25".into(),
                    status: 404,
                },
            },
        );
        assert!(!result.changed);
        assert!(state.screen.is_loaded());
    }

    #[test]
    fn test_input_editing() {
        let mut state = AppState::default();
        reducer(&mut state, Action::InputPush('2'));
        reducer(&mut state, Action::InputPush('5'));
        assert_eq!(state.search_text, "25");

        let result = reducer(&mut state, Action::InputPush('!'));
        assert!(!result.changed);

        reducer(&mut state, Action::InputBackspace);
        assert_eq!(state.search_text, "2");

        reducer(&mut state, Action::InputClear);
        assert!(state.search_text.is_empty());
        assert!(!reducer(&mut state, Action::InputClear).changed);
    }

    #[test]
    fn test_tick_only_animates_visible_art() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick, 0);
    }
}
