use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, InfoScreen, InfoScreenProps, Nameplate, NameplateProps, SpriteScreen,
    SpriteScreenProps, ACCENT_GOLD, ACCENT_TEAL, DEVICE_RED, SCREEN_BG, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::navigation::{is_search_char, Direction};
use crate::state::AppState;

/// Props for PokedexDevice - read-only view of state
pub struct PokedexDeviceProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The handheld: sprite screen, nameplate, info screen, search field and buttons.
#[derive(Default)]
pub struct PokedexDevice;

impl Component<Action> for PokedexDevice {
    type Props<'a> = PokedexDeviceProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Char(ch) if is_search_char(ch) => Some(Action::InputPush(ch)),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Esc | KeyCode::Delete => Some(Action::InputClear),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Left => Some(Action::Navigate(Direction::Previous)),
            KeyCode::Right => Some(Action::Navigate(Direction::Next)),
            KeyCode::Up => Some(Action::RandomPick),
            KeyCode::Down if props.state.session.shiny_enabled => Some(Action::ShinyRequest),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: PokedexDeviceProps<'_>) {
        let state = props.state;
        let shell = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(DEVICE_RED))
            .title(Line::styled(
                " POKÉDEX ",
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(DEVICE_RED));
        let inner = shell.inner(area);
        frame.render_widget(shell, area);

        let rows = Layout::vertical([
            Constraint::Min(10),   // Screens
            Constraint::Length(3), // Search field
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

        let columns =
            Layout::horizontal([Constraint::Length(34), Constraint::Min(30)]).split(rows[0]);
        let left = Layout::vertical([Constraint::Min(8), Constraint::Length(3)]).split(columns[0]);

        SpriteScreen.render(frame, left[0], SpriteScreenProps { state });
        Nameplate.render(frame, left[1], NameplateProps { state });
        InfoScreen.render(frame, columns[1], InfoScreenProps { state });

        render_search(frame, rows[1], state, props.is_focused);
        render_buttons(frame, rows[2], state);
    }
}

fn render_search(frame: &mut Frame, area: Rect, state: &AppState, is_focused: bool) {
    let cursor = if is_focused { "_" } else { "" };
    let line = if state.search_text.is_empty() {
        Line::from(vec![
            Span::styled("Name or number", Style::default().fg(TEXT_DIM)),
            Span::raw(cursor),
        ])
    } else {
        Line::from(vec![
            Span::styled(state.search_text.clone(), Style::default().fg(ACCENT_TEAL)),
            Span::raw(cursor),
        ])
    };
    let border = if is_focused { ACCENT_TEAL } else { TEXT_DIM };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title("SEARCH")
        .style(Style::default().bg(SCREEN_BG).fg(TEXT_MAIN));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_buttons(frame: &mut Frame, area: Rect, state: &AppState) {
    let shiny = if state.session.shiny_enabled {
        StatusBarHint::new("↓", "shiny")
    } else {
        StatusBarHint::new("↓", "shiny (off)")
    };
    let hints = [
        StatusBarHint::new("Enter", "search"),
        StatusBarHint::new("←/→", "prev/next"),
        StatusBarHint::new("↑", "random"),
        shiny,
        StatusBarHint::new("^Q", "quit"),
    ];
    let status_items = [StatusBarItem::span(Span::styled(
        "fetching...",
        Style::default().fg(ACCENT_GOLD),
    ))];
    let right = if state.screen.is_loading() {
        StatusBarSection::items(&status_items)
    } else {
        StatusBarSection::empty()
    };

    let mut status_bar = StatusBar::new();
    <StatusBar as Component<Action>>::render(
        &mut status_bar,
        frame,
        area,
        StatusBarProps {
            left: StatusBarSection::empty(),
            center: StatusBarSection::hints(&hints),
            right,
            style: StatusBarStyle::default(),
            is_focused: false,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn actions_for(state: &AppState, event: EventKind) -> Vec<Action> {
        let mut component = PokedexDevice;
        component
            .handle_event(
                &event,
                PokedexDeviceProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn code(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_typing_appends_to_search() {
        let state = AppState::default();
        let actions = actions_for(&state, EventKind::Key(key("7")));
        actions.assert_first(Action::InputPush('7'));

        let actions = actions_for(&state, code(KeyCode::Char('-')));
        actions.assert_first(Action::InputPush('-'));

        actions_for(&state, code(KeyCode::Char('?'))).assert_empty();
    }

    #[test]
    fn test_arrows_navigate_and_pick() {
        let state = AppState::default();
        actions_for(&state, code(KeyCode::Left))
            .assert_first(Action::Navigate(Direction::Previous));
        actions_for(&state, code(KeyCode::Right)).assert_first(Action::Navigate(Direction::Next));
        actions_for(&state, code(KeyCode::Up)).assert_first(Action::RandomPick);
        actions_for(&state, code(KeyCode::Enter)).assert_first(Action::SearchSubmit);
        actions_for(&state, code(KeyCode::Esc)).assert_first(Action::InputClear);
    }

    #[test]
    fn test_shiny_key_ignored_while_disabled() {
        let mut state = AppState::default();
        actions_for(&state, code(KeyCode::Down)).assert_first(Action::ShinyRequest);

        state.session.shiny_enabled = false;
        actions_for(&state, code(KeyCode::Down)).assert_empty();
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut component = PokedexDevice;
        let state = AppState::default();
        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("r")),
                PokedexDeviceProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_control_chords_are_left_to_global_handler() {
        let state = AppState::default();
        let event = EventKind::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        actions_for(&state, event).assert_empty();
    }

    #[test]
    fn test_render_shows_search_text() {
        let mut render = RenderHarness::new(80, 30);
        let mut component = PokedexDevice;
        let state = AppState {
            search_text: "mew".into(),
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                PokedexDeviceProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("SEARCH"));
        assert!(output.contains("mew_"));
        assert!(output.contains("random"));
    }
}
