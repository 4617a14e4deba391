use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, SCREEN_BG, TEXT_DIM};
use crate::action::Action;
use crate::state::AppState;

pub const UNKNOWN_INDEX: &str = "#???";

/// `#025`; ids past three digits are left as-is.
pub fn format_index(id: u32) -> String {
    format!("#{id:03}")
}

/// Name/index header under the sprite screen.
pub struct Nameplate;

pub struct NameplateProps<'a> {
    pub state: &'a AppState,
}

/// (label, index marker) for the current screen.
pub fn nameplate_text(state: &AppState) -> (String, String) {
    if let Some(record) = state.displayed() {
        (record.name.to_uppercase(), format_index(record.id))
    } else if state.screen.is_failed() {
        ("NOT FOUND".to_string(), UNKNOWN_INDEX.to_string())
    } else {
        ("LOADING...".to_string(), UNKNOWN_INDEX.to_string())
    }
}

impl Component<Action> for Nameplate {
    type Props<'a> = NameplateProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (label, index) = nameplate_text(props.state);
        let line = Line::from(vec![
            Span::styled(
                label,
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(index, Style::default().fg(ACCENT_TEAL)),
        ])
        .centered();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TEXT_DIM))
            .style(Style::default().bg(SCREEN_BG));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
