use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Component, ACCENT_GOLD, SCREEN_BG, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::sprite::SpriteWidget;
use crate::state::AppState;

pub const LOADING_GLYPH: &str = "⏳";
pub const ERROR_GLYPH: &str = "❌";
pub const MISSING_GLYPH: &str = "❓";

/// The top screen of the device: artwork or a placeholder glyph.
pub struct SpriteScreen;

pub struct SpriteScreenProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for SpriteScreen {
    type Props<'a> = SpriteScreenProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TEXT_DIM))
            .style(Style::default().bg(SCREEN_BG).fg(TEXT_MAIN));
        if state.sprite.shiny {
            block = block.title_top(
                Line::styled(
                    " SHINY ",
                    Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
                )
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // A shiny swap replaces whatever the screen shows, error glyph included.
        let glyph = if state.sprite.shiny || state.displayed().is_some() {
            match state.current_sprite_art() {
                Some(art) => {
                    let widget = SpriteWidget::new(art, SCREEN_BG).y_offset(state.float_offset());
                    frame.render_widget(widget, inner);
                    return;
                }
                None => MISSING_GLYPH,
            }
        } else if state.screen.is_failed() {
            ERROR_GLYPH
        } else {
            LOADING_GLYPH
        };
        render_glyph(frame, inner, glyph);
    }
}

fn render_glyph(frame: &mut Frame, area: Rect, glyph: &str) {
    let rows = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);
    frame.render_widget(
        Paragraph::new(glyph).alignment(Alignment::Center),
        rows[1],
    );
}
