use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::nameplate::format_index;
use super::{
    Component, ACCENT_ERROR, ACCENT_GOLD, ACCENT_LOADING, ACCENT_TEAL, SCREEN_BG, TEXT_DIM,
    TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{AppState, CreatureRecord};

/// Cells in a stat bar.
pub const BAR_WIDTH: usize = 20;

const EXAMPLE_QUERIES: [&str; 4] = ["pikachu", "25", "charizard", "150"];

/// Percentage of the bar to fill, never above 100.
pub fn stat_fill_percent(value: u16, ceiling: u16) -> f64 {
    if ceiling == 0 {
        return 100.0;
    }
    (f64::from(value) / f64::from(ceiling) * 100.0).min(100.0)
}

fn stat_bar(percent: f64) -> (String, String) {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    ("█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Side panel with details, loading text or the error help.
pub struct InfoScreen;

pub struct InfoScreenProps<'a> {
    pub state: &'a AppState,
}

pub fn info_lines(state: &AppState) -> Vec<Line<'static>> {
    if let Some(record) = state.displayed() {
        record_lines(record)
    } else if let Some(message) = state.screen.error() {
        error_lines(message, state.catalog_size)
    } else {
        loading_lines()
    }
}

fn loading_lines() -> Vec<Line<'static>> {
    vec![
        Line::styled(
            "LOADING",
            Style::default()
                .fg(ACCENT_LOADING)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("Fetching Pokemon data from PokeAPI..."),
        Line::raw(""),
        Line::raw("Please wait..."),
    ]
}

fn error_lines(message: &str, catalog_size: u32) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            "ERROR",
            Style::default().fg(ACCENT_ERROR).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(message.to_string()),
        Line::raw(""),
        Line::raw("Examples:"),
    ];
    lines.extend(
        EXAMPLE_QUERIES
            .iter()
            .map(|query| Line::raw(format!("• {query}"))),
    );
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!("Total Pokemon available: {catalog_size}")));
    lines
}

fn record_lines(record: &CreatureRecord) -> Vec<Line<'static>> {
    let label = Style::default().fg(TEXT_DIM);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                record.name.to_uppercase(),
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(format_index(record.id), Style::default().fg(ACCENT_TEAL)),
        ]),
        Line::from(vec![
            Span::styled("Type: ", label),
            Span::raw(record.types.join("/").to_uppercase()),
        ]),
        Line::from(vec![
            Span::styled("Height: ", label),
            Span::raw(format!("{}m", record.height_m)),
            Span::styled(" | Weight: ", label),
            Span::raw(format!("{}kg", record.weight_kg)),
        ]),
        Line::raw(""),
    ];

    for (kind, value) in record.stats.iter() {
        let (filled, empty) = stat_bar(stat_fill_percent(value, kind.ceiling()));
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", kind.label()), label),
            Span::raw(value.to_string()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(filled, Style::default().fg(ACCENT_TEAL)),
            Span::styled(empty, Style::default().fg(TEXT_DIM)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Abilities: ", label),
        Span::raw(record.abilities.join(", ").to_uppercase()),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Status: Data Complete ✓",
        Style::default().fg(ACCENT_TEAL),
    ));
    lines
}

impl Component<Action> for InfoScreen {
    type Props<'a> = InfoScreenProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TEXT_DIM))
            .style(Style::default().bg(SCREEN_BG).fg(TEXT_MAIN));
        let paragraph = Paragraph::new(Text::from(info_lines(props.state)))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
