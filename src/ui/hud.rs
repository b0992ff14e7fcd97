use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::GameStatus;

const SEPARATOR: &str = " │ ";

/// Values displayed by the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub score: u32,
    pub high_score: u32,
    pub length: usize,
    pub tick_interval: Duration,
    pub status: GameStatus,
    pub theme: &'a Theme,
}

/// Renders the stats row and the key legend into a two-row `area`.
pub fn render_hud(buffer: &mut Buffer, area: Rect, info: &HudInfo<'_>) {
    let [stats_area, legend_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    Paragraph::new(stats_line(info, usize::from(stats_area.width)))
        .alignment(Alignment::Center)
        .render(stats_area, buffer);

    Paragraph::new(Line::from(legend_text(info.status)))
        .alignment(Alignment::Center)
        .style(Style::default().fg(info.theme.hud_label))
        .render(legend_area, buffer);
}

fn stats_line(info: &HudInfo<'_>, available_width: usize) -> Line<'static> {
    let compact = full_stats_width(info) > available_width;
    let labels: [&str; 4] = if compact {
        ["S", "Hi", "L", "T"]
    } else {
        ["Score", "High", "Length", "Tick"]
    };

    let label = Style::default().fg(info.theme.hud_label);
    let value = Style::default().fg(info.theme.hud_value);
    let record = if info.score > 0 && info.score == info.high_score {
        value.add_modifier(Modifier::BOLD)
    } else {
        value
    };

    Line::from(vec![
        Span::styled(format!("{}: ", labels[0]), label),
        Span::styled(info.score.to_string(), record),
        Span::styled(SEPARATOR, label),
        Span::styled(format!("{}: ", labels[1]), label),
        Span::styled(info.high_score.to_string(), record),
        Span::styled(SEPARATOR, label),
        Span::styled(format!("{}: ", labels[2]), label),
        Span::styled(info.length.to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled(format!("{}: ", labels[3]), label),
        Span::styled(format!("{}ms", info.tick_interval.as_millis()), value),
    ])
}

fn full_stats_width(info: &HudInfo<'_>) -> usize {
    "Score: High: Length: Tick: ".width()
        + 3 * SEPARATOR.width()
        + info.score.to_string().len()
        + info.high_score.to_string().len()
        + info.length.to_string().len()
        + format!("{}ms", info.tick_interval.as_millis()).len()
}

fn legend_text(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle | GameStatus::Over => "[Space] Start  [R] Reset  [Q] Quit",
        GameStatus::Running => "Arrows/WASD/drag  [Space] Pause  [R] Reset  [Q] Quit",
        GameStatus::Paused => "[Space] Resume  [R] Reset  [Q] Quit",
    }
}
