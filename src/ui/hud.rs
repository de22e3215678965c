use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;

use crate::game::{GameStatus, Snapshot};

const HUD_MARGIN_X: u16 = 1;

/// Values shown next to the snapshot that the simulation does not own.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo {
    pub high_score: u32,
    pub attempt: u32,
    /// Countdown value the timer bar is measured against.
    pub timer_full: i32,
}

/// Renders the score row and timer bar under the play area and returns the
/// remaining area above them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, info: &HudInfo) -> Rect {
    let [play_area, score_area, timer_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(snapshot.score, info.high_score, info.attempt))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        inset_horizontal(score_area, HUD_MARGIN_X),
    );

    let (label, ratio) = match snapshot.status {
        GameStatus::GameOver(_) => ("GAME OVER".to_owned(), 0.0),
        GameStatus::Running => (
            snapshot.timer.max(0).to_string(),
            timer_ratio(snapshot.timer, info.timer_full),
        ),
    };
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .label(label)
            .ratio(ratio),
        inset_horizontal(timer_area, HUD_MARGIN_X),
    );

    play_area
}

fn score_line(score: u32, high_score: u32, attempt: u32) -> Line<'static> {
    let score_style = if score > high_score {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::raw("Round: "),
        Span::styled(attempt.to_string(), Style::default().fg(Color::White)),
        Span::raw(" │ Score: "),
        Span::styled(score.to_string(), score_style),
        Span::raw(" │ Hi: "),
        Span::styled(high_score.max(score).to_string(), Style::default().fg(Color::Gray)),
    ])
}

fn timer_ratio(timer: i32, full: i32) -> f64 {
    if full <= 0 {
        return 0.0;
    }
    (f64::from(timer) / f64::from(full)).clamp(0.0, 1.0)
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}
