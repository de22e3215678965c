use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::game::EndReason;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32) {
    let lines = [
        "I'M NOT A ROBOT".to_owned(),
        String::new(),
        format!("High score: {high_score}"),
        String::new(),
        "[Enter]/[Space] Start".to_owned(),
        "[Q] Quit".to_owned(),
    ];
    render_popup(frame, area, " snake ", &lines, Color::Green);
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let lines = [
        "PAUSED".to_owned(),
        String::new(),
        "[P] Resume".to_owned(),
        "[Q] Quit".to_owned(),
    ];
    render_popup(frame, area, " pause ", &lines, Color::White);
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    reason: EndReason,
) {
    let is_new_high = score > high_score;
    let lines = [
        "GAME OVER".to_owned(),
        String::new(),
        format!("Score: {score}"),
        format!("High score: {}", high_score.max(score)),
        reason_text(reason).to_owned(),
        if is_new_high {
            "New high score!".to_owned()
        } else {
            String::new()
        },
        String::new(),
        "[Enter]/[Space] Play Again".to_owned(),
        "[Q] Quit".to_owned(),
    ];
    render_popup(frame, area, " game over ", &lines, Color::Red);
}

fn reason_text(reason: EndReason) -> &'static str {
    match reason {
        EndReason::OutOfBounds => "Cause: hit the wall",
        EndReason::SelfCollision => "Cause: hit yourself",
        EndReason::TimerExpired => "Cause: out of time",
        EndReason::BoardFilled => "The board is full!",
    }
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: &[String], accent: Color) {
    let popup = centered_popup(area, lines);
    frame.render_widget(Clear, popup);

    let mut text: Vec<Line<'_>> = lines.iter().map(|line| Line::from(line.as_str())).collect();
    if let Some(first) = text.first_mut() {
        *first = first
            .clone()
            .style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
    }

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

/// Smallest centered rect that fits `lines` plus a border, clipped to `area`.
fn centered_popup(area: Rect, lines: &[String]) -> Rect {
    let content_width = lines
        .iter()
        .map(|line| UnicodeWidthStr::width(line.as_str()))
        .max()
        .unwrap_or(0);
    let width = u16::try_from(content_width + 4)
        .unwrap_or(u16::MAX)
        .min(area.width);
    let height = u16::try_from(lines.len() + 2)
        .unwrap_or(u16::MAX)
        .min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::centered_popup;

    #[test]
    fn popup_fits_widest_line_and_stays_centered() {
        let area = Rect::new(0, 0, 40, 20);
        let lines = vec!["GAME OVER".to_owned(), "[Enter]/[Space] Play Again".to_owned()];

        let popup = centered_popup(area, &lines);

        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 4);
        assert_eq!(popup.x, 5);
        assert_eq!(popup.y, 8);
    }

    #[test]
    fn popup_is_clipped_to_small_areas() {
        let area = Rect::new(2, 3, 10, 3);
        let lines = vec!["a very long line of text".to_owned(); 5];

        let popup = centered_popup(area, &lines);

        assert_eq!(popup, area);
    }
}
