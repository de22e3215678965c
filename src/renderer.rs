use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::classify::{Segment, SegmentShape};
use crate::config::{GridSize, DEATH_STEP_DELAY};
use crate::game::{EndReason, Snapshot};
use crate::grid::Position;
use crate::input::Direction;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

const GLYPH_FRUIT: &str = "●";
const GLYPH_TAIL: &str = "•";
const GLYPH_BURST: &str = "✸";
const EAT_HEAD_GLYPHS: [&str; 3] = ["◉", "◎", "○"];

/// What, if anything, is drawn over the board.
#[derive(Debug, Clone, Copy)]
pub enum Overlay {
    None,
    Start,
    Paused,
    GameOver {
        reason: EndReason,
        /// High score before this round, for the "new high score" line.
        previous_high_score: u32,
    },
}

/// Presentation-side scheduler for the per-segment death sequence.
///
/// Segments pop one at a time, head first, every [`DEATH_STEP_DELAY`].
#[derive(Debug, Clone)]
pub struct DeathAnimation {
    cells: Vec<Position>,
    started_at: Instant,
}

impl DeathAnimation {
    #[must_use]
    pub fn new(cells: Vec<Position>, started_at: Instant) -> Self {
        Self { cells, started_at }
    }

    /// Number of segments already popped at `now`.
    #[must_use]
    pub fn popped(&self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.started_at);
        let steps = elapsed.as_millis() / DEATH_STEP_DELAY.as_millis().max(1);
        usize::try_from(steps).unwrap_or(usize::MAX).min(self.cells.len())
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.popped(now) == self.cells.len()
    }
}

/// Renders the full frame from one snapshot.
pub fn render(
    frame: &mut Frame<'_>,
    snapshot: &Snapshot,
    hud_info: &HudInfo,
    overlay: Overlay,
    death: Option<(&DeathAnimation, Instant)>,
) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, hud_info);

    let board = board_rect(play_area, snapshot.bounds);
    let block = Block::bordered().border_style(Style::new().fg(Color::White));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_fruits(frame, inner, snapshot);
    let popped = death.map_or(0, |(animation, now)| animation.popped(now));
    render_snake(frame, inner, snapshot, popped);

    match overlay {
        Overlay::None => {}
        Overlay::Start => render_start_menu(frame, play_area, hud_info.high_score),
        Overlay::Paused => render_pause_menu(frame, play_area),
        Overlay::GameOver {
            reason,
            previous_high_score,
        } => {
            if death.is_none_or(|(animation, now)| animation.is_finished(now)) {
                render_game_over_menu(
                    frame,
                    play_area,
                    snapshot.score,
                    previous_high_score,
                    reason,
                );
            }
        }
    }
}

/// Board rect (border included) centered in `area`.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_add(2).min(area.width);
    let height = bounds.height.saturating_add(2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_fruits(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let buffer = frame.buffer_mut();
    for &fruit in &snapshot.fruits {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, fruit) {
            buffer.set_string(x, y, GLYPH_FRUIT, Style::new().fg(Color::Red));
        }
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, popped: usize) {
    let buffer = frame.buffer_mut();
    for (index, segment) in snapshot.segments.iter().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, segment.position) else {
            continue;
        };

        if index + 1 < popped {
            continue;
        }
        if index < popped {
            buffer.set_string(x, y, GLYPH_BURST, Style::new().fg(Color::White));
            continue;
        }

        let glyph = match (segment.shape, snapshot.eat_frame) {
            (SegmentShape::Head, Some(eat)) => {
                EAT_HEAD_GLYPHS[usize::from(eat).min(EAT_HEAD_GLYPHS.len() - 1)]
            }
            _ => segment_glyph(segment),
        };
        let mut style = Style::new().fg(segment_color(segment.shape));
        if snapshot.bulging.contains(&segment.position) {
            style = style.fg(Color::LightGreen).add_modifier(Modifier::BOLD);
        }
        buffer.set_string(x, y, glyph, style);
    }
}

fn segment_color(shape: SegmentShape) -> Color {
    match shape {
        SegmentShape::Head => Color::White,
        SegmentShape::Tail => Color::DarkGray,
        _ => Color::Green,
    }
}

/// Box-drawing glyph joining the segment to its neighbours.
fn segment_glyph(segment: &Segment) -> &'static str {
    use Direction::{East, North, South, West};

    match (segment.shape, segment.orientation) {
        (SegmentShape::Head, North) => "▲",
        (SegmentShape::Head, East) => "▶",
        (SegmentShape::Head, South) => "▼",
        (SegmentShape::Head, West) => "◀",
        (SegmentShape::Straight, North | South) => "║",
        (SegmentShape::Straight, East | West) => "═",
        (SegmentShape::Corner, West) | (SegmentShape::InverseCorner, North) => "╝",
        (SegmentShape::Corner, East) | (SegmentShape::InverseCorner, South) => "╔",
        (SegmentShape::Corner, North) | (SegmentShape::InverseCorner, East) => "╚",
        (SegmentShape::Corner, South) | (SegmentShape::InverseCorner, West) => "╗",
        (SegmentShape::Tail, _) => GLYPH_TAIL,
    }
}

/// Maps a logical cell to a terminal cell; logical north is screen up.
fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !bounds.contains(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = bounds.height - 1 - u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::layout::Rect;

    use super::{logical_to_terminal, segment_glyph, DeathAnimation};
    use crate::classify::{Segment, SegmentShape};
    use crate::config::GridSize;
    use crate::grid::Position;
    use crate::input::Direction;

    const BOUNDS: GridSize = GridSize {
        width: 10,
        height: 10,
    };

    #[test]
    fn logical_north_is_drawn_at_the_top() {
        let inner = Rect::new(1, 1, 10, 10);

        assert_eq!(
            logical_to_terminal(inner, BOUNDS, Position::new(0, 9)),
            Some((1, 1))
        );
        assert_eq!(
            logical_to_terminal(inner, BOUNDS, Position::new(9, 0)),
            Some((10, 10))
        );
        assert_eq!(logical_to_terminal(inner, BOUNDS, Position::new(10, 0)), None);
    }

    #[test]
    fn corner_glyphs_join_both_neighbours() {
        let corner = Segment {
            position: Position::new(3, 5),
            shape: SegmentShape::Corner,
            orientation: Direction::South,
        };
        let inverse = Segment {
            shape: SegmentShape::InverseCorner,
            orientation: Direction::North,
            ..corner
        };

        // South toward the head, west toward the tail.
        assert_eq!(segment_glyph(&corner), "╗");
        // North toward the head, west toward the tail.
        assert_eq!(segment_glyph(&inverse), "╝");
    }

    #[test]
    fn death_animation_pops_one_segment_per_step() {
        let start = Instant::now();
        let animation = DeathAnimation::new(
            vec![Position::new(2, 2), Position::new(1, 2), Position::new(0, 2)],
            start,
        );

        assert_eq!(animation.popped(start), 0);
        assert_eq!(animation.popped(start + Duration::from_millis(150)), 1);
        assert_eq!(animation.popped(start + Duration::from_secs(5)), 3);
        assert!(!animation.is_finished(start + Duration::from_millis(250)));
        assert!(animation.is_finished(start + Duration::from_millis(300)));
    }
}
