use lightcycle::{NetworkStats, Outcome, Phase};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub const TITLE: &str = " The Tron Game! ";
pub const START_TEXT: &str =
    "Use W, A, S and D (or the arrow keys) to move your Tron Bike\nIf you're ready, tap Enter";
pub const READY_TEXT: &str = "Waiting for your opponent...";
pub const ACK_TEXT: &str = "Press any key to exit";

pub struct Trail<'a> {
    pub coords: &'a [(f64, f64)],
    pub color: Color,
}

pub struct ScreenView<'a> {
    pub role: &'a str,
    pub width: f64,
    pub height: f64,
    pub phase: Phase,
    pub local: Trail<'a>,
    pub remote: Trail<'a>,
    pub stats: &'a NetworkStats,
    pub frame: u64,
    pub outcome: Option<&'a Outcome>,
}

pub fn render(frame: &mut Frame, view: &ScreenView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let block = Block::default()
        .title(TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, view.width])
        .y_bounds([0.0, view.height])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: view.local.coords,
                color: view.local.color,
            });
            ctx.draw(&Points {
                coords: view.remote.coords,
                color: view.remote.color,
            });
        });
    frame.render_widget(canvas, chunks[0]);

    render_status(frame, chunks[1], view);

    if let Some(text) = overlay_text(view) {
        render_overlay(frame, chunks[0], &text);
    }
}

fn overlay_text(view: &ScreenView) -> Option<String> {
    match view.phase {
        Phase::AwaitReady => Some(START_TEXT.to_string()),
        Phase::AwaitOpponentReady => Some(READY_TEXT.to_string()),
        Phase::Playing => None,
        Phase::Finished => view
            .outcome
            .map(|outcome| format!("{}\n\n{}", outcome.as_str(), ACK_TEXT)),
    }
}

fn render_status(frame: &mut Frame, area: Rect, view: &ScreenView) {
    let status = Line::from(vec![
        Span::styled(
            format!(" {} ", view.role),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " frame {} | sent {} B | received {} B | Esc to quit",
            view.frame, view.stats.bytes_sent, view.stats.bytes_received
        )),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

fn render_overlay(frame: &mut Frame, area: Rect, text: &str) {
    let height = text.lines().count() as u16 + 2;
    let width = text.lines().map(str::len).max().unwrap_or(0) as u16 + 4;
    let popup = centered_rect(width, height, area);

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, popup);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use lightcycle::Termination;

    use super::*;

    const IDLE: NetworkStats = NetworkStats {
        bytes_sent: 0,
        bytes_received: 0,
        commands_sent: 0,
        commands_received: 0,
    };

    fn view(phase: Phase, outcome: Option<&Outcome>) -> ScreenView<'_> {
        ScreenView {
            role: "client",
            width: 600.0,
            height: 480.0,
            phase,
            local: Trail {
                coords: &[],
                color: Color::Red,
            },
            remote: Trail {
                coords: &[],
                color: Color::Green,
            },
            stats: &IDLE,
            frame: 0,
            outcome,
        }
    }

    #[test]
    fn overlay_follows_phase() {
        assert_eq!(
            overlay_text(&view(Phase::AwaitReady, None)).as_deref(),
            Some(START_TEXT)
        );
        assert_eq!(
            overlay_text(&view(Phase::AwaitOpponentReady, None)).as_deref(),
            Some(READY_TEXT)
        );
        assert_eq!(overlay_text(&view(Phase::Playing, None)), None);

        let outcome = Outcome {
            local_is_winner: false,
            termination: Termination::LocalCollision,
        };
        let text = overlay_text(&view(Phase::Finished, Some(&outcome))).unwrap();
        assert!(text.starts_with("Lose..."));
        assert!(text.ends_with(ACK_TEXT));
    }

    #[test]
    fn popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(20, 4, area), Rect::new(30, 10, 20, 4));
        assert_eq!(centered_rect(200, 50, area), area);
    }
}
