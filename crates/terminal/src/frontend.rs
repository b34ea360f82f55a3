use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use lightcycle::{
    Direction, Extent, FrameInput, Frontend, GameConfig, NetworkStats, Outcome, Phase,
    StepSnapshot,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Color;

use crate::screens::{self, ScreenView, Trail};

const KEY_POLL: Duration = Duration::from_millis(50);

/// Full-screen terminal renderer and keyboard reader. Restores the terminal
/// when dropped.
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    role: &'static str,
    extent: Extent,
    frame_duration: Duration,
    next_frame: Instant,
    phase: Phase,
    local_trail: Vec<(f64, f64)>,
    remote_trail: Vec<(f64, f64)>,
    local_color: Color,
    remote_color: Color,
    stats: NetworkStats,
    frame: u64,
    outcome: Option<Outcome>,
}

impl TerminalFrontend {
    pub fn new(config: &GameConfig, role: &'static str) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            role,
            extent: config.extent(),
            frame_duration: Duration::from_secs_f64(1.0 / f64::from(config.frame_rate)),
            next_frame: Instant::now(),
            phase: Phase::AwaitReady,
            local_trail: Vec::new(),
            remote_trail: Vec::new(),
            local_color: Color::White,
            remote_color: Color::White,
            stats: NetworkStats::default(),
            frame: 0,
            outcome: None,
        })
    }

    fn draw(&mut self) -> io::Result<()> {
        let view = ScreenView {
            role: self.role,
            width: f64::from(self.extent.width),
            height: f64::from(self.extent.height),
            phase: self.phase,
            local: Trail {
                coords: &self.local_trail,
                color: self.local_color,
            },
            remote: Trail {
                coords: &self.remote_trail,
                color: self.remote_color,
            },
            stats: &self.stats,
            frame: self.frame,
            outcome: self.outcome.as_ref(),
        };
        self.terminal.draw(|frame| screens::render(frame, &view))?;
        Ok(())
    }

    // Canvas y grows upwards, grid y grows downwards.
    fn to_canvas(&self, x: i32, y: i32) -> (f64, f64) {
        (
            f64::from(x),
            f64::from(self.extent.height as i32 - 1 - y),
        )
    }

    fn pace(&mut self) {
        let now = Instant::now();
        if self.next_frame > now {
            thread::sleep(self.next_frame - now);
            self.next_frame += self.frame_duration;
        } else {
            self.next_frame = now + self.frame_duration;
        }
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        );
    }
}

fn read_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

fn is_close_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Direction::Right),
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Direction::Down),
        _ => None,
    }
}

impl Frontend for TerminalFrontend {
    fn show_phase(&mut self, phase: Phase) -> io::Result<()> {
        self.phase = phase;
        if phase == Phase::Playing {
            self.next_frame = Instant::now();
        }
        self.draw()
    }

    fn wait_for_ready(&mut self) -> io::Result<bool> {
        loop {
            if let Some(key) = read_key(KEY_POLL)? {
                if is_close_key(&key) {
                    return Ok(false);
                }
                if key.code == KeyCode::Enter {
                    return Ok(true);
                }
            }
        }
    }

    fn poll_input(&mut self) -> io::Result<FrameInput> {
        let mut input = FrameInput::default();
        while let Some(key) = read_key(Duration::ZERO)? {
            if is_close_key(&key) {
                input.close = true;
            } else if let Some(direction) = direction_for(key.code) {
                input.facing = Some(direction);
            }
        }
        Ok(input)
    }

    fn draw_step(&mut self, step: &StepSnapshot) -> io::Result<()> {
        self.local_color = to_color(step.local.color);
        self.remote_color = to_color(step.remote.color);
        let local = self.to_canvas(step.local.x, step.local.y);
        let remote = self.to_canvas(step.remote.x, step.remote.y);
        self.local_trail.push(local);
        self.remote_trail.push(remote);
        Ok(())
    }

    fn present_frame(&mut self, stats: &NetworkStats) -> io::Result<()> {
        self.stats = *stats;
        self.frame += 1;
        self.draw()?;
        self.pace();
        Ok(())
    }

    fn wait_for_acknowledge(&mut self, outcome: &Outcome) -> io::Result<()> {
        self.outcome = Some(*outcome);
        self.draw()?;

        // Keys still queued from play must not dismiss the result.
        while read_key(Duration::ZERO)?.is_some() {}
        while read_key(KEY_POLL)?.is_none() {}
        Ok(())
    }
}

fn to_color(color: lightcycle::Color) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_map_to_directions() {
        assert_eq!(direction_for(KeyCode::Char('a')), Some(Direction::Left));
        assert_eq!(direction_for(KeyCode::Right), Some(Direction::Right));
        assert_eq!(direction_for(KeyCode::Char('W')), Some(Direction::Up));
        assert_eq!(direction_for(KeyCode::Down), Some(Direction::Down));
        assert_eq!(direction_for(KeyCode::Enter), None);
    }

    #[test]
    fn close_keys() {
        assert!(is_close_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_close_key(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_close_key(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn packed_colors_convert() {
        assert_eq!(to_color(lightcycle::Color::RED), Color::Rgb(255, 0, 0));
    }
}
