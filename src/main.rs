//! Chromatic Current entry point
//!
//! Native terminal host: draws the board and HUD, maps keys and mouse drags
//! to directions, and drives the session from a polled interval timer.

use std::collections::HashSet;
use std::io::{self, Stdout, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use glam::{IVec2, Vec2};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use chromatic_current::consts::{GRID_SIZE, HARMONY_MAX};
use chromatic_current::input::{direction_from_char, direction_from_drag};
use chromatic_current::sim::{Cell, Direction, FOOD_TYPES, Snapshot, TickOutcome};
use chromatic_current::{IntervalTimer, Session, Settings};

/// Upper bound on input latency while waiting for the next tick
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Chromatic Current - weave between elemental blooms to keep harmony high
#[derive(Parser, Debug)]
#[command(name = "chromatic-current")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed (default: settings file, then system clock)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the opening snapshot as JSON and exit
    #[arg(long)]
    snapshot: bool,
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let settings = args
        .settings
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
    let session = Session::new(IntervalTimer::new(), seed);

    if args.snapshot {
        let json = serde_json::to_string_pretty(&session.snapshot()).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    run_tui(session, settings)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(seed_from_elapsed)
        .unwrap_or(42)
}

/// Fold seconds and sub-second nanos into one seed without truncation
fn seed_from_elapsed(elapsed: Duration) -> u64 {
    elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos())
}

fn run_tui(session: Session<IntervalTimer>, settings: Settings) -> io::Result<()> {
    enable_raw_mode()?;
    let result = run_in_raw_mode(session, settings);

    // Restore the terminal whatever happened after raw mode went on
    let restored = restore_terminal();
    result.and(restored)
}

fn run_in_raw_mode(session: Session<IntervalTimer>, settings: Settings) -> io::Result<()> {
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;

    let mut app = App::new(session, settings);
    app.run(&mut terminal)
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, Show);
    raw.and(screen)
}

/// Host-side state around the session
struct App {
    session: Session<IntervalTimer>,
    settings: Settings,
    drag_start: Option<(u16, u16)>,
    last_outcome: Option<TickOutcome>,
    quit: bool,
}

impl App {
    fn new(session: Session<IntervalTimer>, settings: Settings) -> Self {
        Self {
            session,
            settings,
            drag_start: None,
            last_outcome: None,
            quit: false,
        }
    }

    fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        loop {
            let app = &*self;
            terminal.draw(|f| draw(f, app))?;

            let timeout = self
                .session
                .clock()
                .next_deadline()
                .map_or(IDLE_POLL, |d| d.saturating_duration_since(Instant::now()))
                .min(IDLE_POLL);
            if event::poll(timeout)? {
                self.handle_event(event::read()?);
            }
            if self.quit {
                return Ok(());
            }

            let due = self.session.clock_mut().due(Instant::now());
            for handle in due {
                if let Some(outcome) = self.session.fire(handle) {
                    self.last_outcome = Some(outcome);
                }
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
                KeyCode::Char('r') | KeyCode::Enter if self.session.state().game_over => {
                    self.session.reset();
                    self.last_outcome = None;
                }
                KeyCode::Up => self.steer(Direction::Up),
                KeyCode::Down => self.steer(Direction::Down),
                KeyCode::Left => self.steer(Direction::Left),
                KeyCode::Right => self.steer(Direction::Right),
                KeyCode::Char(c) => {
                    if let Some(direction) = direction_from_char(c) {
                        self.steer(direction);
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.drag_start = Some((mouse.column, mouse.row));
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    if let Some((x0, y0)) = self.drag_start.take() {
                        // Board cells are two columns wide
                        let delta = Vec2::new(
                            (f32::from(mouse.column) - f32::from(x0)) / 2.0,
                            f32::from(mouse.row) - f32::from(y0),
                        );
                        if let Some(direction) =
                            direction_from_drag(delta, self.settings.drag_threshold)
                        {
                            self.steer(direction);
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn steer(&mut self, direction: Direction) {
        if !self.session.request_direction(direction) {
            log::debug!("Rejected reversal to {}", direction.as_str());
        }
    }
}

fn rgb(color: u32) -> Color {
    Color::Rgb((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

fn draw(f: &mut Frame, app: &App) {
    let snapshot = app.session.snapshot();

    let legend_height = if app.settings.show_legend { 6 } else { 0 };
    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(GRID_SIZE as u16 + 2),
            Constraint::Length(legend_height),
        ])
        .split(f.area());

    render_header(f, rows[0], &snapshot);

    let body = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Length(GRID_SIZE as u16 * 2 + 2), Constraint::Min(24)])
        .split(rows[1]);

    render_board(f, body[0], &snapshot);
    render_hud(f, body[1], &snapshot, app.last_outcome);

    if app.settings.show_legend {
        render_legend(f, rows[2]);
    }
}

fn render_header(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let status = if snapshot.game_over { "GAME OVER" } else { "RUNNING" };
    let title = format!(
        " Chromatic Current | Score {} | {} | {}ms ",
        snapshot.score, status, snapshot.speed_ms
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let body: HashSet<Cell> = snapshot.creature.iter().copied().collect();
    let head = snapshot.creature.first().copied();
    let phasing = snapshot.phase_turns > 0;
    let body_color = if phasing { Color::LightCyan } else { Color::Green };

    let mut lines = Vec::with_capacity(GRID_SIZE as usize);
    for y in 0..GRID_SIZE {
        let mut spans = Vec::with_capacity(GRID_SIZE as usize);
        for x in 0..GRID_SIZE {
            let cell = IVec2::new(x, y);
            let span = if Some(cell) == head {
                Span::styled("██", Style::default().fg(Color::White))
            } else if cell == snapshot.food.position {
                let color = rgb(snapshot.food.kind.config().color);
                Span::styled("◆ ", Style::default().fg(color).add_modifier(Modifier::BOLD))
            } else if body.contains(&cell) {
                Span::styled("██", Style::default().fg(body_color))
            } else {
                Span::styled("· ", Style::default().fg(Color::DarkGray))
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Current "));
    f.render_widget(board, area);
}

fn render_hud(f: &mut Frame, area: Rect, snapshot: &Snapshot, last_outcome: Option<TickOutcome>) {
    let filled = usize::from(snapshot.harmony);
    let meter = format!(
        "{}{}",
        "■".repeat(filled),
        "□".repeat(usize::from(HARMONY_MAX) - filled)
    );

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Score   ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(snapshot.score.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Harmony ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(meter, Style::default().fg(Color::Magenta)),
        ]),
        Line::from(vec![
            Span::styled("Phase   ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(snapshot.phase_turns.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Length  ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(snapshot.creature.len().to_string()),
        ]),
    ];

    if let Some(kind) = snapshot.last_consumed {
        let config = kind.config();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Last: {}", config.label),
            Style::default().fg(rgb(config.color)),
        )));
    }

    if let Some(TickOutcome::Consumed(report)) = last_outcome {
        lines.push(Line::from(Span::styled(
            format!("+{}", report.score_gained),
            Style::default().fg(Color::Yellow),
        )));
    }

    if snapshot.game_over {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Harmony Shattered",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from("Your chromatic current collapsed."));
        lines.push(Line::from("Press r to restart run"));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "arrows/wasd/hjkl, drag, q quits",
        Style::default().fg(Color::DarkGray),
    )));

    let hud = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Harmony "));
    f.render_widget(hud, area);
}

fn render_legend(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = FOOD_TYPES
        .iter()
        .map(|kind| {
            let config = kind.config();
            Line::from(vec![
                Span::styled("◆ ", Style::default().fg(rgb(config.color))),
                Span::styled(
                    format!("{:<12}", config.label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(config.description),
            ])
        })
        .collect();

    let legend = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Elemental Effects "));
    f.render_widget(legend, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_keeps_high_seconds_bits() {
        // Nanosecond totals past u64::MAX would wrap under a plain cast
        let elapsed = Duration::new(u64::MAX - 1, 999_999_999);
        assert_eq!(seed_from_elapsed(elapsed), (u64::MAX - 1) ^ 999_999_999);

        let a = seed_from_elapsed(Duration::new(1_700_000_000, 5));
        let b = seed_from_elapsed(Duration::new(1_700_000_000, 6));
        assert_ne!(a, b);
    }
}
