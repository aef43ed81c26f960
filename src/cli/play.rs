//! Play command implementation - interactive two-player TUI.

// Grid coordinates and terminal sizes are small positive values
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use super::{CliError, resolve_seed};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gobble::engine::GameEvent;
use gobble::game::{FoodKind, Phase, PlayerId};
use gobble::render::{Glyph, glyph_grid, phase_label};
use gobble::{Direction, GameConfig, InputBuffer, Session, SimulationEngine, Snapshot, SystemClock};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::VecDeque;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Event lines kept for the side panel.
const EVENT_LOG_LEN: usize = 8;

/// Input poll timeout; bounds how late a tick can fire.
const POLL_INTERVAL: Duration = Duration::from_millis(15);

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the rules are invalid or the terminal fails.
pub(crate) fn execute(config: GameConfig, seed: Option<u64>) -> Result<(), CliError> {
    let seed = resolve_seed(seed);
    let engine = SimulationEngine::seeded(config, seed)?;
    info!(seed, "interactive session");
    run_tui(App::new(Session::new(engine, SystemClock::new()), seed))
}

/// App state for the TUI.
struct App {
    session: Session,
    input: Arc<InputBuffer>,
    seed: u64,
    events: VecDeque<String>,
}

impl App {
    fn new(session: Session, seed: u64) -> Self {
        let input = session.engine().input();
        Self {
            session,
            input,
            seed,
            events: VecDeque::with_capacity(EVENT_LOG_LEN),
        }
    }

    fn step(&mut self) {
        if let Some(report) = self.session.pump() {
            self.log(&report.events);
        }
        let pending = self.session.engine_mut().take_events();
        self.log(&pending);
    }

    fn log(&mut self, events: &[GameEvent]) {
        for event in events {
            if self.events.len() == EVENT_LOG_LEN {
                self.events.pop_front();
            }
            self.events.push_back(event.tag());
        }
    }

    /// Space starts a game from the ready or finished screen and pauses otherwise.
    fn start_or_pause(&self) {
        match self.session.engine().phase() {
            Phase::Ready | Phase::Over { .. } => self.input.request_restart(),
            Phase::Running | Phase::Paused => self.input.request_pause_toggle(),
        }
    }

    fn handle_key(&self, code: KeyCode) {
        match code {
            KeyCode::Char('w' | 'W') => self.input.push_direction(1, Direction::Up),
            KeyCode::Char('s' | 'S') => self.input.push_direction(1, Direction::Down),
            KeyCode::Char('a' | 'A') => self.input.push_direction(1, Direction::Left),
            KeyCode::Char('d' | 'D') => self.input.push_direction(1, Direction::Right),
            KeyCode::Char('e' | 'E') => self.input.push_hazard(1),
            KeyCode::Up => self.input.push_direction(2, Direction::Up),
            KeyCode::Down => self.input.push_direction(2, Direction::Down),
            KeyCode::Left => self.input.push_direction(2, Direction::Left),
            KeyCode::Right => self.input.push_direction(2, Direction::Right),
            KeyCode::Enter => self.input.push_hazard(2),
            KeyCode::Char(' ') => self.start_or_pause(),
            KeyCode::Char('p' | 'P') => self.input.request_pause_toggle(),
            KeyCode::Char('r' | 'R') => self.input.request_restart(),
            _ => {}
        }
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    loop {
        app.step();
        let snapshot = app.session.engine().snapshot();
        terminal
            .draw(|f| ui(f, app, &snapshot))
            .map_err(|e| CliError::new(e.to_string()))?;

        if event::poll(POLL_INTERVAL).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q' | 'Q') | KeyCode::Esc => break,
                code => app.handle_key(code),
            }
        }
    }
    app.session.stop();
    Ok(())
}

fn ui(f: &mut Frame, app: &App, snapshot: &Snapshot) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board and stats
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app, snapshot);

    let main_chunks = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    render_board(f, main_chunks[0], snapshot);
    render_stats(f, main_chunks[1], app, snapshot);
    render_footer(f, chunks[2], snapshot.phase);
}

fn render_header(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let title = format!(
        " Gobble | Seed {} | Tick {} | Level {} (x{:.1}) | {} ",
        app.seed,
        snapshot.tick,
        snapshot.level,
        snapshot.speed_multiplier,
        phase_label(snapshot.phase)
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let cells = glyph_grid(snapshot);

    // Show the part of the board that fits
    let visible_width = (area.width as usize).saturating_sub(2) / 2;
    let visible_height = (area.height as usize).saturating_sub(2);

    let lines: Vec<Line> = cells
        .iter()
        .take(visible_height)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .take(visible_width)
                .map(|glyph| {
                    let (ch, style) = glyph_style(*glyph);
                    Span::styled(format!("{ch} "), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Arena "));
    f.render_widget(board, area);
}

fn glyph_style(glyph: Glyph) -> (char, Style) {
    let color = match glyph {
        Glyph::Empty => Color::DarkGray,
        Glyph::Head(id) | Glyph::Body(id) => player_color(id),
        Glyph::Hazard => Color::Magenta,
        Glyph::Food(FoodKind::Vegetable) => Color::Green,
        Glyph::Food(FoodKind::Fruit) => Color::Yellow,
        Glyph::Food(FoodKind::Sweet) => Color::White,
    };
    let mut style = Style::default().fg(color);
    if matches!(glyph, Glyph::Head(_)) {
        style = style.add_modifier(Modifier::BOLD);
    }
    (glyph.symbol(), style)
}

fn render_stats(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let mut lines = vec![Line::from("")];

    for agent in &snapshot.agents {
        let status = if agent.alive { "" } else { " [ELIMINATED]" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("Player {}", agent.id),
                Style::default()
                    .fg(player_color(agent.id))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(status),
        ]));
        lines.push(Line::from(format!(
            "  Score: {}  Length: {}",
            agent.ledger.score,
            agent.len()
        )));
        lines.push(Line::from(format!(
            "  Calories: {}  Progress: {}",
            agent.ledger.calories, agent.ledger.level_progress
        )));
        lines.push(Line::from(format!(
            "  Speed: {:.2}  Girth: {:.2}",
            agent.speed_factor, agent.girth_factor
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Events",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for tag in app.events.iter().rev() {
        lines.push(Line::from(format!("  {tag}")));
    }

    let stats = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Players "))
        .wrap(Wrap { trim: false });

    f.render_widget(stats, area);
}

fn player_color(id: PlayerId) -> Color {
    match id {
        1 => Color::Red,
        2 => Color::Blue,
        _ => Color::White,
    }
}

fn render_footer(f: &mut Frame, area: Rect, phase: Phase) {
    let controls = match phase {
        Phase::Ready | Phase::Over { .. } => " [Space] Start  [q] Quit ",
        Phase::Running | Phase::Paused => {
            " P1 [WASD] [e] hazard | P2 [arrows] [Enter] hazard | [Space/p] Pause  [r] Restart  [q] Quit "
        }
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
