use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::stdout,
    time::{Duration, Instant},
};

use blockfall::constants::{GRAVITY_TICK_MS, GRID_COLS, GRID_ROWS, REDRAW_TICK_MS};
use blockfall::game::{ConfigError, Engine};
use blockfall::input::handle_input;
use blockfall::ui::ui;

fn new_game() -> Result<Engine, ConfigError> {
    let mut engine = Engine::new(GRID_ROWS, GRID_COLS)?;
    // Prime: first spawn fills the queue, second puts a piece in play.
    engine.spawn();
    engine.spawn();
    Ok(engine)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut engine = new_game()?;
    let mut gravity_timer = Instant::now();
    let mut redraw_timer = Instant::now();

    terminal.draw(|f| ui(f, &engine))?;

    // The engine has no timers of its own; this loop is the scheduler
    // driving the gravity and redraw cadences.
    loop {
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                if kind == KeyEventKind::Press || kind == KeyEventKind::Repeat {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            engine = new_game()?;
                            gravity_timer = Instant::now();
                        }
                        _ => handle_input(&mut engine, code),
                    }
                }
            }
        }

        if !engine.is_game_over()
            && gravity_timer.elapsed() >= Duration::from_millis(GRAVITY_TICK_MS)
        {
            gravity_timer = Instant::now();
            engine.move_piece(0, 1);
        }

        if redraw_timer.elapsed() >= Duration::from_millis(REDRAW_TICK_MS) {
            redraw_timer = Instant::now();
            terminal.draw(|f| ui(f, &engine))?;
        }
    }

    // Cleanup
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
