pub mod app;
pub mod ui;

use std::io;
use anyhow::Result;
use carwash_core::{FileStore, Lang, SalesService};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::tui::app::{App, InputMode};

pub fn run(service: SalesService<FileStore>, lang: Lang) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(service, lang);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(std::time::Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Left => app.previous_day(),
                KeyCode::Right => app.next_day(),
                KeyCode::Char('t') => app.jump_today(),
                KeyCode::Char('l') => app.toggle_lang(),
                KeyCode::Char('a') | KeyCode::Enter => app.enter_sale_mode(),
                KeyCode::Char('s') => app.enter_staff_mode(),
                KeyCode::Char('x') | KeyCode::Delete => app.request_remove_staff(),
                KeyCode::Char('c') => app.request_clear(),
                KeyCode::Char('e') => app.export(),
                _ => {}
            },
            InputMode::AddingSale | InputMode::AddingStaff => match key.code {
                KeyCode::Enter => app.submit_command(),
                KeyCode::Esc => app.exit_input_mode(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Left => app.move_cursor_left(),
                KeyCode::Right => app.move_cursor_right(),
                _ => {}
            },
            InputMode::ConfirmRemove(_) | InputMode::ConfirmClear => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm(),
                _ => app.exit_input_mode(),
            },
        }
    }
}
