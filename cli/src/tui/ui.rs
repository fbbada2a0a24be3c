use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

const MIN_NAME_WIDTH: u16 = 8;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input / status
            Constraint::Length(1), // Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(70),
        ])
        .split(main_chunks[1]);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(content_chunks[1]);

    draw_roster(f, app, content_chunks[0]);
    draw_staff_summary(f, app, summary_chunks[0]);
    draw_service_summary(f, app, summary_chunks[1]);
    draw_input(f, app, main_chunks[2]);

    let labels = app.labels();
    let help = format!(
        "←/→: {} | t: today | a: {} | s: {} | x: {} | c: {} | e: {} | l: {} | q: quit",
        labels.date, labels.add, labels.add_staff, labels.remove, labels.clear_data, labels.export_csv, labels.lang_toggle
    );
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn text_alignment(app: &App) -> Alignment {
    if app.lang.is_rtl() { Alignment::Right } else { Alignment::Left }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let labels = app.labels();
    let line = Line::from(vec![
        Span::styled(labels.title, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(" < ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}: {}", labels.date, app.date), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" > ", Style::default().fg(Color::DarkGray)),
    ]);
    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_roster(f: &mut Frame, app: &mut App, area: Rect) {
    let labels = app.labels();
    let rows: Vec<Row> = app
        .service
        .roster()
        .iter()
        .map(|name| Row::new(vec![Span::raw(name.to_string())]))
        .collect();

    let table = Table::new(rows, [Constraint::Min(MIN_NAME_WIDTH)])
        .header(Row::new(vec![labels.staff]).style(Style::default().fg(Color::Yellow)))
        .block(panel(labels.staff_management))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

/// Width of the staff column, measured in terminal cells so Arabic names line up.
fn name_width(names: impl Iterator<Item = usize>, header: &str) -> u16 {
    let widest = names.max().unwrap_or(0).max(header.width());
    u16::try_from(widest).unwrap_or(u16::MAX).max(MIN_NAME_WIDTH)
}

fn draw_staff_summary(f: &mut Frame, app: &App, area: Rect) {
    let labels = app.labels();
    let block = panel(labels.summary);

    if app.staff_summary.is_empty() {
        let empty = Paragraph::new(labels.no_data)
            .alignment(text_alignment(app))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let totals = app.service.day_totals(&app.date);
    let mut rows: Vec<Row> = app
        .staff_summary
        .iter()
        .map(|s| {
            Row::new(vec![
                s.name.clone(),
                s.total_quantity.to_string(),
                s.total_sales.to_string(),
                s.total_pay.to_string(),
            ])
        })
        .collect();
    rows.push(
        Row::new(vec![
            labels.total.to_string(),
            totals.total_quantity.to_string(),
            totals.total_sales.to_string(),
            totals.total_pay.to_string(),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    );

    let width = name_width(app.staff_summary.iter().map(|s| s.name.width()), labels.staff);
    let table = Table::new(
        rows,
        [
            Constraint::Length(width),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec![labels.staff, labels.quantity, labels.total_sales, labels.total_pay])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(block);

    f.render_widget(table, area);
}

fn draw_service_summary(f: &mut Frame, app: &App, area: Rect) {
    let labels = app.labels();
    let block = panel(labels.service_summary);

    if app.service_summary.is_empty() {
        let empty = Paragraph::new(labels.no_data)
            .alignment(text_alignment(app))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut rows = Vec::new();
    for summary in &app.service_summary {
        for (i, line) in summary.lines.iter().enumerate() {
            let name = if i == 0 { summary.name.clone() } else { String::new() };
            rows.push(Row::new(vec![name, labels.service_key(&line.key), line.quantity.to_string()]));
        }
    }

    let width = name_width(app.service_summary.iter().map(|s| s.name.width()), labels.staff);
    let table = Table::new(
        rows,
        [
            Constraint::Length(width),
            Constraint::Min(20),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec![labels.staff, labels.service, labels.quantity])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(block);

    f.render_widget(table, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let labels = app.labels();
    let (title, text, style) = match &app.input_mode {
        InputMode::AddingSale => (
            format!("{} ({} {} q:1 size:small)", labels.add, labels.staff, labels.service),
            app.input.clone(),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::AddingStaff => (
            labels.add_staff.to_string(),
            app.input.clone(),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::ConfirmRemove(_) | InputMode::ConfirmClear => (
            String::new(),
            app.status.clone().unwrap_or_default(),
            Style::default().fg(Color::Red),
        ),
        InputMode::Normal => (
            String::new(),
            app.status.clone().unwrap_or_default(),
            Style::default(),
        ),
    };

    let input = Paragraph::new(text).style(style).block(panel(&title));
    f.render_widget(input, area);

    if matches!(app.input_mode, InputMode::AddingSale | InputMode::AddingStaff) {
        let typed: String = app.input.chars().take(app.cursor_position).collect();
        let offset = u16::try_from(typed.width()).unwrap_or(u16::MAX);
        f.set_cursor_position(Position::new(area.x.saturating_add(1).saturating_add(offset), area.y + 1));
    }
}
