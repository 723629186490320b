use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table},
    Frame,
};
use timetally_core::{format_hms, Summary};

use crate::tui::app::{App, InputMode, Panel};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Timer
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer/Help or input
        ])
        .split(size);

    draw_timer(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    draw_project_list(f, app, content_chunks[0]);
    draw_panel(f, app, content_chunks[1]);

    let status = Paragraph::new(app.status.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(status, main_chunks[2]);

    match app.input_mode {
        InputMode::Normal => {
            let footer = Paragraph::new(
                "1-9: Hotkey | Enter: Start | s: Stop | r/M: Day/Month report | t: Today | a: Add | d: Remove | q: Quit",
            )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
            f.render_widget(footer, main_chunks[3]);
        }
        InputMode::Adding => {
            let prompt = "New project (name [digit]): ";
            let input = Paragraph::new(Line::from(vec![
                Span::styled(prompt, Style::default().fg(Color::Cyan)),
                Span::raw(app.input.as_str()),
            ]));
            f.render_widget(input, main_chunks[3]);
            f.set_cursor_position(Position::new(
                main_chunks[3].x + (prompt.len() + app.cursor_position) as u16,
                main_chunks[3].y,
            ));
        }
    }
}

fn draw_timer(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.tracker.current_project() {
        Some(project) => Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Red)),
            Span::styled(project.label(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format_hms(app.tracker.elapsed()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled("Idle  00:00:00", Style::default().fg(Color::DarkGray))),
    };

    let timer = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" TIMETALLY ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(timer, area);
}

fn draw_project_list(f: &mut Frame, app: &mut App, area: Rect) {
    let totals = app.tracker.today_totals();
    let running = app.tracker.state().project_id();

    let rows: Vec<Row> = app
        .tracker
        .projects()
        .iter()
        .map(|p| {
            let key = p.hotkey.map(|k| k.to_string()).unwrap_or_else(|| "-".to_string());
            let today = format_hms(totals.get(&p.name).unwrap_or(0));
            let name_style = if running == Some(p.id) {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Span::styled(key, Style::default().fg(Color::Yellow)),
                Span::styled(p.name.clone(), name_style),
                Span::raw(today),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Key
            Constraint::Min(10),    // Name
            Constraint::Length(10), // Today
        ],
    )
    .header(Row::new(vec!["Key", "Project", "Today"]).style(Style::default().fg(Color::Yellow)))
    .block(
        Block::default()
            .title(" Projects ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_panel(f: &mut Frame, app: &App, area: Rect) {
    match &app.panel {
        Panel::Today => {
            let title = format!(" Today {} ", app.tracker.today());
            draw_summary(f, &title, &app.tracker.today_totals(), area);
        }
        Panel::Report { title, summary } => draw_summary(f, title, summary, area),
    }
}

fn draw_summary(f: &mut Frame, title: &str, summary: &Summary, area: Rect) {
    let mut lines: Vec<Line> = summary
        .iter()
        .map(|(name, secs)| {
            Line::from(vec![
                Span::styled(format!("{}: ", name), Style::default().fg(Color::Blue)),
                Span::raw(format_hms(secs)),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("No time recorded", Style::default().fg(Color::DarkGray))));
    } else {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Total: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format_hms(summary.total())),
        ]));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(panel, area);
}
