use crate::app::{App, InputMode, View};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

pub fn draw(f: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0]);

    match app.view {
        View::List => draw_list(f, app, chunks[1]),
        View::Detail => draw_detail(f, app, chunks[1]),
        View::Help => draw_help(f, chunks[1]),
    }

    draw_status_bar(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(format!(
        " Mediawall Gallery  v{}",
        env!("CARGO_PKG_VERSION")
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(title, area);
}

fn draw_list(f: &mut Frame<'_>, app: &App, area: Rect) {
    if app.entries.is_empty() {
        let msg = Paragraph::new("  No media entries. Press 'r' to fetch, 'q' to quit.")
            .block(Block::default().borders(Borders::ALL).title(" Media "));
        f.render_widget(msg, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("NAME").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("RESOLUTION").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("SIZE").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("URL").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .height(1);

    let rows: Vec<Row<'_>> = app
        .filtered
        .iter()
        .enumerate()
        .map(|(vi, &ei)| {
            let entry = &app.entries[ei];
            let style = if vi == app.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(entry.name.clone()),
                Cell::from(entry.resolution.as_deref().unwrap_or("-").to_owned()),
                Cell::from(entry.human_size()),
                Cell::from(entry.url.clone()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(format!(
        " Media ({}/{}) ",
        app.visible_count(),
        app.entries.len()
    )));

    f.render_widget(table, area);
}

fn draw_detail(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(entry) = app.selected_entry() else {
        let msg = Paragraph::new("  No entry selected.")
            .block(Block::default().borders(Borders::ALL).title(" Detail "));
        f.render_widget(msg, area);
        return;
    };

    let text = vec![
        Line::from(vec![
            Span::styled("name:       ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(entry.name.clone()),
        ]),
        Line::from(vec![
            Span::styled("filename:   ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(entry.filename.clone()),
        ]),
        Line::from(vec![
            Span::styled("resolution: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(entry.resolution.as_deref().unwrap_or("(unknown)").to_owned()),
        ]),
        Line::from(vec![
            Span::styled("size:       ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(entry.human_size()),
        ]),
        Line::from(vec![
            Span::styled("url:        ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(entry.url.clone()),
        ]),
        Line::from(vec![
            Span::styled("thumburl:   ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(entry.thumburl.clone()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  [Esc] back  [c] copy URL",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let detail = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", entry.filename)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(detail, area);
}

fn draw_help(f: &mut Frame<'_>, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Keybindings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  j / ↓       Move down"),
        Line::from("  k / ↑       Move up"),
        Line::from("  g / Home    Go to top"),
        Line::from("  G / End     Go to bottom"),
        Line::from("  Enter       View details"),
        Line::from("  c           Copy original URL to clipboard"),
        Line::from("  /           Search / filter"),
        Line::from("  s           Cycle sort column"),
        Line::from("  S           Toggle sort direction"),
        Line::from("  r           Re-fetch manifest"),
        Line::from("  ?           Show this help"),
        Line::from("  q / Esc     Quit / Back"),
    ];

    let help = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });

    f.render_widget(help, area);
}

fn draw_status_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let status = if app.input_mode != InputMode::Normal {
        Paragraph::new(format!(" {} ", app.status_message)).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Paragraph::new(format!(
            " {} │ [j/k] nav  [Enter] detail  [c] copy  [/] search  [r] refresh  [?] help  [q] quit",
            app.status_message
        ))
        .style(Style::default().fg(Color::DarkGray))
    };
    f.render_widget(status, area);
}
