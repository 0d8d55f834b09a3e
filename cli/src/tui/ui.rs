use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use tasklist_core::{format_brl, EditMode, FormField};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

const LABEL_WIDTH: u16 = 11;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("TASK LIST")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(content_chunks[1]);

    draw_task_list(f, app, content_chunks[0]);
    draw_form(f, app, side_chunks[0]);
    draw_detail_view(f, app, side_chunks[1]);
    draw_status(f, app, main_chunks[2]);

    let footer = Paragraph::new(help_text(app))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn help_text(app: &App) -> &'static str {
    match app.input_mode {
        InputMode::Normal => "j/k: Navigate | a: New | e: Edit | d: Delete | J/K: Move | r: Reload | q: Quit",
        InputMode::Form => "Tab: Next field | Enter: Submit | Esc: Back to list",
        InputMode::ConfirmDelete => "y: Delete | n: Keep",
    }
}

fn draw_task_list(f: &mut Frame, app: &mut App, area: Rect) {
    let editing = app.view.editing_id().cloned();

    let rows: Vec<Row> = app
        .view
        .tasks()
        .iter()
        .map(|task| {
            let marker = if editing.as_ref() == Some(&task.id) { "✎" } else { "" };
            let row = Row::new(vec![
                Cell::from(marker),
                Cell::from(Span::styled(task.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
                Cell::from(Line::from(format_brl(task.cost)).alignment(Alignment::Right)),
                Cell::from(task.due_date.format("%Y-%m-%d").to_string()),
            ]);
            if task.is_highlighted() {
                row.style(Style::default().bg(Color::Yellow).fg(Color::Black))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),  // Edit marker
            Constraint::Min(10),    // Name
            Constraint::Length(18), // Cost
            Constraint::Length(10), // Due
        ],
    )
    .header(Row::new(vec!["", "Task", "Cost", "Due"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let in_form = app.input_mode == InputMode::Form;
    let form = app.view.form();

    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| {
            let focused = in_form && app.focus == field;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Blue)
            };
            Line::from(vec![
                Span::styled(format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH as usize), label_style),
                Span::raw(form.value(field).to_string()),
            ])
        })
        .collect();

    let title = match app.view.mode() {
        EditMode::Creating => format!(" New task [{}] ", app.submit_label()),
        EditMode::Editing(id) => format!(" Editing task {} [{}] ", id, app.submit_label()),
    };
    let border_style = if in_form {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    f.render_widget(Paragraph::new(lines).block(block), area);

    if in_form {
        let row = FormField::ALL.iter().position(|&field| field == app.focus).unwrap_or(0) as u16;
        let text_width = form.value(app.focus).width() as u16;
        let x = (area.x + 1 + LABEL_WIDTH + text_width).min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 1 + row));
    }
}

fn draw_detail_view(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded);

    let Some(task) = app.selected_task() else {
        f.render_widget(block, area);
        return;
    };

    let mut detail_text = vec![
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(Color::Blue)),
            Span::styled(&task.name, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(task.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Cost: ", Style::default().fg(Color::Blue)),
            Span::raw(format_brl(task.cost)),
        ]),
        Line::from(vec![
            Span::styled("Due date: ", Style::default().fg(Color::Blue)),
            Span::raw(task.due_date.format("%Y-%m-%d").to_string()),
        ]),
    ];

    if task.is_highlighted() {
        detail_text.push(Line::from(""));
        detail_text.push(Line::from(Span::styled(
            "High cost",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    let detail = Paragraph::new(detail_text).block(block).wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = if app.input_mode == InputMode::ConfirmDelete {
        let name = app
            .view
            .pending_delete()
            .and_then(|id| app.view.task(id))
            .map(|t| t.name.as_str())
            .unwrap_or("this task");
        Line::from(Span::styled(
            format!("Do you really want to delete '{}'? (y/n)", name),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(error) = app.view.last_error() {
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red)))
    } else if app.is_busy() {
        Line::from(Span::styled("Working...", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(format!("{} tasks", app.view.tasks().len()))
    };

    f.render_widget(Paragraph::new(line), area);
}
