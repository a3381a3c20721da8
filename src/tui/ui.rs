use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, DisplayItem, InputMode};
use crate::badge::{badge_for, Badge};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let now = Local::now().naive_local();

    let rows: Vec<Row> = app
        .display_items
        .iter()
        .map(|item| match item {
            DisplayItem::Task(t) => {
                let marker = if app.selection_mode {
                    if app.selected_ids.contains(&t.id) {
                        "[✓] "
                    } else {
                        "[ ] "
                    }
                } else {
                    ""
                };
                let badge = badge_for(t, now);
                let badge_text = badge.map(|b| b.label()).unwrap_or("");
                let badge_color = match badge {
                    Some(Badge::Completed) => Color::Green,
                    Some(Badge::Overdue) => Color::Red,
                    Some(Badge::DueSoon) => Color::Yellow,
                    None => Color::Reset,
                };
                let title_style = if t.completed {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(format!("{}{}", marker, t.title)).style(title_style),
                    Cell::from(t.category.clone()),
                    Cell::from(t.priority.as_str()),
                    Cell::from(t.due_date.clone()),
                    Cell::from(badge_text).style(Style::default().fg(badge_color)),
                ])
            }
            DisplayItem::Line(text) => Row::new(vec![
                Cell::from(text.clone()).style(Style::default().fg(Color::Gray)),
                Cell::from(""),
                Cell::from(""),
                Cell::from(""),
                Cell::from(""),
            ]),
        })
        .collect();

    let widths = [
        Constraint::Min(24),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(18),
        Constraint::Length(10),
    ];

    let title = if app.selection_mode {
        format!("Taskpad - {} selected", app.selected_ids.len())
    } else {
        "Taskpad - Tasks".to_string()
    };

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Title", "Category", "Priority", "Due", "Badge"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let help_text = match app.input_mode {
        InputMode::Normal => {
            if app.selection_mode {
                "Space: Select | d: Delete Selected | Esc: Cancel | j/k: Move | q: Quit"
            } else {
                "q: Quit | a: Add | Space: Toggle Done | e/Enter: Details | s: Select | d: Delete | c: Show/Hide Completed"
            }
        }
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
        InputMode::Confirming => "y: Delete | n/Esc: Cancel",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[1]);

    match app.input_mode {
        InputMode::Adding => {
            let area = centered_rect(60, 3, f.area());
            f.render_widget(Clear, area);

            let title = match app.add_state.step {
                0 => "Add Task: Enter Title",
                1 => "Add Task: Enter Description (Optional)",
                2 => "Add Task: Enter Due Date (YYYY-MM-DD, Optional)",
                3 => "Add Task: Enter Priority (low/medium/high)",
                4 => "Add Task: Enter Category (Optional)",
                5 => "Add Task: Enter Type (single/series)",
                _ => "Add Subtask (empty to finish)",
            };

            let input = Paragraph::new(app.input_buffer.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(title));

            f.render_widget(input, area);
        }
        InputMode::Confirming => {
            let area = centered_rect(50, 3, f.area());
            f.render_widget(Clear, area);

            let message = format!(
                "Delete {} task(s)? This action cannot be undone.",
                app.pending_delete.len()
            );
            let modal = Paragraph::new(message)
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL).title("Confirm Delete"));

            f.render_widget(modal, area);
        }
        InputMode::Normal => {}
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
