use crate::registration::Field;
use crate::tui::app::{App, Mode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(Field::ALL.len() as u16 + 2), // Form
            Constraint::Min(5),                              // Search results
            Constraint::Length(1),                           // Status bar
        ])
        .split(f.area());

    draw_form(f, app, chunks[0]);
    draw_results_list(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);

    if let Some(ref warning) = app.warning {
        draw_warning(f, warning);
    }
    if app.mode == Mode::Help {
        draw_help(f);
    }
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    const LABEL_WIDTH: usize = 24;
    let form = &app.registration.form;

    let lines: Vec<Line> = Field::ALL
        .iter()
        .map(|&field| {
            let focused = field == app.focus && app.mode != Mode::Results;
            let label = if field.is_required() {
                format!("{} *", field.label())
            } else {
                field.label().to_string()
            };

            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };

            let value = form.get(field);
            let value_span = if value.is_empty() {
                let hint = match field {
                    Field::UdiseCode => "Enter UDISE code or search school name",
                    Field::School | Field::District => "Auto-filled from UDISE",
                    Field::Dob => "YYYY-MM-DD",
                    Field::Grade => "< select >",
                    _ => "",
                };
                Span::styled(hint, Style::default().fg(Color::DarkGray))
            } else if field.choices().is_some() {
                Span::styled(format!("< {} >", value), Style::default().fg(Color::White))
            } else if !form.is_editable(field) {
                Span::styled(value, Style::default().fg(Color::Green))
            } else {
                Span::styled(value, Style::default().fg(Color::White))
            };

            Line::from(vec![
                Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
                value_span,
            ])
        })
        .collect();

    let form_widget = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Student Registration (Ctrl+S: submit, F1: help, Esc: quit) "),
    );

    f.render_widget(form_widget, area);

    // Show cursor at the end of the focused text field
    if app.mode == Mode::Form
        && app.focus.choices().is_none()
        && let Some(row) = Field::ALL.iter().position(|&fld| fld == app.focus)
    {
        let col = LABEL_WIDTH + form.get(app.focus).chars().count();
        f.set_cursor_position((area.x + 1 + col as u16, area.y + 1 + row as u16));
    }
}

fn draw_results_list(f: &mut Frame, app: &App, area: Rect) {
    let results = app.results();

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(i, school)| {
            let style = if app.mode == Mode::Results && i == app.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            // Format: name  district, block - code
            let line = Line::from(vec![
                Span::styled(school.school_name.clone(), Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    format!("{}, {}", school.district, school.block),
                    Style::default().fg(Color::Blue),
                ),
                Span::raw(" - "),
                Span::styled(school.udise_code.clone(), Style::default().fg(Color::Yellow)),
            ]);

            ListItem::new(line).style(style)
        })
        .collect();

    let title = if app.is_loading() {
        " Schools (loading...) ".to_string()
    } else if app.load_failed() {
        " Schools (database unavailable, enter UDISE code manually) ".to_string()
    } else {
        format!(
            " Schools ({} of {}) - Down: choose, Enter: select ",
            results.len(),
            app.directory_len()
        )
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(list, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status_message.as_str())
        .style(Style::default().fg(Color::Cyan));

    f.render_widget(status, area);
}

fn draw_warning(f: &mut Frame, warning: &str) {
    let area = centered_rect(60, 5, f.area());

    let paragraph = Paragraph::new(warning)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Warning (any key to continue) "),
        );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn draw_help(f: &mut Frame) {
    let bindings = [
        ("Tab / Enter", "Next field"),
        ("Shift+Tab / Up", "Previous field"),
        ("Left / Right", "Change grade, state or medium"),
        ("Down", "Choose from school search results"),
        ("Enter (in results)", "Select school"),
        ("Ctrl+W", "Delete word"),
        ("Ctrl+S", "Submit registration"),
        ("Esc", "Leave results / quit"),
        ("Ctrl+C / Ctrl+Q", "Quit"),
    ];

    let lines: Vec<Line> = bindings
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<20}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let area = centered_rect(60, lines.len() as u16 + 2, f.area());
    let help = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

/// Rectangle of the given size centered in `area`, clamped to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
