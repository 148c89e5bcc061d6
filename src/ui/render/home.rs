use super::task_list::task_list;
use super::Frame;
use crate::device::PermissionStatus;
use crate::state::{FormFocus, State};
use crate::ui::widgets::{spinner, styling, thumbnail};
use crate::utils::date::format_date;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const CURSOR: &str = "▏";

/// Render the home screen: banner, draft form and task list.
///
pub fn home(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)].as_ref())
        .split(size);

    let banner = Paragraph::new(Span::styled(
        "Task List",
        styling::banner_style(state.get_theme()),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(banner, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(rows[1]);

    form(frame, columns[0], state);
    task_list(frame, columns[1], state);
}

fn field_block<'a>(state: &State, title: &'a str, focus: FormFocus) -> Block<'a> {
    let active = state.current_focus() == focus;
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, styling::active_block_title_style()))
        .border_style(styling::block_border_style(state.get_theme(), active))
}

fn form(frame: &mut Frame, size: Rect, state: &State) {
    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(size);

    let theme = state.get_theme();
    let focus = state.current_focus();
    let form = state.form();

    let mut title = vec![Span::styled(form.title(), styling::normal_text_style(theme))];
    if focus == FormFocus::Title {
        title.push(Span::raw(CURSOR));
    }
    frame.render_widget(
        Paragraph::new(Line::from(title)).block(field_block(state, " Title ", FormFocus::Title)),
        fields[0],
    );

    // tui-textarea 0.4 resolves its own ratatui release, so its widget does
    // not fit this frame. The text and cursor are drawn from its buffer.
    let (cursor_row, cursor_col) = form.description_cursor();
    let description: Vec<Line> = form
        .description_lines()
        .iter()
        .enumerate()
        .map(|(row, line)| {
            if focus != FormFocus::Description || row != cursor_row {
                return Line::from(Span::styled(line.as_str(), styling::normal_text_style(theme)));
            }
            let split = line
                .char_indices()
                .nth(cursor_col)
                .map_or(line.len(), |(index, _)| index);
            Line::from(vec![
                Span::styled(&line[..split], styling::normal_text_style(theme)),
                Span::raw(CURSOR),
                Span::styled(&line[split..], styling::normal_text_style(theme)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(description)
            .wrap(Wrap { trim: false })
            .block(field_block(state, " Description ", FormFocus::Description)),
        fields[1],
    );

    let date = Paragraph::new(Span::styled(
        format!("Select date: {}", format_date(form.date())),
        styling::normal_text_style(theme),
    ))
    .block(field_block(state, " Date ", FormFocus::Date));
    frame.render_widget(date, fields[2]);

    frame.render_widget(
        Paragraph::new(image_lines(state)).block(field_block(state, " Image ", FormFocus::Image)),
        fields[3],
    );

    let add = Paragraph::new(Span::styled(
        " Add task ",
        styling::button_style(theme, focus == FormFocus::Submit),
    ))
    .alignment(Alignment::Center)
    .block(field_block(state, "", FormFocus::Submit));
    frame.render_widget(add, fields[4]);
}

fn image_lines(state: &State) -> Vec<Line<'static>> {
    let theme = state.get_theme();
    if state.is_image_request_in_flight() {
        return vec![Line::from(vec![
            spinner::span(state, styling::active_block_border_style(theme)),
            Span::styled(" Selecting image...", styling::muted_text_style(theme)),
        ])];
    }
    match state.form().image() {
        Some(image) => {
            let mut lines = vec![Line::from(Span::styled(
                format!("Add image: {}", image.file_name()),
                styling::normal_text_style(theme),
            ))];
            if let Some(preview) = &image.thumbnail {
                lines.extend(thumbnail::lines(preview, ratatui::style::Color::Reset));
            }
            lines
        }
        None if state.media_permission() == PermissionStatus::Denied => {
            vec![Line::from(Span::styled(
                "Add image (gallery access denied)",
                styling::muted_text_style(theme),
            ))]
        }
        None => vec![Line::from(Span::styled(
            "Add image",
            styling::normal_text_style(theme),
        ))],
    }
}
