//! Modal overlays drawn on top of the home screen.

use super::Frame;
use crate::device::DatePickerMode;
use crate::state::{DatePicker, ImageRequestPhase, State};
use crate::ui::widgets::styling;
use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

const WEEKDAY_HEADER: &str = "Mo Tu We Th Fr Sa Su";

/// Render whichever overlay is currently open. The alert always wins.
///
pub fn modal(frame: &mut Frame, size: Rect, state: &State) {
    if let Some(message) = state.get_alert() {
        alert(frame, size, message, state);
    } else if let Some(picker) = state.get_date_picker() {
        date_picker(frame, size, picker, state);
    } else if let Some(request) = state.get_image_request() {
        if let ImageRequestPhase::Browsing { entries, selected } = request.phase() {
            let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
            gallery(frame, size, &names, *selected, state);
        }
    }
}

fn modal_block<'a>(title: &'a str, state: &State) -> Block<'a> {
    let theme = state.get_theme();
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(theme))
}

fn alert(frame: &mut Frame, size: Rect, message: &str, state: &State) {
    let theme = state.get_theme();
    let popup_area = centered_rect(50, 25, size);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default()
                .fg(theme.warning.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: OK",
            styling::muted_text_style(theme),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            modal_block(" Alert ", state)
                .border_style(Style::default().fg(theme.error.to_color())),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Build the month grid around the picker date, one line per week.
///
pub fn calendar_lines(date: NaiveDate, state: &State) -> Vec<Line<'static>> {
    let theme = state.get_theme();
    let mut lines = vec![Line::from(Span::styled(
        WEEKDAY_HEADER,
        styling::muted_text_style(theme),
    ))];
    let first = match date.with_day(1) {
        Some(first) => first,
        None => return lines,
    };
    let offset = first.weekday().num_days_from_monday() as usize;
    let mut week: Vec<Span> = vec![Span::raw("   "); offset];
    for day in first.iter_days().take_while(|day| day.month() == date.month()) {
        let style = if day == date {
            styling::current_list_item_style(theme)
        } else {
            styling::normal_text_style(theme)
        };
        week.push(Span::styled(format!("{:>2}", day.day()), style));
        week.push(Span::raw(" "));
        if day.weekday().num_days_from_monday() == 6 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }
    lines
}

fn date_picker(frame: &mut Frame, size: Rect, picker: &DatePicker, state: &State) {
    let popup_area = centered_rect(40, 50, size);
    frame.render_widget(Clear, popup_area);

    let title = match picker.options().mode {
        DatePickerMode::Date => " Select date ",
    };
    let mut text = vec![Line::from(Span::styled(
        picker.date().format("%B %Y").to_string(),
        styling::banner_style(state.get_theme()),
    ))];
    text.extend(calendar_lines(picker.date(), state));
    let paragraph = Paragraph::new(text)
        .block(modal_block(title, state))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, popup_area);
}

fn gallery(frame: &mut Frame, size: Rect, names: &[&str], selected: usize, state: &State) {
    let theme = state.get_theme();
    let popup_area = centered_rect(60, 60, size);
    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = names
        .iter()
        .map(|name| ListItem::new(Line::from(Span::styled(*name, styling::normal_text_style(theme)))))
        .collect();
    let list = List::new(items)
        .block(modal_block(" Choose image ", state))
        .highlight_style(styling::active_list_item_style(theme))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
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
