use super::Frame;
use crate::state::{FormFocus, State};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints for the current mode.
///
pub fn hints(state: &State) -> &'static str {
    if state.get_alert().is_some() {
        " Enter/Esc: dismiss"
    } else if state.is_date_picker_open() {
        " h/l: day, j/k: week, PgUp/PgDn: month, Enter: select, Esc: dismiss"
    } else if state
        .get_image_request()
        .map_or(false, |request| request.is_browsing())
    {
        " j/k: navigate, Enter: choose, Esc: dismiss"
    } else if state.is_debug_mode() {
        " j/k: navigate logs, y: copy log, Esc: exit debug mode"
    } else {
        match state.current_focus() {
            FormFocus::Title | FormFocus::Description => {
                " Type to edit, Tab/Shift-Tab: next/previous field, Ctrl-D: debug, Ctrl-C: quit"
            }
            FormFocus::Date => " Enter: select date, Tab: next field, Ctrl-C: quit",
            FormFocus::Image => " Enter: add image, Tab: next field, Ctrl-C: quit",
            FormFocus::Submit => " Enter: add task, Tab: next field, Ctrl-C: quit",
            FormFocus::Tasks => {
                " j/k: navigate, Enter: edit, c: complete, x: cancel, Tab: form, q: quit"
            }
        }
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let (label, label_bg) = if state.get_alert().is_some() {
        ("ALERT:", theme.footer_alert)
    } else if state.is_debug_mode() {
        ("DEBUG:", theme.footer_debug)
    } else {
        ("NORMAL:", theme.footer_normal)
    };

    let controls = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(theme.text.to_color())
                .bg(label_bg.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hints(state), Style::default().fg(theme.warning.to_color())),
    ]);

    let right = match state.get_status_message() {
        Some(message) => Span::styled(
            message.to_string(),
            Style::default()
                .fg(theme.error.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.text_muted.to_color()),
        ),
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right.width() as u16 + 1)].as_ref())
        .split(size);
    frame.render_widget(
        Paragraph::new(controls).alignment(Alignment::Left),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(right)).alignment(Alignment::Right),
        columns[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::PermissionStatus;

    #[test]
    fn hints_follow_mode() {
        let mut state = State::default();
        assert!(hints(&state).contains("Type to edit"));
        state.next_focus().next_focus();
        assert!(hints(&state).contains("select date"));
        state.select_date();
        assert!(hints(&state).contains("PgUp"));
        state.dismiss_date_picker();
        state.set_media_permission(PermissionStatus::Denied);
        assert!(hints(&state).contains("dismiss"));
    }
}
