use super::{footer, home, log, modal, Frame};
use crate::state::{ScreenId, State};
use ratatui::layout::{Constraint, Direction, Layout};

/// Render the current screen with the log panel and footer, then any modal
/// on top.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(10),
                Constraint::Length(8),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(size);

    match state.current_route().screen {
        ScreenId::Home => home(frame, rows[0], state),
        // Not registered with the router, so never current
        ScreenId::EditTask => (),
    }
    log(frame, rows[1], state);
    footer(frame, rows[2], state);
    modal(frame, size, state);
}
