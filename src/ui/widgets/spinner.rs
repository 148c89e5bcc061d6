use crate::state::State;
use ratatui::{text::Span, style::Style};

/// Braille frames cycled on every tick while a request is in flight.
///
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return the spinner frame for the current state.
///
pub fn span(state: &State, style: Style) -> Span<'static> {
    let index = state.get_spinner_index() % FRAMES.len();
    Span::styled(FRAMES[index], style)
}
