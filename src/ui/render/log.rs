use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let title = if state.is_debug_mode() {
        " Log (DEBUG MODE: j/k: navigate, y: copy, Esc: exit) "
    } else {
        " Log (Ctrl-D: debug mode) "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styling::block_border_style(theme, state.is_debug_mode()));

    let entries = state.get_debug_entries();
    let items: Vec<ListItem> = entries
        .into_iter()
        .map(|entry| {
            ListItem::new(Line::from(Span::styled(
                entry,
                styling::normal_text_style(theme),
            )))
        })
        .collect();
    let count = items.len();
    let highlight = if state.is_debug_mode() {
        styling::active_list_item_style(theme)
    } else {
        styling::normal_text_style(theme)
    };
    let list = List::new(items).block(block).highlight_style(highlight);

    // Follow the newest entry unless one is being inspected
    let mut list_state = ListState::default();
    if state.is_debug_mode() {
        list_state.select(Some(state.get_debug_index()));
    } else if count > 0 {
        list_state.select(Some(count - 1));
    }
    frame.render_stateful_widget(list, size, &mut list_state);
}
