use crate::state::{FormFocus, State};
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};
use tui_textarea::CursorMove;

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => (),
                    Err(e) => error!("Failed to read terminal event: {}", e),
                },
                Ok(false) => (),
                Err(e) => error!("Failed to poll terminal events: {}", e),
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(state, key)),
            Event::Tick => {
                if state.is_image_request_in_flight() {
                    state.advance_spinner_index();
                }
                Ok(true)
            }
        }
    }
}

/// Apply a key press to the state. Overlays take the key first, then debug
/// mode, then the focused form control. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    if is_control(&key, 'c') {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    if state.get_alert().is_some() {
        alert_key(state, key);
    } else if state.is_date_picker_open() {
        date_picker_key(state, key);
    } else if state
        .get_image_request()
        .map_or(false, |request| request.is_browsing())
    {
        gallery_key(state, key);
    } else if state.is_debug_mode() {
        debug_key(state, key);
    } else {
        return form_key(state, key);
    }
    true
}

fn alert_key(state: &mut State, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        state.dismiss_alert();
    }
}

fn date_picker_key(state: &mut State, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            state.confirm_date_picker();
        }
        KeyCode::Esc => {
            state.dismiss_date_picker();
        }
        code => {
            if let Some(picker) = state.get_date_picker_mut() {
                match code {
                    KeyCode::Left | KeyCode::Char('h') => picker.previous_day(),
                    KeyCode::Right | KeyCode::Char('l') => picker.next_day(),
                    KeyCode::Up | KeyCode::Char('k') => picker.previous_week(),
                    KeyCode::Down | KeyCode::Char('j') => picker.next_week(),
                    KeyCode::PageUp => picker.previous_month(),
                    KeyCode::PageDown => picker.next_month(),
                    _ => picker,
                };
            }
        }
    }
}

fn gallery_key(state: &mut State, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.next_gallery_entry();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.previous_gallery_entry();
        }
        KeyCode::Enter => {
            state.choose_gallery_entry();
        }
        KeyCode::Esc => {
            state.dismiss_gallery();
        }
        _ => (),
    }
}

fn debug_key(state: &mut State, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.next_debug_entry();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.previous_debug_entry();
        }
        KeyCode::Char('y') => {
            if let Some(entry) = state.get_selected_debug_entry() {
                copy_to_clipboard(entry);
            }
        }
        KeyCode::Esc => {
            state.exit_debug_mode();
        }
        _ => (),
    }
}

fn copy_to_clipboard(entry: String) {
    match ClipboardContext::new() {
        Ok(mut ctx) => match ctx.set_contents(entry) {
            Ok(_) => info!("Debug log entry copied to clipboard"),
            Err(e) => warn!("Failed to copy to clipboard: {}", e),
        },
        Err(e) => warn!("Failed to initialize clipboard: {}", e),
    }
}

fn is_control(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn form_key(state: &mut State, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Tab => {
            state.next_focus();
        }
        KeyCode::BackTab => {
            state.previous_focus();
        }
        KeyCode::Char('d') if is_control(&key, 'd') => {
            state.enter_debug_mode();
        }
        KeyCode::Esc => {
            state.clear_status_message().back();
        }
        _ => return focused_key(state, key),
    }
    true
}

fn focused_key(state: &mut State, key: KeyEvent) -> bool {
    let typing = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match (state.current_focus(), key.code) {
        (focus, KeyCode::Char(c)) if focus.is_text_input() && typing => {
            state.add_form_char(c);
        }
        (focus, KeyCode::Backspace) if focus.is_text_input() => {
            state.remove_form_char();
        }
        (FormFocus::Title, KeyCode::Enter) => {
            state.next_focus();
        }
        (FormFocus::Description, KeyCode::Enter) => {
            state.add_form_newline();
        }
        (FormFocus::Description, KeyCode::Left) => {
            state.move_form_cursor(CursorMove::Back);
        }
        (FormFocus::Description, KeyCode::Right) => {
            state.move_form_cursor(CursorMove::Forward);
        }
        (FormFocus::Description, KeyCode::Up) => {
            state.move_form_cursor(CursorMove::Up);
        }
        (FormFocus::Description, KeyCode::Down) => {
            state.move_form_cursor(CursorMove::Down);
        }
        (FormFocus::Date, KeyCode::Enter | KeyCode::Char(' ')) => {
            state.select_date();
        }
        (FormFocus::Image, KeyCode::Enter | KeyCode::Char(' ')) => {
            state.select_image();
        }
        (FormFocus::Submit, KeyCode::Enter | KeyCode::Char(' ')) => {
            state.add_task();
        }
        (FormFocus::Tasks, KeyCode::Down | KeyCode::Char('j')) => {
            state.next_task_index();
        }
        (FormFocus::Tasks, KeyCode::Up | KeyCode::Char('k')) => {
            state.previous_task_index();
        }
        (FormFocus::Tasks, KeyCode::Enter) => {
            state.open_selected_task();
        }
        (FormFocus::Tasks, KeyCode::Char('c')) => {
            state.complete_selected_task();
        }
        (FormFocus::Tasks, KeyCode::Char('x') | KeyCode::Delete) => {
            state.cancel_selected_task();
        }
        (FormFocus::Tasks, KeyCode::Char('q')) => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        _ => (),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{GalleryEntry, PermissionStatus};
    use crate::state::{ScreenId, PERMISSION_ALERT};
    use fake::{faker::lorem::en::Sentence, Fake};
    use std::path::PathBuf;

    fn press(state: &mut State, code: KeyCode) -> bool {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(state: &mut State, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn focus(state: &mut State, target: FormFocus) {
        while state.current_focus() != target {
            press(state, KeyCode::Tab);
        }
    }

    #[test]
    fn ctrl_c_exits() {
        let mut state = State::default();
        assert!(!handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn typing_then_submit_adds_task() {
        let mut state = State::default();
        let title: String = Sentence(1..4).fake();
        type_text(&mut state, &title);
        press(&mut state, KeyCode::Tab);
        type_text(&mut state, "line one");
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "line two");
        focus(&mut state, FormFocus::Submit);
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.tasks()[0].title, title);
        assert_eq!(state.tasks()[0].description, "line one\nline two");
        assert_eq!(state.form().title(), "");
    }

    #[test]
    fn submit_with_blank_title_does_nothing() {
        let mut state = State::default();
        type_text(&mut state, "  ");
        focus(&mut state, FormFocus::Submit);
        press(&mut state, KeyCode::Enter);
        assert!(state.tasks().is_empty());
        assert_eq!(state.form().title(), "  ");
    }

    #[test]
    fn backspace_edits_title() {
        let mut state = State::default();
        type_text(&mut state, "Milk!");
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.form().title(), "Milk");
    }

    #[test]
    fn arrows_move_description_cursor() {
        let mut state = State::default();
        press(&mut state, KeyCode::Tab);
        type_text(&mut state, "ac");
        press(&mut state, KeyCode::Left);
        type_text(&mut state, "b");
        assert_eq!(state.form().description(), "abc");
        assert_eq!(state.form().description_cursor(), (0, 2));

        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "d");
        press(&mut state, KeyCode::Up);
        assert_eq!(state.form().description_cursor().0, 0);
        press(&mut state, KeyCode::Down);
        assert_eq!(state.form().description_cursor().0, 1);
        assert_eq!(state.current_focus(), FormFocus::Description);
    }

    #[test]
    fn task_row_keys() {
        let mut state = State::default();
        for title in ["one", "two"] {
            focus(&mut state, FormFocus::Title);
            type_text(&mut state, title);
            focus(&mut state, FormFocus::Submit);
            press(&mut state, KeyCode::Enter);
        }
        focus(&mut state, FormFocus::Tasks);
        press(&mut state, KeyCode::Char('k'));
        press(&mut state, KeyCode::Char('c'));
        assert!(state.tasks()[0].completed);
        assert!(!state.tasks()[1].completed);

        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Char('x'));
        let ids: Vec<u64> = state.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);

        assert!(!press(&mut state, KeyCode::Char('q')));
    }

    #[test]
    fn enter_on_task_reports_missing_edit_screen() {
        let mut state = State::default();
        type_text(&mut state, "one");
        focus(&mut state, FormFocus::Submit);
        press(&mut state, KeyCode::Enter);
        focus(&mut state, FormFocus::Tasks);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.current_route().screen, ScreenId::Home);
        assert!(state.get_status_message().is_some());
        press(&mut state, KeyCode::Esc);
        assert!(state.get_status_message().is_none());
    }

    #[test]
    fn date_picker_keys() {
        let mut state = State::default();
        let start = state.form().date();
        focus(&mut state, FormFocus::Date);
        press(&mut state, KeyCode::Enter);
        assert!(state.is_date_picker_open());
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.form().date(), start);

        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Enter);
        assert!(!state.is_date_picker_open());
        assert_eq!(start.succ_opt(), Some(state.form().date()));
    }

    #[test]
    fn gallery_keys() {
        let mut state = State::default();
        focus(&mut state, FormFocus::Image);
        press(&mut state, KeyCode::Enter);
        assert!(state.is_image_request_in_flight());
        let entries = vec![GalleryEntry {
            path: PathBuf::from("/gallery/a.png"),
            name: "a.png".to_string(),
        }];
        state.open_gallery(1, entries);
        press(&mut state, KeyCode::Esc);
        assert!(!state.is_image_request_in_flight());
        assert_eq!(state.form().image(), None);
    }

    #[test]
    fn alert_swallows_keys_until_dismissed() {
        let mut state = State::default();
        state.set_media_permission(PermissionStatus::Denied);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.current_focus(), FormFocus::Title);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.get_alert(), None);

        focus(&mut state, FormFocus::Image);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.get_alert(), Some(PERMISSION_ALERT));
    }

    #[test]
    fn debug_mode_toggles() {
        let mut state = State::default();
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
        );
        assert!(state.is_debug_mode());
        press(&mut state, KeyCode::Char('a'));
        assert_eq!(state.form().title(), "");
        press(&mut state, KeyCode::Esc);
        assert!(!state.is_debug_mode());
    }
}
