//! Draft form state.
//!
//! Holds the not-yet-committed task fields and the control that currently
//! has keyboard focus.

use super::task::NewTask;
use crate::device::ImageRef;
use chrono::NaiveDate;
use tui_textarea::{CursorMove, TextArea};

/// Specifying the focusable form controls, in tab order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormFocus {
    Title,
    Description,
    Date,
    Image,
    Submit,
    Tasks,
}

impl FormFocus {
    const ORDER: [FormFocus; 6] = [
        FormFocus::Title,
        FormFocus::Description,
        FormFocus::Date,
        FormFocus::Image,
        FormFocus::Submit,
        FormFocus::Tasks,
    ];

    fn position(self) -> usize {
        FormFocus::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        FormFocus::ORDER[(self.position() + 1) % FormFocus::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = FormFocus::ORDER.len();
        FormFocus::ORDER[(self.position() + len - 1) % len]
    }

    /// Whether the control accepts typed characters.
    ///
    pub fn is_text_input(self) -> bool {
        matches!(self, FormFocus::Title | FormFocus::Description)
    }
}

/// Draft fields for a prospective task.
///
pub struct FormState {
    title: String,
    description: TextArea<'static>,
    date: NaiveDate,
    image: Option<ImageRef>,
    focus: FormFocus,
}

impl FormState {
    /// Return an empty draft dated `today`.
    ///
    pub fn new(today: NaiveDate) -> Self {
        FormState {
            title: String::new(),
            description: TextArea::default(),
            date: today,
            image: None,
            focus: FormFocus::Title,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> String {
        self.description.lines().join("\n")
    }

    pub fn description_lines(&self) -> &[String] {
        self.description.lines()
    }

    /// Row and character column of the description cursor.
    ///
    pub fn description_cursor(&self) -> (usize, usize) {
        self.description.cursor()
    }

    /// Move the description cursor. Returns false when the description is
    /// not focused.
    ///
    pub fn move_cursor(&mut self, movement: CursorMove) -> bool {
        if self.focus == FormFocus::Description {
            self.description.move_cursor(movement);
            true
        } else {
            false
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn set_date(&mut self, date: NaiveDate) -> &mut Self {
        self.date = date;
        self
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: ImageRef) -> &mut Self {
        self.image = Some(image);
        self
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    #[allow(dead_code)]
    pub fn set_focus(&mut self, focus: FormFocus) -> &mut Self {
        self.focus = focus;
        self
    }

    pub fn focus_next(&mut self) -> &mut Self {
        self.focus = self.focus.next();
        self
    }

    pub fn focus_previous(&mut self) -> &mut Self {
        self.focus = self.focus.previous();
        self
    }

    /// Type a character into the focused text field. Returns false when the
    /// focused control is not a text field.
    ///
    pub fn push_char(&mut self, c: char) -> bool {
        match self.focus {
            FormFocus::Title => {
                self.title.push(c);
                true
            }
            FormFocus::Description => {
                self.description.insert_char(c);
                true
            }
            _ => false,
        }
    }

    /// Delete the character before the cursor in the focused text field.
    ///
    pub fn pop_char(&mut self) -> bool {
        match self.focus {
            FormFocus::Title => self.title.pop().is_some(),
            FormFocus::Description => self.description.delete_char(),
            _ => false,
        }
    }

    /// Start a new description line.
    ///
    pub fn push_newline(&mut self) -> bool {
        if self.focus == FormFocus::Description {
            self.description.insert_newline();
            true
        } else {
            false
        }
    }

    /// Snapshot the draft as task fields.
    ///
    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description(),
            date: self.date,
            image: self.image.clone(),
        }
    }

    /// Clear every field, date the draft `today` and return focus to the
    /// title.
    ///
    pub fn reset(&mut self, today: NaiveDate) -> &mut Self {
        *self = FormState::new(today);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn image() -> ImageRef {
        ImageRef {
            uri: "/tmp/cache/cat.png".to_string(),
            thumbnail: None,
        }
    }

    #[test]
    fn test_focus_cycle() {
        let mut focus = FormFocus::Title;
        for _ in 0..6 {
            focus = focus.next();
        }
        assert_eq!(focus, FormFocus::Title);
        assert_eq!(FormFocus::Title.previous(), FormFocus::Tasks);
        assert_eq!(FormFocus::Date.next(), FormFocus::Image);
        assert!(FormFocus::Description.is_text_input());
        assert!(!FormFocus::Submit.is_text_input());
    }

    #[test]
    fn test_typing_follows_focus() {
        let mut form = FormState::new(today());
        for c in "Buy".chars() {
            assert!(form.push_char(c));
        }
        form.focus_next();
        for c in "2 litres".chars() {
            form.push_char(c);
        }
        form.push_newline();
        form.push_char('x');
        form.pop_char();
        form.push_char('y');
        assert_eq!(form.title(), "Buy");
        assert_eq!(form.description(), "2 litres\ny");

        form.set_focus(FormFocus::Date);
        assert!(!form.push_char('z'));
        assert!(!form.pop_char());
        assert!(!form.push_newline());
        assert_eq!(form.title(), "Buy");
    }

    #[test]
    fn test_description_cursor_moves() {
        let mut form = FormState::new(today());
        assert!(!form.move_cursor(CursorMove::Back));
        form.focus_next();
        for c in "ac".chars() {
            form.push_char(c);
        }
        form.push_newline();
        form.push_char('d');
        assert_eq!(form.description_cursor(), (1, 1));

        form.move_cursor(CursorMove::Up);
        form.move_cursor(CursorMove::Back);
        assert_eq!(form.description_cursor(), (0, 0));
        form.move_cursor(CursorMove::Forward);
        form.push_char('b');
        assert_eq!(form.description(), "abc\nd");
        assert_eq!(form.description_cursor(), (0, 2));
    }

    #[test]
    fn test_to_new_task() {
        let mut form = FormState::new(today());
        form.push_char('a');
        form.set_image(image());
        let new_task = form.to_new_task();
        assert_eq!(new_task.title, "a");
        assert_eq!(new_task.description, "");
        assert_eq!(new_task.date, today());
        assert_eq!(new_task.image, Some(image()));
    }

    #[test]
    fn test_reset() {
        let mut form = FormState::new(today());
        form.push_char('a');
        form.set_focus(FormFocus::Submit);
        form.set_image(image());
        let later = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        form.reset(later);
        assert_eq!(form.title(), "");
        assert_eq!(form.description(), "");
        assert_eq!(form.image(), None);
        assert_eq!(form.date(), later);
        assert_eq!(form.focus(), FormFocus::Title);
    }
}
