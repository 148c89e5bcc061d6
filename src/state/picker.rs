//! Picker surface state.
//!
//! The date picker is a modal seeded with the draft date. The image picker is
//! a request that moves through scanning, browsing and editing phases before
//! the device worker resolves it.

use crate::device::{DatePickerOptions, GalleryEntry, ImagePickerOptions};
use chrono::{Days, Months, NaiveDate};

/// Visible date picker, holding the date under the cursor.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DatePicker {
    date: NaiveDate,
    options: DatePickerOptions,
}

impl DatePicker {
    pub fn new(date: NaiveDate, options: DatePickerOptions) -> Self {
        DatePicker { date, options }
    }

    pub fn options(&self) -> DatePickerOptions {
        self.options
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn next_day(&mut self) -> &mut Self {
        self.shift_days(1, true)
    }

    pub fn previous_day(&mut self) -> &mut Self {
        self.shift_days(1, false)
    }

    pub fn next_week(&mut self) -> &mut Self {
        self.shift_days(7, true)
    }

    pub fn previous_week(&mut self) -> &mut Self {
        self.shift_days(7, false)
    }

    /// Move one month forward, clamping the day to the end of shorter months.
    ///
    pub fn next_month(&mut self) -> &mut Self {
        if let Some(date) = self.date.checked_add_months(Months::new(1)) {
            self.date = date;
        }
        self
    }

    pub fn previous_month(&mut self) -> &mut Self {
        if let Some(date) = self.date.checked_sub_months(Months::new(1)) {
            self.date = date;
        }
        self
    }

    fn shift_days(&mut self, days: u64, forward: bool) -> &mut Self {
        let shifted = if forward {
            self.date.checked_add_days(Days::new(days))
        } else {
            self.date.checked_sub_days(Days::new(days))
        };
        if let Some(date) = shifted {
            self.date = date;
        }
        self
    }
}

/// Phase of an in-flight image request.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ImageRequestPhase {
    Scanning,
    Browsing {
        entries: Vec<GalleryEntry>,
        selected: usize,
    },
    Editing,
}

/// In-flight image picker request.
///
#[derive(Debug, PartialEq, Clone)]
pub struct ImageRequest {
    id: u64,
    options: ImagePickerOptions,
    phase: ImageRequestPhase,
}

impl ImageRequest {
    pub fn new(id: u64, options: ImagePickerOptions) -> Self {
        ImageRequest {
            id,
            options,
            phase: ImageRequestPhase::Scanning,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn options(&self) -> &ImagePickerOptions {
        &self.options
    }

    pub fn phase(&self) -> &ImageRequestPhase {
        &self.phase
    }

    pub fn is_browsing(&self) -> bool {
        matches!(self.phase, ImageRequestPhase::Browsing { .. })
    }

    pub fn begin_browsing(&mut self, entries: Vec<GalleryEntry>) -> &mut Self {
        self.phase = ImageRequestPhase::Browsing {
            entries,
            selected: 0,
        };
        self
    }

    pub fn begin_editing(&mut self) -> &mut Self {
        self.phase = ImageRequestPhase::Editing;
        self
    }

    /// Return the gallery entry under the cursor while browsing.
    ///
    pub fn selected_entry(&self) -> Option<&GalleryEntry> {
        match &self.phase {
            ImageRequestPhase::Browsing { entries, selected } => entries.get(*selected),
            _ => None,
        }
    }

    pub fn next_entry(&mut self) -> &mut Self {
        if let ImageRequestPhase::Browsing { entries, selected } = &mut self.phase {
            if !entries.is_empty() {
                *selected = (*selected + 1) % entries.len();
            }
        }
        self
    }

    pub fn previous_entry(&mut self) -> &mut Self {
        if let ImageRequestPhase::Browsing { entries, selected } = &mut self.phase {
            if !entries.is_empty() {
                *selected = (*selected + entries.len() - 1) % entries.len();
            }
        }
        self
    }
}
