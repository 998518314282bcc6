//! Selection, viewport, visible window and keyboard focus, kept as one
//! snapshot and replaced as a whole by [`reduce`].
//!
//! After every transition that moves the selection, the viewport is the
//! selection's year/month and the window is regenerated from the selection.
//! The focused date, when set, is always an entry of the window.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::date_math::{clamped_date, in_supported_range};
use crate::viewport::Viewport;
use crate::window::VisibleWindow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    selected: NaiveDate,
    viewport: Viewport,
    window: VisibleWindow,
    focused: Option<NaiveDate>,
}

impl PickerState {
    pub fn new(initial: NaiveDate) -> Self {
        Self {
            selected: initial,
            viewport: Viewport::of(initial),
            window: VisibleWindow::generate(initial),
            focused: None,
        }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn window(&self) -> &VisibleWindow {
        &self.window
    }

    pub fn focused(&self) -> Option<NaiveDate> {
        self.focused
    }

    fn select(&self, date: NaiveDate) -> Self {
        if !in_supported_range(date) {
            warn!("Ignoring out-of-range date {}", date);
            return self.clone();
        }

        let window = if date == self.selected {
            self.window.clone()
        } else {
            VisibleWindow::generate(date)
        };

        // Keep focus if it survived, otherwise follow the selection
        let focused = match self.focused {
            Some(f) if window.contains(f) => Some(f),
            Some(_) => Some(date),
            None => None,
        };

        Self {
            selected: date,
            viewport: Viewport::of(date),
            window,
            focused,
        }
    }

    fn select_year(&self, year: i32) -> Self {
        if year == self.viewport.year {
            return self.clone();
        }
        match clamped_date(year, self.selected.month0(), self.selected.day()) {
            Some(date) => self.select(date),
            None => {
                warn!("Ignoring out-of-range year {}", year);
                self.clone()
            }
        }
    }

    fn select_month(&self, month: u32) -> Self {
        if month > 11 {
            warn!("Ignoring invalid month index {}", month);
            return self.clone();
        }

        // The month list wraps across the year boundary
        let year = match (self.viewport.month, month) {
            (11, 0) => self.viewport.year + 1,
            (0, 11) => self.viewport.year - 1,
            _ => self.viewport.year,
        };

        match clamped_date(year, month, self.selected.day()) {
            Some(date) => self.select(date),
            None => {
                warn!("Ignoring month {} of out-of-range year {}", month, year);
                self.clone()
            }
        }
    }

    fn focus(&self, date: NaiveDate) -> Self {
        match self.window.index_of(date) {
            Some(idx) => Self {
                focused: self.window.get(idx),
                ..self.clone()
            },
            None => self.clone(),
        }
    }
}

/// Everything that can change a [`PickerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Grid click or keyboard commit
    SelectDate(NaiveDate),
    SelectYear(i32),
    /// 0-based month from the month selector
    SelectMonth(u32),
    Today,
    /// A new initial date supplied by the host
    ReceiveExternalDate(NaiveDate),
    /// Keyboard highlight; ignored unless the date is in the window
    Focus(NaiveDate),
    Blur,
}

impl Action {
    /// Whether a selection change caused by this action is reported to the
    /// host's change callback.
    pub fn notifies(&self) -> bool {
        !matches!(self, Action::ReceiveExternalDate(_))
    }
}

/// Applies `action` to `state`. `today` backs [`Action::Today`].
pub fn reduce(state: &PickerState, action: Action, today: NaiveDate) -> PickerState {
    debug!(?action, selected = %state.selected, "reduce");
    match action {
        Action::SelectDate(date) | Action::ReceiveExternalDate(date) => state.select(date),
        Action::SelectYear(year) => state.select_year(year),
        Action::SelectMonth(month) => state.select_month(month),
        Action::Today => state.select(today),
        Action::Focus(date) => state.focus(date),
        Action::Blur => PickerState {
            focused: None,
            ..state.clone()
        },
    }
}
