//! Date picker core for terminal UIs.
//!
//! A [`DatePicker`] shows a three-week window around the selected date, with
//! five-entry year and month selectors that wrap across year boundaries and
//! arrow-key focus movement inside the window. All state changes go through
//! [`Action`]s applied by [`reduce`]; [`ui::render_picker`] draws the result
//! with ratatui.

pub mod config;
pub mod date_math;
pub mod error;
pub mod keyboard;
pub mod locale;
pub mod picker;
pub mod size;
pub mod state;
pub mod ui;
pub mod viewport;
pub mod window;

pub use config::Config;
pub use error::{ConfigError, InputError};
pub use keyboard::{KeyOutcome, NavKey};
pub use locale::{Labels, LocaleRegistry, LocaleTable};
pub use picker::{DatePicker, DayCell, PickerOptions, PickerView};
pub use size::{SizeProfile, SizeSpec, SizeTable};
pub use state::{reduce, Action, PickerState};
pub use viewport::{MonthOption, Viewport};
pub use window::VisibleWindow;
