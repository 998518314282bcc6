use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::date_math::{in_supported_range, same_date, weekday};
use crate::error::{ConfigError, InputError};
use crate::keyboard::{navigate, NavKey};
use crate::locale::{LocaleRegistry, LocaleTable, DEFAULT_LOCALE};
use crate::size::{SizeProfile, SizeSpec, SizeTable};
use crate::state::{reduce, Action, PickerState};
use crate::viewport::{MonthOption, Viewport, SELECTOR_LEN};
use crate::window::{VisibleWindow, WEEK_LEN};

/// Date format accepted from the host's text input.
pub const INPUT_FORMAT: &str = "%Y-%m-%d";

pub type ChangeCallback = Box<dyn FnMut(NaiveDate)>;
pub type Clock = Box<dyn Fn() -> NaiveDate>;

pub struct PickerOptions {
    /// Defaults to the clock's current date
    pub initial_date: Option<NaiveDate>,
    pub locale: String,
    pub size: SizeProfile,
    pub config: Config,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            initial_date: None,
            locale: DEFAULT_LOCALE.to_string(),
            size: SizeProfile::default(),
            config: Config::default(),
        }
    }
}

/// One date picker instance: the state snapshot plus the configuration the
/// rendering layer reads and the host's change callback.
pub struct DatePicker {
    state: PickerState,
    locale_key: String,
    locale: LocaleTable,
    size: SizeProfile,
    locales: LocaleRegistry,
    sizes: SizeTable,
    on_change: Option<ChangeCallback>,
    clock: Clock,
    last_external: Option<NaiveDate>,
}

impl DatePicker {
    pub fn new(options: PickerOptions) -> Result<Self, ConfigError> {
        Self::with_clock(options, || Local::now().date_naive())
    }

    pub fn with_clock(
        options: PickerOptions,
        clock: impl Fn() -> NaiveDate + 'static,
    ) -> Result<Self, ConfigError> {
        let locales = options.config.locale_registry();
        let sizes = options.config.size_table()?;
        let locale = locales.get(&options.locale)?.clone();

        let today = clock();
        let initial = match options.initial_date {
            Some(date) if in_supported_range(date) => date,
            Some(date) => {
                warn!("Initial date {} out of range, starting at {}", date, today);
                today
            }
            None => today,
        };
        info!(%initial, locale = %options.locale, size = %options.size, "date picker created");

        Ok(Self {
            state: PickerState::new(initial),
            locale_key: options.locale,
            locale,
            size: options.size,
            locales,
            sizes,
            on_change: None,
            clock: Box::new(clock),
            last_external: options.initial_date,
        })
    }

    /// Registers the callback fired when an internal action moves the
    /// selection.
    pub fn on_change(&mut self, callback: impl FnMut(NaiveDate) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn selected(&self) -> NaiveDate {
        self.state.selected()
    }

    pub fn focused(&self) -> Option<NaiveDate> {
        self.state.focused()
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Applies `action` and returns whether the snapshot changed.
    ///
    /// The change callback runs at most once, after the new snapshot is in
    /// place, and only when the selected date actually moved.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = reduce(&self.state, action, self.today());
        if next == self.state {
            return false;
        }

        let moved = !same_date(&next.selected(), &self.state.selected());
        self.state = next;

        if moved && action.notifies() {
            if let Some(callback) = self.on_change.as_mut() {
                callback(self.state.selected());
            }
        }
        true
    }

    /// A new initial date from the host. Repeats of the last observed value
    /// are ignored, and the change callback is never fired from here.
    pub fn receive_external_date(&mut self, date: NaiveDate) -> Result<bool, InputError> {
        if !in_supported_range(date) {
            warn!("Rejecting external date {}", date);
            return Err(InputError::OutOfRange(date));
        }
        if self.last_external.is_some_and(|last| same_date(&last, &date)) {
            return Ok(false);
        }
        self.last_external = Some(date);
        Ok(self.dispatch(Action::ReceiveExternalDate(date)))
    }

    /// Parses `YYYY-MM-DD` text from the host. Invalid text leaves the state as
    /// it was.
    pub fn receive_external_input(&mut self, input: &str) -> Result<bool, InputError> {
        let date = NaiveDate::parse_from_str(input.trim(), INPUT_FORMAT).map_err(|e| {
            warn!("Rejecting external input {:?}: {}", input, e);
            InputError::invalid_date(input, e)
        })?;
        self.receive_external_date(date)
    }

    /// Feeds a key to the grid. Returns true when the host should swallow it.
    pub fn handle_key(&mut self, key: NavKey) -> bool {
        let outcome = navigate(self.state.window(), self.state.focused(), key);
        if let Some(action) = outcome.into_action() {
            self.dispatch(action);
        }
        outcome.handled()
    }

    /// Grid gained focus: highlight the selected date unless something is
    /// already highlighted.
    pub fn focus_grid(&mut self) {
        if self.state.focused().is_none() {
            let selected = self.state.selected();
            self.dispatch(Action::Focus(selected));
        }
    }

    pub fn blur(&mut self) {
        self.dispatch(Action::Blur);
    }

    pub fn locale_key(&self) -> &str {
        &self.locale_key
    }

    pub fn locale_keys(&self) -> Vec<&str> {
        self.locales.keys()
    }

    pub fn set_locale(&mut self, key: &str) -> Result<(), ConfigError> {
        let table = self.locales.get(key).map_err(|e| {
            warn!("{}", e);
            e
        })?;
        self.locale = table.clone();
        self.locale_key = key.to_string();
        debug!(locale = key, "locale changed");
        Ok(())
    }

    /// Switches to the next registered locale in key order.
    pub fn cycle_locale(&mut self) -> Result<(), ConfigError> {
        let keys = self.locales.keys();
        let next = keys
            .iter()
            .position(|k| *k == self.locale_key)
            .map(|i| keys[(i + 1) % keys.len()])
            .unwrap_or(DEFAULT_LOCALE)
            .to_string();
        self.set_locale(&next)
    }

    pub fn size(&self) -> SizeProfile {
        self.size
    }

    pub fn set_size(&mut self, size: SizeProfile) {
        self.size = size;
        debug!(%size, "size changed");
    }

    pub fn set_size_by_name(&mut self, name: &str) -> Result<(), ConfigError> {
        let size = name.parse()?;
        self.set_size(size);
        Ok(())
    }

    /// Read-only snapshot for the rendering layer.
    pub fn view(&self) -> PickerView<'_> {
        let viewport = self.state.viewport();
        PickerView {
            selected: self.state.selected(),
            window: self.state.window(),
            focused: self.state.focused(),
            viewport,
            visible_years: viewport.visible_years(),
            visible_months: viewport.visible_months(),
            locale_key: &self.locale_key,
            locale: &self.locale,
            size: self.size,
            size_spec: self.sizes.spec(self.size),
            today: self.today(),
        }
    }
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone)]
pub struct PickerView<'a> {
    pub selected: NaiveDate,
    pub window: &'a VisibleWindow,
    pub focused: Option<NaiveDate>,
    pub viewport: Viewport,
    pub visible_years: [i32; SELECTOR_LEN],
    pub visible_months: [MonthOption; SELECTOR_LEN],
    pub locale_key: &'a str,
    pub locale: &'a LocaleTable,
    pub size: SizeProfile,
    pub size_spec: SizeSpec,
    pub today: NaiveDate,
}

/// Display data for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub day: u32,
    /// Short month name, only when the size profile shows overlays
    pub month_label: Option<&'a str>,
    pub is_selected: bool,
    pub is_focused: bool,
    pub is_today: bool,
}

impl<'a> PickerView<'a> {
    /// First of the month, Sundays and the selected date carry a month label.
    pub fn should_show_month_label(&self, date: NaiveDate) -> bool {
        date.day() == 1 || weekday(date) == 0 || same_date(&date, &self.selected)
    }

    pub fn day_cell(&self, date: NaiveDate) -> DayCell<'a> {
        let locale: &'a LocaleTable = self.locale;
        let month_label = (self.size_spec.show_month_overlay
            && self.should_show_month_label(date))
        .then(|| locale.month_short_name(date.month0()));

        DayCell {
            date,
            day: date.day(),
            month_label,
            is_selected: same_date(&date, &self.selected),
            is_focused: self.focused.is_some_and(|f| same_date(&f, &date)),
            is_today: same_date(&date, &self.today),
        }
    }

    pub fn day_cells(&self) -> Vec<DayCell<'a>> {
        self.window.iter().map(|d| self.day_cell(*d)).collect()
    }

    /// Column headers, Sunday first, short or full per the size profile.
    pub fn weekday_headers(&self) -> [&'a str; WEEK_LEN] {
        let locale: &'a LocaleTable = self.locale;
        let full = self.size_spec.full_weekday_names;
        std::array::from_fn(|i| locale.weekday_name(i as u32, full))
    }

    pub fn month_name(&self, option: &MonthOption) -> &'a str {
        option.name(self.locale)
    }

    /// e.g. "Friday, March 15, 2024"
    pub fn long_date(&self, date: NaiveDate) -> String {
        format!(
            "{}, {} {}, {}",
            self.locale.weekday_name(weekday(date), true),
            self.locale.month_name(date.month0()),
            date.day(),
            date.year()
        )
    }
}
