// Integration tests for the date picker through its public API

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use tui_datepicker::date_math::same_date;
use tui_datepicker::{
    reduce, Action, DatePicker, NavKey, PickerOptions, PickerState, VisibleWindow,
};

const TODAY: (i32, u32, u32) = (2026, 10, 16);

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    ymd(TODAY.0, TODAY.1, TODAY.2)
}

fn picker_with_log(initial: NaiveDate) -> (DatePicker, Rc<RefCell<Vec<NaiveDate>>>) {
    let options = PickerOptions {
        initial_date: Some(initial),
        ..PickerOptions::default()
    };
    let mut picker = DatePicker::with_clock(options, today).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    picker.on_change(move |d| sink.borrow_mut().push(d));
    (picker, log)
}

#[test]
fn test_window_invariant() {
    let mut date = ymd(1999, 12, 1);
    while date <= ymd(2001, 3, 31) {
        let window = VisibleWindow::generate(date);
        assert_eq!(window.len(), 21);
        assert!(window.contains(date));
        for pair in window.dates().windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 1);
        }
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn test_anchor_property() {
    let window = VisibleWindow::generate(ymd(2024, 3, 15));
    assert_eq!(window.get(0), Some(ymd(2024, 3, 3)));
    assert_eq!(window.get(20), Some(ymd(2024, 3, 23)));
}

#[test]
fn test_year_clamp() {
    let state = PickerState::new(ymd(2024, 2, 29));
    let next = reduce(&state, Action::SelectYear(2025), today());
    assert_eq!(next.selected(), ymd(2025, 2, 28));
}

#[test]
fn test_month_wraparound() {
    let state = PickerState::new(ymd(2023, 12, 9));
    assert_eq!(state.viewport().month, 11);
    assert_eq!(state.viewport().year, 2023);

    let next = reduce(&state, Action::SelectMonth(0), today());
    assert_eq!(next.selected().year(), 2024);
    assert_eq!(next.selected().month0(), 0);
    assert_eq!(next.selected().day(), 9);
    assert_eq!(next.viewport().year, 2024);
    assert_eq!(next.viewport().month, 0);
}

#[test]
fn test_select_year_idempotence() {
    let (mut picker, log) = picker_with_log(ymd(2024, 3, 15));
    picker.focus_grid();
    let before = picker.state().clone();
    assert!(!picker.dispatch(Action::SelectYear(2024)));
    assert_eq!(picker.state(), &before);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_keyboard_clamp() {
    let (mut picker, _) = picker_with_log(ymd(2024, 3, 15));
    let window = picker.state().window().clone();
    picker.dispatch(Action::Focus(window.get(14).unwrap()));

    assert!(picker.handle_key(NavKey::ArrowDown));
    assert_eq!(picker.focused(), window.get(20));

    // Already at the bottom edge
    assert!(picker.handle_key(NavKey::ArrowDown));
    assert_eq!(picker.focused(), window.get(20));
    assert_eq!(picker.state().window(), &window);
}

#[test]
fn test_keys_without_focus_pass_through() {
    let (mut picker, _) = picker_with_log(ymd(2024, 3, 15));
    let before = picker.state().clone();
    assert!(!picker.handle_key(NavKey::ArrowLeft));
    assert!(!picker.handle_key(NavKey::Enter));
    assert_eq!(picker.state(), &before);
    assert_eq!(NavKey::from_name("PageDown"), None);
}

#[test]
fn test_locale_isolation() {
    let (mut picker, _) = picker_with_log(ymd(2024, 3, 15));
    picker.focus_grid();
    picker.handle_key(NavKey::ArrowUp);

    let selected = picker.selected();
    let window = picker.state().window().clone();
    let focused = picker.focused().unwrap();
    let english_month = picker.view().locale.month_name(2).to_string();

    picker.set_locale("hi").unwrap();

    assert!(same_date(&picker.selected(), &selected));
    assert!(same_date(&picker.focused().unwrap(), &focused));
    for (a, b) in picker.state().window().iter().zip(window.iter()) {
        assert!(same_date(a, b));
    }
    assert_ne!(picker.view().locale.month_name(2), english_month);
}

#[test]
fn test_callback_suppression() {
    let (mut picker, log) = picker_with_log(ymd(2024, 3, 15));

    let d = ymd(2024, 8, 1);
    assert_eq!(picker.receive_external_date(d), Ok(true));
    assert_eq!(picker.selected(), d);
    assert!(log.borrow().is_empty());

    // Clicking the date that is already selected is not a change
    assert!(!picker.dispatch(Action::SelectDate(d)));
    assert!(log.borrow().is_empty());

    // A real click still notifies exactly once
    picker.dispatch(Action::SelectDate(ymd(2024, 8, 2)));
    assert_eq!(*log.borrow(), vec![ymd(2024, 8, 2)]);
}

#[test]
fn test_host_round_trip_does_not_loop() {
    let (mut picker, log) = picker_with_log(ymd(2024, 3, 15));

    picker.dispatch(Action::SelectMonth(4));
    let reported = *log.borrow().last().unwrap();
    assert_eq!(reported, ymd(2024, 5, 15));

    // Host feeds the reported value back as its new initial date
    picker.receive_external_date(reported).unwrap();
    picker.receive_external_date(reported).unwrap();
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_invalid_external_date_keeps_state() {
    let (mut picker, log) = picker_with_log(ymd(2024, 3, 15));
    let before = picker.state().clone();
    assert!(picker.receive_external_input("2024-13-01").is_err());
    assert!(picker.receive_external_input("").is_err());
    assert_eq!(picker.state(), &before);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_enter_commits_and_regenerates_window() {
    let (mut picker, log) = picker_with_log(ymd(2024, 3, 15));
    picker.focus_grid();
    picker.handle_key(NavKey::ArrowDown);
    // Bottom row, Friday
    assert_eq!(picker.focused(), Some(ymd(2024, 3, 22)));

    assert!(picker.handle_key(NavKey::Enter));
    assert_eq!(picker.selected(), ymd(2024, 3, 22));
    assert_eq!(picker.state().window().get(0), Some(ymd(2024, 3, 10)));
    assert_eq!(picker.focused(), Some(ymd(2024, 3, 22)));
    assert_eq!(*log.borrow(), vec![ymd(2024, 3, 22)]);
}

#[test]
fn test_visible_selectors_follow_selection() {
    let (mut picker, _) = picker_with_log(ymd(2024, 1, 20));
    let view = picker.view();
    assert_eq!(view.visible_years, [2022, 2023, 2024, 2025, 2026]);
    assert_eq!(view.month_name(&view.visible_months[0]), "November");
    assert_eq!(view.visible_months[0].year, 2023);

    picker.dispatch(Action::SelectYear(2030));
    let view = picker.view();
    assert_eq!(view.visible_years[2], 2030);
    assert_eq!(view.visible_months[2].year, 2030);
}
