use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use tui_datepicker::picker::INPUT_FORMAT;
use tui_datepicker::ui::{render_picker, PickerLayout};
use tui_datepicker::{Action, Config, DatePicker, NavKey, PickerOptions, SizeProfile};

#[derive(Parser)]
#[command(name = "tui-datepicker")]
#[command(about = "A terminal date picker with a three-week sliding window")]
struct Cli {
    /// Initial date as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Locale key (built in: en, hi)
    #[arg(short, long, default_value = "en")]
    locale: String,

    /// Display density: compact, medium or cozy
    #[arg(short, long, default_value = "medium")]
    size: String,

    /// JSON file with extra locales and size overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

enum InputFocus {
    DateInput,
    Grid,
}

struct App {
    picker: DatePicker,
    // The host's own copy of the date, fed back into the picker every frame
    host_date: Rc<RefCell<NaiveDate>>,
    date_input: Input,
    focus: InputFocus,
    layout: PickerLayout,
    status: Option<String>,
}

impl App {
    fn new(mut picker: DatePicker) -> Self {
        let host_date = Rc::new(RefCell::new(picker.selected()));
        let sink = Rc::clone(&host_date);
        picker.on_change(move |date| {
            info!(%date, "date changed");
            *sink.borrow_mut() = date;
        });

        let date_str = picker.selected().format(INPUT_FORMAT).to_string();
        Self {
            picker,
            host_date,
            date_input: Input::new(date_str),
            focus: InputFocus::Grid,
            layout: PickerLayout::default(),
            status: None,
        }
    }

    /// Hands the host's date back to the picker, as a parent re-rendering
    /// with its current props would.
    fn sync_external_date(&mut self) {
        let date = *self.host_date.borrow();
        if let Err(e) = self.picker.receive_external_date(date) {
            self.status = Some(e.to_string());
        }
    }

    fn submit_date_input(&mut self) {
        match self.picker.receive_external_input(self.date_input.value()) {
            Ok(_) => {
                *self.host_date.borrow_mut() = self.picker.selected();
                self.status = None;
            }
            Err(e) => {
                self.status = Some(e.to_string());
            }
        }
    }

    fn focus_grid(&mut self) {
        self.focus = InputFocus::Grid;
        self.picker.focus_grid();
    }

    fn focus_date_input(&mut self) {
        self.focus = InputFocus::DateInput;
        self.picker.blur();
        let date_str = self.host_date.borrow().format(INPUT_FORMAT).to_string();
        self.date_input = Input::new(date_str);
    }

    fn toggle_focus(&mut self) {
        match self.focus {
            InputFocus::Grid => self.focus_date_input(),
            InputFocus::DateInput => self.focus_grid(),
        }
    }

    fn previous_month(&mut self) {
        let viewport = self.picker.state().viewport();
        self.picker.dispatch(Action::SelectMonth((viewport.month + 11) % 12));
    }

    fn next_month(&mut self) {
        let viewport = self.picker.state().viewport();
        self.picker.dispatch(Action::SelectMonth((viewport.month + 1) % 12));
    }

    fn shift_year(&mut self, delta: i32) {
        let viewport = self.picker.state().viewport();
        self.picker.dispatch(Action::SelectYear(viewport.year + delta));
    }

    fn cycle_locale(&mut self) {
        if let Err(e) = self.picker.cycle_locale() {
            self.status = Some(e.to_string());
        }
    }

    fn cycle_size(&mut self) {
        let next: SizeProfile = self.picker.size().next();
        self.picker.set_size(next);
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_date_input(f, app, chunks[0]);
    app.layout = render_picker(f, chunks[1], &app.picker.view());
    render_selected_date(f, app, chunks[2]);
    render_help(f, app, chunks[3]);
}

fn render_date_input(f: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus, InputFocus::DateInput);
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Initial date (YYYY-MM-DD) ")
        .border_style(border_style);

    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(app.date_input.value()), inner);

    if focused {
        render_input_cursor(f, &app.date_input, inner);
    }
}

// Helper function to render cursor for input fields
fn render_input_cursor(f: &mut Frame, input: &Input, area: Rect) {
    if area.width == 0 {
        return;
    }
    let cursor_pos = input.visual_cursor().min(area.width.saturating_sub(1) as usize);
    f.set_cursor_position((area.x + cursor_pos as u16, area.y));
}

fn render_selected_date(f: &mut Frame, app: &App, area: Rect) {
    let view = app.picker.view();
    let labels = &view.locale.labels;
    let host_date = *app.host_date.borrow();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", labels.selected));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled(
            view.long_date(host_date),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(format!("{}: ", labels.today), Style::default().fg(Color::Green)),
        Span::raw(view.today.format(INPUT_FORMAT).to_string()),
        Span::raw(format!("   [{} / {}]", view.locale_key, view.size)),
    ]);
    f.render_widget(Paragraph::new(line), inner);
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let status_line = match &app.status {
        Some(message) => Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
        None => Line::from(""),
    };

    let help_text = vec![
        status_line,
        Line::from(vec![
            Span::styled("Arrows", Style::default().fg(Color::Yellow)),
            Span::raw(": Move  "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(": Select  "),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(": Input/Grid  "),
            Span::styled("[ ]", Style::default().fg(Color::Yellow)),
            Span::raw(": Year  "),
            Span::styled(", .", Style::default().fg(Color::Yellow)),
            Span::raw(": Month  "),
            Span::styled("T", Style::default().fg(Color::Yellow)),
            Span::raw(": Today  "),
            Span::styled("L/S", Style::default().fg(Color::Yellow)),
            Span::raw(": Locale/Size  "),
            Span::styled("Q", Style::default().fg(Color::Yellow)),
            Span::raw(": Quit"),
        ]),
    ];
    f.render_widget(Paragraph::new(help_text), area);
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.sync_external_date();
        terminal.draw(|f| ui(f, &mut app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                if key.code == KeyCode::Tab {
                    app.toggle_focus();
                    continue;
                }

                match app.focus {
                    InputFocus::DateInput => match key.code {
                        KeyCode::Enter => app.submit_date_input(),
                        KeyCode::Esc => app.focus_grid(),
                        _ => {
                            app.date_input.handle_event(&Event::Key(key));
                        }
                    },
                    InputFocus::Grid => {
                        let handled = NavKey::from_key_code(key.code)
                            .map(|nav| app.picker.handle_key(nav))
                            .unwrap_or(false);
                        if handled {
                            continue;
                        }

                        match key.code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('t') | KeyCode::Char('T') => {
                                app.picker.dispatch(Action::Today);
                            }
                            KeyCode::Char('[') => app.shift_year(-1),
                            KeyCode::Char(']') => app.shift_year(1),
                            KeyCode::Char(',') => app.previous_month(),
                            KeyCode::Char('.') => app.next_month(),
                            KeyCode::Char('l') | KeyCode::Char('L') => app.cycle_locale(),
                            KeyCode::Char('s') | KeyCode::Char('S') => app.cycle_size(),
                            // Arrows before the grid has focus prime it
                            _ if NavKey::from_key_code(key.code).is_some() => app.focus_grid(),
                            _ => {}
                        }
                    }
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) = app.layout.hit(mouse.column, mouse.row) {
                    app.focus = InputFocus::Grid;
                    app.picker.dispatch(action);
                    if let Action::SelectDate(date) = action {
                        app.picker.dispatch(Action::Focus(date));
                    }
                }
            }
            _ => {}
        }
    }
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let initial_date = cli
        .date
        .as_deref()
        .map(|s| {
            NaiveDate::parse_from_str(s.trim(), INPUT_FORMAT)
                .with_context(|| format!("Invalid --date '{}', expected YYYY-MM-DD", s))
        })
        .transpose()?;
    let size: SizeProfile = cli.size.parse()?;

    let picker = DatePicker::new(PickerOptions {
        initial_date,
        locale: cli.locale,
        size,
        config,
    })?;
    let mut app = App::new(picker);
    app.focus_grid();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
