use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::picker::{DayCell, PickerView};
use crate::size::SizeSpec;
use crate::state::Action;
use crate::viewport::MonthOption;

const YEAR_COLUMN_WIDTH: u16 = 8;
const MONTH_COLUMN_WIDTH: u16 = 16;

/// Screen regions of the last drawn picker, used to turn mouse clicks into
/// actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerLayout {
    pub years: Vec<(Rect, i32)>,
    pub months: Vec<(Rect, MonthOption)>,
    pub days: Vec<(Rect, NaiveDate)>,
}

impl PickerLayout {
    pub fn hit(&self, column: u16, row: u16) -> Option<Action> {
        if let Some((_, date)) = self.days.iter().find(|(r, _)| contains(r, column, row)) {
            return Some(Action::SelectDate(*date));
        }
        if let Some((_, option)) = self.months.iter().find(|(r, _)| contains(r, column, row)) {
            return Some(Action::SelectMonth(option.month));
        }
        self.years
            .iter()
            .find(|(r, _)| contains(r, column, row))
            .map(|(_, year)| Action::SelectYear(*year))
    }
}

fn contains(rect: &Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Draws the year selector, month selector and day grid into `area`.
pub fn render_picker(f: &mut Frame, area: Rect, view: &PickerView) -> PickerLayout {
    let mut layout = PickerLayout::default();

    let title = format!(
        " {} {} ",
        view.locale.month_name(view.viewport.month),
        view.viewport.year
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height < 6 || inner.width < YEAR_COLUMN_WIDTH + MONTH_COLUMN_WIDTH + 7 {
        return layout;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(YEAR_COLUMN_WIDTH),
            Constraint::Length(MONTH_COLUMN_WIDTH),
            Constraint::Min(7),
        ])
        .split(inner);

    render_years(f, chunks[0], view, &mut layout);
    render_months(f, chunks[1], view, &mut layout);
    render_grid(f, chunks[2], view, &mut layout);

    layout
}

fn label_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn option_style(is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

// Row spacing for the five selector entries under the label line
fn selector_step(area: Rect) -> u16 {
    (area.height.saturating_sub(1) / 5).clamp(1, 2)
}

fn render_years(f: &mut Frame, area: Rect, view: &PickerView, layout: &mut PickerLayout) {
    let label_area = Rect { height: 1, ..area };
    f.render_widget(
        Paragraph::new(Span::styled(view.locale.labels.year.as_str(), label_style()))
            .alignment(Alignment::Center),
        label_area,
    );

    let step = selector_step(area);
    for (i, year) in view.visible_years.iter().enumerate() {
        let row = Rect {
            x: area.x,
            y: area.y + 1 + i as u16 * step,
            width: area.width.saturating_sub(1),
            height: 1,
        };
        let is_current = *year == view.viewport.year;
        f.render_widget(
            Paragraph::new(year.to_string())
                .style(option_style(is_current))
                .alignment(Alignment::Center),
            row,
        );
        layout.years.push((row, *year));
    }
}

fn render_months(f: &mut Frame, area: Rect, view: &PickerView, layout: &mut PickerLayout) {
    let label_area = Rect { height: 1, ..area };
    f.render_widget(
        Paragraph::new(Span::styled(view.locale.labels.month.as_str(), label_style()))
            .alignment(Alignment::Center),
        label_area,
    );

    let step = selector_step(area);
    for (i, option) in view.visible_months.iter().enumerate() {
        let row = Rect {
            x: area.x,
            y: area.y + 1 + i as u16 * step,
            width: area.width.saturating_sub(1),
            height: 1,
        };
        let name = if view.size_spec.full_weekday_names {
            option.name(view.locale)
        } else {
            option.short_name(view.locale)
        };
        // Neighbouring years are spelled out so the wrap is visible
        let text = if option.year == view.viewport.year {
            name.to_string()
        } else {
            format!("{} {}", name, option.year)
        };
        let is_current = option.month == view.viewport.month && option.year == view.viewport.year;
        f.render_widget(
            Paragraph::new(text)
                .style(option_style(is_current))
                .alignment(Alignment::Center),
            row,
        );
        layout.months.push((row, *option));
    }
}

fn render_grid(f: &mut Frame, area: Rect, view: &PickerView, layout: &mut PickerLayout) {
    let spec = view.size_spec;
    let cell_width = spec.cell_width.max(3);
    let cell_height = spec.cell_height.max(1);
    let header_height = 1;

    let header: Vec<Span> = view
        .weekday_headers()
        .iter()
        .map(|name| {
            Span::styled(
                format!("{:^width$}", name, width = cell_width as usize),
                label_style(),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(header)), Rect { height: header_height, ..area });

    let bottom = area.y + area.height;
    let right = area.x + area.width;

    for (week, dates) in view.window.weeks().enumerate() {
        let y = area.y + header_height + week as u16 * cell_height;
        if y + cell_height > bottom {
            break;
        }

        for (weekday, date) in dates.iter().enumerate() {
            let x = area.x + weekday as u16 * cell_width;
            if x >= right {
                break;
            }
            let cell_area = Rect {
                x,
                y,
                width: cell_width.min(right - x),
                height: cell_height,
            };
            render_day_cell(f, cell_area, &view.day_cell(*date), spec);
            layout.days.push((cell_area, *date));
        }
    }
}

fn render_day_cell(f: &mut Frame, area: Rect, cell: &DayCell, spec: SizeSpec) {
    if area.width < 2 || area.height < 1 {
        return;
    }

    // Determine style based on state
    let (border_style, bg_color) = if cell.is_selected {
        (Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD), Some(Color::Blue))
    } else if cell.is_focused {
        (Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD), Some(Color::DarkGray))
    } else if cell.is_today {
        (Style::default().fg(Color::Green).add_modifier(Modifier::BOLD), None)
    } else {
        (Style::default().fg(Color::Gray), None)
    };

    let day_style = if cell.is_selected || cell.is_focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else if cell.is_today {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let overlay_style = Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC);

    let inner = if spec.cell_height >= 3 {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        if let Some(bg) = bg_color {
            block = block.style(Style::default().bg(bg));
        }
        let inner = block.inner(area);
        f.render_widget(block, area);
        inner
    } else {
        if let Some(bg) = bg_color {
            f.render_widget(Block::default().style(Style::default().bg(bg)), area);
        }
        area
    };

    if inner.height == 0 {
        return;
    }

    let mut lines = Vec::new();
    if inner.height == 1 {
        // Single line: overlay shares the day's line
        let mut spans = vec![Span::styled(format!("{:>2}", cell.day), day_style)];
        if let Some(label) = cell.month_label {
            spans.push(Span::styled(format!(" {}", label), overlay_style));
        }
        lines.push(Line::from(spans));
    } else {
        lines.push(Line::from(Span::styled(format!("{:>2}", cell.day), day_style)));
        if let Some(label) = cell.month_label {
            lines.push(Line::from(Span::styled(label, overlay_style)));
        }
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
