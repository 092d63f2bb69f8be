//! Ratatui-based terminal UI.
//!
//! A sidebar holds the three controls (period, start date, end date); the
//! body shows the LSTM and GRU panels side by side, each with its chart,
//! the filtered rows and the evaluation table. Every control change runs the
//! full render pipeline again.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Days, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
};

use crate::app::pipeline;
use crate::app::view::{ModelPanel, ViewModel};
use crate::config::DashConfig;
use crate::domain::Period;
use crate::error::AppError;
use crate::io::{resolve_start_period, validate_data_dir, write_filtered_csvs};
use crate::logging::{self, debug};
use crate::report::format_price;

mod plotters_chart;

use plotters_chart::{ACTUAL_COLOR, PREDICTED_COLOR, PredictionChart};

const FIELD_PERIOD: usize = 0;
const FIELD_START: usize = 1;
const FIELD_END: usize = 2;
const PAGE_DAYS: i64 = 30;
const EXPORT_DIR: &str = "export";

/// Start the TUI.
pub fn run(config: DashConfig) -> Result<(), AppError> {
    // Load before touching the terminal so data errors print normally.
    validate_data_dir(&config.data_dir)?;
    let mut app = App::new(config)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::output(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::output(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::output(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    data_dir: PathBuf,
    period: Period,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    selected_field: usize,
    editing: Option<usize>,
    date_input: String,
    scroll: usize,
    status: String,
    view: ViewModel,
}

impl App {
    fn new(config: DashConfig) -> Result<Self, AppError> {
        let period = resolve_start_period(&config.data_dir, config.period);
        let view = pipeline::render(&config.data_dir, period, config.start, config.end)?;
        let mut app = Self {
            data_dir: config.data_dir,
            period,
            start: None,
            end: None,
            selected_field: FIELD_PERIOD,
            editing: None,
            date_input: String::new(),
            scroll: 0,
            status: String::new(),
            view,
        };
        app.sync_selection();
        app.status = if period == config.period {
            format!("Loaded {}", period.display_name())
        } else {
            format!(
                "{} incomplete, showing {}",
                config.period.display_name(),
                period.display_name()
            )
        };
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::output(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::output(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::output(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `Ok(true)` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        if self.editing.is_some() {
            return self.handle_date_edit(code);
        }

        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_END {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1)?,
            KeyCode::Right => self.adjust_field(1)?,
            KeyCode::PageDown => self.adjust_field(-PAGE_DAYS)?,
            KeyCode::PageUp => self.adjust_field(PAGE_DAYS)?,
            KeyCode::Enter => {
                if self.selected_field != FIELD_PERIOD {
                    let current = self.field_date(self.selected_field);
                    self.date_input = current.map(|d| d.to_string()).unwrap_or_default();
                    self.editing = Some(self.selected_field);
                    self.status = "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
                }
            }
            KeyCode::Char('j') => {
                let max = self.max_rows().saturating_sub(1);
                self.scroll = (self.scroll + 1).min(max);
            }
            KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            KeyCode::Char('e') => {
                self.status = match write_filtered_csvs(Path::new(EXPORT_DIR), &self.view) {
                    Ok(paths) => format!("Exported {} file(s) to {EXPORT_DIR}/", paths.len()),
                    Err(err) => format!("Export failed: {err}"),
                };
            }
            KeyCode::Char('d') => {
                self.status = match crate::debug::write_snapshot(&self.view) {
                    Ok(path) => format!("Wrote snapshot: {}", path.display()),
                    Err(err) => format!("Snapshot failed: {err}"),
                };
            }
            _ => {}
        }

        Ok(false)
    }

    fn handle_date_edit(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                if let Some(field) = self.editing.take() {
                    self.apply_date_input(field)?;
                }
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' || c == '/' {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn adjust_field(&mut self, delta: i64) -> Result<(), AppError> {
        match self.selected_field {
            FIELD_PERIOD => {
                self.period = if delta >= 0 { self.period.next() } else { self.period.prev() };
                // Dates of one period rarely fit the other; start over on the full range.
                self.start = None;
                self.end = None;
                self.refresh()?;
                self.status = format!("period: {}", self.period.display_name());
            }
            field => {
                let Some(current) = self.field_date(field) else {
                    self.status = "No dates available for this period.".to_string();
                    return Ok(());
                };
                let Some(next) = shift_days(current, delta) else {
                    return Ok(());
                };
                self.set_field_date(field, next);
                self.refresh()?;
                self.status = format!("range: {}", self.view.range_label());
            }
        }
        Ok(())
    }

    fn apply_date_input(&mut self, field: usize) -> Result<(), AppError> {
        let trimmed = self.date_input.trim().to_string();
        if trimmed.is_empty() {
            // Empty input resets the bound to the series edge.
            match field {
                FIELD_START => self.start = None,
                _ => self.end = None,
            }
        } else {
            match crate::io::ingest::parse_date(&trimmed) {
                Ok(date) => self.set_field_date(field, date),
                Err(e) => {
                    self.status = format!("Invalid date '{trimmed}': {e}");
                    return Ok(());
                }
            }
        }
        self.refresh()?;
        self.status = format!("range: {}", self.view.range_label());
        Ok(())
    }

    /// Run the pipeline for the current controls and adopt the clamped range.
    fn refresh(&mut self) -> Result<(), AppError> {
        self.view = pipeline::render(&self.data_dir, self.period, self.start, self.end)?;
        self.sync_selection();
        self.scroll = self.scroll.min(self.max_rows().saturating_sub(1));
        debug!(logging::DEFAULT, "tui selection";
            "period" => self.period.display_name(),
            "range" => self.view.range_label(),
        );
        Ok(())
    }

    fn sync_selection(&mut self) {
        self.start = self.view.range.map(|r| r.start);
        self.end = self.view.range.map(|r| r.end);
    }

    fn field_date(&self, field: usize) -> Option<NaiveDate> {
        match field {
            FIELD_START => self.start,
            FIELD_END => self.end,
            _ => None,
        }
    }

    fn set_field_date(&mut self, field: usize, date: NaiveDate) {
        match field {
            FIELD_START => self.start = Some(date),
            FIELD_END => self.end = Some(date),
            _ => {}
        }
    }

    fn max_rows(&self) -> usize {
        self.view.panels.iter().map(|p| p.rows.len()).max().unwrap_or(0)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                self.view.title.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "period: {} | range: {} | data: {}",
                    self.period.display_name(),
                    self.view.range_label(),
                    self.data_dir.display()
                ),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(0)])
            .split(area);

        self.draw_settings(frame, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        for (panel, rect) in self.view.panels.iter().zip(columns.iter()) {
            self.draw_panel(frame, *rect, panel);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let fmt = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let start_label = match self.editing {
            Some(FIELD_START) => format!("{}_", self.date_input),
            _ => fmt(self.start),
        };
        let end_label = match self.editing {
            Some(FIELD_END) => format!("{}_", self.date_input),
            _ => fmt(self.end),
        };

        let mut items = vec![
            ListItem::new(format!("Period: {}", self.period.display_name())),
            ListItem::new(format!("Start: {start_label}")),
            ListItem::new(format!("End:   {end_label}")),
        ];
        if let Some(bounds) = self.view.bounds {
            items.push(ListItem::new(""));
            items.push(ListItem::new(Span::styled(
                format!("min {}", bounds.start),
                Style::default().fg(Color::Gray),
            )));
            items.push(ListItem::new(Span::styled(
                format!("max {}", bounds.end),
                Style::default().fg(Color::Gray),
            )));
        }

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect, panel: &ModelPanel) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Min(5), Constraint::Length(7)])
            .split(area);

        self.draw_chart(frame, chunks[0], panel);
        self.draw_rows(frame, chunks[1], panel);
        draw_metrics(frame, chunks[2], panel);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, panel: &ModelPanel) {
        let legend = Line::from(vec![
            Span::styled("── Actual ", Style::default().fg(to_color(ACTUAL_COLOR))),
            Span::styled("╌╌ Predicted", Style::default().fg(to_color(PREDICTED_COLOR))),
        ]);
        let block = Block::default()
            .title(panel.chart.title.clone())
            .title(legend.right_aligned())
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        frame.render_widget(PredictionChart { chart: &panel.chart }, inner);
    }

    fn draw_rows(&self, frame: &mut ratatui::Frame<'_>, area: Rect, panel: &ModelPanel) {
        let rows = panel.rows.iter().skip(self.scroll).map(|r| {
            Row::new(vec![
                Cell::from(r.date.to_string()),
                Cell::from(format_price(r.actual)),
                Cell::from(format_price(r.predicted)),
            ])
        });
        let header = Row::new(vec!["Tanggal", "Actual", "Predicted"])
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
        let table = Table::new(rows, [Constraint::Length(10), Constraint::Length(14), Constraint::Length(14)])
            .header(header)
            .block(
                Block::default()
                    .title(format!("Rows ({})", panel.rows.len()))
                    .borders(Borders::ALL),
            );
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn ±30d  Enter edit  j/k scroll  e export  d snapshot  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_metrics(frame: &mut ratatui::Frame<'_>, area: Rect, panel: &ModelPanel) {
    let rows = panel.metrics.rows.iter().map(|m| {
        Row::new(vec![
            Cell::from(m.label.clone()),
            Cell::from(m.value.clone()).style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        ])
    });
    let header = Row::new(vec!["Metric", "Value"])
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    let table = Table::new(rows, [Constraint::Length(8), Constraint::Min(10)])
        .header(header)
        .block(Block::default().title(panel.metrics.title.clone()).borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn to_color(c: plotters::style::RGBColor) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

fn shift_days(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    let days = Days::new(delta.unsigned_abs());
    if delta >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}
