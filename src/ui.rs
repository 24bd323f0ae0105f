use crate::commands::{current_date, parse_date, DATE_FORMAT};
use crate::config::Config;
use crate::model::{ErrorKind, PlannerError};
use crate::plan::{format_hours, parse_hours, Plan};
use crate::session::Session;
use crate::timer::{TimerEvent, TimerStatus, FOCUS_SECONDS};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

pub fn run(session: Session, config: Config) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(session, config, current_date());
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    session: Session,
    config: Config,
    today: NaiveDate,
    selected: usize,
    daily_hours: Option<f64>,
    last_plan: Option<PlanSummary>,
    plan_scroll: u16,
    last_tick: Instant,
    status: String,
    mode: Mode,
    /// Completion notice held back while a prompt or another notice is open.
    pending_notice: Option<(String, String)>,
}

struct PlanSummary {
    included: usize,
    excluded: Vec<String>,
    per_day: f64,
}

enum Mode {
    Normal,
    AddingSubject(SubjectForm),
    EnteringHours(FieldValue),
    Saving(FieldValue),
    ConfirmDelete { index: usize },
    Notice { title: String, message: String },
}

struct SubjectForm {
    name: FieldValue,
    date: FieldValue,
    field: FormField,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum FormField {
    Name,
    Date,
}

#[derive(Clone)]
struct FieldValue {
    value: String,
    cursor: usize,
}

impl FieldValue {
    fn new(value: &str) -> Self {
        FieldValue {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = prev_char_boundary(self.cursor, &self.value);
    }

    fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = next_char_boundary(self.cursor, &self.value);
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }

    /// Cursor movement and text entry shared by every prompt.
    fn edit(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.insert_char(c);
                }
            }
            _ => {}
        }
    }
}

impl SubjectForm {
    fn new(today: NaiveDate) -> Self {
        SubjectForm {
            name: FieldValue::new(""),
            date: FieldValue::new(&today.format(DATE_FORMAT).to_string()),
            field: FormField::Name,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            FormField::Name => FormField::Date,
            FormField::Date => FormField::Name,
        };
    }

    fn active_field_mut(&mut self) -> &mut FieldValue {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Date => &mut self.date,
        }
    }
}

impl App {
    fn new(session: Session, config: Config, today: NaiveDate) -> Self {
        let daily_hours = config.daily_hours;
        App {
            session,
            config,
            today,
            selected: 0,
            daily_hours,
            last_plan: None,
            plan_scroll: 0,
            last_tick: Instant::now(),
            status: "Press a to add a subject".into(),
            mode: Mode::Normal,
            pending_notice: None,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key)? {
                        break;
                    }
                }
            }
            self.today = current_date();
            self.drive_timer(Instant::now());
        }
        Ok(())
    }

    /// Feeds one tick per whole second elapsed since the last one, while running.
    fn drive_timer(&mut self, now: Instant) {
        if !self.session.timer().is_running() {
            self.last_tick = now;
            return;
        }
        while now.duration_since(self.last_tick) >= TICK {
            self.last_tick += TICK;
            if !self.session.timer().is_running() {
                break;
            }
            if let Some(TimerEvent::Completed) = self.session.tick_timer() {
                self.status = "Pomodoro complete".into();
                self.pending_notice =
                    Some(("Pomodoro Complete".into(), "Time for a break!".into()));
                self.show_pending_notice();
                break;
            }
        }
    }

    /// Opens the held-back notice once nothing else is on screen.
    fn show_pending_notice(&mut self) {
        if !matches!(self.mode, Mode::Normal) {
            return;
        }
        if let Some((title, message)) = self.pending_notice.take() {
            self.mode = Mode::Notice { title, message };
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        let quit = self.dispatch_key(key)?;
        self.show_pending_notice();
        Ok(quit)
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::AddingSubject(_) | Mode::EnteringHours(_) | Mode::Saving(_) => {
                self.handle_form_key(key)
            }
            Mode::ConfirmDelete { .. } => self.handle_confirm_key(key),
            Mode::Notice { .. } => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.mode = Mode::Normal;
                }
                Ok(false)
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::PageUp => self.plan_scroll = self.plan_scroll.saturating_sub(5),
            KeyCode::PageDown => self.plan_scroll = self.plan_scroll.saturating_add(5),
            KeyCode::Char('a') => {
                self.mode = Mode::AddingSubject(SubjectForm::new(self.today));
                self.status = "Adding subject (Tab switch field, Enter save, Esc cancel)".into();
            }
            KeyCode::Char('d') => {
                if self.session.registry().get(self.selected).is_some() {
                    self.mode = Mode::ConfirmDelete {
                        index: self.selected,
                    };
                    self.status = "Delete subject? (y to confirm, n/Esc to cancel)".into();
                } else {
                    self.status = "No subject selected to delete".into();
                }
            }
            KeyCode::Char('g') => {
                let prefill = self.daily_hours.map(format_hours).unwrap_or_default();
                self.mode = Mode::EnteringHours(FieldValue::new(&prefill));
                self.status = "Available study hours per day (Enter generate, Esc cancel)".into();
            }
            KeyCode::Char('s') => {
                let prefill = self.config.export_path().display().to_string();
                self.mode = Mode::Saving(FieldValue::new(&prefill));
                self.status = "Save plan to file (Enter save, Esc cancel)".into();
            }
            KeyCode::Char('t') => {
                if self.session.start_timer() {
                    self.last_tick = Instant::now();
                    self.status = "Focus timer running".into();
                } else if self.session.timer().is_running() {
                    self.status = "Focus timer already running".into();
                } else {
                    self.status = "Session finished; press r to reset".into();
                }
            }
            KeyCode::Char('p') => {
                self.session.stop_timer();
                self.status = format!("Focus timer paused at {}", self.session.timer().display());
            }
            KeyCode::Char('r') => {
                self.session.reset_timer();
                self.status = "Focus timer reset".into();
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<bool> {
        let mut mode = std::mem::replace(&mut self.mode, Mode::Normal);
        let close = match key.code {
            KeyCode::Esc => {
                self.status = "Canceled".into();
                true
            }
            KeyCode::Enter => self.try_submit(&mut mode),
            _ => {
                match &mut mode {
                    Mode::AddingSubject(form) => match key.code {
                        KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
                        _ => form.active_field_mut().edit(key),
                    },
                    Mode::EnteringHours(field) | Mode::Saving(field) => field.edit(key),
                    _ => {}
                }
                false
            }
        };
        // A successful submit may already have opened a notice.
        if !close {
            self.mode = mode;
        }
        Ok(false)
    }

    fn try_submit(&mut self, mode: &mut Mode) -> bool {
        let outcome = match mode {
            Mode::AddingSubject(form) => self.add_from_form(form),
            Mode::EnteringHours(field) => self.generate_from_input(&field.value),
            Mode::Saving(field) => self.save_to(&field.value),
            _ => return true,
        };
        match outcome {
            Ok(message) => {
                self.status = message;
                true
            }
            Err(err) => {
                self.status = format!("{}: {}", error_prefix(&err), err);
                false
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<bool> {
        let index = match self.mode {
            Mode::ConfirmDelete { index } => index,
            _ => return Ok(false),
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                match self.session.remove_subject(index) {
                    Ok(removed) => {
                        self.clamp_selection();
                        self.status = format!("Deleted {}", removed.name);
                    }
                    Err(err) => self.status = format!("Delete failed: {}", err),
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.status = "Delete canceled".into();
                self.mode = Mode::Normal;
            }
            _ => {}
        }
        Ok(false)
    }

    fn add_from_form(&mut self, form: &SubjectForm) -> Result<String> {
        let date = parse_date(&form.date.value)?;
        let count = self.session.add_subject(&form.name.value, date)?;
        self.selected = count - 1;
        Ok(format!(
            "Added {} ({} subject{})",
            form.name.value.trim(),
            count,
            if count == 1 { "" } else { "s" }
        ))
    }

    fn generate_from_input(&mut self, input: &str) -> Result<String> {
        let hours = parse_hours(input)?;
        let plan = self.session.generate_plan(hours, self.today)?;
        self.daily_hours = Some(hours);
        self.plan_scroll = 0;
        let summary = PlanSummary::new(&plan);
        let message = summary.describe();
        self.last_plan = Some(summary);
        Ok(message)
    }

    fn save_to(&mut self, input: &str) -> Result<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("enter a file path"));
        }
        let path = PathBuf::from(trimmed);
        self.session.save_output(&path)?;
        debug!(path = %path.display(), "save dialog completed");
        self.mode = Mode::Notice {
            title: "Saved".into(),
            message: "Plan saved successfully!".into(),
        };
        Ok(format!("Saved plan to {}", path.display()))
    }

    fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.session.registry().len() {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.session.registry().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
            .split(layout[1]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(7)])
            .split(body[0]);

        self.draw_subjects(f, left[0]);
        self.draw_timer(f, left[1]);
        self.draw_plan(f, body[1]);
        self.draw_footer(f, layout[2]);

        match &self.mode {
            Mode::AddingSubject(form) => self.draw_subject_form(f, form),
            Mode::EnteringHours(field) => {
                draw_prompt(f, "Generate Plan", "Hours per day", field)
            }
            Mode::Saving(field) => draw_prompt(f, "Save Plan", "File", field),
            Mode::ConfirmDelete { index } => self.draw_confirm(f, *index),
            Mode::Notice { title, message } => draw_notice(f, title, message),
            Mode::Normal => {}
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let hours = self
            .daily_hours
            .map(|h| format!("{} h/day", format_hours(h)))
            .unwrap_or_else(|| "hours not set".into());
        let title = Line::from(vec![
            Span::styled(
                "studyplan ",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Smart Study Planner",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("{} subjects", self.session.registry().len()),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  •  "),
            Span::styled(hours, Style::default().fg(Color::Yellow)),
            Span::raw("  •  "),
            Span::styled(
                format!("today {}", self.today.format(DATE_FORMAT)),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_subjects(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let registry = self.session.registry();
        let width = area.width.saturating_sub(2) as usize;
        let items = if registry.is_empty() {
            vec![ListItem::new("No subjects yet (a to add)")]
        } else {
            registry
                .iter()
                .enumerate()
                .map(|(idx, subject)| {
                    let days_left = subject.days_left(self.today);
                    let due_style = if days_left <= 0 {
                        Style::default().fg(Color::LightRed)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    let date = subject.target_date.format("%d %b %Y").to_string();
                    let name_width = width.saturating_sub(date.chars().count() + 12);
                    let line = Line::from(vec![
                        Span::styled(
                            format!("{:>2}. ", idx + 1),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(
                            truncate_text(&subject.name, name_width),
                            Style::default().fg(Color::White),
                        ),
                        Span::raw(" - "),
                        Span::styled(date, due_style),
                        Span::styled(format!(" ({}d)", days_left), due_style),
                    ]);
                    ListItem::new(line).style(Style::default().bg(if idx % 2 == 0 {
                        Color::Rgb(40, 26, 28)
                    } else {
                        Color::Rgb(16, 18, 24)
                    }))
                })
                .collect()
        };

        let mut state = ListState::default();
        if !registry.is_empty() {
            state.select(Some(self.selected.min(registry.len() - 1)));
        }
        let block = Block::default()
            .title(Span::styled(
                format!("Subjects ({})", registry.len()),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightRed));
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::LightCyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_timer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let timer = self.session.timer();
        let (label, accent) = match timer.status() {
            TimerStatus::Running => ("running", Color::LightGreen),
            TimerStatus::Stopped if timer.remaining_seconds() == 0 => ("done", Color::LightMagenta),
            TimerStatus::Stopped if timer.remaining_seconds() == FOCUS_SECONDS => {
                ("ready", Color::Gray)
            }
            TimerStatus::Stopped => ("paused", Color::Yellow),
        };
        let block = Block::default()
            .title(Span::styled(
                "Pomodoro Focus Timer",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);
        let clock = Paragraph::new(vec![
            Line::from(Span::styled(
                timer.display(),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(accent))),
        ])
        .alignment(Alignment::Center);
        f.render_widget(clock, rows[0]);

        let elapsed = FOCUS_SECONDS - timer.remaining_seconds();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(accent).bg(Color::Rgb(16, 18, 24)))
            .ratio(elapsed as f64 / FOCUS_SECONDS as f64)
            .label("");
        f.render_widget(gauge, rows[1]);

        let keys = Paragraph::new(Line::from(vec![
            Span::styled("t", Style::default().fg(Color::LightGreen)),
            Span::raw(" start  "),
            Span::styled("p", Style::default().fg(Color::LightYellow)),
            Span::raw(" stop  "),
            Span::styled("r", Style::default().fg(Color::LightRed)),
            Span::raw(" reset"),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(keys, rows[2]);
    }

    fn draw_plan(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let output = self.session.output();
        let lines: Vec<Line> = if output.is_empty() {
            vec![Line::from(Span::styled(
                "No plan yet. Add subjects, then press g.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            output.lines().map(plan_line).collect()
        };
        let title = match &self.last_plan {
            Some(summary) => format!(
                "Study Plan ({} subjects, {} h/day)",
                summary.included,
                format_hours(summary.per_day)
            ),
            None => "Study Plan".into(),
        };
        let paragraph = Paragraph::new(lines)
            .scroll((self.plan_scroll, 0))
            .block(
                Block::default()
                    .title(Span::styled(
                        title,
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(paragraph, area);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help = Line::from(vec![
            Span::styled("↑↓ / j k", Style::default().fg(Color::LightCyan)),
            Span::raw(" select  "),
            Span::styled("a", Style::default().fg(Color::LightMagenta)),
            Span::raw(" add  "),
            Span::styled("d", Style::default().fg(Color::LightRed)),
            Span::raw(" delete  "),
            Span::styled("g", Style::default().fg(Color::LightGreen)),
            Span::raw(" generate  "),
            Span::styled("s", Style::default().fg(Color::LightYellow)),
            Span::raw(" save  "),
            Span::styled("PgUp/PgDn", Style::default().fg(Color::LightCyan)),
            Span::raw(" scroll plan  "),
            Span::styled("q", Style::default().fg(Color::LightRed)),
            Span::raw(" quit"),
        ]);
        let help_bar = Paragraph::new(help).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(help_bar, rows[0]);

        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(status, rows[1]);
    }

    fn draw_subject_form(&self, f: &mut ratatui::Frame<'_>, form: &SubjectForm) {
        let area = centered_rect(60, 30, f.size());
        let mut lines = Vec::new();
        lines.push(field_line("Subject", &form.name, form.field == FormField::Name));
        lines.push(field_line(
            "Exam date (YYYY-MM-DD)",
            &form.date,
            form.field == FormField::Date,
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to save • Esc to cancel • Tab to switch field",
            Style::default().fg(Color::Gray),
        )));
        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        "Add Subject",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }

    fn draw_confirm(&self, f: &mut ratatui::Frame<'_>, index: usize) {
        let area = centered_rect(50, 30, f.size());
        let name = self
            .session
            .registry()
            .get(index)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("#{}", index + 1));
        let body = vec![
            Line::from(Span::styled(
                format!("Delete \"{}\"?", name),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press y to confirm, n or Esc to cancel"),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title(Span::styled(
                    "Confirm Delete",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

impl PlanSummary {
    fn new(plan: &Plan) -> Self {
        PlanSummary {
            included: plan.allocations.len(),
            excluded: plan.excluded.clone(),
            per_day: plan.daily_hours,
        }
    }

    fn describe(&self) -> String {
        if self.excluded.is_empty() {
            format!("Plan ready for {} subjects", self.included)
        } else {
            format!(
                "Plan ready for {} subjects; skipped {} (due today or past)",
                self.included,
                self.excluded.join(", ")
            )
        }
    }
}

fn draw_prompt(f: &mut ratatui::Frame<'_>, title: &str, label: &str, field: &FieldValue) {
    let area = centered_rect(60, 25, f.size());
    let lines = vec![
        field_line(label, field, true),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to confirm • Esc to cancel",
            Style::default().fg(Color::Gray),
        )),
    ];
    let dialog = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(
                    title.to_string(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn draw_notice(f: &mut ratatui::Frame<'_>, title: &str, message: &str) {
    let area = centered_rect(40, 25, f.size());
    let body = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Enter to continue"),
    ];
    let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
        Block::default()
            .title(Span::styled(
                title.to_string(),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightYellow)),
    );
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn error_prefix(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<PlannerError>().map(PlannerError::kind) {
        Some(ErrorKind::Validation) => "Invalid input",
        Some(ErrorKind::Index) => "Not found",
        None => "Error",
    }
}

fn plan_line(line: &str) -> Line<'static> {
    if line.starts_with("  - ") {
        Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::White),
        ))
    } else if line.is_empty() {
        Line::from("")
    } else {
        Line::from(Span::styled(
            line.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn prev_char_boundary(cursor: usize, text: &str) -> usize {
    text[..cursor]
        .char_indices()
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn next_char_boundary(cursor: usize, text: &str) -> usize {
    text[cursor..]
        .chars()
        .next()
        .map(|ch| cursor + ch.len_utf8())
        .unwrap_or(text.len())
}

fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

fn field_line(label: &str, field: &FieldValue, active: bool) -> Line<'static> {
    let label_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD | Modifier::DIM);
    let value_style = Style::default().fg(if active { Color::Cyan } else { Color::White });
    let text = if active {
        field.with_caret()
    } else {
        field.value.clone()
    };
    Line::from(vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(text, value_style),
    ])
}
