use std::mem;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use open::that as open_path;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::analytics::{AnalyticsReport, RouteStat};
use crate::desk::{Command, Desk, Outcome};
use crate::error::DeskError;
use crate::export::ExportOutcome;
use crate::models::{format_date, Reservation, FARE_UNIT};

use super::forms::{BookingField, BookingForm, ConfirmCancel, PromptKind, PromptState};
use super::helpers::{centered_rect, surface_error, text_bar};
use super::screens::{AnalyticsScreen, HistoryScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown in the history table.
const PAGE_STEP: isize = 10;
/// Width of the text bars on the analytics screen.
const BAR_WIDTH: usize = 20;
const APP_TITLE: &str = "Smart Ticket Vending System";

/// High-level navigation states.
enum Screen {
    Home,
    History(HistoryScreen),
    Analytics(AnalyticsScreen),
}

/// Modal overlays drawn on top of the current screen.
enum Mode {
    Normal,
    Booking(BookingForm),
    Prompt(PromptState),
    ConfirmCancel(ConfirmCancel),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Every action is turned
/// into a [`Command`] for the desk; the app only keeps display state.
pub struct App {
    desk: Desk,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    ticket_count: usize,
    /// Most recent PDF or CSV written, for the "open" shortcut.
    last_output: Option<PathBuf>,
}

impl App {
    pub fn new(desk: Desk) -> Result<Self> {
        let ticket_count = desk
            .store()
            .count()
            .context("failed to count booked tickets")?;
        Ok(Self {
            desk,
            screen: Screen::Home,
            mode: Mode::Normal,
            status: None,
            ticket_count,
            last_output: None,
        })
    }

    /// Hand the desk back so the caller can close it cleanly.
    pub fn into_desk(self) -> Desk {
        self.desk
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Booking(form) => self.handle_booking(code, form),
            Mode::Prompt(prompt) => self.handle_prompt(code, prompt),
            Mode::ConfirmCancel(confirm) => self.handle_confirm_cancel(code, confirm),
        };

        Ok(exit)
    }

    /// Ctrl+L clears the booking form, mirroring its "Clear" button.
    pub(crate) fn handle_ctrl_l(&mut self) {
        if let Mode::Booking(form) = &mut self.mode {
            form.clear();
            self.set_status("Form cleared.", StatusKind::Info);
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('b') => {
                self.clear_status();
                return Ok(Mode::Booking(BookingForm::default()));
            }
            KeyCode::Char('s') => return Ok(Mode::Prompt(PromptState::new(PromptKind::Search))),
            KeyCode::Char('o') => {
                self.open_last_output();
                return Ok(Mode::Normal);
            }
            _ => {}
        }

        match self.screen {
            Screen::Home => match code {
                KeyCode::Char('q') | KeyCode::Esc => *exit = true,
                KeyCode::Char('c') => return Ok(Mode::Prompt(PromptState::new(PromptKind::Cancel))),
                KeyCode::Char('p') => return Ok(Mode::Prompt(PromptState::new(PromptKind::Print))),
                KeyCode::Char('e') => self.export_all(),
                KeyCode::Char('h') => self.open_history(),
                KeyCode::Char('a') => self.open_analytics(),
                _ => {}
            },
            Screen::History(_) => return Ok(self.handle_history_key(code)),
            Screen::Analytics(_) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.screen = Screen::Home,
                KeyCode::Char('r') => self.open_analytics(),
                _ => {}
            },
        }

        Ok(Mode::Normal)
    }

    fn handle_history_key(&mut self, code: KeyCode) -> Mode {
        let Screen::History(history) = &mut self.screen else {
            return Mode::Normal;
        };

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.screen = Screen::Home,
            KeyCode::Up => history.move_selection(-1),
            KeyCode::Down => history.move_selection(1),
            KeyCode::PageUp => history.move_selection(-PAGE_STEP),
            KeyCode::PageDown => history.move_selection(PAGE_STEP),
            KeyCode::Home => history.select_first(),
            KeyCode::End => history.select_last(),
            KeyCode::Char(' ') => {
                let marked = history.toggle_mark();
                let count = history.marked.len();
                let verb = if marked { "Marked" } else { "Unmarked" };
                self.set_status(
                    format!("{verb} ticket. {count} selected for export."),
                    StatusKind::Info,
                );
            }
            KeyCode::Enter | KeyCode::Char('p') => match history.current().map(|r| r.id) {
                Some(id) => self.print_ticket(id),
                None => self.set_status("Please select a ticket to print.", StatusKind::Info),
            },
            KeyCode::Char('x') => {
                let selection = history.selection();
                self.export_selection(selection);
            }
            KeyCode::Char('d') => match history.current().cloned() {
                Some(reservation) => return Mode::ConfirmCancel(ConfirmCancel { reservation }),
                None => self.set_status("Please select a ticket to cancel.", StatusKind::Info),
            },
            KeyCode::Char('r') => {
                self.refresh_history();
                self.set_status("History refreshed.", StatusKind::Info);
            }
            _ => {}
        }

        Mode::Normal
    }

    fn handle_booking(&mut self, code: KeyCode, mut form: BookingForm) -> Mode {
        match code {
            KeyCode::Esc => {
                if form.cancel_autocomplete() {
                    return Mode::Booking(form);
                }
                self.set_status("Booking cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left => form.cycle_gender(-1),
            KeyCode::Right => form.cycle_gender(1),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.book(&form) {
                Ok(()) => return Mode::Normal,
                Err(err) => {
                    let message = err.to_string();
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::Booking(form)
    }

    fn handle_prompt(&mut self, code: KeyCode, mut prompt: PromptState) -> Mode {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Mode::Normal;
            }
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(ch) => {
                prompt.push_char(ch);
            }
            KeyCode::Enter => return self.submit_prompt(prompt),
            _ => {}
        }
        Mode::Prompt(prompt)
    }

    fn submit_prompt(&mut self, mut prompt: PromptState) -> Mode {
        if prompt.kind == PromptKind::Search {
            let query = prompt.input.trim().to_string();
            if query.is_empty() {
                return Mode::Normal;
            }
            self.search(&query);
            return Mode::Normal;
        }

        let Some(id) = prompt.ticket_id() else {
            prompt.error = Some("Enter a valid ticket ID.".to_string());
            return Mode::Prompt(prompt);
        };

        match prompt.kind {
            PromptKind::Print => {
                self.print_ticket(id);
                Mode::Normal
            }
            PromptKind::Cancel => match self.desk.fetch(id) {
                Ok(reservation) => Mode::ConfirmCancel(ConfirmCancel { reservation }),
                Err(err) => {
                    self.report(&err);
                    Mode::Normal
                }
            },
            PromptKind::Search => Mode::Normal,
        }
    }

    fn handle_confirm_cancel(&mut self, code: KeyCode, confirm: ConfirmCancel) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Cancellation aborted.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.cancel_ticket(confirm.reservation.id);
                Mode::Normal
            }
            _ => Mode::ConfirmCancel(confirm),
        }
    }

    fn book(&mut self, form: &BookingForm) -> Result<(), DeskError> {
        if let Outcome::Booked(reservation) =
            self.desk.execute(Command::Book(form.values.clone()))?
        {
            self.set_status(
                format!("Ticket booked successfully! Ticket ID {}.", reservation.id),
                StatusKind::Info,
            );
            self.after_mutation();
        }
        Ok(())
    }

    fn search(&mut self, query: &str) {
        match self.desk.execute(Command::Search(query.to_string())) {
            Ok(Outcome::Found(records)) => {
                let count = records.len();
                self.screen = Screen::History(
                    HistoryScreen::new(format!("Search: {query}"), records).with_query(query),
                );
                self.set_status(format!("{count} matching ticket(s)."), StatusKind::Info);
            }
            Ok(other) => debug!(?other, "unexpected search outcome"),
            Err(err) => self.report(&err),
        }
    }

    fn cancel_ticket(&mut self, id: i64) {
        match self.desk.execute(Command::Cancel(id)) {
            Ok(_) => {
                self.set_status(
                    format!("Ticket ID {id} has been canceled."),
                    StatusKind::Info,
                );
                self.after_mutation();
            }
            Err(err) => self.report(&err),
        }
    }

    fn print_ticket(&mut self, id: i64) {
        match self.desk.execute(Command::Print(id)) {
            Ok(Outcome::Printed(path)) => {
                self.set_status(
                    format!("Ticket PDF generated: {} (o to open)", path.display()),
                    StatusKind::Info,
                );
                self.last_output = Some(path);
            }
            Ok(other) => debug!(?other, "unexpected print outcome"),
            Err(err) => self.report(&err),
        }
    }

    fn export_all(&mut self) {
        match self.desk.execute(Command::ExportAll) {
            Ok(Outcome::Exported(outcome)) => {
                self.show_export(outcome, "No tickets available to export.")
            }
            Ok(other) => debug!(?other, "unexpected export outcome"),
            Err(err) => self.report(&err),
        }
    }

    fn export_selection(&mut self, selection: Vec<Reservation>) {
        match self.desk.execute(Command::ExportSelected(selection)) {
            Ok(Outcome::Exported(outcome)) => {
                self.show_export(outcome, "Please select tickets to export.")
            }
            Ok(other) => debug!(?other, "unexpected export outcome"),
            Err(err) => self.report(&err),
        }
    }

    fn show_export(&mut self, outcome: ExportOutcome, empty_message: &str) {
        match outcome {
            ExportOutcome::Written { path, rows } => {
                self.set_status(
                    format!("Exported {rows} ticket(s) to {}", path.display()),
                    StatusKind::Info,
                );
                self.last_output = Some(path);
            }
            ExportOutcome::NothingToExport => self.set_status(empty_message, StatusKind::Info),
        }
    }

    fn open_history(&mut self) {
        match self.desk.execute(Command::History) {
            Ok(Outcome::History(records)) if records.is_empty() => {
                self.set_status("No tickets sold yet.", StatusKind::Info)
            }
            Ok(Outcome::History(records)) => {
                self.screen = Screen::History(HistoryScreen::new("Travel History", records));
                self.clear_status();
            }
            Ok(other) => debug!(?other, "unexpected history outcome"),
            Err(err) => self.report(&err),
        }
    }

    fn open_analytics(&mut self) {
        match self.desk.execute(Command::Analytics) {
            Ok(Outcome::Report(report)) if report.is_empty() => {
                self.screen = Screen::Home;
                self.set_status("No tickets sold yet.", StatusKind::Info);
            }
            Ok(Outcome::Report(report)) => {
                self.screen = Screen::Analytics(AnalyticsScreen { report });
                self.clear_status();
            }
            Ok(other) => debug!(?other, "unexpected analytics outcome"),
            Err(err) => self.report(&err),
        }
    }

    fn refresh_history(&mut self) {
        let Screen::History(history) = &mut self.screen else {
            return;
        };
        let records = match &history.query {
            Some(query) => match self.desk.search(query) {
                Err(err) if err.is_not_found() => Ok(Vec::new()),
                other => other,
            },
            None => self.desk.store().fetch_all().map_err(DeskError::from),
        };
        match records {
            Ok(records) => history.set_records(records),
            Err(err) => self.report(&err),
        }
    }

    /// Keep the counter and any open table in sync after a booking or a
    /// cancellation.
    fn after_mutation(&mut self) {
        if let Ok(count) = self.desk.store().count() {
            self.ticket_count = count;
        }
        self.refresh_history();
    }

    fn open_last_output(&mut self) {
        let Some(path) = self.last_output.clone() else {
            self.set_status("Nothing generated yet.", StatusKind::Info);
            return;
        };
        if let Err(err) = open_path(&path).with_context(|| format!("failed to open {}", path.display())) {
            self.set_status(surface_error(&err), StatusKind::Error);
        }
    }

    fn report(&mut self, err: &DeskError) {
        self.set_status(err.to_string(), StatusKind::Error);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Home => self.draw_home(frame, content_area),
            Screen::History(history) => self.draw_history(frame, content_area, history),
            Screen::Analytics(analytics) => {
                self.draw_analytics(frame, content_area, &analytics.report)
            }
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Booking(form) => self.draw_booking_form(frame, area, form),
            Mode::Prompt(prompt) => self.draw_prompt(frame, area, prompt),
            Mode::ConfirmCancel(confirm) => self.draw_confirm_cancel(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_home(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let menu = [
            ("b", "Book ticket"),
            ("s", "Search ticket"),
            ("c", "Cancel ticket"),
            ("p", "Print ticket"),
            ("e", "Export to CSV"),
            ("h", "Travel history"),
            ("a", "Show analytics"),
            ("q", "Quit"),
        ];

        let mut lines = vec![
            Line::from(Span::styled(
                APP_TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{} ticket(s) booked", self.ticket_count)),
            Line::from(""),
        ];
        lines.extend(menu.iter().map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!("[{key}]"), key_style),
                Span::raw(format!(" {label}")),
            ])
        }));

        let block = Block::default().borders(Borders::ALL).title("Ticket Desk");
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn draw_history(&self, frame: &mut Frame, area: Rect, history: &HistoryScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", history.title, history.records.len()));

        if history.records.is_empty() {
            let message = Paragraph::new("No matching tickets.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(vec![
            "", "ID", "Name", "Age", "Gender", "Source", "Destination", "Journey", "Return",
            "Fare",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = history.records.iter().map(|record| {
            let mark = if history.is_marked(record.id) { "*" } else { "" };
            Row::new(vec![
                mark.to_string(),
                record.id.to_string(),
                record.passenger_name.clone(),
                record.age.to_string(),
                record.gender.to_string(),
                record.source.clone(),
                record.destination.clone(),
                format_date(record.journey_date),
                format_date(record.return_date),
                record.fare_display(),
            ])
        });

        let widths = [
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(12),
            Constraint::Length(4),
            Constraint::Length(7),
            Constraint::Min(10),
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::Yellow));
        let mut state = TableState::default().with_selected(Some(history.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_analytics(&self, frame: &mut Frame, area: Rect, report: &AnalyticsReport) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let title = format!(
            "Passengers per Route ({} total, {:.2} {FARE_UNIT})",
            report.total_passengers, report.total_revenue
        );
        frame.render_widget(route_panel(&title, &report.routes), top[0]);

        let total = report.total_passengers.max(1) as f64;
        let gender_lines: Vec<Line> = report
            .genders
            .iter()
            .map(|(gender, count)| {
                let share = *count as f64 / total * 100.0;
                Line::from(format!(
                    "{:<7} {:>4}  {:>5.1}%  {}",
                    gender.as_str(),
                    count,
                    share,
                    text_bar(share, 100.0, BAR_WIDTH)
                ))
            })
            .collect();
        frame.render_widget(panel("Gender Distribution", gender_lines), top[1]);

        let max_age = report.ages.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;
        let age_lines: Vec<Line> = report
            .ages
            .iter()
            .map(|(bucket, count)| {
                Line::from(format!(
                    "{:<6} {:>4}  {}",
                    bucket.label(),
                    count,
                    text_bar(*count as f64, max_age, BAR_WIDTH)
                ))
            })
            .collect();
        frame.render_widget(panel("Age Group Distribution", age_lines), bottom[0]);

        frame.render_widget(
            route_panel("Top 3 Most Popular Routes", &report.top_routes),
            bottom[1],
        );
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::Booking(_)) => &[
                ("[Tab/↑↓]", " Field   "),
                ("[←→]", " Gender   "),
                ("[Ctrl+L]", " Clear   "),
                ("[Enter]", " Book   "),
                ("[Esc]", " Cancel"),
            ],
            (_, Mode::Prompt(_)) => &[("[Enter]", " Submit   "), ("[Esc]", " Cancel")],
            (_, Mode::ConfirmCancel(_)) => &[("[y]", " Confirm   "), ("[n]", " Keep")],
            (Screen::History(_), Mode::Normal) => &[
                ("[↑↓]", " Navigate   "),
                ("[Space]", " Mark   "),
                ("[p]", " Print   "),
                ("[x]", " Export   "),
                ("[d]", " Cancel   "),
                ("[r]", " Refresh   "),
                ("[o]", " Open   "),
                ("[Esc]", " Back"),
            ],
            (Screen::Analytics(_), Mode::Normal) => &[("[r]", " Refresh   "), ("[Esc]", " Back")],
            (Screen::Home, Mode::Normal) => &[
                ("[b]", " Book   "),
                ("[s]", " Search   "),
                ("[h]", " History   "),
                ("[a]", " Analytics   "),
                ("[o]", " Open   "),
                ("[q]", " Quit"),
            ],
        };

        Line::from(
            keys.iter()
                .flat_map(|(key, label)| {
                    [Span::styled(*key, key_style), Span::raw(*label)]
                })
                .collect::<Vec<_>>(),
        )
    }

    fn draw_booking_form(&self, frame: &mut Frame, area: Rect, form: &BookingForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Book Ticket").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = BookingField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to book • Tab to accept/switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        let cursor_x = inner.x + form.cursor_offset() as u16;
        let cursor_y = inner.y + form.active_row() as u16;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect, prompt: &PromptState) {
        let popup_area = centered_rect(50, 20, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(prompt.kind.title());
        let prefix = format!("{}: ", prompt.kind.label());
        let mut lines = vec![Line::from(format!("{prefix}{}", prompt.input))];
        if let Some(error) = &prompt.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        let paragraph = Paragraph::new(lines).block(block.clone());
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + (prefix.chars().count() + prompt.input.chars().count()) as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_confirm_cancel(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmCancel) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Cancel Ticket")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let reservation = &confirm.reservation;
        let lines = vec![
            Line::from(format!(
                "Cancel ticket {} for {}?",
                reservation.id, reservation.passenger_name
            )),
            Line::from(format!(
                "{} on {}",
                reservation.route(),
                format_date(reservation.journey_date)
            )),
            Line::from(""),
            Line::from(Span::styled(
                "This cannot be undone. Press y to confirm or n to keep it.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

fn panel<'a>(title: &'a str, lines: Vec<Line<'a>>) -> Paragraph<'a> {
    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title))
}

fn route_panel<'a>(title: &'a str, routes: &[RouteStat]) -> Paragraph<'a> {
    let max = routes.iter().map(|stat| stat.passengers).max().unwrap_or(0) as f64;
    let lines = routes
        .iter()
        .map(|stat| {
            Line::from(format!(
                "{:<28} {:>4} {:<w$} {:>10.2}",
                stat.route.to_string(),
                stat.passengers,
                text_bar(stat.passengers as f64, max, BAR_WIDTH),
                stat.total_fare,
                w = BAR_WIDTH
            ))
        })
        .collect();
    panel(title, lines)
}
