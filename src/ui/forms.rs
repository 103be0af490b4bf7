use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Gender, RawReservation, Reservation, KNOWN_LOCATIONS};
use crate::validation::earliest_return_date;

/// Fields of the booking form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum BookingField {
    #[default]
    Name,
    Age,
    Gender,
    Source,
    Destination,
    JourneyDate,
    ReturnDate,
    Fare,
}

impl BookingField {
    pub(crate) const ALL: [BookingField; 8] = [
        BookingField::Name,
        BookingField::Age,
        BookingField::Gender,
        BookingField::Source,
        BookingField::Destination,
        BookingField::JourneyDate,
        BookingField::ReturnDate,
        BookingField::Fare,
    ];

    pub(crate) fn label(&self) -> &'static str {
        match self {
            BookingField::Name => "Passenger Name",
            BookingField::Age => "Age",
            BookingField::Gender => "Gender",
            BookingField::Source => "Source",
            BookingField::Destination => "Destination",
            BookingField::JourneyDate => "Journey Date",
            BookingField::ReturnDate => "Return Date",
            BookingField::Fare => "Fare",
        }
    }

    fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|field| field == self)
            .unwrap_or_default()
    }

    fn offset(&self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let next = (self.index() as isize + delta).rem_euclid(len);
        Self::ALL[next as usize]
    }

    fn has_location_suggestions(&self) -> bool {
        matches!(self, BookingField::Source | BookingField::Destination)
    }
}

/// Form state for a new booking, including location autocomplete.
#[derive(Default, Clone)]
pub(crate) struct BookingForm {
    pub(crate) values: RawReservation,
    pub(crate) active: BookingField,
    pub(crate) error: Option<String>,
    pub(crate) suggestion: Option<String>,
    pub(crate) autocomplete_disabled: bool,
}

impl BookingForm {
    /// Move focus forward, or accept a pending location suggestion first.
    pub(crate) fn next_field(&mut self) {
        if self.accept_suggestion() {
            return;
        }
        self.focus(self.active.offset(1));
    }

    pub(crate) fn previous_field(&mut self) {
        self.focus(self.active.offset(-1));
    }

    fn focus(&mut self, field: BookingField) {
        self.active = field;
        self.autocomplete_disabled = false;
        self.update_suggestion();
    }

    pub(crate) fn value(&self, field: BookingField) -> &str {
        match field {
            BookingField::Name => &self.values.passenger_name,
            BookingField::Age => &self.values.age,
            BookingField::Gender => &self.values.gender,
            BookingField::Source => &self.values.source,
            BookingField::Destination => &self.values.destination,
            BookingField::JourneyDate => &self.values.journey_date,
            BookingField::ReturnDate => &self.values.return_date,
            BookingField::Fare => &self.values.fare,
        }
    }

    fn value_mut(&mut self, field: BookingField) -> &mut String {
        match field {
            BookingField::Name => &mut self.values.passenger_name,
            BookingField::Age => &mut self.values.age,
            BookingField::Gender => &mut self.values.gender,
            BookingField::Source => &mut self.values.source,
            BookingField::Destination => &mut self.values.destination,
            BookingField::JourneyDate => &mut self.values.journey_date,
            BookingField::ReturnDate => &mut self.values.return_date,
            BookingField::Fare => &mut self.values.fare,
        }
    }

    /// Insert a character into the active field, rejecting input the field
    /// can never accept. Gender is chosen with the arrow keys instead.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let accepted = match self.active {
            BookingField::Gender => false,
            BookingField::Age => ch.is_ascii_digit() || ch == '-',
            BookingField::Fare => ch.is_ascii_digit() || ch == '.' || ch == '-',
            BookingField::JourneyDate | BookingField::ReturnDate => {
                ch.is_ascii_digit() || ch == '-'
            }
            _ => true,
        };
        if accepted {
            self.value_mut(self.active).push(ch);
            self.autocomplete_disabled = false;
            self.update_suggestion();
        }
        accepted
    }

    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
        self.autocomplete_disabled = false;
        self.update_suggestion();
    }

    /// Step through the gender options when the gender field has focus.
    pub(crate) fn cycle_gender(&mut self, delta: isize) {
        if self.active != BookingField::Gender {
            return;
        }
        let current = self.values.gender.parse::<Gender>().ok();
        let len = Gender::ALL.len() as isize;
        let next = match current {
            Some(gender) => {
                let index = Gender::ALL.iter().position(|g| *g == gender).unwrap_or(0) as isize;
                (index + delta).rem_euclid(len)
            }
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.values.gender = Gender::ALL[next as usize].to_string();
    }

    /// Reset every field, like the booking screen's "Clear" action.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Advisory lower bound for the return date, derived from the journey
    /// date as it is typed.
    pub(crate) fn return_date_hint(&self) -> Option<String> {
        earliest_return_date(&self.values.journey_date)
            .map(|date| format!("earliest {}", date.format("%Y-%m-%d")))
    }

    fn update_suggestion(&mut self) {
        if !self.active.has_location_suggestions() || self.autocomplete_disabled {
            self.suggestion = None;
            return;
        }

        let current = self.value(self.active);
        if current.chars().count() < 2 {
            self.suggestion = None;
            return;
        }

        let current_lower = current.to_lowercase();
        self.suggestion = KNOWN_LOCATIONS
            .iter()
            .find(|candidate| candidate.to_lowercase().starts_with(&current_lower))
            .filter(|candidate| candidate.to_lowercase() != current_lower)
            .map(|candidate| candidate.to_string());
    }

    fn accept_suggestion(&mut self) -> bool {
        if self.suggestion_suffix().is_none() {
            return false;
        }
        match self.suggestion.take() {
            Some(candidate) => {
                *self.value_mut(self.active) = candidate;
                self.autocomplete_disabled = true;
                true
            }
            None => false,
        }
    }

    /// Dismiss the current suggestion for the rest of this edit.
    pub(crate) fn cancel_autocomplete(&mut self) -> bool {
        if self.suggestion.take().is_some() {
            self.autocomplete_disabled = true;
            return true;
        }
        false
    }

    fn suggestion_suffix(&self) -> Option<String> {
        let candidate = self.suggestion.as_ref()?;
        let typed = self.value(self.active).chars().count();
        let suffix: String = candidate.chars().skip(typed).collect();
        if suffix.is_empty() {
            None
        } else {
            Some(suffix)
        }
    }

    /// Render one form line, with ghosted autocomplete or the return-date hint
    /// where relevant.
    pub(crate) fn build_line(&self, field: BookingField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let placeholder = match field {
            BookingField::Gender => "<←/→ to choose>",
            BookingField::JourneyDate | BookingField::ReturnDate => "<YYYY-MM-DD>",
            _ => "<required>",
        };
        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let ghost = Style::default().fg(Color::DarkGray);

        let mut spans = vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ];
        if is_active {
            if let Some(suffix) = self.suggestion_suffix() {
                spans.push(Span::styled(suffix, ghost));
            }
        }
        if field == BookingField::ReturnDate {
            if let Some(hint) = self.return_date_hint() {
                spans.push(Span::styled(format!("  ({hint})"), ghost));
            }
        }

        Line::from(spans)
    }

    /// Character offset of the cursor within the active line.
    pub(crate) fn cursor_offset(&self) -> usize {
        self.active.label().chars().count() + 2 + self.value(self.active).chars().count()
    }

    pub(crate) fn active_row(&self) -> usize {
        self.active.index()
    }
}

/// What a single-line prompt is asking for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum PromptKind {
    Search,
    Cancel,
    Print,
}

impl PromptKind {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            PromptKind::Search => "Search Ticket",
            PromptKind::Cancel => "Cancel Ticket",
            PromptKind::Print => "Print Ticket",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            PromptKind::Search => "Passenger name or ticket ID",
            PromptKind::Cancel | PromptKind::Print => "Ticket ID",
        }
    }
}

/// State for an open single-line prompt.
pub(crate) struct PromptState {
    pub(crate) kind: PromptKind,
    pub(crate) input: String,
    pub(crate) error: Option<String>,
}

impl PromptState {
    pub(crate) fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        let accepted = match self.kind {
            PromptKind::Search => !ch.is_control(),
            PromptKind::Cancel | PromptKind::Print => ch.is_ascii_digit(),
        };
        if accepted {
            self.input.push(ch);
            self.error = None;
        }
        accepted
    }

    /// Ticket id typed into a cancel or print prompt.
    pub(crate) fn ticket_id(&self) -> Option<i64> {
        self.input.trim().parse::<i64>().ok().filter(|id| *id > 0)
    }
}

/// Cancellation awaiting a yes/no answer.
pub(crate) struct ConfirmCancel {
    pub(crate) reservation: Reservation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_order_wraps_around() {
        let mut form = BookingForm::default();
        form.previous_field();
        assert_eq!(form.active, BookingField::Fare);
        form.next_field();
        assert_eq!(form.active, BookingField::Name);
    }

    #[test]
    fn numeric_fields_reject_letters() {
        let mut form = BookingForm::default();
        form.active = BookingField::Age;
        assert!(!form.push_char('x'));
        assert!(form.push_char('4'));
        assert_eq!(form.values.age, "4");
    }

    #[test]
    fn location_autocomplete_accepts_on_tab() {
        let mut form = BookingForm::default();
        form.focus(BookingField::Source);
        form.push_char('b');
        form.push_char('e');
        form.push_char('n');
        assert_eq!(form.suggestion.as_deref(), Some("Bengaluru"));

        form.next_field();
        assert_eq!(form.values.source, "Bengaluru");
        assert_eq!(form.active, BookingField::Source);

        form.next_field();
        assert_eq!(form.active, BookingField::Destination);
    }

    #[test]
    fn gender_cycles_through_options() {
        let mut form = BookingForm::default();
        form.focus(BookingField::Gender);
        form.cycle_gender(1);
        assert_eq!(form.values.gender, "Male");
        form.cycle_gender(-1);
        assert_eq!(form.values.gender, "Other");
    }

    #[test]
    fn return_hint_follows_journey_date() {
        let mut form = BookingForm::default();
        assert_eq!(form.return_date_hint(), None);
        form.values.journey_date = "2025-02-28".into();
        assert_eq!(form.return_date_hint().as_deref(), Some("earliest 2025-03-01"));
    }

    #[test]
    fn id_prompts_only_accept_digits() {
        let mut prompt = PromptState::new(PromptKind::Cancel);
        assert!(!prompt.push_char('a'));
        prompt.push_char('1');
        prompt.push_char('2');
        assert_eq!(prompt.ticket_id(), Some(12));
    }
}
