//! Form validation for tournament and event creation.
//!
//! Each form declares its rules in a static table keyed by field, so the
//! validators never look fields up by name at runtime.
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

/// Field errors in the order the rules were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors<F> {
    errors: Vec<(F, String)>,
}

impl<F> Default for ValidationErrors<F> {
    fn default() -> Self {
        Self { errors: Vec::new() }
    }
}

impl<F: Copy + PartialEq> ValidationErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: F, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn clear(&mut self, field: F) {
        self.errors.retain(|(f, _)| *f != field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl<F: Display> Display for ValidationErrors<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, message)) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tournament creation wizard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormStep {
    Details,
    Venue,
    Schedule,
    Fees,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Details,
        FormStep::Venue,
        FormStep::Schedule,
        FormStep::Fees,
    ];

    /// 1-based position, as shown in the step indicator.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn next(self) -> Option<FormStep> {
        FormStep::ALL.get(self as usize + 1).copied()
    }

    pub fn previous(self) -> Option<FormStep> {
        (self as usize).checked_sub(1).map(|i| FormStep::ALL[i])
    }
}

impl Display for FormStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FormStep::Details => "Details",
                FormStep::Venue => "Venue",
                FormStep::Schedule => "Schedule",
                FormStep::Fees => "Fees",
            }
        )
    }
}

/// Draft of a tournament. Everything is optional until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentForm {
    pub tournament_name: String,
    pub description: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub profile_pic: Option<String>,
    pub sponsor_pic: Option<String>,
    pub venue: String,
    pub address: String,
    pub city: String,
    pub timezone: String,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub reg_end_date: Option<NaiveDate>,
    pub entry_fee: String,
    pub extra_fee: String,
    pub pay_at_venue: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TournamentField {
    TournamentName,
    Description,
    ProfilePic,
    SponsorPic,
    ContactName,
    ContactPhone,
    Venue,
    Address,
    City,
    Timezone,
    StartDate,
    StartTime,
    EndDate,
    RegEndDate,
    EntryFee,
}

impl TournamentField {
    pub fn as_str(self) -> &'static str {
        match self {
            TournamentField::TournamentName => "tournament_name",
            TournamentField::Description => "description",
            TournamentField::ProfilePic => "profile_pic",
            TournamentField::SponsorPic => "sponsor_pic",
            TournamentField::ContactName => "contact_name",
            TournamentField::ContactPhone => "contact_phone",
            TournamentField::Venue => "venue",
            TournamentField::Address => "address",
            TournamentField::City => "city",
            TournamentField::Timezone => "timezone",
            TournamentField::StartDate => "start_date",
            TournamentField::StartTime => "start_time",
            TournamentField::EndDate => "end_date",
            TournamentField::RegEndDate => "reg_end_date",
            TournamentField::EntryFee => "entry_fee",
        }
    }

    fn is_filled(self, form: &TournamentForm) -> bool {
        fn text(value: &str) -> bool {
            !value.is_empty()
        }
        fn picture(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(text)
        }

        match self {
            TournamentField::TournamentName => text(&form.tournament_name),
            TournamentField::Description => text(&form.description),
            TournamentField::ProfilePic => picture(&form.profile_pic),
            TournamentField::SponsorPic => picture(&form.sponsor_pic),
            TournamentField::ContactName => text(&form.contact_name),
            TournamentField::ContactPhone => text(&form.contact_phone),
            TournamentField::Venue => text(&form.venue),
            TournamentField::Address => text(&form.address),
            TournamentField::City => text(&form.city),
            TournamentField::Timezone => text(&form.timezone),
            TournamentField::StartDate => form.start_date.is_some(),
            TournamentField::StartTime => form.start_time.is_some(),
            TournamentField::EndDate => form.end_date.is_some(),
            TournamentField::RegEndDate => form.reg_end_date.is_some(),
            TournamentField::EntryFee => text(&form.entry_fee),
        }
    }
}

impl Display for TournamentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct RequiredField {
    step: FormStep,
    field: TournamentField,
    message: &'static str,
}

const TOURNAMENT_RULES: [RequiredField; 15] = [
    RequiredField {
        step: FormStep::Details,
        field: TournamentField::TournamentName,
        message: "Tournament name is required",
    },
    RequiredField {
        step: FormStep::Details,
        field: TournamentField::Description,
        message: "Description is required",
    },
    RequiredField {
        step: FormStep::Details,
        field: TournamentField::ProfilePic,
        message: "Profile picture is required",
    },
    RequiredField {
        step: FormStep::Details,
        field: TournamentField::SponsorPic,
        message: "Sponsor picture is required",
    },
    RequiredField {
        step: FormStep::Details,
        field: TournamentField::ContactName,
        message: "Contact name is required",
    },
    RequiredField {
        step: FormStep::Details,
        field: TournamentField::ContactPhone,
        message: "Contact phone is required",
    },
    RequiredField {
        step: FormStep::Venue,
        field: TournamentField::Venue,
        message: "Venue name is required",
    },
    RequiredField {
        step: FormStep::Venue,
        field: TournamentField::Address,
        message: "Venue address is required",
    },
    RequiredField {
        step: FormStep::Venue,
        field: TournamentField::City,
        message: "City is required",
    },
    RequiredField {
        step: FormStep::Venue,
        field: TournamentField::Timezone,
        message: "Timezone is required",
    },
    RequiredField {
        step: FormStep::Schedule,
        field: TournamentField::StartDate,
        message: "Start date is required",
    },
    RequiredField {
        step: FormStep::Schedule,
        field: TournamentField::StartTime,
        message: "Start time is required",
    },
    RequiredField {
        step: FormStep::Schedule,
        field: TournamentField::EndDate,
        message: "End date is required",
    },
    RequiredField {
        step: FormStep::Schedule,
        field: TournamentField::RegEndDate,
        message: "Registration end date is required",
    },
    RequiredField {
        step: FormStep::Fees,
        field: TournamentField::EntryFee,
        message: "Entry fee is required",
    },
];

/// Checks the required fields of a single wizard step.
pub fn validate_step(
    form: &TournamentForm,
    step: FormStep,
) -> ValidationErrors<TournamentField> {
    let mut errors = ValidationErrors::new();
    for rule in TOURNAMENT_RULES.iter().filter(|r| r.step == step) {
        if !rule.field.is_filled(form) {
            errors.push(rule.field, rule.message);
        }
    }
    errors
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(FormStep),
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved(FormStep),
    Exit,
}

/// Four-step tournament creation flow.
#[derive(Debug, Clone)]
pub struct TournamentWizard {
    form: TournamentForm,
    step: FormStep,
    errors: ValidationErrors<TournamentField>,
}

impl Default for TournamentWizard {
    fn default() -> Self {
        Self::new(TournamentForm::default())
    }
}

impl TournamentWizard {
    pub fn new(form: TournamentForm) -> Self {
        Self {
            form,
            step: FormStep::Details,
            errors: ValidationErrors::new(),
        }
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn form(&self) -> &TournamentForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors<TournamentField> {
        &self.errors
    }

    /// Edits the draft and clears the stale error on `field`.
    pub fn update(&mut self, field: TournamentField, edit: impl FnOnce(&mut TournamentForm)) {
        edit(&mut self.form);
        self.errors.clear(field);
    }

    /// Validates the current step, then moves on or submits on the last one.
    pub fn next(&mut self) -> Result<Advance, ValidationErrors<TournamentField>> {
        self.errors = validate_step(&self.form, self.step);
        if !self.errors.is_empty() {
            debug!(step = %self.step, errors = self.errors.len(), "Step blocked");
            return Err(self.errors.clone());
        }

        match self.step.next() {
            Some(step) => {
                self.step = step;
                Ok(Advance::Moved(step))
            }
            None => Ok(Advance::Submitted),
        }
    }

    pub fn back(&mut self) -> Retreat {
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                Retreat::Moved(step)
            }
            None => Retreat::Exit,
        }
    }
}

// ---------------------------------------------------------------------------
// Event creation
// ---------------------------------------------------------------------------

pub const EVENT_FORMATS: [&str; 7] = [
    "Knockout",
    "Round Robin",
    "Double Elimination",
    "Group + Knockout",
    "Team Format",
    "Ladder",
    "Swiss Format",
];

pub const MATCH_TYPES: [&str; 5] = [
    "Men's Singles",
    "Men's Doubles",
    "Women's Singles",
    "Women's Doubles",
    "Mixed Doubles",
];

pub const LEVELS: [&str; 4] = ["Beginner", "Intermediate", "Expert", "Professional"];

const EARLIEST_BIRTH_YEAR: i32 = 1900;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventForm {
    pub event_name: String,
    pub event_format: String,
    pub match_type: String,
    pub level: String,
    pub max_participants: String,
    pub born_after: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventField {
    EventName,
    EventFormat,
    MatchType,
    Level,
    MaxParticipants,
    BornAfter,
}

impl EventField {
    fn value(self, form: &EventForm) -> &str {
        match self {
            EventField::EventName => &form.event_name,
            EventField::EventFormat => &form.event_format,
            EventField::MatchType => &form.match_type,
            EventField::Level => &form.level,
            EventField::MaxParticipants => &form.max_participants,
            EventField::BornAfter => &form.born_after,
        }
    }
}

impl Display for EventField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EventField::EventName => "event_name",
                EventField::EventFormat => "event_format",
                EventField::MatchType => "match_type",
                EventField::Level => "level",
                EventField::MaxParticipants => "max_participants",
                EventField::BornAfter => "born_after",
            }
        )
    }
}

enum EventRule {
    Required(&'static str),
    OneOf(&'static [&'static str], &'static str),
    PositiveWhole {
        missing: &'static str,
        invalid: &'static str,
    },
    OptionalBirthYear,
}

const EVENT_RULES: [(EventField, EventRule); 6] = [
    (EventField::EventName, EventRule::Required("Event name is required.")),
    (
        EventField::EventFormat,
        EventRule::OneOf(&EVENT_FORMATS, "Please select an event format."),
    ),
    (
        EventField::MatchType,
        EventRule::OneOf(&MATCH_TYPES, "Please select a match type."),
    ),
    (
        EventField::Level,
        EventRule::OneOf(&LEVELS, "Please select a level."),
    ),
    (
        EventField::MaxParticipants,
        EventRule::PositiveWhole {
            missing: "Enter max participants.",
            invalid: "Enter a valid positive whole number.",
        },
    ),
    (EventField::BornAfter, EventRule::OptionalBirthYear),
];

/// Value a passing rule extracted from its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accepted {
    Text,
    Count(u32),
    Year(Option<i32>),
}

impl EventRule {
    fn check(&self, value: &str, current_year: i32) -> Result<Accepted, String> {
        let trimmed = value.trim();
        match self {
            EventRule::Required(message) if trimmed.is_empty() => Err(message.to_string()),
            EventRule::Required(_) => Ok(Accepted::Text),
            EventRule::OneOf(options, message) => {
                if options.iter().any(|o| *o == value) {
                    Ok(Accepted::Text)
                } else {
                    Err(message.to_string())
                }
            }
            EventRule::PositiveWhole { missing, .. } if trimmed.is_empty() => {
                Err(missing.to_string())
            }
            EventRule::PositiveWhole { invalid, .. } => match trimmed.parse::<u32>() {
                Ok(n) if n > 0 => Ok(Accepted::Count(n)),
                _ => Err(invalid.to_string()),
            },
            EventRule::OptionalBirthYear if trimmed.is_empty() => Ok(Accepted::Year(None)),
            EventRule::OptionalBirthYear => parse_birth_year(trimmed)
                .filter(|year| (EARLIEST_BIRTH_YEAR..=current_year).contains(year))
                .map(|year| Accepted::Year(Some(year)))
                .ok_or_else(|| {
                    format!("Enter a valid year between {EARLIEST_BIRTH_YEAR} and {current_year}.")
                }),
        }
    }
}

fn parse_birth_year(value: &str) -> Option<i32> {
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}

/// Normalized event ready to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventPayload {
    pub event_name: String,
    pub event_format: String,
    pub match_type: String,
    pub level: String,
    pub max_participants: u32,
    pub born_after: Option<i32>,
}

/// Validates every event field at once. `current_year` bounds the birth year.
pub fn validate_event(
    form: &EventForm,
    current_year: i32,
) -> Result<EventPayload, ValidationErrors<EventField>> {
    let mut errors = ValidationErrors::new();
    let mut max_participants = None;
    let mut born_after = None;
    for (field, rule) in &EVENT_RULES {
        match rule.check(field.value(form), current_year) {
            Ok(Accepted::Text) => {}
            Ok(Accepted::Count(n)) => max_participants = Some(n),
            Ok(Accepted::Year(year)) => born_after = year,
            Err(message) => errors.push(*field, message),
        }
    }

    let (true, Some(max_participants)) = (errors.is_empty(), max_participants) else {
        return Err(errors);
    };

    Ok(EventPayload {
        event_name: form.event_name.trim().to_string(),
        event_format: form.event_format.clone(),
        match_type: form.match_type.clone(),
        level: form.level.clone(),
        max_participants,
        born_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> TournamentForm {
        TournamentForm {
            tournament_name: "Summer Smash Fest 2024".to_string(),
            description: "Annual summer open".to_string(),
            contact_name: "Jane S.".to_string(),
            contact_phone: "555-0100".to_string(),
            profile_pic: Some("file:///profile.png".to_string()),
            sponsor_pic: Some("file:///sponsor.png".to_string()),
            venue: "Apex Arena".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            timezone: "GMT+5:30".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 8, 15),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 18),
            reg_end_date: NaiveDate::from_ymd_opt(2024, 8, 10),
            entry_fee: "25".to_string(),
            extra_fee: String::new(),
            pay_at_venue: false,
        }
    }

    fn valid_event() -> EventForm {
        EventForm {
            event_name: "  Men's Singles Open ".to_string(),
            event_format: "Knockout".to_string(),
            match_type: "Men's Singles".to_string(),
            level: "Expert".to_string(),
            max_participants: "32".to_string(),
            born_after: String::new(),
        }
    }

    #[test]
    fn test_step_navigation() {
        assert_eq!(FormStep::Details.number(), 1);
        assert_eq!(FormStep::Fees.number(), 4);
        assert_eq!(FormStep::Venue.next(), Some(FormStep::Schedule));
        assert_eq!(FormStep::Fees.next(), None);
        assert_eq!(FormStep::Details.previous(), None);
        assert_eq!(FormStep::Schedule.previous(), Some(FormStep::Venue));
    }

    #[test]
    fn test_empty_details_step_reports_all_required() {
        let errors = validate_step(&TournamentForm::default(), FormStep::Details);
        assert_eq!(errors.len(), 6);
        assert_eq!(
            errors.get(TournamentField::TournamentName),
            Some("Tournament name is required")
        );
        assert_eq!(
            errors.get(TournamentField::SponsorPic),
            Some("Sponsor picture is required")
        );
        assert_eq!(errors.get(TournamentField::Venue), None);
    }

    #[test]
    fn test_empty_picture_uri_counts_as_missing() {
        let mut form = complete_form();
        form.profile_pic = Some(String::new());
        let errors = validate_step(&form, FormStep::Details);
        assert_eq!(errors.len(), 1);
        assert!(errors.get(TournamentField::ProfilePic).is_some());
    }

    #[test]
    fn test_wizard_walks_to_submit() {
        let mut wizard = TournamentWizard::new(complete_form());
        assert_eq!(wizard.next(), Ok(Advance::Moved(FormStep::Venue)));
        assert_eq!(wizard.next(), Ok(Advance::Moved(FormStep::Schedule)));
        assert_eq!(wizard.next(), Ok(Advance::Moved(FormStep::Fees)));
        assert_eq!(wizard.next(), Ok(Advance::Submitted));
        assert_eq!(wizard.step(), FormStep::Fees);
    }

    #[test]
    fn test_wizard_blocks_and_update_clears_error() {
        let mut form = complete_form();
        form.city.clear();
        form.timezone.clear();
        let mut wizard = TournamentWizard::new(form);

        wizard.next().unwrap();
        let errors = wizard.next().unwrap_err();
        assert_eq!(wizard.step(), FormStep::Venue);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "city: City is required\ntimezone: Timezone is required"
        );

        wizard.update(TournamentField::City, |f| f.city = "Springfield".to_string());
        assert!(wizard.errors().get(TournamentField::City).is_none());
        assert!(wizard.errors().get(TournamentField::Timezone).is_some());
        assert_eq!(wizard.form().city, "Springfield");
    }

    #[test]
    fn test_wizard_back() {
        let mut wizard = TournamentWizard::new(complete_form());
        assert_eq!(wizard.back(), Retreat::Exit);
        wizard.next().unwrap();
        assert_eq!(wizard.back(), Retreat::Moved(FormStep::Details));
    }

    #[test]
    fn test_fee_step_only_requires_entry_fee() {
        let form = TournamentForm {
            entry_fee: "10".to_string(),
            ..Default::default()
        };
        assert!(validate_step(&form, FormStep::Fees).is_empty());
    }

    #[test]
    fn test_valid_event_payload() {
        let payload = validate_event(&valid_event(), 2025).unwrap();
        assert_eq!(payload.event_name, "Men's Singles Open");
        assert_eq!(payload.max_participants, 32);
        assert_eq!(payload.born_after, None);
    }

    #[test]
    fn test_empty_event_form() {
        let errors = validate_event(&EventForm::default(), 2025).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(EventField::EventName), Some("Event name is required."));
        assert_eq!(
            errors.get(EventField::MaxParticipants),
            Some("Enter max participants.")
        );
        assert_eq!(errors.get(EventField::BornAfter), None);
    }

    #[test]
    fn test_event_name_whitespace_only() {
        let mut form = valid_event();
        form.event_name = "   ".to_string();
        let errors = validate_event(&form, 2025).unwrap_err();
        assert!(errors.get(EventField::EventName).is_some());
    }

    #[test]
    fn test_event_rejects_unknown_option() {
        let mut form = valid_event();
        form.level = "Grandmaster".to_string();
        let errors = validate_event(&form, 2025).unwrap_err();
        assert_eq!(errors.get(EventField::Level), Some("Please select a level."));
    }

    #[test]
    fn test_max_participants_carries_parsed_count() {
        let mut form = valid_event();
        form.max_participants = " 16 ".to_string();
        form.born_after = "1990".to_string();
        let payload = validate_event(&form, 2025).unwrap();
        assert_eq!(payload.max_participants, 16);
        assert_eq!(payload.born_after, Some(1990));
    }

    #[test]
    fn test_max_participants_must_be_positive_whole() {
        for bad in ["0", "-3", "2.5", "ten"] {
            let mut form = valid_event();
            form.max_participants = bad.to_string();
            let errors = validate_event(&form, 2025).unwrap_err();
            assert_eq!(
                errors.get(EventField::MaxParticipants),
                Some("Enter a valid positive whole number."),
                "input {bad}"
            );
        }
    }

    #[test]
    fn test_born_after_bounds() {
        let mut form = valid_event();
        form.born_after = "2008".to_string();
        assert_eq!(validate_event(&form, 2025).unwrap().born_after, Some(2008));

        for bad in ["1899", "2026", "08", "19a0"] {
            form.born_after = bad.to_string();
            let errors = validate_event(&form, 2025).unwrap_err();
            assert_eq!(
                errors.get(EventField::BornAfter),
                Some("Enter a valid year between 1900 and 2025.")
            );
        }
    }
}
