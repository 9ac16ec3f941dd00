//! Terminal intake wizard.
//!
//! - Centered window titled with the localized app name
//! - Left panel listing the six steps, the draft-saved acknowledgment and key help
//! - Content panel with the current step's fields; validation messages under each field
//! - Bottom button row: [ Back ] [ Next | Submit ] [ Cancel ]
//! - Modal confirmations (cancel, submission result, access denied)
//!
//! Note: logging is file-only in TUI mode (stdout logging is disabled) to avoid corrupting the screen.

use crate::api::form::{FormApi, HttpFormApi};
use crate::config::IntakeSettings;
use crate::i18n::{self, Key, Language, UiKey};
use crate::models::preferences::PreferenceStore;
use crate::models::snapshot::{FieldKind, FieldName, FieldValue};
use crate::reference::countries;
use crate::reference::options::OptionGroup;
use crate::wizard::attachments::UploadedFile;
use crate::wizard::autocomplete::{AutocompleteEvent, AutocompleteKey, CountryAutocomplete};
use crate::wizard::controller::{
    AdvanceOutcome, DestinationPart, SessionStart, SubmitOutcome, WizardController,
};
use crate::wizard::entry::EntryParams;
use crate::wizard::step::Step;
use crate::wizard::summary::display_number;
use crate::wizard::validation::{ErrorTarget, FieldError};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{info, warn};
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

/// Everything the interactive wizard needs to start a session.
pub struct TuiLaunch {
    pub settings: IntakeSettings,
    pub entry: EntryParams,
    pub language: Language,
    pub preferences: Option<PreferenceStore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonFocus {
    Back,
    Next,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Modal {
    ConfirmCancel,
    Message {
        title: String,
        body: String,
        quit_on_close: bool,
    },
}

/// One focusable line of the content panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Field(FieldName),
    DestCountry(usize),
    DestDeparture(usize),
    DestReturn(usize),
    RemoveDestination(usize),
    AddDestination,
    AttachPath,
    Attachment(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Item(usize),
    Button(ButtonFocus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemMode {
    Text,
    Flag(FieldName),
    Options {
        field: FieldName,
        group: OptionGroup,
        multi: bool,
    },
    Action,
}

/// Single-line editor; `cursor` counts chars, not bytes.
#[derive(Debug, Clone, Default)]
struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn display(&self, focused: bool) -> String {
        if !focused {
            return self.value.clone();
        }
        let i = self.byte_index(self.cursor);
        format!("{}|{}", &self.value[..i], &self.value[i..])
    }

    /// `None` when the key is not an editing key, otherwise whether the value changed.
    fn handle_key(&mut self, code: KeyCode) -> Option<bool> {
        match code {
            KeyCode::Char(c) => {
                let i = self.byte_index(self.cursor);
                self.value.insert(i, c);
                self.cursor += 1;
                Some(true)
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return Some(false);
                }
                self.cursor -= 1;
                let i = self.byte_index(self.cursor);
                self.value.remove(i);
                Some(true)
            }
            KeyCode::Delete => {
                if self.cursor >= self.len() {
                    return Some(false);
                }
                let i = self.byte_index(self.cursor);
                self.value.remove(i);
                Some(true)
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Some(false)
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.len());
                Some(false)
            }
            KeyCode::Home => {
                self.cursor = 0;
                Some(false)
            }
            KeyCode::End => {
                self.cursor = self.len();
                Some(false)
            }
            _ => None,
        }
    }
}

struct TuiState {
    controller: WizardController,
    focus: FocusTarget,
    option_cursor: usize,
    input: TextInput,
    autocomplete: CountryAutocomplete,
    modal: Option<Modal>,
    modal_focus: ButtonFocus,
    notice: Option<String>,
    quit: bool,
}

impl TuiState {
    fn new(controller: WizardController) -> Self {
        let mut state = Self {
            controller,
            focus: FocusTarget::Item(0),
            option_cursor: 0,
            input: TextInput::default(),
            autocomplete: CountryAutocomplete::new(),
            modal: None,
            modal_focus: ButtonFocus::Next,
            notice: None,
            quit: false,
        };
        after_step_change(&mut state);
        state
    }

    fn lang(&self) -> Language {
        self.controller.language()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

pub fn run(launch: TuiLaunch) -> Result<()> {
    info!("[PHASE: tui] [STEP: start] Starting intake wizard");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut state = new_session_state(&launch, &rt)?;

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut state, &rt);
    restore_terminal(&mut terminal)?;

    result
}

fn new_controller(settings: &IntakeSettings, with_token: bool) -> Result<WizardController> {
    let bearer = if with_token {
        settings.form_api.bearer_token.clone()
    } else {
        None
    };
    let api: Arc<dyn FormApi> = Arc::new(HttpFormApi::new(
        &settings.form_api.base_url,
        bearer,
        settings.request_timeout(),
    )?);
    Ok(WizardController::new(api, settings.controller_options()))
}

fn new_session_state(launch: &TuiLaunch, rt: &Runtime) -> Result<TuiState> {
    let mut controller = new_controller(&launch.settings, true)?.with_language(launch.language);
    if let Some(store) = launch.preferences.clone() {
        controller = controller.with_preferences(store);
    }

    let start = rt.block_on(controller.start_session(&launch.entry));
    if let Some(url) = launch.entry.visible_url.as_deref() {
        info!("[PHASE: tui] [STEP: session] Entry URL shown as {}", url);
    }

    let mut state = TuiState::new(controller);
    if let SessionStart::Denied { redirect } = start {
        show_access_denied(&mut state, redirect.as_deref());
    }
    Ok(state)
}

fn show_access_denied(state: &mut TuiState, redirect: Option<&str>) {
    let lang = state.lang();
    let mut body = i18n::t(lang, Key::Ui(UiKey::AccessDenied));
    if let Some(url) = redirect {
        body.push_str("\n\n");
        body.push_str(url);
    }
    state.modal = Some(Modal::Message {
        title: i18n::t(lang, Key::Ui(UiKey::AppTitle)),
        body,
        quit_on_close: true,
    });
    state.modal_focus = ButtonFocus::Next;
}

/// Seeded state for single-frame renders; never used for a real session.
fn new_smoke_state(settings: &IntakeSettings, target: &str) -> Result<TuiState> {
    let mut c = new_controller(settings, false)?.with_language(settings.default_language());

    c.set_text(FieldName::FullName, "Jean Dupont");
    c.set_text(FieldName::Birthdate, "1985-04-12");
    c.set_text(FieldName::Email, "jean.dupont@example.ch");
    c.set_choice(FieldName::Gender, "female");
    c.set_destination(0, DestinationPart::Country, "TH");
    c.set_destination(0, DestinationPart::Departure, "2025-07-01");
    c.set_destination(0, DestinationPart::Return, "2025-07-20");
    c.toggle_option(FieldName::TravelReasons, "tourism");
    c.toggle_option(FieldName::Accommodation, "hotel");
    c.toggle_option(FieldName::Activities, "hiking");
    c.set_choice(FieldName::RuralStay, "no");
    c.set_text(FieldName::Weight, "61.5");
    c.set_choice(FieldName::Allergy, "yes");
    c.set_text(FieldName::AllergyDetails, "Penicillin");
    c.toggle_option(FieldName::Comorbidities, "none");
    c.toggle_option(FieldName::PreviousVaccines, "hepatitis_a");
    c.set_text(FieldName::Remarks, "Departure in six weeks");

    let t = target.trim().to_ascii_lowercase();
    let step = Step::from_id(&t)
        .or_else(|| t.parse::<u8>().ok().and_then(Step::from_number))
        .unwrap_or(Step::FIRST);
    c.jump_to(step.number());

    let mut state = TuiState::new(c);
    if t == "denied" {
        show_access_denied(&mut state, None);
    }
    Ok(state)
}

/// Non-interactive smoke mode: render a single frame and exit.
/// Targets: identity|travel|health|vaccination|referral|summary (or 1..6), denied
pub fn smoke(settings: &IntakeSettings, target: &str) -> Result<()> {
    info!(
        "[PHASE: tui] [STEP: smoke] Rendering single-frame TUI smoke target={}",
        target
    );

    let state = new_smoke_state(settings, target)?;

    // In-memory backend: no raw mode, no alternate screen.
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|f| draw(f.size(), f, &state))?;

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut TuiState,
    rt: &Runtime,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    while !state.quit {
        terminal.draw(|f| draw(f.size(), f, state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(state, key.code, rt),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            rt.block_on(state.controller.autosave_tick(Instant::now()));
            last_tick = Instant::now();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Items and focus
// ---------------------------------------------------------------------------

fn page_items(c: &WizardController) -> Vec<Item> {
    if c.is_completed() {
        return Vec::new();
    }
    let mut items = Vec::new();
    for field in c.visible_fields() {
        match field {
            FieldName::Destinations => {
                for row in 0..c.destinations().len() {
                    items.push(Item::DestCountry(row));
                    items.push(Item::DestDeparture(row));
                    items.push(Item::DestReturn(row));
                    items.push(Item::RemoveDestination(row));
                }
                items.push(Item::AddDestination);
            }
            FieldName::NoVaccinationCard => {
                items.push(Item::Field(field));
                items.push(Item::AttachPath);
                for i in 0..c.attachments().len() {
                    items.push(Item::Attachment(i));
                }
            }
            _ => items.push(Item::Field(field)),
        }
    }
    items
}

fn item_mode(item: Item) -> ItemMode {
    match item {
        Item::Field(field) => match (field.kind(), field.option_group()) {
            (FieldKind::Flag, _) => ItemMode::Flag(field),
            (FieldKind::Choice, Some(group)) => ItemMode::Options {
                field,
                group,
                multi: false,
            },
            (FieldKind::Multi, Some(group)) => ItemMode::Options {
                field,
                group,
                multi: true,
            },
            _ => ItemMode::Text,
        },
        Item::DestCountry(_) | Item::DestDeparture(_) | Item::DestReturn(_) | Item::AttachPath => {
            ItemMode::Text
        }
        Item::RemoveDestination(_) | Item::AddDestination | Item::Attachment(_) => ItemMode::Action,
    }
}

fn focused_item(state: &TuiState) -> Option<Item> {
    match state.focus {
        FocusTarget::Item(i) => page_items(&state.controller).get(i).copied(),
        FocusTarget::Button(_) => None,
    }
}

const BUTTONS: [ButtonFocus; 3] = [ButtonFocus::Back, ButtonFocus::Next, ButtonFocus::Cancel];

fn move_focus(state: &mut TuiState, delta: isize) {
    let n = page_items(&state.controller).len();
    let total = (n + BUTTONS.len()) as isize;
    let pos = match state.focus {
        FocusTarget::Item(i) => i.min(n) as isize,
        FocusTarget::Button(b) => (n + BUTTONS.iter().position(|x| *x == b).unwrap_or(1)) as isize,
    };
    let next = (pos + delta).rem_euclid(total) as usize;
    state.focus = if next < n {
        FocusTarget::Item(next)
    } else {
        FocusTarget::Button(BUTTONS[next - n])
    };
    sync_input(state);
}

fn focus_item(state: &mut TuiState, item: Item) {
    if let Some(i) = page_items(&state.controller).iter().position(|x| *x == item) {
        state.focus = FocusTarget::Item(i);
    }
    sync_input(state);
}

/// Keep focus on a valid position after items disappeared.
fn clamp_focus(state: &mut TuiState) {
    let n = page_items(&state.controller).len();
    if let FocusTarget::Item(i) = state.focus {
        if i >= n {
            state.focus = if n == 0 {
                FocusTarget::Button(ButtonFocus::Next)
            } else {
                FocusTarget::Item(n - 1)
            };
        }
    }
}

fn field_text(c: &WizardController, field: FieldName) -> String {
    match c.snapshot().get(field) {
        Some(FieldValue::Text(s)) => s.clone(),
        Some(FieldValue::Number(n)) => display_number(*n),
        _ => String::new(),
    }
}

/// Load the editor and option cursor from the newly focused item.
fn sync_input(state: &mut TuiState) {
    state.autocomplete.dismiss();
    let lang = state.lang();
    let c = &state.controller;
    let item = focused_item(state);

    let value = match item {
        Some(Item::Field(f)) => field_text(c, f),
        Some(Item::DestCountry(r)) => c
            .destinations()
            .get(r)
            .filter(|d| !d.country.is_empty())
            .map(|d| countries::display_name(&d.country, lang))
            .unwrap_or_default(),
        Some(Item::DestDeparture(r)) => c
            .destinations()
            .get(r)
            .map(|d| d.departure.clone())
            .unwrap_or_default(),
        Some(Item::DestReturn(r)) => c
            .destinations()
            .get(r)
            .map(|d| d.return_date.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    state.option_cursor = match item.map(item_mode) {
        Some(ItemMode::Options {
            field,
            group,
            multi: false,
        }) => group.position(c.snapshot().text(field)).unwrap_or(0),
        _ => 0,
    };
    state.input.set(value);
}

fn after_step_change(state: &mut TuiState) {
    state.focus = if page_items(&state.controller).is_empty() {
        FocusTarget::Button(ButtonFocus::Next)
    } else {
        FocusTarget::Item(0)
    };
    state.notice = None;
    sync_input(state);
}

fn item_has_errors(c: &WizardController, item: Item) -> bool {
    match item {
        Item::Field(f) => !c.errors_for(f).is_empty(),
        Item::DestCountry(r) => c
            .errors()
            .for_field(FieldName::Destinations)
            .any(|e| e.row == Some(r)),
        Item::AddDestination => c
            .errors()
            .for_field(FieldName::Destinations)
            .any(|e| e.row.is_none()),
        Item::AttachPath => c.errors().for_target(ErrorTarget::Attachments).next().is_some(),
        _ => false,
    }
}

fn focus_first_error(state: &mut TuiState) {
    let items = page_items(&state.controller);
    let idx = items
        .iter()
        .position(|it| item_has_errors(&state.controller, *it))
        .unwrap_or(0);
    state.focus = if items.is_empty() {
        FocusTarget::Button(ButtonFocus::Next)
    } else {
        FocusTarget::Item(idx)
    };
    sync_input(state);
}

// ---------------------------------------------------------------------------
// Key handling
// ---------------------------------------------------------------------------

fn handle_key(state: &mut TuiState, code: KeyCode, rt: &Runtime) {
    if let Some(modal) = state.modal.clone() {
        handle_modal_key(state, modal, code);
        return;
    }

    if state.controller.is_completed() {
        if matches!(code, KeyCode::Enter | KeyCode::Esc) {
            state.quit = true;
        }
        return;
    }

    match code {
        KeyCode::F(2) => {
            let next = state.lang().next();
            state.controller.set_language(next);
            sync_input(state);
            return;
        }
        KeyCode::PageDown => {
            advance_or_submit(state, rt);
            return;
        }
        KeyCode::PageUp => {
            state.controller.retreat();
            after_step_change(state);
            return;
        }
        KeyCode::Tab => {
            move_focus(state, 1);
            return;
        }
        KeyCode::BackTab => {
            move_focus(state, -1);
            return;
        }
        _ => {}
    }

    let item = focused_item(state);

    // Open country suggestions take the arrow, enter and escape keys.
    if let Some(Item::DestCountry(row)) = item {
        if state.autocomplete.is_open() {
            let ac_key = match code {
                KeyCode::Up => Some(AutocompleteKey::Up),
                KeyCode::Down => Some(AutocompleteKey::Down),
                KeyCode::Enter => Some(AutocompleteKey::Enter),
                KeyCode::Esc => Some(AutocompleteKey::Escape),
                _ => None,
            };
            if let Some(k) = ac_key {
                if let AutocompleteEvent::Selected(country) = state.autocomplete.handle_key(k) {
                    state
                        .controller
                        .set_destination(row, DestinationPart::Country, country.code);
                    let name = country.name(state.lang());
                    state.input.set(name);
                }
                return;
            }
        }
    }

    match code {
        KeyCode::Esc => open_cancel_modal(state),
        KeyCode::Up => move_focus(state, -1),
        KeyCode::Down => move_focus(state, 1),
        KeyCode::Enter => activate(state, item, rt),
        _ => match item {
            Some(item) => edit_item(state, item, code),
            None => {
                if let FocusTarget::Button(b) = state.focus {
                    let pos = BUTTONS.iter().position(|x| *x == b).unwrap_or(1);
                    let next = match code {
                        KeyCode::Left => pos.saturating_sub(1),
                        KeyCode::Right => (pos + 1).min(BUTTONS.len() - 1),
                        _ => pos,
                    };
                    state.focus = FocusTarget::Button(BUTTONS[next]);
                }
            }
        },
    }
}

fn handle_modal_key(state: &mut TuiState, modal: Modal, code: KeyCode) {
    match modal {
        Modal::ConfirmCancel => match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                state.modal_focus = match state.modal_focus {
                    ButtonFocus::Cancel => ButtonFocus::Next,
                    _ => ButtonFocus::Cancel,
                };
            }
            KeyCode::Enter => {
                let confirm = state.modal_focus == ButtonFocus::Cancel;
                state.modal = None;
                if confirm {
                    info!("[PHASE: tui] [STEP: cancel] User left the questionnaire");
                    state.quit = true;
                }
            }
            KeyCode::Esc => state.modal = None,
            _ => {}
        },
        Modal::Message { quit_on_close, .. } => {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                state.modal = None;
                if quit_on_close {
                    state.quit = true;
                }
            }
        }
    }
}

fn open_cancel_modal(state: &mut TuiState) {
    state.modal = Some(Modal::ConfirmCancel);
    state.modal_focus = ButtonFocus::Next;
}

fn activate(state: &mut TuiState, item: Option<Item>, rt: &Runtime) {
    match (state.focus, item) {
        (FocusTarget::Button(ButtonFocus::Back), _) => {
            state.controller.retreat();
            after_step_change(state);
        }
        (FocusTarget::Button(ButtonFocus::Next), _) => advance_or_submit(state, rt),
        (FocusTarget::Button(ButtonFocus::Cancel), _) => open_cancel_modal(state),
        (_, Some(Item::AddDestination)) => {
            let row = state.controller.add_destination();
            focus_item(state, Item::DestCountry(row));
        }
        (_, Some(Item::RemoveDestination(row))) => {
            state.controller.remove_destination(row);
            clamp_focus(state);
            sync_input(state);
        }
        (_, Some(Item::AttachPath)) => attach_from_input(state),
        (_, Some(Item::Attachment(i))) => {
            state.controller.remove_attachment(i);
            clamp_focus(state);
            sync_input(state);
        }
        (_, Some(item)) => match item_mode(item) {
            ItemMode::Flag(_) | ItemMode::Options { .. } => select_at_cursor(state, item),
            _ => move_focus(state, 1),
        },
        (_, None) => {}
    }
}

fn edit_item(state: &mut TuiState, item: Item, code: KeyCode) {
    match item_mode(item) {
        ItemMode::Text => {
            if state.input.handle_key(code) == Some(true) {
                write_back(state, item);
            }
        }
        ItemMode::Flag(_) => {
            if code == KeyCode::Char(' ') {
                select_at_cursor(state, item);
            }
        }
        ItemMode::Options { group, .. } => match code {
            KeyCode::Left => state.option_cursor = state.option_cursor.saturating_sub(1),
            KeyCode::Right => {
                state.option_cursor = (state.option_cursor + 1).min(group.codes().len() - 1)
            }
            KeyCode::Char(' ') => select_at_cursor(state, item),
            _ => {}
        },
        ItemMode::Action => {
            if let (Item::Attachment(i), KeyCode::Delete) = (item, code) {
                state.controller.remove_attachment(i);
                clamp_focus(state);
                sync_input(state);
            }
        }
    }
}

/// Space / Enter on a checkbox or option list.
fn select_at_cursor(state: &mut TuiState, item: Item) {
    match item_mode(item) {
        ItemMode::Flag(field) => {
            let on = state.controller.snapshot().flag(field);
            state.controller.set_flag(field, !on);
        }
        ItemMode::Options {
            field,
            group,
            multi,
        } => {
            let Some(code) = group.codes().get(state.option_cursor).copied() else {
                return;
            };
            if multi {
                state.controller.toggle_option(field, code);
            } else {
                state.controller.set_choice(field, code);
            }
            clamp_focus(state);
        }
        _ => {}
    }
}

fn write_back(state: &mut TuiState, item: Item) {
    let value = state.input.value.clone();
    match item {
        Item::Field(f) => state.controller.set_text(f, &value),
        Item::DestDeparture(r) => {
            state
                .controller
                .set_destination(r, DestinationPart::Departure, &value);
        }
        Item::DestReturn(r) => {
            state
                .controller
                .set_destination(r, DestinationPart::Return, &value);
        }
        Item::DestCountry(r) => {
            if value.trim().is_empty() {
                state.controller.set_destination(r, DestinationPart::Country, "");
            }
            let lang = state.lang();
            state.autocomplete.set_query(&value, lang);
        }
        _ => {}
    }
}

fn attach_from_input(state: &mut TuiState) {
    let raw = state.input.value.trim().to_string();
    if raw.is_empty() {
        return;
    }
    let lang = state.lang();
    let result = UploadedFile::from_path(Path::new(&raw)).and_then(|f| state.controller.attach(f));
    match result {
        Ok(()) => {
            state.notice = None;
            state.input.set("");
        }
        Err(e) => {
            warn!("[PHASE: tui] [STEP: attach] {}", e);
            state.notice = Some(e.message(lang));
        }
    }
}

fn advance_or_submit(state: &mut TuiState, rt: &Runtime) {
    let lang = state.lang();

    if state.controller.step() != Step::Summary {
        match rt.block_on(state.controller.advance()) {
            AdvanceOutcome::Moved(_) => after_step_change(state),
            AdvanceOutcome::Invalid(_) => {
                state.notice = Some(i18n::t(lang, Key::Ui(UiKey::ValidationFailed)));
                focus_first_error(state);
            }
            AdvanceOutcome::Locked => {}
        }
        return;
    }

    match rt.block_on(state.controller.submit()) {
        Ok(SubmitOutcome::Submitted) => {
            state.modal = Some(Modal::Message {
                title: i18n::t(lang, Key::Ui(UiKey::SubmittedTitle)),
                body: i18n::t(lang, Key::Ui(UiKey::SubmittedBody)),
                quit_on_close: true,
            });
            state.modal_focus = ButtonFocus::Next;
        }
        Ok(SubmitOutcome::Invalid { .. }) => {
            state.notice = Some(i18n::t(lang, Key::Ui(UiKey::ValidationFailed)));
            focus_first_error(state);
        }
        Err(e) => {
            state.modal = Some(Modal::Message {
                title: i18n::t(lang, Key::Ui(UiKey::AppTitle)),
                body: i18n::t_args(
                    lang,
                    Key::Ui(UiKey::SubmitFailed),
                    &[("error", e.user_message())],
                ),
                quit_on_close: false,
            });
            state.modal_focus = ButtonFocus::Next;
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(area: Rect, f: &mut ratatui::Frame<'_>, state: &TuiState) {
    let lang = state.lang();
    let window_area = centered_window(area, 100, 30);

    // Outer frame
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title(i18n::t(lang, Key::Ui(UiKey::AppTitle)));
    f.render_widget(outer_block, window_area);

    // Inner layout: step list + content + buttons row
    let inner = window_area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(inner);

    let body = rows[0];
    let buttons = rows[1];

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)].as_ref())
        .split(body);

    draw_step_list(f, cols[0], state);

    let title = if state.controller.is_completed() {
        i18n::t(lang, Key::Ui(UiKey::SubmittedTitle))
    } else {
        i18n::t(lang, Key::Step(state.controller.step()))
    };
    let content_block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(content_block, cols[1]);
    let content_inner = cols[1].inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });

    let (lines, focus_line) = content_lines(state);
    let height = content_inner.height as usize;
    let offset = focus_line
        .map(|l| (l + 4).saturating_sub(height))
        .unwrap_or(0);
    let content = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((offset as u16, 0));
    f.render_widget(content, content_inner);

    // Bottom buttons row (right-aligned)
    draw_buttons(f, buttons, state);

    // Modal overlay
    if let Some(modal) = state.modal.as_ref() {
        match modal {
            Modal::ConfirmCancel => draw_cancel_modal(f, window_area, state),
            Modal::Message { title, body, .. } => {
                draw_message_modal(f, window_area, title, body, state)
            }
        }
    }
}

fn centered_window(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2)).max(60).min(area.width);
    let h = height.min(area.height.saturating_sub(2)).max(20).min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

fn draw_step_list(f: &mut ratatui::Frame<'_>, area: Rect, state: &TuiState) {
    let c = &state.controller;
    let lang = state.lang();
    let current = c.step();

    let mut lines: Vec<Line> = Vec::new();
    for s in Step::ALL {
        let marker = if c.is_completed() || s.number() < current.number() {
            "✓"
        } else if s == current {
            ">"
        } else {
            " "
        };
        let style = if s == current && !c.is_completed() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{} {}. {}", marker, s.number(), i18n::t(lang, Key::Step(s))),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(i18n::t_args(
        lang,
        Key::Ui(UiKey::StepOf),
        &[
            ("current", current.number().to_string()),
            ("total", Step::LAST.number().to_string()),
        ],
    )));
    lines.push(Line::from(format!(
        "{}: {} (F2)",
        i18n::t(lang, Key::Ui(UiKey::Language)),
        lang.native_name()
    )));
    if c.is_submitting() {
        lines.push(Line::from(i18n::t(lang, Key::Ui(UiKey::Submitting))));
    } else if c.show_save_ack(Instant::now()) {
        lines.push(Line::from(Span::styled(
            i18n::t(lang, Key::Ui(UiKey::DraftSaved)),
            Style::default().fg(Color::Green),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        i18n::t(lang, Key::Ui(UiKey::Help)),
        Style::default().fg(Color::DarkGray),
    )));

    let p = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

fn push_errors<'a>(
    lines: &mut Vec<Line<'static>>,
    errors: impl Iterator<Item = &'a FieldError>,
    lang: Language,
) {
    for e in errors {
        lines.push(Line::from(Span::styled(
            format!("    ! {}", e.message(lang)),
            error_style(),
        )));
    }
}

fn prefix(focused: bool) -> &'static str {
    if focused {
        ">"
    } else {
        " "
    }
}

fn highlight(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

/// Content panel lines and the index of the focused item's first line.
fn content_lines(state: &TuiState) -> (Vec<Line<'static>>, Option<usize>) {
    let c = &state.controller;
    let lang = state.lang();
    let mut lines: Vec<Line<'static>> = Vec::new();

    if c.is_completed() {
        lines.push(Line::from(i18n::t(lang, Key::Ui(UiKey::SubmittedBody))));
        return (lines, None);
    }

    if let Some(notice) = &state.notice {
        lines.push(Line::from(Span::styled(notice.clone(), error_style())));
        lines.push(Line::from(""));
    }

    if c.step() == Step::Summary {
        summary_lines(state, &mut lines);
    }

    let mut focus_line = None;
    for (idx, item) in page_items(c).into_iter().enumerate() {
        let focused = state.focus == FocusTarget::Item(idx);
        if focused {
            focus_line = Some(lines.len());
        }
        item_lines(state, item, focused, &mut lines);
    }
    (lines, focus_line)
}

fn summary_lines(state: &TuiState, lines: &mut Vec<Line<'static>>) {
    let lang = state.lang();
    let Some(summary) = state.controller.summary() else {
        return;
    };
    for section in &summary.sections {
        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if section.rows.is_empty() {
            lines.push(Line::from(format!(
                "  {}",
                i18n::t(lang, Key::Ui(UiKey::SummaryEmpty))
            )));
        }
        for row in &section.rows {
            lines.push(Line::from(format!("  {}: {}", row.label, row.value)));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(i18n::t(lang, Key::Ui(UiKey::ConsentText))));
}

fn item_lines(state: &TuiState, item: Item, focused: bool, lines: &mut Vec<Line<'static>>) {
    let c = &state.controller;
    let lang = state.lang();
    let p = prefix(focused);

    match item {
        Item::Field(field) => {
            let label = i18n::t(lang, Key::Field(field));
            match item_mode(item) {
                ItemMode::Flag(_) => {
                    let mark = if c.snapshot().flag(field) { "[x]" } else { "[ ]" };
                    lines.push(Line::from(Span::styled(
                        format!("{} {} {}", p, mark, label),
                        highlight(focused),
                    )));
                }
                ItemMode::Options {
                    group,
                    multi: false,
                    ..
                } => {
                    lines.push(Line::from(format!("{} {}", p, label)));
                    let selected = c.snapshot().text(field);
                    let mut spans = vec![Span::raw("    ")];
                    for (i, code) in group.codes().iter().enumerate() {
                        let mark = if selected == *code { "(x)" } else { "( )" };
                        spans.push(Span::styled(
                            format!("{} {}", mark, i18n::option_label(lang, group, code)),
                            highlight(focused && i == state.option_cursor),
                        ));
                        spans.push(Span::raw("  "));
                    }
                    lines.push(Line::from(spans));
                }
                ItemMode::Options {
                    group, multi: true, ..
                } => {
                    lines.push(Line::from(format!("{} {}", p, label)));
                    for (i, code) in group.codes().iter().enumerate() {
                        let mark = if c.snapshot().contains_option(field, code) {
                            "[x]"
                        } else {
                            "[ ]"
                        };
                        lines.push(Line::from(Span::styled(
                            format!("    {} {}", mark, i18n::option_label(lang, group, code)),
                            highlight(focused && i == state.option_cursor),
                        )));
                    }
                }
                _ => {
                    let value = if focused {
                        state.input.display(true)
                    } else {
                        field_text(c, field)
                    };
                    lines.push(Line::from(format!("{} {}", p, label)));
                    lines.push(Line::from(Span::styled(
                        format!("    [{}]", value),
                        highlight(focused),
                    )));
                }
            }
            push_errors(lines, c.errors_for(field).into_iter(), lang);
        }
        Item::DestCountry(row) => {
            lines.push(Line::from(Span::styled(
                format!("#{}", row + 1),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            let value = if focused {
                state.input.display(true)
            } else {
                c.destinations()
                    .get(row)
                    .filter(|d| !d.country.is_empty())
                    .map(|d| countries::display_name(&d.country, lang))
                    .unwrap_or_default()
            };
            lines.push(Line::from(Span::styled(
                format!("{} {}: [{}]", p, i18n::t(lang, Key::Ui(UiKey::Country)), value),
                highlight(focused),
            )));
            if focused {
                suggestion_lines(state, lines);
            }
        }
        Item::DestDeparture(row) | Item::DestReturn(row) => {
            let (key, raw) = match item {
                Item::DestDeparture(_) => (
                    UiKey::Departure,
                    c.destinations().get(row).map(|d| d.departure.clone()),
                ),
                _ => (
                    UiKey::Return,
                    c.destinations().get(row).map(|d| d.return_date.clone()),
                ),
            };
            let value = if focused {
                state.input.display(true)
            } else {
                raw.unwrap_or_default()
            };
            lines.push(Line::from(Span::styled(
                format!("{} {}: [{}]", p, i18n::t(lang, Key::Ui(key)), value),
                highlight(focused),
            )));
            if matches!(item, Item::DestReturn(_)) {
                push_errors(
                    lines,
                    c.errors()
                        .for_field(FieldName::Destinations)
                        .filter(|e| e.row == Some(row)),
                    lang,
                );
            }
        }
        Item::RemoveDestination(_) => {
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", p)),
                Span::styled(
                    format!("[ {} ]", i18n::t(lang, Key::Ui(UiKey::RemoveDestination))),
                    highlight(focused),
                ),
            ]));
        }
        Item::AddDestination => {
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", p)),
                Span::styled(
                    format!("[ + {} ]", i18n::t(lang, Key::Ui(UiKey::AddDestination))),
                    highlight(focused),
                ),
            ]));
            push_errors(
                lines,
                c.errors()
                    .for_field(FieldName::Destinations)
                    .filter(|e| e.row.is_none()),
                lang,
            );
        }
        Item::AttachPath => {
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "{} {}",
                p,
                i18n::t(lang, Key::Ui(UiKey::AttachHint))
            )));
            let value = if focused {
                state.input.display(true)
            } else {
                String::new()
            };
            lines.push(Line::from(Span::styled(
                format!("    [{}]", value),
                highlight(focused),
            )));
            push_errors(lines, c.errors().for_target(ErrorTarget::Attachments), lang);
            if c.attachments().is_empty() {
                lines.push(Line::from(format!(
                    "    {}",
                    i18n::t(lang, Key::Ui(UiKey::NoFiles))
                )));
            } else {
                lines.push(Line::from(format!(
                    "  {}:",
                    i18n::t(lang, Key::Ui(UiKey::AttachedFiles))
                )));
            }
        }
        Item::Attachment(i) => {
            if let Some(file) = c.attachments().entries().get(i) {
                lines.push(Line::from(Span::styled(
                    format!(
                        "{}   {} {} ({})",
                        p,
                        file.icon(),
                        file.name,
                        file.human_size()
                    ),
                    highlight(focused),
                )));
            }
        }
    }
}

fn suggestion_lines(state: &TuiState, lines: &mut Vec<Line<'static>>) {
    let lang = state.lang();
    let ac = &state.autocomplete;
    if !ac.is_open() {
        if state.input.value.trim().chars().count() < 2 {
            lines.push(Line::from(Span::styled(
                format!("      {}", i18n::t(lang, Key::Ui(UiKey::SearchCountry))),
                Style::default().fg(Color::DarkGray),
            )));
        }
        return;
    }
    if ac.results().is_empty() {
        lines.push(Line::from(format!(
            "      {}",
            i18n::t(lang, Key::Ui(UiKey::NoResults))
        )));
        return;
    }
    for (i, country) in ac.results().iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("      {}", country.name(lang)),
            highlight(ac.active() == Some(i)),
        )));
    }
}

fn draw_buttons(f: &mut ratatui::Frame<'_>, area: Rect, state: &TuiState) {
    let c = &state.controller;
    let lang = state.lang();
    let completed = c.is_completed();

    let next_label = if completed {
        UiKey::Close
    } else if c.step() == Step::Summary {
        UiKey::Submit
    } else {
        UiKey::Next
    };

    let back = button_text(
        &i18n::t(lang, Key::Ui(UiKey::Back)),
        state.focus == FocusTarget::Button(ButtonFocus::Back),
        !completed && c.step() != Step::FIRST,
    );
    let next = button_text(
        &i18n::t(lang, Key::Ui(next_label)),
        state.focus == FocusTarget::Button(ButtonFocus::Next),
        !c.is_submitting(),
    );
    let cancel = button_text(
        &i18n::t(lang, Key::Ui(UiKey::Cancel)),
        state.focus == FocusTarget::Button(ButtonFocus::Cancel),
        !completed,
    );

    let line = Line::from(vec![back, Span::raw(" "), next, Span::raw(" "), cancel]);

    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, area);
}

fn button_text(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let mut style = Style::default();
    if !enabled {
        style = style.fg(Color::DarkGray);
    }
    if focused && enabled {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("[ {} ]", label), style)
}

fn modal_area(window_area: Rect, width: u16, height: u16) -> Rect {
    let modal_w = width.min(window_area.width.saturating_sub(4)).max(40);
    let modal_h = height.min(window_area.height.saturating_sub(4)).max(7);
    let x = window_area.x + (window_area.width.saturating_sub(modal_w)) / 2;
    let y = window_area.y + (window_area.height.saturating_sub(modal_h)) / 2;
    Rect {
        x,
        y,
        width: modal_w,
        height: modal_h,
    }
}

fn modal_buttons_area(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + area.height - 2,
        width: area.width - 2,
        height: 1,
    }
}

fn draw_cancel_modal(f: &mut ratatui::Frame<'_>, window_area: Rect, state: &TuiState) {
    let lang = state.lang();
    let area = modal_area(window_area, 56, 7);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(i18n::t(lang, Key::Ui(UiKey::ConfirmCancelTitle)));
    let body = Paragraph::new(Text::from(vec![
        Line::from(i18n::t(lang, Key::Ui(UiKey::ConfirmCancelBody))),
        Line::from(""),
        Line::from(""),
    ]))
    .block(block)
    .wrap(Wrap { trim: false });
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(body, area);

    // Buttons: [ Yes ] [ No ] (No is the default)
    let yes = Span::styled(
        format!("[ {} ]", i18n::t(lang, Key::Ui(UiKey::Yes))),
        highlight(state.modal_focus == ButtonFocus::Cancel),
    );
    let no = Span::styled(
        format!("[ {} ]", i18n::t(lang, Key::Ui(UiKey::No))),
        highlight(state.modal_focus == ButtonFocus::Next),
    );

    let line = Line::from(vec![yes, Span::raw(" "), no]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, modal_buttons_area(area));
}

fn draw_message_modal(
    f: &mut ratatui::Frame<'_>,
    window_area: Rect,
    title: &str,
    body: &str,
    state: &TuiState,
) {
    let area = modal_area(window_area, 70, 10);

    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let p = Paragraph::new(Text::from(body.to_string()))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(p, area);

    let ok = Span::styled(
        format!("[ {} ]", i18n::t(state.lang(), Key::Ui(UiKey::Close))),
        highlight(state.modal_focus == ButtonFocus::Next),
    );
    let p = Paragraph::new(Text::from(Line::from(vec![ok]))).alignment(Alignment::Right);
    f.render_widget(p, modal_buttons_area(area));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubFormApi;
    use crate::wizard::controller::ControllerOptions;
    use chrono::NaiveDate;

    fn rt() -> Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime")
    }

    fn state_with(stub: StubFormApi) -> (TuiState, Arc<StubFormApi>) {
        let api = Arc::new(stub);
        let controller = WizardController::new(api.clone(), ControllerOptions::default())
            .with_language(Language::En)
            .with_today(NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"));
        (TuiState::new(controller), api)
    }

    fn render(state: &TuiState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| draw(f.size(), f, state)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    fn press(state: &mut TuiState, rt: &Runtime, keys: &[KeyCode]) {
        for k in keys {
            handle_key(state, *k, rt);
        }
    }

    fn type_text(state: &mut TuiState, rt: &Runtime, text: &str) {
        for ch in text.chars() {
            handle_key(state, KeyCode::Char(ch), rt);
        }
    }

    fn fill_all(c: &mut WizardController) {
        c.set_text(FieldName::FullName, "Jean Dupont");
        c.set_text(FieldName::Birthdate, "1985-04-12");
        c.set_text(FieldName::Email, "jean@example.ch");
        c.set_choice(FieldName::Gender, "male");
        c.set_destination(0, DestinationPart::Country, "KE");
        c.set_destination(0, DestinationPart::Departure, "2025-08-01");
        c.set_destination(0, DestinationPart::Return, "2025-08-15");
        c.toggle_option(FieldName::TravelReasons, "tourism");
        c.toggle_option(FieldName::Accommodation, "camping");
        c.toggle_option(FieldName::Activities, "none");
        c.set_choice(FieldName::RuralStay, "yes");
        c.set_text(FieldName::Weight, "80");
        c.set_choice(FieldName::Allergy, "no");
        c.set_choice(FieldName::DengueHistory, "no");
        c.set_choice(FieldName::ChickenpoxDisease, "no");
        c.set_choice(FieldName::ChickenpoxVaccine, "no");
        c.set_choice(FieldName::VaccinationAdverseEvent, "no");
        c.toggle_option(FieldName::Comorbidities, "none");
        c.set_choice(FieldName::Medication, "no");
        c.set_flag(FieldName::NoVaccinationCard, true);
        c.set_flag(FieldName::Consent, true);
    }

    // INTENT: every step renders inside a 100x30 frame with its localized title.
    #[test]
    fn every_step_renders_with_title_and_buttons() {
        let (mut state, _) = state_with(StubFormApi::new());
        for s in Step::ALL {
            state.controller.jump_to(s.number());
            after_step_change(&mut state);
            let screen = render(&state);
            assert!(screen.contains(&i18n::t(Language::En, Key::Step(s))), "{}", screen);
            assert!(screen.contains("Travel medicine consultation"));
            let next = if s == Step::Summary { "[ Submit ]" } else { "[ Next ]" };
            assert!(screen.contains(next), "{}", screen);
        }
    }

    #[test]
    fn typing_edits_the_focused_field() {
        let rt = rt();
        let (mut state, _) = state_with(StubFormApi::new());
        assert_eq!(focused_item(&state), Some(Item::Field(FieldName::FullName)));

        type_text(&mut state, &rt, "Jeanne");
        press(&mut state, &rt, &[KeyCode::Backspace, KeyCode::Left, KeyCode::Char('é')]);
        assert_eq!(state.controller.snapshot().text(FieldName::FullName), "Jeanén");
        assert!(state.controller.is_modified());
    }

    // INTENT: a failed Next keeps the step, shows the banner and focuses the first bad field.
    #[test]
    fn invalid_step_shows_notice_and_errors() {
        let rt = rt();
        let (mut state, _) = state_with(StubFormApi::new());
        type_text(&mut state, &rt, "Jean Dupont");
        press(&mut state, &rt, &[KeyCode::PageDown]);

        assert_eq!(state.controller.step(), Step::Identity);
        assert_eq!(focused_item(&state), Some(Item::Field(FieldName::Birthdate)));
        let screen = render(&state);
        assert!(screen.contains("Please correct the highlighted fields."));
        assert!(screen.contains("This field is required."));
    }

    #[test]
    fn choice_fields_select_with_arrows_and_space() {
        let rt = rt();
        let (mut state, _) = state_with(StubFormApi::new());
        focus_item(&mut state, Item::Field(FieldName::Gender));
        press(&mut state, &rt, &[KeyCode::Right, KeyCode::Char(' ')]);
        assert_eq!(state.controller.snapshot().text(FieldName::Gender), "female");

        state.controller.jump_to(3);
        after_step_change(&mut state);
        assert!(page_items(&state.controller).contains(&Item::Field(FieldName::Pregnant)));
    }

    #[test]
    fn multi_select_none_is_exclusive() {
        let rt = rt();
        let (mut state, _) = state_with(StubFormApi::new());
        state.controller.jump_to(3);
        after_step_change(&mut state);
        focus_item(&mut state, Item::Field(FieldName::Comorbidities));

        // cursor 7 = cancer, reveals the chemotherapy question
        for _ in 0..7 {
            press(&mut state, &rt, &[KeyCode::Right]);
        }
        press(&mut state, &rt, &[KeyCode::Char(' ')]);
        assert!(page_items(&state.controller).contains(&Item::Field(FieldName::Chemotherapy)));

        for _ in 0..7 {
            press(&mut state, &rt, &[KeyCode::Left]);
        }
        press(&mut state, &rt, &[KeyCode::Enter]);
        assert_eq!(
            state.controller.snapshot().multi(FieldName::Comorbidities),
            &["none".to_string()]
        );
        assert!(!page_items(&state.controller).contains(&Item::Field(FieldName::Chemotherapy)));
    }

    // INTENT: country autocomplete writes the ISO code, the input shows the localized name.
    #[test]
    fn country_autocomplete_selects_code() {
        let rt = rt();
        let (mut state, _) = state_with(StubFormApi::new());
        state.controller.jump_to(2);
        after_step_change(&mut state);
        assert_eq!(focused_item(&state), Some(Item::DestCountry(0)));

        type_text(&mut state, &rt, "switz");
        assert!(state.autocomplete.is_open());
        assert!(render(&state).contains("Switzerland"));

        press(&mut state, &rt, &[KeyCode::Enter]);
        assert_eq!(state.controller.destinations()[0].country, "CH");
        assert_eq!(state.input.value, "Switzerland");
        assert!(!state.autocomplete.is_open());

        // Escape closes the list without leaving the page.
        press(&mut state, &rt, &[KeyCode::Backspace, KeyCode::Esc]);
        assert!(state.modal.is_none());
        assert_eq!(state.controller.destinations()[0].country, "CH");
    }

    #[test]
    fn destination_rows_can_be_added_and_removed() {
        let rt = rt();
        let (mut state, _) = state_with(StubFormApi::new());
        state.controller.jump_to(2);
        after_step_change(&mut state);

        focus_item(&mut state, Item::AddDestination);
        press(&mut state, &rt, &[KeyCode::Enter]);
        assert_eq!(state.controller.destinations().len(), 2);
        assert_eq!(focused_item(&state), Some(Item::DestCountry(1)));

        press(&mut state, &rt, &[KeyCode::Down]);
        type_text(&mut state, &rt, "2025-09-01");
        assert_eq!(state.controller.destinations()[1].departure, "2025-09-01");

        focus_item(&mut state, Item::RemoveDestination(0));
        press(&mut state, &rt, &[KeyCode::Enter]);
        assert_eq!(state.controller.destinations().len(), 1);
        assert_eq!(state.controller.destinations()[0].departure, "2025-09-01");
    }

    #[test]
    fn attach_file_by_path() {
        let rt = rt();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("carnet.pdf");
        std::fs::write(&path, b"%PDF-1.4").expect("write");

        let (mut state, _) = state_with(StubFormApi::new());
        state.controller.jump_to(4);
        after_step_change(&mut state);
        focus_item(&mut state, Item::AttachPath);
        type_text(&mut state, &rt, &path.display().to_string());
        press(&mut state, &rt, &[KeyCode::Enter]);

        assert_eq!(state.controller.attachments().len(), 1);
        assert!(page_items(&state.controller).contains(&Item::Attachment(0)));

        type_text(&mut state, &rt, "/does/not/exist.pdf");
        press(&mut state, &rt, &[KeyCode::Enter]);
        assert!(state.notice.is_some());
        assert_eq!(state.controller.attachments().len(), 1);
    }

    #[test]
    fn f2_cycles_language() {
        let rt = rt();
        let (mut state, _) = state_with(StubFormApi::new());
        press(&mut state, &rt, &[KeyCode::F(2)]);
        assert_eq!(state.lang(), Language::En.next());
        assert!(render(&state).contains(Language::En.next().native_name()));
    }

    #[test]
    fn escape_asks_before_quitting() {
        let rt = rt();
        let (mut state, _) = state_with(StubFormApi::new());
        press(&mut state, &rt, &[KeyCode::Esc]);
        assert_eq!(state.modal, Some(Modal::ConfirmCancel));
        assert!(render(&state).contains("Leave the questionnaire?"));

        press(&mut state, &rt, &[KeyCode::Enter]);
        assert!(state.modal.is_none());
        assert!(!state.quit, "No is the default");

        press(&mut state, &rt, &[KeyCode::Esc, KeyCode::Left, KeyCode::Enter]);
        assert!(state.quit);
    }

    #[test]
    fn next_button_advances_and_saves_draft() {
        let rt = rt();
        let (mut state, api) = state_with(StubFormApi::new());
        let entry = EntryParams {
            token: Some(crate::wizard::entry::EntryToken::Invite("abc123".into())),
            visible_url: None,
        };
        rt.block_on(state.controller.start_session(&entry));
        fill_all(&mut state.controller);

        state.focus = FocusTarget::Button(ButtonFocus::Next);
        press(&mut state, &rt, &[KeyCode::Enter]);
        assert_eq!(state.controller.step(), Step::Travel);
        assert_eq!(StubFormApi::calls(&api.save_calls), 1);
        assert_eq!(focused_item(&state), Some(Item::DestCountry(0)));
    }

    // INTENT: a failed submission shows the server message and the user can retry.
    #[test]
    fn submit_failure_shows_message_and_allows_retry() {
        let rt = rt();
        let mut stub = StubFormApi::new();
        stub.submit = Err("Database unavailable".into());
        let (mut state, api) = state_with(stub);
        let entry = EntryParams {
            token: Some(crate::wizard::entry::EntryToken::Invite("abc123".into())),
            visible_url: None,
        };
        rt.block_on(state.controller.start_session(&entry));
        fill_all(&mut state.controller);
        state.controller.jump_to(6);
        after_step_change(&mut state);

        press(&mut state, &rt, &[KeyCode::PageDown]);
        match &state.modal {
            Some(Modal::Message { body, quit_on_close, .. }) => {
                assert!(body.contains("Database unavailable"), "{}", body);
                assert!(!quit_on_close);
            }
            other => panic!("expected message modal, got {:?}", other),
        }
        press(&mut state, &rt, &[KeyCode::Enter]);
        assert!(!state.quit);
        assert!(!state.controller.is_submitting());

        press(&mut state, &rt, &[KeyCode::PageDown]);
        assert_eq!(StubFormApi::calls(&api.submit_calls), 2);
    }

    #[test]
    fn successful_submit_thanks_and_closes() {
        let rt = rt();
        let (mut state, _) = state_with(StubFormApi::new());
        let entry = EntryParams {
            token: Some(crate::wizard::entry::EntryToken::Invite("abc123".into())),
            visible_url: None,
        };
        rt.block_on(state.controller.start_session(&entry));
        fill_all(&mut state.controller);
        state.controller.jump_to(6);
        after_step_change(&mut state);
        assert!(state.controller.summary().is_some());

        press(&mut state, &rt, &[KeyCode::PageDown]);
        assert!(state.controller.is_completed());
        assert!(render(&state).contains("Thank you!"));
        press(&mut state, &rt, &[KeyCode::Enter]);
        assert!(state.quit);
    }

    #[test]
    fn denied_access_quits_after_message() {
        let rt = rt();
        let (mut state, _) = state_with(StubFormApi::new());
        let start = rt.block_on(state.controller.start_session(&EntryParams::default()));
        assert!(matches!(start, SessionStart::Denied { .. }));
        show_access_denied(&mut state, Some("https://clinic.example.org"));
        assert!(render(&state).contains("This link is invalid or has expired."));
        press(&mut state, &rt, &[KeyCode::Esc]);
        assert!(state.quit);
    }

    #[test]
    fn smoke_renders_every_target() {
        let settings = IntakeSettings::load(None).expect("settings");
        for target in ["identity", "travel", "3", "vaccination", "referral", "summary", "denied", "bogus"] {
            smoke(&settings, target).expect("smoke");
        }
    }

    #[test]
    fn text_input_handles_multibyte_cursor() {
        let mut input = TextInput::default();
        input.set("Zürich");
        assert_eq!(input.handle_key(KeyCode::Home), Some(false));
        input.handle_key(KeyCode::Right);
        input.handle_key(KeyCode::Right);
        assert_eq!(input.handle_key(KeyCode::Delete), Some(true));
        assert_eq!(input.value, "Zürich".replacen('r', "", 1));
        assert_eq!(input.display(true), "Zü|ich");
        assert_eq!(input.handle_key(KeyCode::F(5)), None);
    }
}
