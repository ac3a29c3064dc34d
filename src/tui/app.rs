use crate::directory::{
    LOAD_WARNING, LoadedDirectory, ParseMode, SchoolDirectory, SchoolRecord, spawn_load,
};
use crate::registration::{CodeInputOutcome, Field, LookupPolicy, Registration, StudentForm};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Editing form fields
    Form,
    /// Moving through search results under the code field
    Results,
    Help,
}

/// Directory loading state for background loading
pub enum LoadState {
    /// Registry is loading in background
    Loading(Receiver<Result<LoadedDirectory, String>>),
    /// Registry loaded (possibly empty)
    Ready,
    /// Loading failed, the directory stays empty
    Failed,
}

/// Application state
pub struct App {
    pub data_path: PathBuf,
    directory: SchoolDirectory,
    pub registration: Registration,
    pub focus: Field,
    pub mode: Mode,
    /// Previous mode before entering help (to return to)
    pub previous_mode: Mode,
    /// Highlighted search result
    pub selected: usize,
    pub status_message: String,
    /// Non-fatal load warning, kept visible until the user dismisses it
    pub warning: Option<String>,
    load_state: LoadState,
    /// Completed form, set once submit validates
    pub submitted: Option<StudentForm>,
}

impl App {
    /// Create the app and start loading the registry in the background
    pub fn new(data_path: PathBuf, parse_mode: ParseMode, policy: LookupPolicy) -> Self {
        let rx = spawn_load(data_path.clone(), parse_mode);

        let mut app = Self::with_directory(SchoolDirectory::default(), policy);
        app.data_path = data_path;
        app.load_state = LoadState::Loading(rx);
        app.status_message = "Loading schools...".to_string();
        app
    }

    /// Create the app around an already loaded directory
    pub fn with_directory(directory: SchoolDirectory, policy: LookupPolicy) -> Self {
        let status_message = format!("{} schools loaded", directory.len());

        Self {
            data_path: PathBuf::new(),
            directory,
            registration: Registration::new(policy),
            focus: Field::FirstName,
            mode: Mode::Form,
            previous_mode: Mode::Form,
            selected: 0,
            status_message,
            warning: None,
            load_state: LoadState::Ready,
            submitted: None,
        }
    }

    /// Check for background load completion (call this in event loop)
    pub fn poll_directory_load(&mut self) {
        // Take ownership of the state temporarily
        let current_state = std::mem::replace(&mut self.load_state, LoadState::Ready);

        match current_state {
            LoadState::Loading(rx) => match rx.try_recv() {
                Ok(Ok(loaded)) => {
                    let rejected = loaded.rejected;
                    self.directory = loaded.directory;
                    self.status_message = if rejected > 0 {
                        format!(
                            "{} schools loaded ({} rows skipped, see log)",
                            self.directory.len(),
                            rejected
                        )
                    } else {
                        format!("{} schools loaded", self.directory.len())
                    };
                    self.load_state = LoadState::Ready;

                    // Re-run lookup for a code typed while loading
                    if !self.registration.form.udise_code.is_empty() {
                        let code = self.registration.form.udise_code.clone();
                        self.apply_code(&code);
                    }
                }
                Ok(Err(e)) => {
                    warn!("school directory {} unavailable: {}", self.data_path.display(), e);
                    self.fail_load();
                }
                Err(TryRecvError::Empty) => {
                    // Still loading, put the receiver back
                    self.load_state = LoadState::Loading(rx);
                }
                Err(TryRecvError::Disconnected) => {
                    warn!("school directory load thread terminated unexpectedly");
                    self.fail_load();
                }
            },
            other => {
                self.load_state = other;
            }
        }
    }

    fn fail_load(&mut self) {
        self.warning = Some(LOAD_WARNING.to_string());
        self.status_message = "Schools database unavailable".to_string();
        self.load_state = LoadState::Failed;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading(_))
    }

    pub fn load_failed(&self) -> bool {
        matches!(self.load_state, LoadState::Failed)
    }

    pub fn directory_len(&self) -> usize {
        self.directory.len()
    }

    pub fn results(&self) -> &[SchoolRecord] {
        &self.registration.results
    }

    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }

    fn apply_code(&mut self, code: &str) {
        let outcome = self.registration.enter_code(&self.directory, code);
        self.selected = 0;

        match outcome {
            CodeInputOutcome::AutoFilled => {
                info!("auto-filled school for code {}", self.registration.form.udise_code);
                self.status_message = format!("School found: {}", self.registration.form.school);
                self.mode = Mode::Form;
            }
            CodeInputOutcome::Searched(n) => {
                self.status_message = format!("{} matching schools", n);
            }
            CodeInputOutcome::Cleared => {
                if self.mode == Mode::Results {
                    self.mode = Mode::Form;
                }
            }
        }
    }

    /// Replace the focused text field's value, honouring read-only fields
    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let field = self.focus;
        if field.choices().is_some() {
            return;
        }
        if !self.registration.form.is_editable(field) {
            self.status_message = format!("{} is filled from the schools database", field.label());
            return;
        }

        if field == Field::UdiseCode {
            let mut code = self.registration.form.udise_code.clone();
            edit(&mut code);
            self.apply_code(&code);
        } else {
            edit(self.registration.form.get_mut(field));
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.edit_focused(|value| value.push(c));
    }

    pub fn backspace(&mut self) {
        self.edit_focused(|value| {
            value.pop();
        });
    }

    /// Delete word backward from the focused field (Ctrl+w)
    pub fn delete_word(&mut self) {
        self.edit_focused(|value| {
            // Remove trailing whitespace first
            while value.ends_with(' ') {
                value.pop();
            }
            // Remove word characters
            while !value.is_empty() && !value.ends_with(' ') {
                value.pop();
            }
        });
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.mode = Mode::Form;
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
        self.mode = Mode::Form;
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        self.registration.form.cycle_choice(self.focus, forward);
    }

    /// Move from the code field into its result list
    pub fn enter_results(&mut self) -> bool {
        if self.focus == Field::UdiseCode && !self.registration.results.is_empty() {
            self.mode = Mode::Results;
            self.selected = 0;
            true
        } else {
            false
        }
    }

    pub fn leave_results(&mut self) {
        if self.mode == Mode::Results {
            self.mode = Mode::Form;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.registration.results.len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Fill the form from the highlighted result
    pub fn confirm_selection(&mut self) {
        if self.registration.select_result(self.selected) {
            self.status_message = format!("School selected: {}", self.registration.form.school);
        }
        self.selected = 0;
        self.mode = Mode::Form;
    }

    /// Validate the form; on success the app is done
    pub fn submit(&mut self) -> bool {
        match self.registration.submit() {
            Ok(form) => {
                info!("registration completed for {} {}", form.first_name, form.last_name);
                self.submitted = Some(form);
                true
            }
            Err(e) => {
                self.status_message = e.to_string();
                false
            }
        }
    }

    pub fn show_help(&mut self) {
        if self.mode != Mode::Help {
            self.previous_mode = self.mode;
            self.mode = Mode::Help;
        }
    }

    pub fn hide_help(&mut self) {
        if self.mode == Mode::Help {
            self.mode = self.previous_mode;
        }
    }
}
