use super::form::{FormError, StudentForm};
use crate::directory::{DEFAULT_RESULT_LIMIT, SchoolDirectory, SchoolRecord};
use log::debug;
use serde::{Deserialize, Serialize};

/// When typing into the code field triggers directory queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupPolicy {
    /// Minimum characters before search-as-you-type kicks in
    pub search_trigger_len: usize,
    /// Input length at which an exact code lookup is attempted
    pub exact_lookup_len: usize,
    /// Maximum search results shown
    pub result_limit: usize,
}

impl Default for LookupPolicy {
    fn default() -> Self {
        Self {
            search_trigger_len: 3,
            exact_lookup_len: 11,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

/// What a code keystroke did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeInputOutcome {
    /// Below the search threshold or no directory, results cleared
    Cleared,
    /// Search ran and produced this many results
    Searched(usize),
    /// Exact code hit, school and district filled in
    AutoFilled,
}

/// Registration form state driven by code input
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub form: StudentForm,
    /// Current search results under the code field
    pub results: Vec<SchoolRecord>,
    pub policy: LookupPolicy,
}

impl Registration {
    pub fn new(policy: LookupPolicy) -> Self {
        Self {
            form: StudentForm::default(),
            results: Vec::new(),
            policy,
        }
    }

    /// Apply the full contents of the code field after a keystroke
    pub fn enter_code(&mut self, directory: &SchoolDirectory, input: &str) -> CodeInputOutcome {
        self.form.udise_code = input.to_string();
        let len = input.chars().count();

        let mut outcome = if len >= self.policy.search_trigger_len && !directory.is_empty() {
            self.results = directory
                .search_with_limit(input, self.policy.result_limit)
                .into_iter()
                .cloned()
                .collect();
            CodeInputOutcome::Searched(self.results.len())
        } else {
            self.results.clear();
            CodeInputOutcome::Cleared
        };

        if len == self.policy.exact_lookup_len
            && let Some(school) = directory.find_by_exact_code(input)
        {
            debug!("auto-filling school {} for code {}", school.school_name, input);
            self.select_school(school);
            outcome = CodeInputOutcome::AutoFilled;
        }

        outcome
    }

    /// Fill school, district and code from a chosen record
    pub fn select_school(&mut self, school: &SchoolRecord) {
        self.form.school = school.school_name.clone();
        self.form.district = school.district.clone();
        self.form.udise_code = school.udise_code.clone();
        self.results.clear();
    }

    /// Pick one of the current search results by position
    pub fn select_result(&mut self, index: usize) -> bool {
        match self.results.get(index).cloned() {
            Some(school) => {
                self.select_school(&school);
                true
            }
            None => false,
        }
    }

    /// Validate and hand back the completed form
    pub fn submit(&self) -> Result<StudentForm, FormError> {
        self.form.validate()?;
        Ok(self.form.clone())
    }
}
