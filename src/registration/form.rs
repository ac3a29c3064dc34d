use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

pub const GRADES: &[&str] = &["6", "7", "8", "9", "10", "11", "12"];

pub const STATES: &[&str] = &[
    "Odisha",
    "Andhra Pradesh",
    "Bihar",
    "Chhattisgarh",
    "Jharkhand",
    "Madhya Pradesh",
    "Other",
];

pub const MEDIUMS: &[&str] = &["English", "Hindi", "Odia", "Telugu", "Other"];

/// Student registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentForm {
    pub first_name: String,
    pub last_name: String,
    pub grade: String,
    pub school: String,
    /// Date of birth, `YYYY-MM-DD`
    pub dob: String,
    pub state: String,
    pub medium: String,
    pub district: String,
    pub udise_code: String,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            grade: String::new(),
            school: String::new(),
            dob: String::new(),
            state: STATES[0].to_string(),
            medium: MEDIUMS[0].to_string(),
            district: String::new(),
            udise_code: String::new(),
        }
    }
}

/// Form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Grade,
    Dob,
    UdiseCode,
    School,
    District,
    State,
    Medium,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::FirstName,
        Field::LastName,
        Field::Grade,
        Field::Dob,
        Field::UdiseCode,
        Field::School,
        Field::District,
        Field::State,
        Field::Medium,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Grade => "Grade",
            Field::Dob => "Date of Birth",
            Field::UdiseCode => "UDISE Code",
            Field::School => "School Name",
            Field::District => "District",
            Field::State => "State",
            Field::Medium => "Medium of Instruction",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Field::FirstName | Field::LastName | Field::Grade | Field::Dob | Field::UdiseCode
        )
    }

    /// Options for select-style fields
    pub fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            Field::Grade => Some(GRADES),
            Field::State => Some(STATES),
            Field::Medium => Some(MEDIUMS),
            _ => None,
        }
    }

    pub fn next(self) -> Field {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Field {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields. Missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Date of birth must be in YYYY-MM-DD format")]
    InvalidDate,
    #[error("{field} must be one of: {}", .choices.join(", "))]
    InvalidChoice {
        field: &'static str,
        choices: &'static [&'static str],
    },
}

fn date_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").ok())
        .as_ref()
}

impl StudentForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Grade => &self.grade,
            Field::Dob => &self.dob,
            Field::UdiseCode => &self.udise_code,
            Field::School => &self.school,
            Field::District => &self.district,
            Field::State => &self.state,
            Field::Medium => &self.medium,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Grade => &mut self.grade,
            Field::Dob => &mut self.dob,
            Field::UdiseCode => &mut self.udise_code,
            Field::School => &mut self.school,
            Field::District => &mut self.district,
            Field::State => &mut self.state,
            Field::Medium => &mut self.medium,
        }
    }

    /// School and district lock once filled from the registry
    pub fn is_editable(&self, field: Field) -> bool {
        match field {
            Field::School | Field::District => self.get(field).is_empty(),
            _ => true,
        }
    }

    /// Step a select-style field through its choices, wrapping around.
    /// An unset field starts at the first choice.
    pub fn cycle_choice(&mut self, field: Field, forward: bool) {
        let Some(choices) = field.choices() else {
            return;
        };

        let value = self.get_mut(field);
        let next = match choices.iter().position(|c| *c == value.as_str()) {
            Some(idx) if forward => (idx + 1) % choices.len(),
            Some(idx) => (idx + choices.len() - 1) % choices.len(),
            None => 0,
        };
        *value = choices[next].to_string();
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let missing: Vec<&'static str> = Field::ALL
            .iter()
            .filter(|f| f.is_required() && self.get(**f).trim().is_empty())
            .map(|f| f.label())
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }

        if !date_pattern().is_some_and(|re| re.is_match(&self.dob)) {
            return Err(FormError::InvalidDate);
        }

        for field in [Field::Grade, Field::State, Field::Medium] {
            if let Some(choices) = field.choices()
                && !choices.contains(&self.get(field))
            {
                return Err(FormError::InvalidChoice {
                    field: field.label(),
                    choices,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> StudentForm {
        StudentForm {
            first_name: "Asha".to_string(),
            last_name: "Das".to_string(),
            grade: "8".to_string(),
            dob: "2012-04-09".to_string(),
            udise_code: "21180200303".to_string(),
            ..StudentForm::default()
        }
    }

    #[test]
    fn test_defaults() {
        let form = StudentForm::default();
        assert_eq!(form.state, "Odisha");
        assert_eq!(form.medium, "English");
        assert!(form.grade.is_empty());
    }

    #[test]
    fn test_validate_complete_form() {
        assert_eq!(complete().validate(), Ok(()));
    }

    #[test]
    fn test_validate_missing_fields() {
        let form = StudentForm {
            first_name: "Asha".to_string(),
            last_name: "  ".to_string(),
            ..StudentForm::default()
        };

        assert_eq!(
            form.validate(),
            Err(FormError::MissingFields(vec![
                "Last Name",
                "Grade",
                "Date of Birth",
                "UDISE Code"
            ]))
        );
    }

    #[test]
    fn test_school_and_district_are_optional() {
        let form = complete();
        assert!(form.school.is_empty());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_validate_date_format() {
        for bad in ["09-04-2012", "2012/04/09", "2012-13-01", "2012-04-32", "20120409"] {
            let form = StudentForm {
                dob: bad.to_string(),
                ..complete()
            };
            assert_eq!(form.validate(), Err(FormError::InvalidDate), "{}", bad);
        }
    }

    #[test]
    fn test_validate_choice() {
        let form = StudentForm {
            grade: "5".to_string(),
            ..complete()
        };
        assert!(matches!(
            form.validate(),
            Err(FormError::InvalidChoice { field: "Grade", .. })
        ));
    }

    #[test]
    fn test_missing_fields_message() {
        let err = FormError::MissingFields(vec!["Grade", "UDISE Code"]);
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields. Missing: Grade, UDISE Code"
        );
    }

    #[test]
    fn test_cycle_choice() {
        let mut form = StudentForm::default();

        form.cycle_choice(Field::Grade, true);
        assert_eq!(form.grade, "6");
        form.cycle_choice(Field::Grade, false);
        assert_eq!(form.grade, "12");
        form.cycle_choice(Field::Grade, true);
        assert_eq!(form.grade, "6");

        form.cycle_choice(Field::Medium, true);
        assert_eq!(form.medium, "Hindi");

        // Text fields are untouched
        form.cycle_choice(Field::FirstName, true);
        assert!(form.first_name.is_empty());
    }

    #[test]
    fn test_auto_filled_fields_lock() {
        let mut form = StudentForm::default();
        assert!(form.is_editable(Field::School));

        form.school = "UGME School".to_string();
        assert!(!form.is_editable(Field::School));
        assert!(form.is_editable(Field::District));
        assert!(form.is_editable(Field::UdiseCode));
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(Field::FirstName.next(), Field::LastName);
        assert_eq!(Field::Medium.next(), Field::FirstName);
        assert_eq!(Field::FirstName.prev(), Field::Medium);
    }
}
