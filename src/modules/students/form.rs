use std::future::Future;

use registrar_core::serde::parse_date;
use registrar_models::{FieldErrors, Student, StudentField, StudentId, StudentInput};
use serde::Deserialize;

/// Raw values of the add/edit form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentFormFields {
    #[serde(rename = "Id", alias = "id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub program: String,
    pub enrollment_date: String,
    pub status: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Validation failed; nothing was sent.
    Invalid,
    Submitted(T),
}

/// Values and per-field errors of the student form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentFormState {
    pub values: StudentInput,
    pub errors: FieldErrors,
}

impl StudentFormState {
    pub fn for_create() -> Self {
        Self::default()
    }

    /// Prefilled from `student`, keeping its identifier.
    pub fn for_edit(student: &Student) -> Self {
        Self {
            values: StudentInput::from(student),
            errors: FieldErrors::new(),
        }
    }

    pub fn from_fields(fields: &StudentFormFields) -> Self {
        let mut form = Self::for_create();
        form.values.id = fields.id.trim().parse::<StudentId>().ok();
        for field in StudentField::ALL {
            let raw = match field {
                StudentField::FirstName => &fields.first_name,
                StudentField::LastName => &fields.last_name,
                StudentField::Email => &fields.email,
                StudentField::Phone => &fields.phone,
                StudentField::Dob => &fields.dob,
                StudentField::Program => &fields.program,
                StudentField::EnrollmentDate => &fields.enrollment_date,
                StudentField::Status => &fields.status,
                StudentField::Year => &fields.year,
            };
            form.set_value(field, raw);
        }
        form
    }

    pub fn is_editing(&self) -> bool {
        self.values.record_id().is_some()
    }

    pub fn error(&self, field: StudentField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Stores `raw` into `field` and clears that field's error.
    ///
    /// Unparseable dates become empty; unknown status or year values keep
    /// the previous selection.
    pub fn set_value(&mut self, field: StudentField, raw: &str) {
        let values = &mut self.values;
        match field {
            StudentField::FirstName => values.first_name = raw.to_string(),
            StudentField::LastName => values.last_name = raw.to_string(),
            StudentField::Email => values.email = raw.to_string(),
            StudentField::Phone => values.phone = raw.to_string(),
            StudentField::Program => values.program = raw.to_string(),
            StudentField::Dob => values.dob = parse_date(raw.trim()).ok(),
            StudentField::EnrollmentDate => values.enrollment_date = parse_date(raw.trim()).ok(),
            StudentField::Status => {
                if let Ok(status) = raw.parse() {
                    values.status = status;
                }
            }
            StudentField::Year => {
                if let Ok(year) = raw.parse() {
                    values.year = year;
                }
            }
        }
        self.errors.remove(&field);
    }

    /// Replaces the error map with the current validation result.
    pub fn validate(&mut self) -> bool {
        match self.values.field_errors() {
            Ok(()) => {
                self.errors.clear();
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    /// Validates, then hands `(values, is_editing)` to `handler`.
    ///
    /// Errors stay attached after a successful submission until
    /// [`reset`](Self::reset) is called.
    pub async fn submit<F, Fut, T>(&mut self, handler: F) -> SubmitOutcome<T>
    where
        F: FnOnce(StudentInput, bool) -> Fut,
        Fut: Future<Output = T>,
    {
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }
        let editing = self.is_editing();
        SubmitOutcome::Submitted(handler(self.values.clone(), editing).await)
    }

    pub fn reset(&mut self) {
        *self = Self::for_create();
    }
}
