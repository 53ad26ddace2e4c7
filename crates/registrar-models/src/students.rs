//! Student domain models and DTOs.
//!
//! Field names follow the record store's schema (`Id`, `firstName`,
//! `enrollmentDate`, ...), so these types serialize straight into the
//! store's request payloads.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use registrar_core::serde::{deserialize_optional_date, empty_string_as_none, null_as_default};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Identifier assigned by the record store.
pub type StudentId = i64;

/// Per-field validation messages, one per failing field.
pub type FieldErrors = BTreeMap<StudentField, String>;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 2] = [StudentStatus::Active, StudentStatus::Inactive];

    pub fn as_str(self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StudentStatus::Active => "Active",
            StudentStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(StudentStatus::Active),
            "inactive" => Ok(StudentStatus::Inactive),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum StudentYear {
    #[default]
    Freshman,
    Sophomore,
    Junior,
    Senior,
}

impl StudentYear {
    pub const ALL: [StudentYear; 4] = [
        StudentYear::Freshman,
        StudentYear::Sophomore,
        StudentYear::Junior,
        StudentYear::Senior,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StudentYear::Freshman => "Freshman",
            StudentYear::Sophomore => "Sophomore",
            StudentYear::Junior => "Junior",
            StudentYear::Senior => "Senior",
        }
    }
}

impl fmt::Display for StudentYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentYear {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        StudentYear::ALL
            .into_iter()
            .find(|year| year.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown year '{s}'"))
    }
}

/// Student attributes that can be sorted on or carry a validation error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum StudentField {
    FirstName,
    LastName,
    Email,
    Phone,
    Dob,
    Program,
    EnrollmentDate,
    Status,
    Year,
}

impl StudentField {
    pub const ALL: [StudentField; 9] = [
        StudentField::FirstName,
        StudentField::LastName,
        StudentField::Email,
        StudentField::Phone,
        StudentField::Dob,
        StudentField::Program,
        StudentField::EnrollmentDate,
        StudentField::Status,
        StudentField::Year,
    ];

    /// Name of the field in the record store schema.
    pub fn as_str(self) -> &'static str {
        match self {
            StudentField::FirstName => "firstName",
            StudentField::LastName => "lastName",
            StudentField::Email => "email",
            StudentField::Phone => "phone",
            StudentField::Dob => "dob",
            StudentField::Program => "program",
            StudentField::EnrollmentDate => "enrollmentDate",
            StudentField::Status => "status",
            StudentField::Year => "year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StudentField::FirstName => "First Name",
            StudentField::LastName => "Last Name",
            StudentField::Email => "Email",
            StudentField::Phone => "Phone",
            StudentField::Dob => "Date of Birth",
            StudentField::Program => "Program",
            StudentField::EnrollmentDate => "Enrollment Date",
            StudentField::Status => "Status",
            StudentField::Year => "Year",
        }
    }

    /// Resolves a store name (`firstName`) or a Rust field name (`first_name`).
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        StudentField::ALL
            .into_iter()
            .find(|field| field.as_str().to_ascii_lowercase() == normalized)
    }
}

impl fmt::Display for StudentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StudentField::from_name(s.trim()).ok_or_else(|| format!("unknown field '{s}'"))
    }
}

/// A student record as returned by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "Id", alias = "id")]
    pub id: StudentId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub dob: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub program: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: StudentStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: StudentYear,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// First letter of the first and last name, e.g. `JD`.
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|name| name.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Age in whole years on `today`, if the date of birth is known.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let dob = self.dob?;
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }
}

/// Form values for creating or updating a student.
///
/// `id` is absent on create and required on update. Dates stay optional
/// here so a half-filled form can be represented and rejected by
/// validation instead of by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    #[serde(
        rename = "Id",
        alias = "id",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<StudentId>,
    #[validate(custom(function = "validate_first_name"))]
    #[serde(default)]
    pub first_name: String,
    #[validate(custom(function = "validate_last_name"))]
    #[serde(default)]
    pub last_name: String,
    #[validate(custom(function = "validate_email"))]
    #[serde(default)]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    #[serde(default)]
    pub phone: String,
    #[validate(required(message = "Date of birth is required"))]
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub dob: Option<NaiveDate>,
    #[validate(custom(function = "validate_program"))]
    #[serde(default)]
    pub program: String,
    #[validate(required(message = "Enrollment date is required"))]
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: StudentStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: StudentYear,
}

impl StudentInput {
    /// Runs validation and returns one message per failing field.
    pub fn field_errors(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|errors| to_field_errors(&errors))
    }

    /// Identifier usable for an update; zero counts as absent.
    pub fn record_id(&self) -> Option<StudentId> {
        self.id.filter(|id| *id != 0)
    }

    #[must_use]
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: StudentId) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<&Student> for StudentInput {
    fn from(student: &Student) -> Self {
        Self {
            id: Some(student.id),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            dob: student.dob,
            program: student.program.clone(),
            enrollment_date: student.enrollment_date,
            status: student.status,
            year: student.year,
        }
    }
}

/// Flattens `ValidationErrors` into the first message of each field.
pub fn to_field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .filter_map(|(name, errs)| {
            let field = StudentField::from_name(name)?;
            let message = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{} is invalid", field.label()));
            Some((field, message))
        })
        .collect()
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    required(value, "First name is required")
}

fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    required(value, "Last name is required")
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    required(value, "Phone number is required")
}

fn validate_program(value: &str) -> Result<(), ValidationError> {
    required(value, "Program is required")
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    required(value, "Email is required")?;
    if !EMAIL_PATTERN.is_match(value) {
        return Err(ValidationError::new("email").with_message(Cow::Borrowed("Email is invalid")));
    }
    Ok(())
}
