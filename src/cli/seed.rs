//! Fake student generation for development stores.

use std::time::Instant;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use registrar_models::{StudentInput, StudentStatus, StudentYear};
use tracing::warn;

use crate::modules::students::service::StudentService;

const PROGRAMS: [&str; 8] = [
    "Computer Science",
    "Biology",
    "History",
    "Mathematics",
    "Economics",
    "Psychology",
    "Mechanical Engineering",
    "English Literature",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub failed: usize,
}

fn random_date(rng: &mut impl Rng, years: std::ops::RangeInclusive<i32>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        rng.gen_range(years),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28),
    )
}

fn fake_student(index: usize) -> StudentInput {
    let mut rng = rand::thread_rng();
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let email = format!(
        "{}.{}{}@example.edu",
        first_name.to_lowercase().replace(' ', ""),
        last_name.to_lowercase().replace(' ', ""),
        index
    );
    let status = if rng.gen_bool(0.8) {
        StudentStatus::Active
    } else {
        StudentStatus::Inactive
    };

    StudentInput {
        id: None,
        first_name,
        last_name,
        email,
        phone: PhoneNumber().fake(),
        dob: random_date(&mut rng, 1995..=2006),
        program: PROGRAMS.choose(&mut rng).copied().unwrap_or("History").to_string(),
        enrollment_date: random_date(&mut rng, 2019..=2025),
        status,
        year: StudentYear::ALL.choose(&mut rng).copied().unwrap_or_default(),
    }
}

/// Generates `count` students in parallel.
pub fn generate_students(count: usize) -> Vec<StudentInput> {
    (0..count).into_par_iter().map(fake_student).collect()
}

/// Creates `count` fake students through the service.
pub async fn seed_students(service: &StudentService, count: usize) -> Result<SeedReport> {
    if !service.is_available() {
        bail!("Record store client is not configured");
    }

    let start_time = Instant::now();
    println!("🌱 Seeding {count} students...");

    let students = generate_students(count);
    println!("   ✓ Generated {} students in {:?}", students.len(), start_time.elapsed());

    let mut report = SeedReport::default();
    for student in students {
        let response = service.create_student(student).await;
        if response.success {
            report.created += 1;
        } else {
            warn!(error = response.error_message(), "Failed to seed student");
            report.failed += 1;
        }
    }

    println!(
        "\n✅ Seeding complete! Created {} students ({} failed) in {:?}",
        report.created,
        report.failed,
        start_time.elapsed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_state;
    use validator::Validate;

    #[test]
    fn test_generated_students_pass_validation() {
        let students = generate_students(25);
        assert_eq!(students.len(), 25);
        for student in &students {
            assert!(student.validate().is_ok(), "{student:?}");
            assert!(student.id.is_none());
        }
    }

    #[tokio::test]
    async fn test_seed_creates_records() {
        let (client, state) = memory_state();
        let report = seed_students(&state.students, 5).await.unwrap();
        assert_eq!(report, SeedReport { created: 5, failed: 0 });
        assert_eq!(client.len("student"), 5);
    }

    #[tokio::test]
    async fn test_seed_requires_client() {
        let service = StudentService::unavailable();
        assert!(seed_students(&service, 1).await.is_err());
    }
}
