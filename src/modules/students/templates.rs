use chrono::NaiveDate;
use maud::{Markup, html};
use registrar_models::{
    SortDirection, Student, StudentField, StudentListQuery, StudentStatus, StudentYear,
};

use crate::modules::students::form::StudentFormState;
use crate::modules::students::list::ListState;
use crate::utils::format::{age, long_date, or_placeholder, short_date};
use crate::views::components::{
    avatar, empty_state, input_field, pagination, select_field, status_badge, title,
};

const PAGE_SIZES: [u64; 4] = [10, 25, 50, 100];

fn sort_link(state: &ListState, field: StudentField, label: &str) -> Markup {
    let filters = state.filters.clone().sorted_by(field);
    let query = StudentListQuery::from_state(
        &filters,
        state.pagination.current_page,
        state.pagination.limit,
    );
    let indicator = match (state.filters.sort_field == field, state.filters.sort_direction) {
        (false, _) => "",
        (true, SortDirection::Asc) => " ↑",
        (true, SortDirection::Desc) => " ↓",
    };
    html! {
        a href={ "/students?" (query.to_query_string()) } class="hover:underline" {
            (label) (indicator)
        }
    }
}

fn filter_bar(state: &ListState) -> Markup {
    let filters = &state.filters;
    let status = filters.status.map(StudentStatus::as_str).unwrap_or_default();
    let year = filters.year.map(StudentYear::as_str).unwrap_or_default();
    let mut status_options = vec![("", "All Status")];
    status_options.extend(StudentStatus::ALL.iter().map(|s| (s.as_str(), s.label())));
    let mut year_options = vec![("", "All Years")];
    year_options.extend(StudentYear::ALL.iter().map(|y| (y.as_str(), y.as_str())));
    let limit = state.pagination.limit.to_string();
    let sizes: Vec<(String, String)> = PAGE_SIZES
        .iter()
        .map(|size| (size.to_string(), format!("{size} per page")))
        .collect();
    let size_options: Vec<(&str, &str)> = sizes
        .iter()
        .map(|(value, label)| (value.as_str(), label.as_str()))
        .collect();

    html! {
        form method="get" action="/students" class="grid grid-cols-1 sm:grid-cols-5 gap-4 mb-4 items-end" {
            div class="sm:col-span-2" {
                label for="search" class="block text-sm font-medium mb-1" { "Search" }
                input id="search" name="search" type="text" value=(filters.search_term)
                    placeholder="Search students..."
                    class="w-full rounded border border-gray-300 dark:border-gray-600 px-3 py-2 bg-white dark:bg-gray-700";
            }
            (select_field("status", "Status", &status_options, status))
            (select_field("year", "Year", &year_options, year))
            (select_field("limit", "Page size", &size_options, &limit))
            input type="hidden" name="sort" value=(filters.sort_field.as_str());
            input type="hidden" name="direction" value=(filters.sort_direction.as_str());
            div class="sm:col-span-5 flex gap-2" {
                button type="submit" class="px-4 py-2 rounded bg-indigo-600 text-white" { "Apply" }
                @if filters.is_filtered() {
                    a href="/students" class="px-4 py-2 rounded border" { "Clear filters" }
                }
            }
        }
    }
}

fn student_row(student: &Student) -> Markup {
    html! {
        tr class="border-b border-gray-200 dark:border-gray-700" {
            td class="py-3 px-4" {
                div class="flex items-center gap-3" {
                    (avatar(&student.initials()))
                    div {
                        a href={ "/students/" (student.id) } class="font-medium hover:underline" {
                            (student.full_name())
                        }
                        p class="text-xs text-gray-500" { (student.year.as_str()) }
                    }
                }
            }
            td class="py-3 px-4" { (or_placeholder(&student.email)) }
            td class="py-3 px-4" { (or_placeholder(&student.program)) }
            td class="py-3 px-4" { (short_date(student.enrollment_date)) }
            td class="py-3 px-4" { (status_badge(student.status)) }
            td class="py-3 px-4 text-right whitespace-nowrap" {
                a href={ "/students/" (student.id) "/edit" } class="text-indigo-600 mr-3" { "Edit" }
                form method="post" action={ "/students/" (student.id) "/delete" } class="inline"
                    onsubmit="return confirm('Are you sure you want to delete this student?')" {
                    button type="submit" class="text-red-600" { "Delete" }
                }
            }
        }
    }
}

pub fn list(state: &ListState) -> Markup {
    let query = StudentListQuery::from_state(
        &state.filters,
        state.pagination.current_page,
        state.pagination.limit,
    );

    html! {
        div class="flex flex-col md:flex-row justify-between md:items-center gap-4" {
            (title("Student Management", Some("Add, edit, and manage student information")))
            a href="/students/new" class="px-4 py-2 rounded bg-indigo-600 text-white self-start" { "Add Student" }
        }
        (filter_bar(state))
        @if let Some(error) = &state.error {
            p role="alert" class="text-red-600 mb-4" { (error) }
        }
        div class="bg-white dark:bg-gray-800 rounded-lg shadow overflow-x-auto" {
            @if state.students.is_empty() {
                (empty_state("No students found"))
            } @else {
                table class="min-w-full text-left text-sm" {
                    thead class="bg-gray-100 dark:bg-gray-700" {
                        tr {
                            th class="py-3 px-4" { (sort_link(state, StudentField::LastName, "Name")) }
                            th class="py-3 px-4" { (sort_link(state, StudentField::Email, "Email")) }
                            th class="py-3 px-4" { (sort_link(state, StudentField::Program, "Program")) }
                            th class="py-3 px-4" { (sort_link(state, StudentField::EnrollmentDate, "Enrolled")) }
                            th class="py-3 px-4" { (sort_link(state, StudentField::Status, "Status")) }
                            th class="py-3 px-4" {}
                        }
                    }
                    tbody {
                        @for student in &state.students {
                            (student_row(student))
                        }
                    }
                }
            }
        }
        (pagination(&state.pagination, &query, "/students"))
    }
}

pub fn form(form: &StudentFormState) -> Markup {
    let values = &form.values;
    let (heading, action, submit) = match values.record_id() {
        Some(id) => ("Edit Student", format!("/students/{id}"), "Update Student"),
        None => ("Add New Student", "/students".to_string(), "Add Student"),
    };
    let cancel = match values.record_id() {
        Some(id) => format!("/students/{id}"),
        None => "/students".to_string(),
    };
    let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
    let status_options: Vec<(&str, &str)> = StudentStatus::ALL
        .iter()
        .map(|s| (s.as_str(), s.label()))
        .collect();
    let year_options: Vec<(&str, &str)> = StudentYear::ALL
        .iter()
        .map(|y| (y.as_str(), y.as_str()))
        .collect();
    let error = move |field: StudentField| form.error(field);

    html! {
        (title(heading, None))
        form method="post" action=(action) novalidate
            class="bg-white dark:bg-gray-800 rounded-lg shadow p-6 grid grid-cols-1 md:grid-cols-2 gap-4" {
            @if let Some(id) = values.record_id() {
                input type="hidden" name="Id" value=(id);
            }
            (input_field("firstName", StudentField::FirstName.label(), "text", &values.first_name, error(StudentField::FirstName)))
            (input_field("lastName", StudentField::LastName.label(), "text", &values.last_name, error(StudentField::LastName)))
            (input_field("email", StudentField::Email.label(), "email", &values.email, error(StudentField::Email)))
            (input_field("phone", StudentField::Phone.label(), "tel", &values.phone, error(StudentField::Phone)))
            (input_field("dob", StudentField::Dob.label(), "date", &date(values.dob), error(StudentField::Dob)))
            (input_field("program", StudentField::Program.label(), "text", &values.program, error(StudentField::Program)))
            (input_field("enrollmentDate", StudentField::EnrollmentDate.label(), "date", &date(values.enrollment_date), error(StudentField::EnrollmentDate)))
            (select_field("year", StudentField::Year.label(), &year_options, values.year.as_str()))
            (select_field("status", StudentField::Status.label(), &status_options, values.status.as_str()))
            div class="md:col-span-2 flex justify-end gap-2" {
                a href=(cancel) class="px-4 py-2 rounded border" { "Cancel" }
                button type="submit" class="px-4 py-2 rounded bg-indigo-600 text-white" { (submit) }
            }
        }
    }
}

fn detail_item(label: &str, value: &str) -> Markup {
    html! {
        div {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p { (value) }
        }
    }
}

pub fn detail(student: &Student, today: NaiveDate) -> Markup {
    html! {
        a href="/students" class="text-sm text-indigo-600 hover:underline" { "← Back to students" }
        div class="bg-white dark:bg-gray-800 rounded-lg shadow p-6 mt-4" {
            div class="flex flex-col md:flex-row md:items-center justify-between gap-4 mb-6" {
                div class="flex items-center gap-4" {
                    (avatar(&student.initials()))
                    div {
                        h1 class="text-2xl font-bold" { (student.full_name()) }
                        p class="text-gray-500" {
                            (or_placeholder(&student.program)) " • " (student.year.as_str())
                        }
                    }
                    (status_badge(student.status))
                }
                div class="flex gap-2" {
                    a href={ "/students/" (student.id) "/edit" } class="px-4 py-2 rounded border" { "Edit" }
                    form method="post" action={ "/students/" (student.id) "/delete" }
                        onsubmit="return confirm('Are you sure you want to delete this student? This action cannot be undone.')" {
                        button type="submit" class="px-4 py-2 rounded bg-red-600 text-white" { "Delete" }
                    }
                }
            }
            div class="grid grid-cols-1 md:grid-cols-3 gap-6" {
                section {
                    h2 class="font-semibold mb-3" { "Contact Information" }
                    (detail_item("Email", or_placeholder(&student.email)))
                    (detail_item("Phone", or_placeholder(&student.phone)))
                }
                section {
                    h2 class="font-semibold mb-3" { "Academic Information" }
                    (detail_item("Program", or_placeholder(&student.program)))
                    (detail_item("Enrollment Date", &long_date(student.enrollment_date)))
                    (detail_item("Year", student.year.as_str()))
                }
                section {
                    h2 class="font-semibold mb-3" { "Personal Information" }
                    (detail_item("Date of Birth", &long_date(student.dob)))
                    (detail_item("Age", &age(student.age_on(today))))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_core::PageState;

    fn john() -> Student {
        Student {
            id: 4,
            first_name: "John".into(),
            last_name: "Davis".into(),
            email: "john.davis@email.com".into(),
            phone: "555-0101".into(),
            dob: NaiveDate::from_ymd_opt(2003, 5, 15),
            program: "Computer Science".into(),
            enrollment_date: NaiveDate::from_ymd_opt(2021, 9, 1),
            status: StudentStatus::Active,
            year: StudentYear::Junior,
        }
    }

    #[test]
    fn test_detail_formats_dates_and_age() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let html = detail(&john(), today).into_string();
        assert!(html.contains("September 1, 2021"));
        assert!(html.contains("May 15, 2003"));
        assert!(html.contains("20 years"));
        assert!(html.contains("Computer Science • Junior"));
    }

    #[test]
    fn test_list_sort_links_toggle_current_field() {
        let state = ListState {
            students: vec![john()],
            pagination: PageState::new(1, 1, 10),
            ..Default::default()
        };
        let html = list(&state).into_string();
        assert!(html.contains("sort=lastName&amp;direction=desc"));
        assert!(html.contains("sort=email&amp;direction=asc"));
        assert!(html.contains("Sep 1, 2021"));
        assert!(html.contains("Showing 1 to 1 of 1 students"));
    }

    #[test]
    fn test_form_shows_errors_and_edit_target() {
        let mut state = StudentFormState::for_edit(&john());
        state.set_value(StudentField::Email, "nope");
        state.validate();
        let html = form(&state).into_string();
        assert!(html.contains(r#"action="/students/4""#));
        assert!(html.contains("Email is invalid"));
        assert!(html.contains("Update Student"));
    }
}
