use maud::{Markup, html};
use registrar_core::PageState;
use registrar_models::{StudentListQuery, StudentStatus};

pub fn title(text: &str, subtitle: Option<&str>) -> Markup {
    html! {
        div class="mb-6" {
            h1 class="text-2xl md:text-3xl font-bold" { (text) }
            @if let Some(subtitle) = subtitle {
                p class="text-gray-500 dark:text-gray-400 mt-1" { (subtitle) }
            }
        }
    }
}

pub fn status_badge(status: StudentStatus) -> Markup {
    let colors = match status {
        StudentStatus::Active => "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-200",
        StudentStatus::Inactive => "bg-gray-200 text-gray-700 dark:bg-gray-700 dark:text-gray-300",
    };
    html! {
        span class={ "px-2 py-0.5 rounded-full text-xs font-medium " (colors) } { (status.label()) }
    }
}

pub fn avatar(initials: &str) -> Markup {
    html! {
        div class="w-10 h-10 rounded-full bg-indigo-100 text-indigo-700 flex items-center justify-center font-semibold" {
            (initials)
        }
    }
}

pub fn stat_card(label: &str, value: u64) -> Markup {
    html! {
        div class="bg-white dark:bg-gray-800 rounded-lg shadow p-5" {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p class="text-3xl font-bold mt-1" { (value) }
        }
    }
}

pub fn field_error(error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = error {
            p class="text-sm text-red-600 mt-1" { (error) }
        }
    }
}

pub fn input_field(
    name: &str,
    label: &str,
    input_type: &str,
    value: &str,
    error: Option<&str>,
) -> Markup {
    let border = if error.is_some() {
        "border-red-500"
    } else {
        "border-gray-300 dark:border-gray-600"
    };
    html! {
        div {
            label for=(name) class="block text-sm font-medium mb-1" { (label) }
            input id=(name) name=(name) type=(input_type) value=(value)
                class={ "w-full rounded border px-3 py-2 bg-white dark:bg-gray-700 " (border) };
            (field_error(error))
        }
    }
}

/// `<select>` over `(value, label)` pairs.
pub fn select_field(name: &str, label: &str, options: &[(&str, &str)], selected: &str) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium mb-1" { (label) }
            select id=(name) name=(name)
                class="w-full rounded border border-gray-300 dark:border-gray-600 px-3 py-2 bg-white dark:bg-gray-700" {
                @for (value, text) in options {
                    option value=(value) selected[*value == selected] { (text) }
                }
            }
        }
    }
}

/// "Showing x to y of z" plus previous/next and numbered page links.
pub fn pagination(page: &PageState, query: &StudentListQuery, base: &str) -> Markup {
    let link = |target: u64| {
        let query = StudentListQuery {
            page: Some(target),
            ..query.clone()
        };
        format!("{base}?{}", query.to_query_string())
    };
    let current = page.current_page;

    html! {
        div class="flex flex-col sm:flex-row items-center justify-between gap-3 mt-4" {
            p class="text-sm text-gray-500 dark:text-gray-400" data-range {
                "Showing " (page.showing_from()) " to " (page.showing_to()) " of " (page.total) " students"
            }
            @if page.total_pages() > 1 {
                nav class="flex gap-1" aria-label="Pagination" {
                    @if page.has_previous() {
                        a href=(link(current - 1)) class="px-3 py-1 rounded border" { "Previous" }
                    }
                    @for target in 1..=page.total_pages() {
                        @if target == current {
                            span class="px-3 py-1 rounded bg-indigo-600 text-white" aria-current="page" { (target) }
                        } @else {
                            a href=(link(target)) class="px-3 py-1 rounded border" { (target) }
                        }
                    }
                    @if page.has_next() {
                        a href=(link(current + 1)) class="px-3 py-1 rounded border" { "Next" }
                    }
                }
            }
        }
    }
}

pub fn empty_state(message: &str) -> Markup {
    html! {
        div class="text-center py-12 text-gray-500 dark:text-gray-400" { (message) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_links_keep_filters() {
        let query = StudentListQuery {
            search: Some("davis".into()),
            ..Default::default()
        };
        let html = pagination(&PageState::new(25, 2, 10), &query, "/students").into_string();

        assert!(html.contains("Showing 11 to 20 of 25 students"));
        assert!(html.contains(r#"href="/students?search=davis&amp;page=3""#));
        assert!(html.contains(r#"href="/students?search=davis&amp;page=1""#));
        assert!(html.contains("Previous"));
        assert!(html.contains("Next"));
    }

    #[test]
    fn test_single_page_has_no_links() {
        let html = pagination(&PageState::new(3, 1, 10), &StudentListQuery::default(), "/students")
            .into_string();
        assert!(html.contains("Showing 1 to 3 of 3 students"));
        assert!(!html.contains("Next"));
    }

    #[test]
    fn test_select_marks_selected_option() {
        let html = select_field("status", "Status", &[("active", "Active"), ("inactive", "Inactive")], "inactive")
            .into_string();
        assert!(html.contains(r#"<option value="inactive" selected>Inactive</option>"#));
    }
}
