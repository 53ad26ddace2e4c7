use maud::{DOCTYPE, Markup, html};

use crate::middleware::auth::Session;
use crate::utils::flash::{Flash, FlashKind};

pub const APP_NAME: &str = "Registrar";

fn head(title: &str) -> Markup {
    html! {
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
            style type="text/tailwindcss" { "@custom-variant dark (&:where(.dark, .dark *));" }
            title { (title) " | " (APP_NAME) }
        }
    }
}

fn toast(flash: &Flash) -> Markup {
    let colors = match flash.kind {
        FlashKind::Success => "bg-green-100 border-green-400 text-green-800",
        FlashKind::Error => "bg-red-100 border-red-400 text-red-800",
    };
    html! {
        div role="alert" data-flash=(flash.kind.as_str())
            class={ "fixed top-4 right-4 z-50 border px-4 py-3 rounded shadow " (colors) } {
            (flash.message)
        }
    }
}

fn dark_mode_toggle(session: &Session) -> Markup {
    html! {
        form method="post" action="/preferences/dark-mode" class="inline" {
            input type="hidden" name="enabled" value=((!session.dark_mode).to_string());
            input type="hidden" name="returnTo" value=(session.path);
            button type="submit" class="px-3 py-1 rounded hover:bg-gray-200 dark:hover:bg-gray-700"
                title="Toggle dark mode" {
                @if session.dark_mode { "Light mode" } @else { "Dark mode" }
            }
        }
    }
}

fn navbar(session: &Session) -> Markup {
    html! {
        nav class="w-full bg-white dark:bg-gray-800 shadow mb-6" {
            div class="max-w-6xl mx-auto px-4 py-3 flex items-center justify-between" {
                a href="/" class="text-xl font-bold text-indigo-600" { (APP_NAME) }
                div class="flex items-center gap-4" {
                    @if let Some(user) = &session.user {
                        a href="/" class="hover:underline" { "Dashboard" }
                        a href="/students" class="hover:underline" { "Students" }
                        (dark_mode_toggle(session))
                        span class="text-sm text-gray-500" data-user { (user.display_name()) }
                        form method="post" action="/logout" class="inline" {
                            button type="submit" class="px-3 py-1 rounded bg-gray-100 dark:bg-gray-700" { "Logout" }
                        }
                    } @else {
                        (dark_mode_toggle(session))
                    }
                }
            }
        }
    }
}

/// Full page with navigation, theme and the pending notification.
pub fn page(title: &str, session: &Session, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class=[session.dark_mode.then_some("dark")] {
            (head(title))
            body class="min-h-screen bg-gray-50 text-gray-800 dark:bg-gray-900 dark:text-gray-100" {
                (navbar(session))
                @if let Some(flash) = &session.flash {
                    (toast(flash))
                }
                main class="max-w-6xl mx-auto px-4 pb-12" {
                    (content)
                }
            }
        }
    }
}

/// Centered page without navigation, for the sign-in screens.
pub fn bare_page(title: &str, session: &Session, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class=[session.dark_mode.then_some("dark")] {
            (head(title))
            body class="min-h-screen flex items-center justify-center bg-gray-50 dark:bg-gray-900 text-gray-800 dark:text-gray-100" {
                @if let Some(flash) = &session.flash {
                    (toast(flash))
                }
                div class="absolute top-4 left-4" { (dark_mode_toggle(session)) }
                (content)
            }
        }
    }
}
