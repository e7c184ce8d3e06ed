use maud::{html, Markup, DOCTYPE};

use crate::web::partials::headers;

/// Generic page shown when the requested page cannot be found.
pub fn not_found() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "Page not found" }
            }
            body {
                section.hero.is-fullheight {
                    div.hero-body {
                        div.container.has-text-centered {
                            p.title { "Page not found" }
                            p.subtitle { "The requested page does not exist." }
                            p { a.button.is-info href="/" { "Go to the Home page" } }
                        }
                    }
                }
            }
        }
    }
}
