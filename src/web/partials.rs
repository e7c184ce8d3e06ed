use clap::crate_version;
use maud::{html, Markup};

use crate::pages::Page;

pub fn headers() -> Markup {
    html! {
        meta name="viewport" content="width=device-width, initial-scale=1";
        meta charset="UTF-8";
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.3/css/bulma.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
        link rel="stylesheet" href="https://unpkg.com/bulma-prefers-dark";
    }
}

pub fn footer(root: &Page) -> Markup {
    html! {
        footer.footer {
            div.content.has-text-centered {
                p {
                    @if root.title.is_empty() {
                        a href="/" { "Home" }
                    } @else {
                        a href="/" { (root.title) }
                    }
                }
                p.has-text-grey-light { "Gone Pages " (crate_version!()) }
            }
        }
    }
}
