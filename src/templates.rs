use maud::{html, Markup, DOCTYPE};

/// One row of a directory listing.
pub struct ListingEntry {
    pub href: String,
    pub label: String,
}

pub fn directory_listing(display_path: &str, entries: &[ListingEntry]) -> Markup {
    let title = format!("Directory listing for {display_path}");

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body {
                h1 { (title) }
                hr;
                ul {
                    @for entry in entries {
                        li { a href=(entry.href) { (entry.label) } }
                    }
                }
                hr;
            }
        }
    }
}
