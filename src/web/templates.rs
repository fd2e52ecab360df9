//! HTML pages, rendered with maud (all interpolations are escaped).

use maud::{html, Markup, DOCTYPE};

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                nav {
                    a href="/" { "Random" }
                    " | "
                    a href="/create" { "Creator" }
                }
                main { (content) }
            }
        }
    }
}

/// Page showing one generated meme.
pub fn meme_page(src: &str) -> Markup {
    layout(
        "Meme Generator",
        html! {
            img src=(src) alt="meme";
        },
    )
}

/// The meme creation form.
pub fn meme_form() -> Markup {
    layout(
        "Create a Meme",
        html! {
            form action="/create" method="POST" {
                p {
                    label for="image_url" { "Image URL" }
                    br;
                    input type="url" id="image_url" name="image_url" required;
                }
                p {
                    label for="body" { "Quote" }
                    br;
                    input type="text" id="body" name="body" required;
                }
                p {
                    label for="author" { "Author" }
                    br;
                    input type="text" id="author" name="author" required;
                }
                button type="submit" { "Create Meme!" }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meme_page_escapes_src() {
        let page = meme_page("/static/a\"b.jpg").into_string();
        assert!(page.contains("/static/a&quot;b.jpg"));
        assert!(page.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn form_posts_all_fields() {
        let page = meme_form().into_string();
        assert!(page.contains(r#"action="/create""#));
        for field in ["image_url", "body", "author"] {
            assert!(page.contains(&format!(r#"name="{field}""#)), "{field}");
        }
    }
}
