use maud::{DOCTYPE, Markup, html};
use plume::maud::generator;

use crate::components::AUTHOR;

pub struct SeoMeta {
    pub title: String,
    pub description: Option<String>,
    pub canonical_url: Option<String>,
}

impl Default for SeoMeta {
    fn default() -> Self {
        Self {
            title: AUTHOR.to_string(),
            description: Some(
                "Personal website of Alex Morel: programming, photography, and the occasional bicycle."
                    .to_string(),
            ),
            canonical_url: None,
        }
    }
}

impl SeoMeta {
    pub fn render(&self) -> Markup {
        let formatted_title = if self.title == AUTHOR {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, AUTHOR)
        };

        let description = self
            .description
            .clone()
            .unwrap_or_else(|| SeoMeta::default().description.unwrap());

        html! {
            title { (formatted_title) }
            meta name="description" content=(description);

            // Open Graph meta tags
            meta property="og:title" content=(formatted_title);
            meta property="og:description" content=(description);
            meta property="og:type" content="website";
            @if let Some(canonical_url) = &self.canonical_url {
                meta property="og:url" content=(canonical_url);
                link rel="canonical" href=(canonical_url);
            }

            // Twitter Card meta tags
            meta name="twitter:card" content="summary";
            meta name="twitter:title" content=(formatted_title);
            meta name="twitter:description" content=(description);
        }
    }
}

pub fn layout(main: Markup, seo: SeoMeta) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (generator())
                (seo.render())
                link rel="stylesheet" href="/styles.css";
            }
            body {
                (header())
                main.container {
                    (main)
                }
                (footer())
            }
        }
    }
}

fn header() -> Markup {
    html! {
        header.site-header {
            nav.container {
                a.site-title href="/" { (AUTHOR) }
                ul {
                    li { a href="/blog/" { "Blog" } }
                    li { a href="/resume/" { "Résumé" } }
                }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer.site-footer {
            p.container { "© 2026 " (AUTHOR) }
        }
    }
}
