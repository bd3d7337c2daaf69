//! Small presentational helpers shared across pages.
use chrono::NaiveDate;
use maud::{Markup, html};
use plume::content::{ContentEntry, excerpt, reading_time};
use plume::route::RouteExt;

use crate::content::BlogPostContent;
use crate::pages::{BlogPost, BlogPostParams};

pub const AUTHOR: &str = "Alex Morel";

const EXCERPT_LENGTH: usize = 240;

#[derive(Clone, Copy)]
pub enum TitleSize {
    Large,
    Small,
}

pub fn post_title(text: &str, link: &str, size: TitleSize) -> Markup {
    match size {
        TitleSize::Large => html! { h2.post-title { a href=(link) { (text) } } },
        TitleSize::Small => html! { h4.post-title { a href=(link) { (text) } } },
    }
}

pub fn sub_text(text: &str) -> Markup {
    html! { span.sub-text { (text) } }
}

/// A row of muted sub-texts with dot separators, e.g. author, date and
/// reading time under a post title.
pub fn sub_text_row(items: &[Markup]) -> Markup {
    html! {
        div.sub-text-row {
            @for (i, item) in items.iter().enumerate() {
                @if i > 0 { span.separator { "·" } }
                (item)
            }
        }
    }
}

pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn post_link(entry: &ContentEntry<BlogPostContent>) -> String {
    BlogPost.url(BlogPostParams {
        slug: entry.slug().to_string(),
    })
}

/// The post previews shown on the home page and the blog index.
pub fn post_list(posts: &[&ContentEntry<BlogPostContent>], size: TitleSize) -> Markup {
    html! {
        @for entry in posts {
            @let raw_content = entry.raw_content.as_deref().unwrap_or("");
            article.post-preview {
                (post_title(&entry.data.title, &post_link(entry), size))
                (sub_text_row(&[
                    sub_text(AUTHOR),
                    sub_text(&long_date(entry.data.date)),
                    sub_text(&format!("{} min read", reading_time(raw_content))),
                ]))
                p.excerpt { (excerpt(raw_content, EXCERPT_LENGTH)) }
                p.continue-reading { a href=(post_link(entry)) { "Continue reading…" } }
            }
        }
    }
}
