use maud::html;
use plume::route::prelude::*;

use crate::components::{TitleSize, post_list};
use crate::content::{BlogPostContent, published_posts};
use crate::layout::{SeoMeta, layout};

#[route("/")]
pub struct Index;

impl Route for Index {
    fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
        let blog = ctx.content.get_source::<BlogPostContent>("blog");
        let posts = published_posts(blog);
        let newest = &posts[..posts.len().min(3)];

        layout(
            html! {
                section.intro {
                    h1 { "Hello, I'm Alex." }
                    img.portrait src="/images/portrait.svg" alt="A hand-drawn portrait of Alex Morel";
                    p.lede {
                        "I am a programmer, photographer, and bicycle tinkerer living in Bellingham, Washington."
                    }
                }
                section.newest-posts {
                    h3 { "Newest Blog Posts" }
                    (post_list(newest, TitleSize::Small))
                }
            },
            SeoMeta {
                canonical_url: ctx.canonical_url(),
                ..Default::default()
            },
        )
    }
}
