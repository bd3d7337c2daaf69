use maud::{PreEscaped, html};
use plume::route::prelude::*;

use crate::components::{TitleSize, long_date, post_list};
use crate::content::{BlogPostContent, published_posts};
use crate::layout::{SeoMeta, layout};

#[route("/blog/")]
pub struct BlogIndex;

impl Route for BlogIndex {
    fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
        let blog = ctx.content.get_source::<BlogPostContent>("blog");
        let posts = published_posts(blog);

        let stats = match (posts.first(), posts.last()) {
            (Some(newest), Some(oldest)) => format!(
                "{} blog posts from {} to {}",
                posts.len(),
                long_date(oldest.data.date),
                long_date(newest.data.date),
            ),
            _ => "No blog posts yet".to_string(),
        };

        layout(
            html! {
                h1 { "Blog Posts" }
                p.stats { (stats) }
                (post_list(&posts, TitleSize::Large))
            },
            SeoMeta {
                title: "Blog".to_string(),
                canonical_url: ctx.canonical_url(),
                ..Default::default()
            },
        )
    }
}

#[route("/blog/[slug]")]
pub struct BlogPost;

#[derive(Params, Clone)]
pub struct BlogPostParams {
    pub slug: String,
}

impl Route<BlogPostParams> for BlogPost {
    fn pages(&self, ctx: &mut DynamicRouteContext) -> Pages<BlogPostParams> {
        let blog = ctx.content.get_source::<BlogPostContent>("blog");

        // Drafts keep their derived route but never get a page
        blog.entries
            .iter()
            .filter(|entry| entry.data.published)
            .map(|entry| {
                Page::from_params(BlogPostParams {
                    slug: entry.slug().to_string(),
                })
            })
            .collect()
    }

    fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
        let params = ctx.params::<BlogPostParams>();
        let blog = ctx.content.get_source::<BlogPostContent>("blog");
        let post = blog.get_entry_by_slug(&params.slug);

        layout(
            html! {
                article.blog-post {
                    h1.post-heading { (post.data.title) }
                    p.post-date { (long_date(post.data.date)) }
                    @if let Some(hero) = &post.data.hero {
                        figure.hero {
                            img src=(hero) alt=(post.data.hero_description.as_deref().unwrap_or(""));
                            @if let Some(caption) = &post.data.hero_description {
                                figcaption { (caption) }
                            }
                        }
                    }
                    (PreEscaped(post.render()))
                }
            },
            SeoMeta {
                title: post.data.title.clone(),
                canonical_url: ctx.canonical_url(),
                ..Default::default()
            },
        )
    }
}
