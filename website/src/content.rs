use chrono::NaiveDate;
use plume::content::{
    ContentEntry, ContentSource, ContentSources, GlobOptions, glob_markdown, markdown_entry,
};
use plume::content_sources;

#[markdown_entry]
#[derive(Debug, Clone)]
pub struct BlogPostContent {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub published: bool,
    pub hero: Option<String>,
    pub hero_description: Option<String>,
}

/// Published posts, newest first. Drafts never make it into any listing.
pub fn published_posts(
    source: &ContentSource<BlogPostContent>,
) -> Vec<&ContentEntry<BlogPostContent>> {
    let mut posts: Vec<_> = source
        .entries
        .iter()
        .filter(|entry| entry.data.published)
        .collect();
    posts.sort_by(|a, b| b.data.date.cmp(&a.data.date));
    posts
}

pub fn content_sources() -> ContentSources {
    content_sources![
        "blog" => glob_markdown::<BlogPostContent>(
            "content/blog/*/index.md",
            Some(GlobOptions {
                base_dir: Some("content".into()),
            }),
        )
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, date: &str, published: bool) -> ContentEntry<BlogPostContent> {
        ContentEntry::new(
            format!("blog/{slug}/index"),
            format!("/blog/{slug}"),
            None,
            None,
            BlogPostContent {
                title: slug.to_string(),
                date: date.parse().unwrap(),
                published,
                hero: None,
                hero_description: None,
                __internal_headings: vec![],
            },
            None,
        )
    }

    #[test]
    fn test_published_posts_excludes_drafts_and_sorts_newest_first() {
        let mut source = ContentSource::new("blog", Box::new(|| Ok(vec![])));
        source.entries = vec![
            post("oldest", "2026-01-05", true),
            post("draft", "2026-06-20", false),
            post("newest", "2026-05-02", true),
        ];

        let posts = published_posts(&source);
        let slugs: Vec<_> = posts.iter().map(|entry| entry.slug()).collect();

        assert_eq!(slugs, vec!["newest", "oldest"]);
    }
}
