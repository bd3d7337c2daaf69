use content::content_sources;
use plume::{BuildOptions, BuildOutput, publish, routes};

mod components;
mod content;
mod layout;
mod pages;

use pages::*;

fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
    publish(
        routes![Index, BlogIndex, BlogPost, Resume, CoverLetter],
        content_sources(),
        BuildOptions {
            base_url: Some("https://alexmorel.dev".to_string()),
            ..Default::default()
        },
    )
}
