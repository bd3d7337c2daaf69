use maud::{Markup, html};

use crate::{GENERATOR, route::RenderResult};

/// Can be used to create a generator tag in the output HTML. See
/// [`GENERATOR`](crate::GENERATOR).
pub fn generator() -> Markup {
    html! {
        meta name="generator" content=(GENERATOR);
    }
}

impl From<Markup> for RenderResult {
    fn from(val: Markup) -> Self {
        RenderResult::Text(val.into_string())
    }
}
