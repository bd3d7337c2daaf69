use maud::html;
use plume::route::prelude::*;

use crate::components::AUTHOR;
use crate::layout::{SeoMeta, layout};

const GREETING: &str = "Dear Hiring Team,";

const PARAGRAPHS: &[&str] = &[
    "I am writing to apply for the instrumentation software role on your data \
     platform team. For the last three years I have built and operated the \
     telemetry pipeline behind a network of river gauges, which means I have \
     debugged flaky sensors from a canoe, designed wire formats that survive \
     being transmitted twice, and learned exactly how much validation a reading \
     needs before anyone should be allowed to chart it.",
    "What draws me to this role is the overlap between field hardware and \
     careful software. Measurement systems fail in ways web services do not: \
     silently, partially, and usually during the weather event you most wanted \
     to record. I like building the boring, well-logged machinery that notices \
     those failures early, and I like writing the documentation that lets the \
     next engineer trust it.",
    "I would be glad to talk about the work in more detail. My résumé covers \
     the specifics, and the projects on this site show how I approach problems \
     when nobody is setting requirements but me.",
];

const SIGN_OFF: &str = "Sincerely,";

#[route("/cover-letter/")]
pub struct CoverLetter;

impl Route for CoverLetter {
    fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
        layout(
            html! {
                div.cover-letter {
                    h1 { "Cover Letter" }
                    p.greeting { (GREETING) }
                    @for paragraph in PARAGRAPHS {
                        p { (paragraph) }
                    }
                    p.sign-off {
                        (SIGN_OFF)
                        br;
                        (AUTHOR)
                    }
                }
            },
            SeoMeta {
                title: "Cover Letter".to_string(),
                canonical_url: ctx.canonical_url(),
                ..Default::default()
            },
        )
    }
}
