use maud::{Markup, html};
use plume::route::prelude::*;

use crate::components::AUTHOR;
use crate::layout::{SeoMeta, layout};

struct ResumeEntry<'a> {
    title: &'a str,
    extra_title: Option<&'a str>,
    company: Option<&'a str>,
    location: Option<&'a str>,
    link: Option<&'a str>,
    dates: Option<(&'a str, &'a str)>,
    points: &'a [Point<'a>],
}

enum Point<'a> {
    Line(&'a str),
    Group(&'a str, &'a [&'a str]),
}

const OBJECTIVE: &str = "Pragmatic software engineer with a background in embedded \
systems and data tooling, looking to build reliable instruments and the software \
that makes their measurements trustworthy";

const EXPERIENCE: &[ResumeEntry] = &[
    ResumeEntry {
        title: "Senior Software Engineer",
        extra_title: Some("Data Acquisition, Firmware, Tooling"),
        company: Some("Cascade Hydrometrics"),
        location: Some("Bellingham, WA"),
        link: None,
        dates: Some(("Jul 2023", "Present")),
        points: &[
            Point::Group(
                "Lead engineer for the river-gauge telemetry platform",
                &[
                    "Designed the packet format and retry protocol used by 140 solar-powered gauge stations reporting over LoRa and satellite uplinks",
                    "Cut data loss during spring flood season from 11% to under 1% by reworking the station-side write-ahead buffer",
                    "Built the calibration toolchain that field technicians run from a laptop in a waterproof case",
                ],
            ),
            Point::Line(
                "Wrote the ingest service that validates, deduplicates, and archives two million sensor readings a day",
            ),
            Point::Line("Mentor two junior engineers and run the team's design-review rotation"),
        ],
    },
    ResumeEntry {
        title: "Embedded Software Engineer",
        extra_title: Some("Sensors, Control Loops"),
        company: Some("Meridian Instruments"),
        location: Some("Seattle, WA"),
        link: None,
        dates: Some(("Jan 2020", "Jun 2023")),
        points: &[
            Point::Line(
                "Shipped firmware for a line of benchtop pH and conductivity meters used in water-quality labs",
            ),
            Point::Line(
                "Replaced a hand-rolled scheduler with a cooperative task runner, removing a class of watchdog resets",
            ),
            Point::Line(
                "Automated the end-of-line test rig, halving the time each unit spends on the bench",
            ),
        ],
    },
    ResumeEntry {
        title: "Software Developer",
        extra_title: None,
        company: Some("Puget Analytics"),
        location: Some("Seattle, WA"),
        link: None,
        dates: Some(("Sep 2017", "Dec 2019")),
        points: &[
            Point::Line("Built internal dashboards and ETL pipelines for environmental consultancies"),
            Point::Line("Maintained the report generator that produced regulator-facing PDF filings"),
        ],
    },
];

const PROJECTS: &[ResumeEntry] = &[
    ResumeEntry {
        title: "Darkroom Logbook",
        extra_title: None,
        company: None,
        location: None,
        link: Some("https://github.com/alexmorel/darkroom-logbook"),
        dates: None,
        points: &[Point::Line(
            "A small command-line tool for tracking film development recipes, times, and chemistry lifetimes",
        )],
    },
    ResumeEntry {
        title: "This Website",
        extra_title: None,
        company: None,
        location: None,
        link: Some("https://alexmorel.dev"),
        dates: None,
        points: &[Point::Line(
            "Static site generated from Markdown with a route deriver, built and deployed from a single binary",
        )],
    },
];

const EDUCATION: &[ResumeEntry] = &[ResumeEntry {
    title: "B.S. Computer Engineering",
    extra_title: None,
    company: Some("University of Washington"),
    location: Some("Seattle, WA"),
    link: None,
    dates: Some(("Sep 2013", "Jun 2017")),
    points: &[],
}];

const SKILLS: &[Point] = &[
    Point::Group(
        "Languages",
        &["Rust", "C", "Python", "TypeScript", "SQL"],
    ),
    Point::Group(
        "Tools",
        &["Embedded Linux", "FreeRTOS", "PostgreSQL", "Grafana", "KiCad"],
    ),
    Point::Group(
        "Practices",
        &["Hardware-in-the-loop testing", "Design reviews", "Incident writeups"],
    ),
];

fn section_title(text: &str) -> Markup {
    html! { h3.section-title { (text) } }
}

fn entry_block(entry: &ResumeEntry) -> Markup {
    html! {
        section.entry {
            @if let Some((start, end)) = entry.dates {
                div.entry-dates { (start) " -" br; (end) }
            }
            div.entry-body {
                div.entry-heading {
                    @if let Some(link) = entry.link {
                        a href=(link) { span.entry-title { (entry.title) } }
                    } @else {
                        span.entry-title { (entry.title) }
                    }
                    @if let Some(extra) = entry.extra_title {
                        span.entry-extra { (extra) }
                    }
                }
                @if let Some(company) = entry.company {
                    p.entry-company {
                        (company)
                        @if let Some(location) = entry.location { " - " (location) }
                    }
                }
                (points_list(entry.points))
            }
        }
    }
}

fn points_list(points: &[Point]) -> Markup {
    html! {
        @if !points.is_empty() {
            ul.points {
                @for point in points {
                    @match point {
                        Point::Line(line) => {
                            li { (line) "." }
                        }
                        Point::Group(lead, items) => {
                            li {
                                (lead) ":"
                                ul {
                                    @for item in *items {
                                        li { (item) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[route("/resume/")]
pub struct Resume;

impl Route for Resume {
    fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
        layout(
            html! {
                div.resume {
                    section.resume-header {
                        div {
                            h1 { (AUTHOR) }
                            p.objective { (OBJECTIVE) "." }
                        }
                        div.contact {
                            p { "alex@alexmorel.dev" }
                            p { "Bellingham, WA" }
                            p { a href="/cover-letter/" { "Cover letter" } }
                        }
                    }
                    (section_title("Experience"))
                    @for entry in EXPERIENCE { (entry_block(entry)) }
                    (section_title("Projects"))
                    @for entry in PROJECTS { (entry_block(entry)) }
                    (section_title("Education"))
                    @for entry in EDUCATION { (entry_block(entry)) }
                    (section_title("Skills"))
                    (points_list(SKILLS))
                }
            },
            SeoMeta {
                title: "Résumé".to_string(),
                canonical_url: ctx.canonical_url(),
                ..Default::default()
            },
        )
    }
}
