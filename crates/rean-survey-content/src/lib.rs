pub const SURVEY_TITLE: &str = "A.A.Rean's Motivation Survey";
pub const SURVEY_SUBTITLE: &str = "Assess your dominant motivation type";

pub const INSTRUCTIONS_URI: &str = "rean://survey/instructions.md";
pub const AVOID_FAILURE_URI: &str = "rean://survey/descriptions/avoid-failure.md";
pub const MIXED_URI: &str = "rean://survey/descriptions/mixed.md";
pub const SUCCESS_URI: &str = "rean://survey/descriptions/success.md";

pub const INSTRUCTIONS_TEXT: &str = include_str!("../../../content/instructions.md");
pub const AVOID_FAILURE_TEXT: &str =
    include_str!("../../../content/descriptions/avoid-failure.md");
pub const MIXED_TEXT: &str = include_str!("../../../content/descriptions/mixed.md");
pub const SUCCESS_TEXT: &str = include_str!("../../../content/descriptions/success.md");

/// Slot in a description template that receives the lean clause.
pub const LEAN_SLOT: &str = "{lean}";

#[derive(Debug, Clone, Copy)]
pub struct ContentResource {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
    pub text: &'static str,
}

static CONTENT_RESOURCES: [ContentResource; 4] = [
    ContentResource {
        uri: INSTRUCTIONS_URI,
        name: "instructions.md",
        description: "How to answer the survey questions.",
        mime_type: "text/markdown",
        text: INSTRUCTIONS_TEXT,
    },
    ContentResource {
        uri: AVOID_FAILURE_URI,
        name: "descriptions/avoid-failure.md",
        description: "Result text for the motivation to avoid failures.",
        mime_type: "text/markdown",
        text: AVOID_FAILURE_TEXT,
    },
    ContentResource {
        uri: MIXED_URI,
        name: "descriptions/mixed.md",
        description: "Result text template for mixed motivation.",
        mime_type: "text/markdown",
        text: MIXED_TEXT,
    },
    ContentResource {
        uri: SUCCESS_URI,
        name: "descriptions/success.md",
        description: "Result text for the motivation for success.",
        mime_type: "text/markdown",
        text: SUCCESS_TEXT,
    },
];

pub fn resources() -> &'static [ContentResource] {
    &CONTENT_RESOURCES
}

pub fn resource_text(uri: &str) -> Option<&'static str> {
    CONTENT_RESOURCES
        .iter()
        .find(|resource| resource.uri == uri)
        .map(|resource| resource.text)
}

/// Fills the `{lean}` slot of a description template. Templates without the
/// slot are returned unchanged.
pub fn render_template(template: &str, lean_clause: &str) -> String {
    template.trim_end().replace(LEAN_SLOT, lean_clause)
}
