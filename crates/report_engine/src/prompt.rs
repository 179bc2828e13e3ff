//! Prompt text and response schema sent to the generator.

use std::fmt::Write;

use report_core::{
    expected_headline_count, DraftStyle, Field, Headline, HeadlineResult, UserInput,
    HEADLINES_PER_TYPE, HEADLINE_TYPES,
};
use serde_json::{json, Value};

const ROLE: &str = "You are a 'Headline Strategist', an expert assistant for public institution \
report writers. Your goal is to produce fresh, persuasive and clear headlines for management \
evaluation committee reports.";

const ATTACHMENT_NOTE: &str = "If reference files are attached, use the information within them \
to reflect the latest data and policies.";

pub fn headline_prompt(input: &UserInput) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "{ROLE}\n");
    push_input(&mut prompt, input);
    push_headline_task(&mut prompt);
    prompt
}

/// Like [`headline_prompt`], but steers the generator away from titles the
/// user has already seen.
pub fn more_headlines_prompt(input: &UserInput, existing: &[HeadlineResult]) -> String {
    let mut prompt = headline_prompt(input);
    let seen: Vec<&str> = existing
        .iter()
        .flat_map(|result| result.headlines.iter().map(|h| h.title.as_str()))
        .collect();
    if !seen.is_empty() {
        let _ = writeln!(
            prompt,
            "\nThe following headlines were already suggested. Do not repeat them or produce close variants:"
        );
        for title in seen {
            let _ = writeln!(prompt, "- {title}");
        }
    }
    prompt
}

pub fn draft_prompt(input: &UserInput, headline: &Headline) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are an experienced writer of public institution management evaluation reports.\n"
    );
    push_input(&mut prompt, input);
    let _ = writeln!(prompt, "\nChosen headline: {}", headline.title);
    let _ = writeln!(prompt, "Strategy behind it: {}", headline.strategy);
    let _ = writeln!(
        prompt,
        "\nWrite the report section that sits under this headline. {} \
         Ground every claim in the input above and keep the figures exactly as given. \
         Return plain text only.",
        DraftStyle::BASE.instruction()
    );
    prompt
}

pub fn revision_prompt(previous: &str, feedback: &str) -> String {
    format!(
        "Revise the following report draft according to the reviewer's notes. Keep everything \
         the notes do not ask to change. Return the full revised draft as plain text only.\n\n\
         Reviewer notes:\n{feedback}\n\nDraft:\n{previous}\n"
    )
}

pub fn restyle_prompt(base: &str, style: DraftStyle) -> String {
    format!(
        "Rewrite the following report draft. {} Do not add facts that are not in the draft. \
         Return plain text only.\n\nDraft:\n{base}\n",
        style.instruction()
    )
}

/// JSON schema for a headline batch: an array of `{type, headlines[{title, strategy}]}`.
pub fn headline_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "type": {
                    "type": "STRING",
                    "description": format!("The headline type (one of: {})", HEADLINE_TYPES.join(", ")),
                },
                "headlines": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": {
                                "type": "STRING",
                                "description": "The generated headline.",
                            },
                            "strategy": {
                                "type": "STRING",
                                "description": "The strategy and emphasized evaluation factors.",
                            },
                        },
                        "required": ["title", "strategy"],
                    },
                },
            },
            "required": ["type", "headlines"],
        },
    })
}

fn push_input(prompt: &mut String, input: &UserInput) {
    let _ = writeln!(prompt, "User input:");
    for field in Field::ALL {
        let value = input.get(field).trim();
        let value = if value.is_empty() { "(none)" } else { value };
        let _ = writeln!(prompt, "- {}: {}", field.label(), value);
    }
    if !input.attachments.is_empty() {
        let names: Vec<&str> = input.attachments.iter().map(|a| a.name.as_str()).collect();
        let _ = writeln!(prompt, "- Reference files: {}", names.join(", "));
        let _ = writeln!(prompt, "\n{ATTACHMENT_NOTE}");
    }
}

fn push_headline_task(prompt: &mut String) {
    let _ = writeln!(
        prompt,
        "\nGenerate exactly {total} headlines, split into {types} types with {per} unique \
         headlines each. The types are: {list}.\n\
         For every headline also give a concise explanation of the evaluation factors it \
         emphasizes and the strategic intent behind it.\n\
         The output MUST be JSON that strictly follows the provided schema, with no text \
         outside the JSON structure.",
        total = expected_headline_count(),
        types = HEADLINE_TYPES.len(),
        per = HEADLINES_PER_TYPE,
        list = HEADLINE_TYPES.join(", "),
    );
}
