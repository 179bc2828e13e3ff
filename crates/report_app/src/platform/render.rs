use std::fmt::Write;

use report_core::{AppViewModel, DraftStyle, DraftView, FieldView, Phase};

const RULE: &str = "----------------------------------------";

/// Text rendition of the whole view, redrawn on every change.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}\nHeadline Strategist [{}]", view.phase);
    if !view.credential_present {
        let _ = writeln!(out, "API key: not set");
    }
    if view.credential_prompt_open {
        let _ = writeln!(
            out,
            "Enter your Google AI API key with 'key <value>' ('cancel' to close)."
        );
    }
    let _ = writeln!(out, "{RULE}");

    match view.phase {
        Phase::Intro => render_form(&mut out, view),
        Phase::Loading => {
            let _ = writeln!(out, "Generating headlines...");
        }
        Phase::Results => render_results(&mut out, view),
        Phase::Drafting => {
            let title = view
                .selected
                .as_ref()
                .map(|headline| headline.title.as_str())
                .unwrap_or_default();
            let _ = writeln!(out, "Writing a draft for \"{title}\"...");
        }
        Phase::Draft => {
            if let Some(draft) = &view.draft {
                render_draft(&mut out, view, draft);
            }
        }
        Phase::Error => {
            let _ = writeln!(out, "Headline generation failed.");
            let _ = writeln!(out, "Type 'ok' to return to the form.");
        }
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out, "\n! {error}");
    }
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "\n* {notice}");
    }
    out
}

fn render_form(out: &mut String, view: &AppViewModel) {
    for field_view in &view.fields {
        render_field(out, field_view);
    }
    if view.attachments.is_empty() {
        let _ = writeln!(out, "Attachments: none");
    } else {
        let _ = writeln!(out, "Attachments:");
        for (index, name) in view.attachments.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, name);
        }
    }
    let _ = writeln!(out, "\nType 'submit' when ready, 'help' for commands.");
}

fn render_field(out: &mut String, field_view: &FieldView) {
    let marker = if field_view.required { "*" } else { " " };
    let value = if field_view.value.is_empty() {
        "-"
    } else {
        field_view.value.as_str()
    };
    let _ = writeln!(
        out,
        "{marker} {} ({}): {}",
        field_view.field.label(),
        field_view.field.key(),
        value
    );
    if field_view.value.is_empty() {
        for (index, option) in field_view.options.iter().enumerate() {
            let _ = writeln!(out, "      {}) {}", index + 1, option);
        }
    }
}

fn render_results(out: &mut String, view: &AppViewModel) {
    let _ = writeln!(
        out,
        "{} headlines in {} categories",
        view.total_headlines,
        view.results.len()
    );
    for (category, result) in view.results.iter().enumerate() {
        let _ = writeln!(out, "\n[{}] {}", category + 1, result.kind);
        for (index, headline) in result.headlines.iter().enumerate() {
            let marker = if view.selected.as_ref() == Some(headline) {
                ">"
            } else {
                " "
            };
            let _ = writeln!(
                out,
                "{marker} {}.{} {}",
                category + 1,
                index + 1,
                headline.title
            );
            let _ = writeln!(out, "      {}", headline.strategy);
        }
    }
    if view.regenerating {
        let _ = writeln!(out, "\nSearching for more headlines...");
    }
}

fn render_draft(out: &mut String, view: &AppViewModel, draft: &DraftView) {
    if let Some(headline) = &view.selected {
        let _ = writeln!(out, "{}\n", headline.title);
    }
    let styles: Vec<String> = DraftStyle::ALL
        .into_iter()
        .map(|style| style_label(style, draft))
        .collect();
    let _ = writeln!(out, "Styles: {}", styles.join("  "));
    if draft.pending.contains(&draft.style) {
        let _ = writeln!(out, "(rewriting in {} style...)", draft.style);
    }
    let _ = writeln!(out, "\n{}", draft.text);
}

fn style_label(style: DraftStyle, draft: &DraftView) -> String {
    let mut label = style.id().to_string();
    if draft.pending.contains(&style) {
        label.push_str("...");
    } else if draft.cached.contains(&style) {
        label.push('+');
    }
    if style == draft.style {
        label = format!("[{label}]");
    }
    label
}
