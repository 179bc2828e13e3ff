use std::path::PathBuf;

use report_core::{AppViewModel, DraftStyle, Field, Msg};
use thiserror::Error;

pub(crate) const HELP: &str = "\
Form
  set <field> <text>      fill in a field (selection fields take the option text)
  pick <field> <n>        choose option n of a selection field
  attach <path>           add a reference document
  detach <n>              remove attachment n
  submit                  generate headlines
Results
  select <c> <n>          select headline n of category c
  more                    search for more headlines
  draft                   write a draft for the selected headline
  export                  save the results as text
Draft
  style <id>              switch style (standard, bullet-summary, storytelling, impact-first)
  feedback <notes>        rewrite the visible draft following the notes
  back                    return to the results
General
  key [value]             enter the API key (no value opens the prompt)
  cancel                  close the API key prompt
  ok                      leave the error screen
  dismiss                 clear the current error message
  reset                   start over with an empty form
  show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Set { field: Field, value: String },
    Pick { field: Field, choice: usize },
    Attach(PathBuf),
    Detach(usize),
    Submit,
    Ok,
    More,
    Select { category: usize, headline: usize },
    Draft,
    Style(DraftStyle),
    Feedback(String),
    Back,
    Export,
    Key(Option<String>),
    Cancel,
    Dismiss,
    Reset,
    Show,
    Help,
    Quit,
}

/// What the main loop does with a resolved command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Dispatch(Msg),
    Attach(PathBuf),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'help' for the list")]
    Unknown(String),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("unknown style '{0}'")]
    UnknownStyle(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{field}' has no option {choice}")]
    NoSuchOption { field: Field, choice: usize },
    #[error("'{value}' is not an option of '{field}'")]
    NotAnOption { field: Field, value: String },
    #[error("there is no headline {category}.{headline}")]
    NoSuchHeadline { category: usize, headline: usize },
}

pub(crate) fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::Empty);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "set" => {
            let key = required(rest, "set <field> <text>")?;
            // A bare field name clears it.
            let (key, value) = split_first(key).unwrap_or((key, ""));
            Command::Set {
                field: parse_field(key)?,
                value: value.to_string(),
            }
        }
        "pick" => {
            let (key, choice) = split_first(rest).ok_or(CommandError::Usage("pick <field> <n>"))?;
            Command::Pick {
                field: parse_field(key)?,
                choice: parse_index(choice, "pick <field> <n>")?,
            }
        }
        "attach" => Command::Attach(PathBuf::from(required(rest, "attach <path>")?)),
        "detach" => Command::Detach(parse_index(rest, "detach <n>")?),
        "submit" | "generate" => Command::Submit,
        "ok" => Command::Ok,
        "more" => Command::More,
        "select" => {
            let (category, headline) =
                split_first(rest).ok_or(CommandError::Usage("select <c> <n>"))?;
            Command::Select {
                category: parse_index(category, "select <c> <n>")?,
                headline: parse_index(headline, "select <c> <n>")?,
            }
        }
        "draft" => Command::Draft,
        "style" => {
            let id = required(rest, "style <id>")?;
            Command::Style(
                DraftStyle::from_id(id).ok_or_else(|| CommandError::UnknownStyle(id.to_string()))?,
            )
        }
        "feedback" => Command::Feedback(required(rest, "feedback <notes>")?.to_string()),
        "back" => Command::Back,
        "export" => Command::Export,
        "key" => Command::Key((!rest.is_empty()).then(|| rest.to_string())),
        "cancel" => Command::Cancel,
        "dismiss" => Command::Dismiss,
        "reset" => Command::Reset,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Turns index-based commands into concrete messages using the current view.
pub(crate) fn resolve(command: Command, view: &AppViewModel) -> Result<Action, CommandError> {
    let msg = match command {
        Command::Set { field, value } => {
            if field.is_selection() && !value.is_empty() {
                let known = view
                    .field(field)
                    .is_some_and(|field_view| field_view.options.contains(&value));
                if !known {
                    return Err(CommandError::NotAnOption { field, value });
                }
            }
            Msg::FieldChanged { field, value }
        }
        Command::Pick { field, choice } => {
            let value = view
                .field(field)
                .and_then(|field_view| field_view.options.get(choice - 1))
                .cloned()
                .ok_or(CommandError::NoSuchOption { field, choice })?;
            Msg::FieldChanged { field, value }
        }
        Command::Attach(path) => return Ok(Action::Attach(path)),
        Command::Detach(index) => Msg::AttachmentRemoved(index - 1),
        Command::Submit => Msg::Submitted,
        Command::Ok => Msg::ErrorAcknowledged,
        Command::More => Msg::MoreHeadlinesRequested,
        Command::Select { category, headline } => {
            let chosen = view
                .results
                .get(category - 1)
                .and_then(|result| result.headlines.get(headline - 1))
                .cloned()
                .ok_or(CommandError::NoSuchHeadline { category, headline })?;
            Msg::HeadlineSelected(chosen)
        }
        Command::Draft => Msg::WriteDraftClicked,
        Command::Style(style) => Msg::DraftStyleSelected(style),
        Command::Feedback(notes) => Msg::DraftFeedbackSubmitted(notes),
        Command::Back => Msg::BackToResults,
        Command::Export => Msg::ExportRequested,
        Command::Key(Some(key)) => Msg::CredentialSaved(key),
        Command::Key(None) => Msg::CredentialPromptOpened,
        Command::Cancel => Msg::CredentialPromptDismissed,
        Command::Dismiss => Msg::ErrorDismissed,
        Command::Reset => Msg::ResetClicked,
        Command::Show => return Ok(Action::Show),
        Command::Help => return Ok(Action::Help),
        Command::Quit => return Ok(Action::Quit),
    };
    Ok(Action::Dispatch(msg))
}

fn split_first(rest: &str) -> Option<(&str, &str)> {
    rest.split_once(char::is_whitespace)
        .map(|(first, second)| (first, second.trim()))
}

fn required<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(rest)
    }
}

fn parse_field(key: &str) -> Result<Field, CommandError> {
    Field::from_key(&key.to_ascii_lowercase().replace('-', "_"))
        .ok_or_else(|| CommandError::UnknownField(key.to_string()))
}

/// One-based index as typed by the user.
fn parse_index(text: &str, usage: &'static str) -> Result<usize, CommandError> {
    match text.trim().parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(CommandError::Usage(usage)),
    }
}
