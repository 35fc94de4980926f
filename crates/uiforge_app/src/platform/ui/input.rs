use uiforge_core::{EditorField, Msg, Route};

pub const HELP: &str = "\
Commands:
  select [FILENAME]     pick a strategy (no argument clears the selection)
  describe TEXT         set the component description
  generate              generate a component
  preview               write the standalone preview page
  history               list past generations
  open ID               view a history record
  close                 dismiss the history list
  new | edit            open the strategy editor
  set FIELD VALUE       edit a strategy field
  save | cancel         leave the strategy editor
  back                  return from the result view
  go PATH               load a page, e.g. /result-view?history_id=42
  inspect EXPR          evaluate a script expression in the page
  help | quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Go(Route),
    Inspect(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command `{0}`, type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown field `{0}`")]
    UnknownField(String),
}

pub fn parse_command(line: &str) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "select" => Command::Dispatch(Msg::StrategySelected(rest.to_string())),
        "describe" => Command::Dispatch(Msg::DescriptionChanged(rest.to_string())),
        "generate" => Command::Dispatch(Msg::GenerateClicked),
        "preview" => Command::Dispatch(Msg::PreviewClicked),
        "history" => Command::Dispatch(Msg::HistoryClicked),
        "open" if rest.is_empty() => return Err(InputError::Usage("open ID")),
        "open" => Command::Dispatch(Msg::HistoryEntryChosen(rest.to_string())),
        "close" => Command::Dispatch(Msg::HistoryClosed),
        "new" => Command::Dispatch(Msg::NewStrategyClicked),
        "edit" => Command::Dispatch(Msg::EditStrategyClicked),
        "set" => {
            let (name, value) = rest
                .split_once(char::is_whitespace)
                .map(|(name, value)| (name, value.trim()))
                .unwrap_or((rest, ""));
            if name.is_empty() {
                return Err(InputError::Usage("set FIELD VALUE"));
            }
            let field =
                EditorField::parse(name).ok_or_else(|| InputError::UnknownField(name.to_string()))?;
            Command::Dispatch(Msg::EditorFieldChanged {
                field,
                value: value.to_string(),
            })
        }
        "save" => Command::Dispatch(Msg::SaveStrategyClicked),
        "cancel" => Command::Dispatch(Msg::CancelClicked),
        "back" => Command::Dispatch(Msg::BackClicked),
        "go" if rest.is_empty() => return Err(InputError::Usage("go PATH")),
        "go" => Command::Go(Route::parse(rest)),
        "inspect" if rest.is_empty() => return Err(InputError::Usage("inspect EXPR")),
        "inspect" => Command::Inspect(rest.to_string()),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
