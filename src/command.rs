//! Line commands understood by the console host.

use rainfall_ui::{Mode, ParameterField, Trigger};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetCity(String),
    SetShared(ParameterField, String),
    SetManual(ParameterField, String),
    Run(Trigger),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  mode <city|current|manual>   switch input mode
  city <name>                  type into the city field
  set <field> <value>          edit a fetched parameter field
  manual <field> <value>       edit a manual parameter field
  fetch                        get weather for the city
  locate                       get weather for the current location
  predict                      predict from the fetched fields
  predict-manual               predict from the manual fields
  show                         print the whole form
  quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };

        match word {
            "mode" => rest
                .parse::<Mode>()
                .map(|m| Command::Run(Trigger::ModeChange(m)))
                .map_err(|e| e.to_string()),
            // The city text is kept as typed; trimming happens on fetch.
            "city" => Ok(Command::SetCity(rest.to_string())),
            "set" => parse_field(rest).map(|(f, v)| Command::SetShared(f, v)),
            "manual" => parse_field(rest).map(|(f, v)| Command::SetManual(f, v)),
            "fetch" => Ok(Command::Run(Trigger::FetchByCity)),
            "locate" => Ok(Command::Run(Trigger::FetchByLocation)),
            "predict" => Ok(Command::Run(Trigger::PredictShared)),
            "predict-manual" => Ok(Command::Run(Trigger::PredictManual)),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}

fn parse_field(rest: &str) -> Result<(ParameterField, String), String> {
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (rest, ""),
    };
    let field = name.parse::<ParameterField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}
