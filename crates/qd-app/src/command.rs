//! Console input parsing

use qd_data::ChartKind;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: make it the current query and submit it
    Ask(String),
    Visualize(ChartKind),
    Clear,
    History,
    /// 1-based history position
    Rerun(usize),
    /// List suggestions, or pick one by 1-based position
    Suggest(Option<usize>),
    Export,
    Help,
    Quit,
}

impl Command {
    /// Parse a line; `Err` carries a message for the user
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Ask(line.to_string()));
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match name {
            "viz" => {
                let kind = arg.ok_or("usage: :viz <bar|line|pie|table>")?;
                Ok(Command::Visualize(kind.parse()?))
            }
            "clear" => Ok(Command::Clear),
            "history" => Ok(Command::History),
            "rerun" => {
                let n = arg.ok_or("usage: :rerun <n>")?;
                Ok(Command::Rerun(parse_position(n)?))
            }
            "suggest" => match arg {
                Some(n) => Ok(Command::Suggest(Some(parse_position(n)?))),
                None => Ok(Command::Suggest(None)),
            },
            "export" => Ok(Command::Export),
            "help" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            other => Err(format!("Unknown command ':{}', try :help", other)),
        }
    }
}

fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Expected a position starting at 1, got '{}'", raw)),
    }
}

pub const HELP: &str = "\
Type a question to run it, or:
  :viz <bar|line|pie|table>  choose how results are drawn
  :clear                     clear the current results
  :history                   list past queries
  :rerun <n>                 run history entry n again
  :suggest [n]               list suggestions or load one into the input
  :export                    print history as JSON
  :quit                      exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            Command::parse("  Show monthly sales  "),
            Ok(Command::Ask("Show monthly sales".to_string()))
        );
        assert_eq!(Command::parse(""), Ok(Command::Ask(String::new())));
    }

    #[test]
    fn test_commands() {
        assert_eq!(Command::parse(":viz Pie"), Ok(Command::Visualize(ChartKind::Pie)));
        assert_eq!(Command::parse(":rerun 2"), Ok(Command::Rerun(2)));
        assert_eq!(Command::parse(":suggest"), Ok(Command::Suggest(None)));
        assert_eq!(Command::parse(":suggest 3"), Ok(Command::Suggest(Some(3))));
        assert_eq!(Command::parse(":q"), Ok(Command::Quit));
    }

    #[test]
    fn test_bad_commands() {
        assert!(Command::parse(":viz").is_err());
        assert!(Command::parse(":viz scatter").is_err());
        assert!(Command::parse(":rerun 0").is_err());
        assert!(Command::parse(":rerun x").is_err());
        assert!(Command::parse(":frobnicate").is_err());
    }
}
