use crate::cli::Cli;
use crate::commands::{self, BoardContext};
use anyhow::{Result, anyhow};
use clap::Parser as ClapParser;
use rustyline::DefaultEditor;

pub struct Application {
    context: BoardContext,
}

/// What the terminal loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    Exit,
}

impl Application {
    pub fn new(context: BoardContext) -> Self {
        Self { context }
    }

    /// Run one command from the process arguments.
    pub fn run_command(&mut self, command: crate::cli::Commands) -> Result<()> {
        commands::execute(&mut self.context, command)
    }

    pub fn run_terminal(&mut self) -> Result<()> {
        log::info!("Starting Bookboard Terminal");
        log::debug!("Using state directory {}", self.context.store.state_dir().display());

        let mut rl = DefaultEditor::new()?;
        println!("Welcome to Bookboard! Type 'help' for commands.");

        loop {
            match rl.readline("bookboard> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    match self.process_input(&line) {
                        Ok(LineOutcome::Exit) => break,
                        Ok(LineOutcome::Continue) => {}
                        Err(err) => {
                            log::error!("Failed to process command: {:?}", err);
                            println!("Error: {}", err);
                        }
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    fn process_input(&mut self, line: &str) -> Result<LineOutcome> {
        let mut tokens = split_command_line(line)?;
        if tokens.first().is_some_and(|t| t.eq_ignore_ascii_case("bookboard")) {
            tokens.remove(0);
        }

        match tokens.first().map(|t| t.to_lowercase()).as_deref() {
            None => return Ok(LineOutcome::Continue),
            Some("exit") | Some("quit") => return Ok(LineOutcome::Exit),
            Some("help") => {
                commands::print_help()?;
                return Ok(LineOutcome::Continue);
            }
            _ => {}
        }

        let cli = match Cli::try_parse_from(std::iter::once("bookboard".to_string()).chain(tokens)) {
            Ok(cli) => cli,
            Err(err) => {
                // Usage errors and --help output are shown, not treated as failures
                let _ = err.print();
                return Ok(LineOutcome::Continue);
            }
        };

        if let Some(command) = cli.command {
            commands::execute(&mut self.context, command)?;
        }
        Ok(LineOutcome::Continue)
    }
}

/// Split a terminal line into arguments, honouring double quotes and backslash escapes.
pub fn split_command_line(input: &str) -> Result<Vec<String>> {
    let normalized_input = input.replace('\u{a0}', " ");
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut escaped = false;

    for c in normalized_input.chars() {
        match c {
            _ if escaped => {
                current.push(c);
                escaped = false;
            }
            '\\' => escaped = true,
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    parts.push(std::mem::take(&mut current));
                    quoted = false;
                }
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(anyhow!("Unterminated quote in input"));
    }
    if escaped {
        current.push('\\');
    }
    if !current.is_empty() || quoted {
        parts.push(current);
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::state::BoardStore;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_split_command_line() {
        let parts = split_command_line(r#"add --supplier "Ana Maria" --client O\"Neil --pax 2"#).unwrap();
        assert_eq!(parts, vec!["add", "--supplier", "Ana Maria", "--client", "O\"Neil", "--pax", "2"]);
    }

    #[test]
    fn test_split_keeps_empty_quoted_argument() {
        let parts = split_command_line(r#"config set export.timezone """#).unwrap();
        assert_eq!(parts, vec!["config", "set", "export.timezone", ""]);
    }

    #[test]
    fn test_split_rejects_unterminated_quote() {
        assert!(split_command_line(r#"list --supplier "Ana"#).is_err());
    }

    #[test]
    fn test_terminal_lines_drive_commands() -> Result<()> {
        let temp_dir = tempdir()?;
        let store = BoardStore::open(temp_dir.path())?;
        let context = BoardContext::new(Config::default(), Some(temp_dir.path().join("config.toml")), store);
        let mut app = Application::new(context);

        assert_eq!(app.process_input("   ")?, LineOutcome::Continue);
        assert_eq!(
            app.process_input(
                r#"bookboard add --supplier Ana --service "Kayak Tour" --client Smith --date 2024-06-01 --start 09:00 --end 11:00"#
            )?,
            LineOutcome::Continue
        );
        assert_eq!(app.context.store.load_events()?.len(), 1);
        assert_eq!(app.context.store.services()?, vec!["Kayak Tour"]);

        // Unknown commands print clap usage instead of failing the terminal
        assert_eq!(app.process_input("frobnicate")?, LineOutcome::Continue);
        assert_eq!(app.process_input("EXIT")?, LineOutcome::Exit);
        Ok(())
    }
}
