//! Interactive play command.

use super::output::{format_chronicle, format_event, format_status};
use super::{CliError, load_rules, resolve_seed};
use pocket_kingdom::{Command, Session};
use std::io::{self, BufRead, Write};
use std::path::Path;

const HELP: &str = "\
Commands:
  build <farm|mine|barracks|house>   construct a building
  recruit                            train a soldier
  wonder                             build the Grand Castle
  end                                end the turn
  status                             show the kingdom
  log                                show recent events
  reset                              start over with the same seed
  help                               show this message
  quit                               leave the game";

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the rules cannot be loaded or the terminal fails.
pub(crate) fn execute(seed: Option<u64>, rules: Option<&Path>) -> Result<(), CliError> {
    let rules = load_rules(rules)?;
    let seed = resolve_seed(seed);
    let mut session = Session::new(seed, rules);

    println!("Pocket Kingdom (seed {seed}). Type 'help' for commands.");
    println!();
    print!("{}", format_status(&session));
    print!("{}", format_chronicle(session.chronicle()));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim().to_ascii_lowercase();

        match input.as_str() {
            "" => {}
            "quit" | "exit" | "q" => break,
            "help" | "?" => println!("{HELP}"),
            "status" => print!("{}", format_status(&session)),
            "log" => print!("{}", format_chronicle(session.chronicle())),
            "reset" => {
                session.reset();
                print!("{}", format_status(&session));
                print!("{}", format_chronicle(session.chronicle()));
            }
            other => match other.parse::<Command>() {
                Ok(command) => {
                    let events = session.apply(command);
                    for event in &events {
                        println!("{}", format_event(event));
                    }
                    print!("{}", format_status(&session));
                    if session.is_over() {
                        println!("The reign is over. Type 'reset' to play again or 'quit' to leave.");
                    }
                }
                Err(e) => println!("  {e} (type 'help' for commands)"),
            },
        }
    }

    Ok(())
}
