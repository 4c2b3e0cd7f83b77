//! Command-line argument parsing.

use giftbook_core::{IdeaId, PersonId};
use uuid::Uuid;

pub const USAGE: &str = "Usage: giftbook <COMMAND>

Commands:
  list                                   People ordered by birthday
  show <person-id>                       One person and their gift ideas
  add-person <name> <dob>                Add a person (dob as MM/DD/YYYY)
  remove-person <person-id>              Remove a person and their ideas
  add-idea <person-id> <text> <img>      Add a gift idea with a photo path/URI
  remove-idea <person-id> <idea-id>      Remove one gift idea
  ping                                   Check core linkage
  version                                Print core version

Environment:
  GIFTBOOK_DB_PATH       SQLite file (default: giftbook.sqlite3 in temp dir)
  GIFTBOOK_LOG_DIR       Absolute log directory (logging off when unset)
  GIFTBOOK_LOG_LEVEL     trace|debug|info|warn|error
  GIFTBOOK_SCREEN_WIDTH  Screen width used to size idea photos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Ping,
    Version,
    List,
    Show(PersonId),
    AddPerson {
        name: String,
        dob: String,
    },
    RemovePerson(PersonId),
    AddIdea {
        person_id: PersonId,
        text: String,
        img: String,
    },
    RemoveIdea {
        person_id: PersonId,
        idea_id: IdeaId,
    },
}

/// Parses arguments after the program name.
pub fn parse_command(args: &[String]) -> Result<Command, String> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    let command = match name.as_str() {
        "-h" | "--help" | "help" => {
            expect_arity(name, rest, 0)?;
            Command::Help
        }
        "ping" => {
            expect_arity(name, rest, 0)?;
            Command::Ping
        }
        "-V" | "--version" | "version" => {
            expect_arity(name, rest, 0)?;
            Command::Version
        }
        "list" => {
            expect_arity(name, rest, 0)?;
            Command::List
        }
        "show" => {
            expect_arity(name, rest, 1)?;
            Command::Show(parse_id("person-id", &rest[0])?)
        }
        "add-person" => {
            expect_arity(name, rest, 2)?;
            Command::AddPerson {
                name: rest[0].clone(),
                dob: rest[1].clone(),
            }
        }
        "remove-person" => {
            expect_arity(name, rest, 1)?;
            Command::RemovePerson(parse_id("person-id", &rest[0])?)
        }
        "add-idea" => {
            expect_arity(name, rest, 3)?;
            Command::AddIdea {
                person_id: parse_id("person-id", &rest[0])?,
                text: rest[1].clone(),
                img: rest[2].clone(),
            }
        }
        "remove-idea" => {
            expect_arity(name, rest, 2)?;
            Command::RemoveIdea {
                person_id: parse_id("person-id", &rest[0])?,
                idea_id: parse_id("idea-id", &rest[1])?,
            }
        }
        other => return Err(format!("unknown command `{other}`")),
    };

    Ok(command)
}

fn expect_arity(command: &str, rest: &[String], expected: usize) -> Result<(), String> {
    if rest.len() != expected {
        return Err(format!(
            "`{command}` takes {expected} argument(s), got {}",
            rest.len()
        ));
    }
    Ok(())
}

fn parse_id(label: &str, raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("{label} `{raw}` is not a valid id"))
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn no_arguments_prints_help() {
        assert_eq!(parse_command(&[]).unwrap(), Command::Help);
    }

    #[test]
    fn add_person_keeps_raw_input_for_validation() {
        let command = parse_command(&args(&["add-person", " Ana ", "03/10/1990"])).unwrap();
        assert_eq!(
            command,
            Command::AddPerson {
                name: " Ana ".to_string(),
                dob: "03/10/1990".to_string(),
            }
        );
    }

    #[test]
    fn ids_must_be_uuids() {
        let err = parse_command(&args(&["remove-person", "P1"])).unwrap_err();
        assert!(err.contains("not a valid id"));

        let ok = parse_command(&args(&[
            "remove-idea",
            "11111111-2222-4333-8444-555555555555",
            "66666666-7777-4888-9999-000000000000",
        ]));
        assert!(matches!(ok, Ok(Command::RemoveIdea { .. })));
    }

    #[test]
    fn wrong_arity_and_unknown_commands_are_rejected() {
        assert!(parse_command(&args(&["add-idea", "x"])).is_err());
        assert!(parse_command(&args(&["list", "extra"])).is_err());
        assert!(parse_command(&args(&["explode"])).is_err());
    }
}
