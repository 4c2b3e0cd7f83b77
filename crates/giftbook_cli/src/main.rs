//! Giftbook command-line front end.
//!
//! # Responsibility
//! - Act as the presentation layer over `giftbook_core`: validate input,
//!   generate ids, size captured photos.
//! - Drive the people store and print human-readable results.
//!
//! # Invariants
//! - Validation failures never reach the store.
//! - Every accepted write is flushed before the process exits.

mod args;

use args::{parse_command, Command, USAGE};
use giftbook_core::{
    init_logging, BackgroundWriter, ConfigError, GiftbookConfig, IdeaDimensions, IdeaDraft,
    Mutation, PeopleStore, Person, PersonDraft, SqliteKeyValueStore, StorageError, StoreError,
    ValidationError,
};
use log::info;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

type Store = PeopleStore<BackgroundWriter<SqliteKeyValueStore>>;

#[derive(Debug)]
enum CliError {
    Usage(String),
    Validation(ValidationError),
    Config(ConfigError),
    Storage(StorageError),
    Store(StoreError),
    NotFound(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(message) => write!(f, "{message}\n\n{USAGE}"),
            Self::Validation(err) => write!(f, "Error: {err}"),
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(message) => write!(f, "{message}"),
        }
    }
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::Usage(_) | Self::Validation(_) => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = parse_command(&args)
        .map_err(CliError::Usage)
        .and_then(run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Help => {
            println!("giftbook {}\n", giftbook_core::core_version());
            println!("{USAGE}");
            return Ok(());
        }
        Command::Ping => {
            println!("giftbook_core ping={}", giftbook_core::ping());
            return Ok(());
        }
        Command::Version => {
            println!("giftbook_core version={}", giftbook_core::core_version());
            return Ok(());
        }
        _ => {}
    }

    let config = GiftbookConfig::from_env().map_err(CliError::Config)?;
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let storage = SqliteKeyValueStore::open(&config.db_path)
        .and_then(BackgroundWriter::spawn)
        .map_err(CliError::Storage)?;
    let mut store = PeopleStore::new(storage);
    store.load();

    let outcome = execute(&mut store, &config, command);
    // Flush even when the command failed so earlier writes are not lost.
    let flushed = store.flush();
    outcome?;
    flushed?;
    Ok(())
}

fn execute(store: &mut Store, config: &GiftbookConfig, command: Command) -> Result<(), CliError> {
    match command {
        Command::List => {
            let people = store.people_by_birthday();
            if people.is_empty() {
                println!("No people yet. Add one with `giftbook add-person <name> <dob>`.");
            }
            for person in people {
                print_person_line(person);
            }
        }
        Command::Show(person_id) => {
            let person = store
                .person_ideas(person_id)
                .ok_or_else(|| CliError::NotFound(format!("no person with id {person_id}")))?;
            print_person_line(person);
            if person.ideas.is_empty() {
                println!("  (no gift ideas yet)");
            }
            for idea in &person.ideas {
                println!(
                    "  {}  {}  [{}]  {:.0}x{:.0}",
                    idea.id, idea.text, idea.img, idea.width, idea.height
                );
            }
        }
        Command::AddPerson { name, dob } => {
            let person = PersonDraft::new(name, dob)
                .validate()
                .map_err(CliError::Validation)?;
            let id = person.id;
            store.add_person(person)?;
            info!("event=cli_add_person module=cli status=ok person_id={id}");
            println!("added person {id}");
        }
        Command::RemovePerson(person_id) => {
            let mutation = store.remove_person(person_id)?;
            report(mutation, &format!("removed person {person_id}"));
        }
        Command::AddIdea {
            person_id,
            text,
            img,
        } => {
            let size = IdeaDimensions::for_screen_width(config.screen_width);
            let idea = IdeaDraft::new(text, img, size)
                .validate()
                .map_err(CliError::Validation)?;
            let idea_id = idea.id;
            let mutation = store.add_idea(person_id, idea)?;
            report(mutation, &format!("added idea {idea_id}"));
        }
        Command::RemoveIdea { person_id, idea_id } => {
            let mutation = store.remove_idea(person_id, idea_id)?;
            report(mutation, &format!("removed idea {idea_id}"));
        }
        Command::Help | Command::Ping | Command::Version => {}
    }

    Ok(())
}

fn print_person_line(person: &Person) {
    println!(
        "{}  {}  DOB: {}  ideas: {}",
        person.id,
        person.name,
        person.dob,
        person.ideas.len()
    );
}

fn report(mutation: Mutation, applied: &str) {
    match mutation {
        Mutation::Applied => println!("{applied}"),
        Mutation::Unchanged => println!("nothing matched; nothing changed"),
    }
}
