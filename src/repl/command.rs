//! Command parsing
//!
//! Turns a raw input line into a typed [`Command`].

use crate::error::{Error, Result};

/// A registered command as shown by `help`.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

/// Every command, in the order `help` lists them.
pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "help",
        usage: "help",
        description: "Displays a help message",
    },
    CommandInfo {
        name: "exit",
        usage: "exit",
        description: "Exit the Pokedex",
    },
    CommandInfo {
        name: "map",
        usage: "map",
        description: "Displays the next page of location areas",
    },
    CommandInfo {
        name: "mapb",
        usage: "mapb",
        description: "Displays the previous page of location areas",
    },
    CommandInfo {
        name: "explore",
        usage: "explore <location-area>",
        description: "Lists the Pokemon found in a location area",
    },
    CommandInfo {
        name: "catch",
        usage: "catch <pokemon>",
        description: "Throws a Pokeball at a Pokemon",
    },
    CommandInfo {
        name: "inspect",
        usage: "inspect <pokemon>",
        description: "Shows details of a caught Pokemon",
    },
    CommandInfo {
        name: "pokedex",
        usage: "pokedex",
        description: "Lists every Pokemon you have caught",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
}

impl Command {
    /// Parses cleaned input words.
    ///
    /// Returns `Ok(None)` for blank input. Words after the expected argument
    /// are ignored.
    pub fn parse(words: &[String]) -> Result<Option<Self>> {
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };
        let arg = |what: &'static str| {
            args.first()
                .cloned()
                .ok_or(Error::MissingArgument(what))
        };

        let command = match name.as_str() {
            "help" => Self::Help,
            "exit" => Self::Exit,
            "map" => Self::Map,
            "mapb" => Self::MapBack,
            "explore" => Self::Explore(arg("location area")?),
            "catch" => Self::Catch(arg("pokemon name")?),
            "inspect" => Self::Inspect(arg("pokemon name")?),
            "pokedex" => Self::Pokedex,
            other => return Err(Error::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Lowercases `text` and splits it into whitespace-separated words.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect()
}
