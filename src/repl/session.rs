//! REPL session state
//!
//! Holds the pagination cursor and the caught creatures for one run, and
//! executes commands against the API client.

use std::collections::BTreeMap;
use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::api::PokeClient;
use crate::error::{Error, Result};
use crate::models::{LocationAreaPage, Pokemon};
use crate::repl::catch::attempt_catch;
use crate::repl::command::{Command, COMMANDS};

/// Printed by `exit` and on end of input.
pub const GOODBYE: &str = "Closing the Pokedex... Goodbye!";

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug)]
pub struct Session {
    client: PokeClient,
    /// Page `map` will show next; `None` once the listing is exhausted
    next_page: Option<String>,
    /// Page `mapb` will show; `None` while on the first page
    previous_page: Option<String>,
    pokedex: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied RNG for the catch mechanic.
    pub fn with_rng(client: PokeClient, rng: StdRng) -> Self {
        Self {
            next_page: Some(client.first_page_url()),
            previous_page: None,
            pokedex: BTreeMap::new(),
            client,
            rng,
        }
    }

    /// The creatures caught so far, keyed by name.
    pub fn pokedex(&self) -> &BTreeMap<String, Pokemon> {
        &self.pokedex
    }

    /// Runs one command, writing its output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "executing command");

        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "{}", GOODBYE)?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map_forward(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for info in COMMANDS {
            writeln!(out, "{}: {}", info.usage, info.description)?;
        }
        Ok(())
    }

    async fn map_forward<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let url = self.next_page.clone().ok_or(Error::LastPage)?;
        let page = self.client.location_areas(Some(&url)).await?;
        self.show_page(page, out)
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let url = self.previous_page.clone().ok_or(Error::FirstPage)?;
        let page = self.client.location_areas(Some(&url)).await?;
        self.show_page(page, out)
    }

    // The cursor only moves once a page was fetched and decoded
    fn show_page<W: Write>(&mut self, page: LocationAreaPage, out: &mut W) -> Result<()> {
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        self.next_page = page.next;
        self.previous_page = page.previous;
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        let area = self.client.location_area(area).await?;

        writeln!(out, "Found Pokemon:")?;
        for name in area.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        let pokemon = self.client.pokemon(name).await?;
        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;

        if attempt_catch(&mut self.rng, pokemon.base_experience) {
            info!(pokemon = %pokemon.name, "caught");
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(pokemon.name.clone(), pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let pokemon = self
            .pokedex
            .get(name)
            .ok_or_else(|| Error::NotCaught(name.to_string()))?;

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}
