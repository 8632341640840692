//! REPL Module
//!
//! Reads commands line by line, dispatches them to a [`Session`] and prints
//! the results.
//!
//! # Commands
//! - `help`, `exit`
//! - `map`, `mapb` - Page through location areas
//! - `explore <area>` - List creatures in an area
//! - `catch <pokemon>`, `inspect <pokemon>`, `pokedex`

pub mod catch;
pub mod command;
pub mod session;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::error::Result;

pub use command::{clean_input, Command, COMMANDS};
pub use session::{Flow, Session, GOODBYE};

/// Shown before every line of input.
pub const PROMPT: &str = "Pokedex > ";

/// Runs the read-eval-print loop until `exit` or end of input.
///
/// Command failures are printed and the loop carries on. Only failures to
/// read input or write output end the loop with an error.
pub async fn run<R, W>(session: &mut Session, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            writeln!(output, "{}", GOODBYE)?;
            break;
        };

        let command = match Command::parse(&clean_input(&line)) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };

        match session.execute(command, output).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                warn!(error = %e, "command failed");
                writeln!(output, "{}", e)?;
            }
        }
    }

    output.flush()?;
    Ok(())
}
