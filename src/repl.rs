//! Interactive filter session over stdin.
//!
//! ```text
//! filter route=152 lat=-34.61 lon=-58.45
//! clear route
//! reset
//! show
//! quit
//! ```

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use colectivos::view::Icon;
use colectivos::{FilterField, FilterInput, Session};
use realtime::Clock;

use crate::render::{self, Format};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter(FilterInput),
    Clear(FilterField),
    Reset,
    Show,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else { bail!("empty command") };

        match verb {
            "filter" => {
                let mut input = FilterInput::default();
                for arg in words {
                    let (key, value) =
                        arg.split_once('=').ok_or_else(|| anyhow!("expected key=value, got `{arg}`"))?;
                    match key {
                        "route" => input.route = value.to_string(),
                        "lat" => input.latitude = value.to_string(),
                        "lon" => input.longitude = value.to_string(),
                        _ => bail!("unknown filter `{key}`"),
                    }
                }
                Ok(Self::Filter(input))
            }
            "clear" => {
                let field = match words.next() {
                    Some("route") => FilterField::Route,
                    Some("lat") => FilterField::Latitude,
                    Some("lon") => FilterField::Longitude,
                    Some(other) => bail!("unknown filter `{other}`"),
                    None => bail!("clear needs one of route, lat, lon"),
                };
                Ok(Self::Clear(field))
            }
            "reset" => Ok(Self::Reset),
            "show" => Ok(Self::Show),
            "quit" | "exit" => Ok(Self::Quit),
            _ => bail!("unknown command `{verb}`"),
        }
    }
}

/// Read commands until `quit` or end of input, redrawing after each one.
pub fn run(
    session: &mut Session, clock: &impl Clock, icon: &Icon, format: Format, input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    render::write(out, session.snapshot(), &session.view(clock.now(), icon.clone()), format)?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        match command {
            Command::Filter(input) => session.apply(&input),
            Command::Clear(field) => session.clear(field),
            Command::Reset => session.reset(),
            Command::Show => {}
            Command::Quit => break,
        }
        render::write(out, session.snapshot(), &session.view(clock.now(), icon.clone()), format)?;
    }

    Ok(())
}
