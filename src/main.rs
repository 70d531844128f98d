//! Light Weaver command-line demo
//!
//! Loads a level (JSON path, or the builtin reference level), applies the
//! placements given on the command line, then prints the board, the beam
//! trace summary and whether the level is solved.
//!
//! Usage:
//!   light-weaver [LEVEL.json] [ROW,COL,ELEMENT]...
//!
//! Example:
//!   light-weaver 1,5,prism 1,6,mirror_backslash 3,6,mirror_slash

use std::fmt::Write as _;
use std::process::ExitCode;

use light_weaver::{Coord, Element, Level, Session};

fn main() -> ExitCode {
    env_logger::init();

    match run(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: impl Iterator<Item = String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut level = None;
    let mut placements = Vec::new();

    for arg in args {
        if arg.ends_with(".json") {
            let json = std::fs::read_to_string(&arg)?;
            level = Some(Level::from_json(&json)?);
        } else {
            placements.push(parse_placement(&arg)?);
        }
    }

    let level = level.unwrap_or_else(Level::reference);
    let mut session = Session::new(&level)?;

    for (coord, element) in placements {
        session
            .place(coord, element)
            .map_err(|e| format!("cannot place {} at ({}, {}): {e}", element.name(), coord.row, coord.col))?;
    }

    print!("{}", session.render_ascii());

    let trace = session.trace();
    let mut summary = String::new();
    writeln!(summary, "beam segments: {}", trace.segments.len())?;
    let mut lit: Vec<_> = trace.lit_targets.iter().collect();
    lit.sort();
    for coord in lit {
        writeln!(summary, "target lit at ({}, {})", coord.row, coord.col)?;
    }
    writeln!(
        summary,
        "{}",
        if session.is_solved() {
            "level solved"
        } else {
            "level not solved"
        }
    )?;
    print!("{summary}");

    Ok(())
}

fn parse_placement(arg: &str) -> Result<(Coord, Element), String> {
    let parts: Vec<&str> = arg.split(',').collect();
    let [row, col, name] = parts.as_slice() else {
        return Err(format!("expected ROW,COL,ELEMENT, got {arg:?}"));
    };
    let row = row.trim().parse::<usize>().map_err(|e| format!("bad row in {arg:?}: {e}"))?;
    let col = col.trim().parse::<usize>().map_err(|e| format!("bad col in {arg:?}: {e}"))?;
    let element = Element::from_name(name.trim())
        .ok_or_else(|| format!("unknown element {name:?}"))?;
    Ok((Coord::new(row, col), element))
}
