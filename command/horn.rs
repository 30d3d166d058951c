//! A clause filter: read a clausal program, unfold the non-recursive
//! definitions into their callers, drop structural duplicates, and
//! print what remains. Pass `-v` to watch the transformations.

use std::env;
use std::fs::read_to_string;
use std::io::{stdin, Read};

use anyhow::{Context as _, Result};
use atty::Stream;

use horn_context::Context;
use horn_theory::ClausalTheory;
use horn_tracer::Trace;

fn main() -> Result<()> {
    let mut filename = None;
    let mut trace = Trace::none();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-v" => trace = Trace::all(),
            _ => filename = Some(arg),
        }
    }

    if filename.is_none() && atty::is(Stream::Stdin) && atty::is(Stream::Stdout) {
        println!("Welcome to horn! Please enter your clauses, terminated with Ctrl-D.");
    }
    let input = read_file(filename.as_deref())?;

    let ctx = Context::new();
    let clauses = ctx.parse_program(&input)?;
    let theory = ClausalTheory::new(clauses)
        .unfold(&ctx, trace)
        .remove_duplicates(trace);
    print!("{theory}");
    Ok(())
}

/// Read a file or standard input and return the content as a string.
fn read_file(filename: Option<&str>) -> Result<String> {
    match filename {
        None | Some("-") => {
            let mut buffer = String::new();
            stdin()
                .read_to_string(&mut buffer)
                .context("Reading from stdin")?;
            Ok(buffer)
        }
        Some(filename) => read_to_string(filename).with_context(|| format!("Reading {filename}")),
    }
}
