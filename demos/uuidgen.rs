//! Simple command that prints one or '-n count' UUID strings of version 1, 4, 6 or 7

use std::{env, io, io::Write, process::ExitCode};

use rfc_uuid::{Generator, Uuid};

#[derive(Debug, Default)]
struct Options {
    version: Option<u8>,
    count: Option<usize>,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-v version] [-n count]",
                    program.as_deref().unwrap_or("uuidgen")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let g = Generator::new();
    let generate: fn(&Generator) -> Result<Uuid, rfc_uuid::Error> = match opts.version {
        Some(1) => Generator::new_v1,
        Some(4) => Generator::new_v4,
        Some(6) => Generator::new_v6,
        _ => Generator::new_v7,
    };

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..opts.count.unwrap_or(1) {
        match generate(&g) {
            Ok(uuid) => writeln!(buf, "{}", uuid)?,
            Err(err) => {
                buf.flush()?;
                eprintln!("Error: {}", err);
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        let (name, slot_is_set) = match arg.as_str() {
            "-n" => ('n', opts.count.is_some()),
            "-v" => ('v', opts.version.is_some()),
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        };
        if slot_is_set {
            return Err(format!("option '{}' given more than once", name));
        }
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", name));
        };
        let invalid = || format!("invalid argument to option '{}': '{}'", name, value);
        if name == 'n' {
            opts.count = Some(value.parse().map_err(|_| invalid())?);
        } else {
            match value.parse() {
                Ok(v @ (1 | 4 | 6 | 7)) => opts.version = Some(v),
                _ => return Err(invalid()),
            }
        }
    }
    Ok(opts)
}
