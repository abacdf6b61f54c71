// Host binary: reads a G-code command stream, routes ROUNDED_G0 (and,
// when configured, plain G0) through the rounding engine, and prints the
// emitted linear moves.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use rounded_path::{Config, MoveParams, MoveSink, PositionSource, RoundedPath, Vec3};

#[derive(Parser, Debug)]
#[command(name = "rounded-path", about = "Corner-rounded travel moves for G-code streams")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// G-code input file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Mutable G-code state shared between the position query and the move
/// writer.
struct HostState {
    position: Vec3,
    absolute: bool,
}

#[derive(Clone)]
struct StateHandle(Rc<RefCell<HostState>>);

impl PositionSource for StateHandle {
    fn gcode_position(&self) -> Vec3 {
        self.0.borrow().position
    }

    fn absolute_coordinates(&self) -> bool {
        self.0.borrow().absolute
    }
}

/// Prints each emitted move as a G1 line and advances the logical position.
struct GcodeWriter(Rc<RefCell<HostState>>);

impl MoveSink for GcodeWriter {
    fn linear_move(&mut self, target: Vec3, feed_rate: Option<f64>) {
        match feed_rate {
            Some(f) => println!("G1 X{:.5} Y{:.5} Z{:.5} F{f}", target[0], target[1], target[2]),
            None => println!("G1 X{:.5} Y{:.5} Z{:.5}", target[0], target[1], target[2]),
        }
        self.0.borrow_mut().position = target;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            rounded_path::load_config(path)?
        }
        None => Config::default(),
    };
    tracing::info!(
        "resolution: {} mm, replace_g0: {}",
        config.rounded_path.resolution,
        config.rounded_path.replace_g0
    );

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let state = Rc::new(RefCell::new(HostState {
        position: [0.0; 3],
        absolute: true,
    }));
    let replace_g0 = config.rounded_path.replace_g0;
    let mut engine = RoundedPath::new(
        &config.rounded_path,
        StateHandle(state.clone()),
        GcodeWriter(state.clone()),
    );

    for line in reader.lines() {
        let line = line?;
        // Strip line comments.
        let line = line.split(';').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let cmd = cmd.to_ascii_uppercase();
        let result = match cmd.as_str() {
            "ROUNDED_G0" => MoveParams::parse(args).and_then(|p| engine.rounded_move(&p)),
            "G0" if replace_g0 => MoveParams::parse(args).and_then(|p| engine.rounded_move(&p)),
            "G0" | "G1" => MoveParams::parse(args).map(|p| {
                let (pos, absolute) = {
                    let st = state.borrow();
                    (st.position, st.absolute)
                };
                let target = if absolute {
                    p.resolve(pos)
                } else {
                    p.resolve_relative(pos)
                };
                GcodeWriter(state.clone()).linear_move(target, p.feed_rate.filter(|&f| f > 0.0));
            }),
            "G90" => {
                state.borrow_mut().absolute = true;
                Ok(())
            }
            "G91" => {
                state.borrow_mut().absolute = false;
                Ok(())
            }
            _ => {
                tracing::warn!("Unhandled command: {cmd}");
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::error!("{cmd}: {e}");
        }
    }

    if engine.buffered() > 0 {
        tracing::warn!(
            "input ended with {} buffered points; flushing with D=0",
            engine.buffered()
        );
        engine.rounded_move(&MoveParams::default())?;
    }

    Ok(())
}
