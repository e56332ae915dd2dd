use std::path::PathBuf;
use std::process;

use clap::Parser;
use intcode::machine;
use intcode::program;
use intcode::search;

#[derive(Parser)]
#[command(name = "intcode", about = "Register machine interpreter with noun/verb search")]
struct Cli {
    /// Program file: one line of comma-separated integers.
    program: PathBuf,

    /// Brute-force noun/verb pairs until cell 0 equals this value, then
    /// print 100 * noun + verb.
    #[arg(long)]
    target: Option<i64>,

    /// Overwrite cell 1 before a single run.
    #[arg(long, conflicts_with = "target")]
    noun: Option<i64>,

    /// Overwrite cell 2 before a single run.
    #[arg(long, conflicts_with = "target")]
    verb: Option<i64>,

    /// Spread search rows across all cores.
    #[arg(long, requires = "target")]
    parallel: bool,

    /// Print a disassembly of the program and exit.
    #[arg(long)]
    disasm: bool,
}

/// Overwrite one memory cell, refusing if the program is too short.
fn patch(mem: &mut [i64], cell: usize, value: i64) -> Result<(), String> {
    if cell >= mem.len() {
        return Err(format!(
            "program has no cell {cell} to patch ({} cells loaded)",
            mem.len()
        ));
    }
    mem[cell] = value;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let baseline = match program::load(&cli.program) {
        Ok(mem) => mem,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if cli.disasm {
        print!("{}", machine::disassemble(&baseline));
        return;
    }

    if let Some(target) = cli.target {
        let found = if cli.parallel {
            search::find_noun_verb_parallel(&baseline, target)
        } else {
            search::find_noun_verb(&baseline, target)
        };
        match found {
            Ok((noun, verb)) => println!("{}", 100 * noun + verb),
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
        return;
    }

    // Single run, with optional noun/verb patches.
    let mut mem = baseline;
    let patches = [
        (search::NOUN_CELL, cli.noun),
        (search::VERB_CELL, cli.verb),
    ];
    for (cell, value) in patches {
        if let Some(value) = value {
            if let Err(e) = patch(&mut mem, cell, value) {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    }

    match machine::execute(&mut mem) {
        Ok(()) => println!("{}", mem[0]),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
