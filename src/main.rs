use anyhow::Context;
use best_package::combinations::Generation;
use best_package::ioutils::{read_specification, InputFile, LineFailure, OutputLine};
use best_package::{find_best_package, Methods, Solver};
use log::{info, LevelFilter};
use std::time::{Duration, Instant};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "best-package", author = "Martin Quarda <martin@quarda.cz>")]
struct Opts {
    /// File with one package specification per line
    input: InputFile,
    /// brute-force, optimized or knapsack
    #[structopt(long, default_value = "knapsack")]
    method: Methods,
    /// Enumeration used by the optimized method: recursive or iterative
    #[structopt(long, default_value = "iterative")]
    generation: Generation,
    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn init_logger(level_filter: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] <{}> {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level_filter)
        .chain(std::io::stderr())
        .apply()
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    init_logger(opts.log_level).context("could not initialize logger")?;

    let solver = Solver::from_method(opts.method, opts.generation);
    info!("solving {} lines with {}", opts.input.0.len(), solver.name());

    let mut time = Duration::new(0, 0);
    for line in &opts.input.0 {
        let start = Instant::now();
        match read_specification(line) {
            Ok(specification) => {
                let package = find_best_package(&specification, &solver);
                let elapsed = start.elapsed();
                time += elapsed;
                info!("line {}: {:?}", line.number, elapsed);
                println!("{}", OutputLine(package.as_ref()));
            }
            Err(e) => {
                println!("{}", OutputLine(None));
                eprintln!("{}", LineFailure(&e));
            }
        }
    }
    info!("total time: {:?}", time);
    Ok(())
}
