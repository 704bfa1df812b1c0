// src/main.rs
//
// MMS heat-equation driver.
//
// Examples:
//
//   cargo run --release
//       -> 6000 x 6000 grid, 20 steps, default thread pool.
//
//   cargo run --release -- 1000 50 --threads 4
//       -> 1000 x 1000 grid, 50 steps on 4 worker threads.
//
//   cargo run --release -- 512 20 --serial --out runs --plot
//       -> single-threaded run; writes runs/<run_id>/{config,results}.json
//          plus field.png and error.png.
//
// The report goes to stdout; logging (see --log-level / RUST_LOG) to stderr.

use std::fs::create_dir_all;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use log::info;

use heat_sim::config::{RunConfig, write_report};
use heat_sim::driver::Driver;
use heat_sim::exec::{Executor, Serial, ThreadPoolExecutor, list_devices};
use heat_sim::norm::error_field;
use heat_sim::params::ProblemParams;
use heat_sim::report::{write_problem_input, write_results, write_stability};
use heat_sim::visualisation::save_field_png;
use heat_sim::{HeatError, Result, logging};

#[derive(Parser, Debug)]
#[command(name = "heat-sim", version, about = "Explicit finite-difference MMS heat-equation solver")]
struct Cli {
    /// Grid resolution (cells per side) [default: 6000]
    #[arg(allow_negative_numbers = true)]
    n: Option<i64>,

    /// Number of time steps [default: 20]
    #[arg(allow_negative_numbers = true, requires = "n")]
    nsteps: Option<i64>,

    /// Worker threads for the parallel kernels (0 = one per core)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Run every kernel on the main thread
    #[arg(long)]
    serial: bool,

    /// List the available execution contexts and exit
    #[arg(long)]
    list_devices: bool,

    /// Write config.json and results.json into OUT/<run_id>
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Run id used for the output directory name
    #[arg(long, value_name = "ID")]
    run: Option<String>,

    /// Render the final field and its error as PNG (needs --out)
    #[arg(long)]
    plot: bool,

    /// Log level (off, error, warn, info, debug, trace); falls back to RUST_LOG
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn sanitize_run_id(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn default_run_id(p: &ProblemParams) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0));
    format!("{}{:03}_n{}_s{}", now.as_secs(), now.subsec_millis(), p.n, p.nsteps)
}

fn unique_run_dir(out_root: &Path, run_id: &str) -> PathBuf {
    let mut dir = out_root.join(run_id);
    if !dir.exists() {
        return dir;
    }
    for k in 1..1000 {
        let cand = out_root.join(format!("{}_{}", run_id, k));
        if !cand.exists() {
            dir = cand;
            break;
        }
    }
    dir
}

fn print_devices() -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "Available devices:")?;
    writeln!(out, "--------------------------------")?;
    for (name, lanes) in list_devices()? {
        writeln!(out, " {name:<32} lanes: {lanes}")?;
    }
    Ok(())
}

fn run_with<E: Executor>(exec: &E, params: ProblemParams, cli: &Cli, started: Instant) -> Result<()> {
    let device = exec.name();

    // Run directory and config.json exist before any compute starts.
    let run_dir = match &cli.out {
        Some(root) => {
            create_dir_all(root)?;
            let run_id = cli
                .run
                .clone()
                .unwrap_or_else(|| default_run_id(&params));
            let run_id = sanitize_run_id(&run_id);
            let dir = unique_run_dir(root, &run_id);
            create_dir_all(&dir)?;
            RunConfig::new(&params, "heat-sim", &run_id, &device, exec.lanes()).write_to_dir(&dir)?;
            info!("writing run output to {}", dir.display());
            Some(dir)
        }
        None => None,
    };

    {
        let mut out = io::stdout().lock();
        write_problem_input(&mut out, &params, &device)?;
        write_stability(&mut out, &params)?;
        out.flush()?;
    }

    let outcome = Driver::started_at(exec, params, started).run();

    write_results(&mut io::stdout().lock(), &outcome.report)?;

    if let Some(dir) = run_dir {
        write_report(&outcome.report, &dir)?;
        if cli.plot {
            save_field_png(&outcome.field, &dir.join("field.png"))?;
            let err = error_field(&outcome.field, params.total_time(), params.alpha, params.length);
            save_field_png(&err, &dir.join("error.png"))?;
        }
    }
    Ok(())
}

fn run(cli: Cli, started: Instant) -> Result<()> {
    if cli.list_devices {
        return print_devices();
    }

    let params = ProblemParams::from_args(cli.n, cli.nsteps)?;
    if cli.plot && cli.out.is_none() {
        return Err(HeatError::MissingOutputDir);
    }

    if cli.serial {
        run_with(&Serial, params, &cli, started)
    } else {
        let pool = ThreadPoolExecutor::new(cli.threads)?;
        run_with(&pool, params, &cli, started)
    }
}

fn main() -> ExitCode {
    let started = Instant::now();
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref());

    match run(cli, started) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
