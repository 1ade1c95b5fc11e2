use std::env;
use std::process;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bandsim::sim::WorkerReport;
use bandsim::{
    init, run_worker, transport, Cell, CellKind, ColonyRule, CombatRule, Grid, SimConfig, SimError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Combat,
    Colony,
}

#[derive(Debug, Clone, Copy)]
struct Options {
    scenario: Scenario,
    config: SimConfig,
    workers: usize,
}

fn usage(program: &str) -> String {
    format!(
        "Usage:\n$ {program} <combat|colony> [--rows N] [--cols N] [--steps N] [--seed N] [--workers N]\n\
         \n\
         --workers selects the in-process worker count; under the `mpi`\n\
         feature the worker count comes from mpirun instead."
    )
}

fn parse_args(args: &[String]) -> Result<Options> {
    let scenario = match args.get(1).map(String::as_str) {
        Some("combat") => Scenario::Combat,
        Some("colony") => Scenario::Colony,
        Some(other) => bail!("unknown scenario {other:?}"),
        None => bail!("missing scenario"),
    };
    let mut config = SimConfig::default();
    let mut workers = 4usize;
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        let value = rest
            .next()
            .with_context(|| format!("{flag} needs a value"))?;
        match flag.as_str() {
            "--rows" => config.rows = value.parse().context("--rows")?,
            "--cols" => config.cols = value.parse().context("--cols")?,
            "--steps" => config.steps = value.parse().context("--steps")?,
            "--seed" => config.seed = value.parse().context("--seed")?,
            "--workers" => workers = value.parse().context("--workers")?,
            other => bail!("unknown flag {other:?}"),
        }
    }
    if workers == 0 {
        bail!("--workers must be positive");
    }
    Ok(Options {
        scenario,
        config,
        workers,
    })
}

fn build_grid(scenario: Scenario, config: &SimConfig) -> Grid {
    match scenario {
        Scenario::Combat => init::random_grid(config),
        Scenario::Colony => init::colony_grid(config.rows, config.cols),
    }
}

fn strongest_aggressor(cell: &Cell) -> bool {
    cell.kind == CellKind::Aggressor
}

fn strongest_hive(cell: &Cell) -> bool {
    !cell.is_background()
}

fn run_one<T: transport::Transport>(
    scenario: Scenario,
    config: &SimConfig,
    transport: &mut T,
) -> Result<WorkerReport, SimError> {
    let mut grid = build_grid(scenario, config);
    match scenario {
        Scenario::Combat => run_worker(
            &mut grid,
            &CombatRule,
            config.steps,
            strongest_aggressor,
            transport,
        ),
        Scenario::Colony => run_worker(
            &mut grid,
            &ColonyRule,
            config.steps,
            strongest_hive,
            transport,
        ),
    }
}

#[cfg(not(feature = "mpi"))]
fn run(options: Options) -> Result<()> {
    let transports = transport::mesh(options.workers);
    let joined = std::thread::scope(|scope| {
        let handles: Vec<_> = transports
            .into_iter()
            .map(|mut worker_transport| {
                scope.spawn(move || {
                    run_one(options.scenario, &options.config, &mut worker_transport)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>()
    });
    for (rank, result) in joined.into_iter().enumerate() {
        let report: Result<WorkerReport, SimError> =
            result.map_err(|_| anyhow::anyhow!("worker {rank} panicked"))?;
        let report = report?;
        info!(rank, local = %report.local, "worker finished");
        if let Some(global) = report.global {
            println!("strongest cell: {global}");
        }
    }
    Ok(())
}

#[cfg(feature = "mpi")]
fn run(options: Options) -> Result<()> {
    use bandsim::transport::MpiTransport;
    use bandsim::Transport;

    let universe = mpi::initialize().context("MPI initialization failed")?;
    let mut worker_transport = MpiTransport::new(universe.world());
    let rank = worker_transport.topology().rank();
    let report = run_one(options.scenario, &options.config, &mut worker_transport)?;
    info!(rank, local = %report.local, "worker finished");
    if let Some(global) = report.global {
        println!("strongest cell: {global}");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("ERROR: {err}");
            eprintln!("{}", usage(&args[0]));
            process::exit(2);
        }
    };
    options.config.validate()?;
    run(options)
}
