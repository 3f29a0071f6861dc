use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};

use delta_stepping::engine;
use delta_stepping::graph::Graph;
use delta_stepping::options::SsspCli;
use delta_stepping::output;
use delta_stepping::SsspError;

fn main() {
    tracing_subscriber::fmt::init();
    let cli = SsspCli::parse();
    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &SsspCli) -> Result<(), SsspError> {
    cli.describe();

    // Both files are opened before any computation starts; an unwritable
    // output path must fail the run up front.
    let fin = File::open(&cli.input).map_err(|source| SsspError::InputFile {
        path: cli.input.clone(),
        source,
    })?;
    let fout = File::create(&cli.output).map_err(|source| SsspError::OutputFile {
        path: cli.output.clone(),
        source,
    })?;

    let graph = Graph::load(BufReader::new(fin))?;
    if graph.is_empty() {
        info!("input declares no nodes, nothing to solve");
        return Ok(());
    }
    info!(nodes = graph.num_nodes(), delta = cli.delta, "graph loaded");

    let timer = Instant::now();
    let table = engine::solve_all(&graph, cli.delta);
    println!("solve time: {:?}", timer.elapsed().as_secs_f64());

    output::write_distances(&mut BufWriter::new(fout), &table).map_err(|source| {
        SsspError::Write {
            path: cli.output.clone(),
            source,
        }
    })?;
    info!("distances written to {}", cli.output.display());
    Ok(())
}
