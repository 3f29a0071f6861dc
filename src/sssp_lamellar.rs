//! Distributed build: one PE per worker. PE 0 validates arguments, loads
//! the graph and broadcasts it; every PE solves its partition of the
//! sources; rows are gathered back to PE 0, which writes the output file.
//! Broadcast and gather are synchronization points (wait_all + barrier), so
//! no PE runs ahead of the group.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::time::Instant;

use clap::Parser;
use lamellar::active_messaging::prelude::*;
use lamellar::darc::prelude::*;
use tracing::{error, info};

use delta_stepping::collect::ResultCollector;
use delta_stepping::engine::{self, SolveCtx};
use delta_stepping::graph::Graph;
use delta_stepping::options::SsspCli;
use delta_stepping::{output, partition, SsspError, UNREACHED};

/// What PE 0 tells the rest of the group after argument validation and
/// graph load. A failed validation aborts every PE, not just PE 0.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
enum JobState {
    Pending,
    Run { delta: f64, graph: Graph },
    Empty,
    Abort,
}

#[lamellar::AmData]
struct JobAm {
    slot: LocalRwDarc<JobState>,
    state: JobState,
}

#[lamellar::am]
impl LamellarAM for JobAm {
    async fn exec(self) {
        **self.slot.write() = self.state.clone();
    }
}

#[lamellar::AmData]
struct IntervalRowsAm {
    collector: LocalRwDarc<ResultCollector>,
    rank: usize,
    rows: Vec<Vec<f64>>,
}

#[lamellar::am]
impl LamellarAM for IntervalRowsAm {
    async fn exec(self) {
        self.collector
            .write()
            .place_interval(self.rank, &self.rows);
    }
}

#[lamellar::AmData]
struct RemainderRowAm {
    collector: LocalRwDarc<ResultCollector>,
    rank: usize,
    row: Vec<f64>,
}

#[lamellar::am]
impl LamellarAM for RemainderRowAm {
    async fn exec(self) {
        self.collector
            .write()
            .place_remainder(self.rank, &self.row);
    }
}

// Runs on PE 0 only. Returns the state to broadcast; on a successful run
// the opened output file is parked in `out_file` for the final write.
fn prepare(out_file: &mut Option<File>) -> Result<JobState, SsspError> {
    let cli = match SsspCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return Err(SsspError::BadArguments);
        }
    };
    cli.describe();
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
        return Ok(JobState::Empty);
    }
    info!(nodes = graph.num_nodes(), delta = cli.delta, "graph loaded");
    *out_file = Some(fout);
    Ok(JobState::Run {
        delta: cli.delta,
        graph,
    })
}

fn main() {
    tracing_subscriber::fmt::init();
    let world = lamellar::LamellarWorldBuilder::new().build();
    let my_pe = world.my_pe();
    let num_pes = world.num_pes();

    let job = LocalRwDarc::new(&world, JobState::Pending).expect("job slot should be created");
    world.barrier();

    let mut out_file: Option<File> = None;
    if my_pe == 0 {
        let state = match prepare(&mut out_file) {
            Ok(state) => state,
            Err(e) => {
                error!("{e}");
                JobState::Abort
            }
        };
        let _ = world.exec_am_all(JobAm {
            slot: job.clone(),
            state,
        });
    }
    world.wait_all();
    world.barrier();

    let state = {
        let guard = job.read();
        (*guard).clone()
    };
    let (delta, graph) = match *state {
        JobState::Run { delta, graph } => (delta, graph),
        JobState::Empty => {
            if my_pe == 0 {
                info!("input declares no nodes, nothing to solve");
            }
            return;
        }
        JobState::Abort => std::process::exit(1),
        JobState::Pending => unreachable!("job broadcast must precede compute"),
    };

    let n = graph.num_nodes();
    let assignment = partition::assign(n, num_pes, my_pe);
    let timer = Instant::now();

    let mut ctx = SolveCtx::new();
    let mut interval_rows = Vec::with_capacity(assignment.interval_len());
    for source in assignment.start..assignment.end {
        let mut row = vec![UNREACHED; n];
        engine::solve(&graph, delta, source, &mut ctx, &mut row);
        interval_rows.push(row);
    }
    let remainder_row = assignment.remainder_source.map(|source| {
        let mut row = vec![UNREACHED; n];
        engine::solve(&graph, delta, source, &mut ctx, &mut row);
        row
    });
    world.barrier();
    if my_pe == 0 {
        println!("solve time: {:?}", timer.elapsed().as_secs_f64());
    }

    let collector = LocalRwDarc::new(&world, ResultCollector::new(n, num_pes))
        .expect("collector should be created");
    world.barrier();

    let _ = world.exec_am_pe(
        0,
        IntervalRowsAm {
            collector: collector.clone(),
            rank: my_pe,
            rows: interval_rows,
        },
    );
    if let Some(row) = remainder_row {
        let _ = world.exec_am_pe(
            0,
            RemainderRowAm {
                collector: collector.clone(),
                rank: my_pe,
                row,
            },
        );
    }
    world.wait_all();
    world.barrier();

    if my_pe == 0 {
        let fout = out_file.take().expect("pe 0 opened the output file");
        let gathered = collector.read();
        if let Err(e) = output::write_distances(&mut BufWriter::new(fout), gathered.matrix()) {
            error!("writing distances failed: {e}");
            std::process::exit(1);
        }
        println!("total time: {:?}", timer.elapsed().as_secs_f64());
    }
    world.barrier();
}
