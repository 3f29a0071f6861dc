use std::path::PathBuf;

use clap::Parser;

fn parse_delta(s: &str) -> Result<f64, String> {
    let delta: f64 = s
        .parse()
        .map_err(|_| format!("`{s}` is not a real number"))?;
    if delta > 0.0 && delta.is_finite() {
        Ok(delta)
    } else {
        Err(format!("delta must be a positive real, got {delta}"))
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct SsspCli {
    /// Bucket width used to group tentative distances into levels.
    #[arg(value_parser = parse_delta)]
    pub delta: f64,

    /// Edge-list file: node count, `i j weight` triples, `-1` terminator.
    pub input: PathBuf,

    /// Destination file for the N x N distance matrix.
    pub output: PathBuf,
}

impl SsspCli {
    pub fn describe(&self) {
        println!("delta: {}", self.delta);
        println!("input file: {}", self.input.display());
        println!("output file: {}", self.output.display());
    }
}
