// Copyright contributors to the Pauli Grouping project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    collections::BTreeMap,
    error,
    fs::File,
    io::{self, BufReader, Read, Write},
    time::Duration,
};

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, info};
use nalgebra::DMatrix;
use num_complex::Complex64;
use pauli_common::PauliLabel;
use pauli_cover::{CliqueCoverStrategy, CoverOptions, DEFAULT_TIME_LIMIT};
use pauli_expression::{
    GroupingError, PauliObservable, StabilizerPauliTransferMatrix, TransferCoefficient,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Parser)]
#[command(version, about, long_about=None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, value_enum, default_value_t)]
    strategy: CliqueCoverStrategy,
    /// Budget of the integer programming strategy in seconds
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT.as_secs_f64())]
    time_limit: f64,
    #[arg(long)]
    seed: Option<u64>,
    /// JSON input file, read from stdin when absent
    #[arg(short, long)]
    input: Option<String>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Commands {
    /// Group the Pauli terms of an observable
    Observable,
    /// Group the entries of a Pauli transfer matrix
    TransferMatrix {
        #[arg(long)]
        stabilizer_prep: Vec<PauliLabel>,
        #[arg(long)]
        stabilizer_meas: Vec<PauliLabel>,
    },
}

/// Either a dense matrix of `[re, im]` pairs or precomputed coefficients.
#[derive(Deserialize)]
struct Input<C> {
    matrix: Option<Vec<Vec<[f64; 2]>>>,
    coefficients: Option<C>,
}

#[derive(Serialize)]
struct CliqueRecord<'a, K> {
    key: &'a K,
    members: &'a [K],
}

fn read_input<C: DeserializeOwned>(path: Option<&str>) -> Result<Input<C>, Box<dyn error::Error>> {
    let reader: Box<dyn Read> = match path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

fn to_matrix(rows: Vec<Vec<[f64; 2]>>) -> Result<DMatrix<Complex64>, GroupingError> {
    let dim = rows.len();
    if rows.iter().any(|row| row.len() != dim) {
        return Err(GroupingError::configuration("matrix must be square"));
    }
    Ok(DMatrix::from_row_iterator(
        dim,
        dim,
        rows.into_iter()
            .flatten()
            .map(|[re, im]| Complex64::new(re, im)),
    ))
}

fn write_cliques<K: Serialize>(
    out: &mut impl Write,
    groups: &BTreeMap<K, Vec<K>>,
) -> Result<(), Box<dyn error::Error>> {
    for (key, members) in groups {
        let record = CliqueRecord { key, members };
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn error::Error>> {
    // By default log INFO.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let time_limit = Duration::try_from_secs_f64(cli.time_limit)?;
    let mut options = CoverOptions::default().with_time_limit(time_limit);
    if let Some(seed) = cli.seed {
        options = options.with_seed(seed);
    }
    debug!("Cover options: {:?}", options);

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Observable => {
            let input: Input<BTreeMap<PauliLabel, f64>> = read_input(cli.input.as_deref())?;
            let matrix = input.matrix.map(to_matrix).transpose()?;
            let calculate = matrix.is_some();
            let mut observable = PauliObservable::new(matrix, input.coefficients)?;
            if calculate {
                observable.calculate()?;
            }
            writeln!(stdout, "{}", serde_json::to_string(observable.coefficients()?)?)?;

            let groups = observable.get_clique_dict_with(cli.strategy, &options)?;
            info!("{} measurement settings", groups.len());
            write_cliques(&mut stdout, groups)?;
        }
        Commands::TransferMatrix {
            stabilizer_prep,
            stabilizer_meas,
        } => {
            let input: Input<Vec<TransferCoefficient>> = read_input(cli.input.as_deref())?;
            let matrix = input.matrix.map(to_matrix).transpose()?;
            let calculate = matrix.is_some();
            let coefficients = input.coefficients.map(|records| {
                records
                    .into_iter()
                    .map(|r| ((r.prep, r.meas), r.value))
                    .collect()
            });
            let mut ptm = StabilizerPauliTransferMatrix::new(
                matrix,
                coefficients,
                stabilizer_prep,
                stabilizer_meas,
            )?;
            debug!(
                "Restricting to preparations commuting with {:?} and measurements commuting with {:?}",
                ptm.stabilizer_prep(),
                ptm.stabilizer_meas()
            );
            if calculate {
                ptm.calculate()?;
            }
            let records: Vec<TransferCoefficient> =
                ptm.coefficients()?.iter().map(TransferCoefficient::from).collect();
            writeln!(stdout, "{}", serde_json::to_string(&records)?)?;

            let groups = ptm.get_clique_dict_with(cli.strategy, &options)?;
            info!("{} preparation and measurement settings", groups.len());
            write_cliques(&mut stdout, groups)?;
        }
    }

    Ok(())
}
