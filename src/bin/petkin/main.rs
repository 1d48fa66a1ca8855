mod cli;
use cli::*;

fn main() -> Result<(), Box<dyn Error>> {
    let Cli { log_level, command } = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Command::Models => {
            println!("petkin {}", petkin::version());
            for (name, description) in ModelRegistry::default().describe() {
                println!("  {name:12} {description}");
            }
        }
        Command::Layout { config } => {
            let model = build(&config)?;
            println!("{}: {}", model.name(), model.description());
            println!("  {:8} {:>10} {:>10}  transform", "name", "seed", "variance");
            for spec in model.layout() {
                println!("  {:8} {:>10} {:>10}  {:?}", spec.name, spec.prior.mean, spec.prior.variance, spec.transform);
            }
            println!("outputs: {}", model.outputs().join(", "));
        }
        Command::Evaluate { config, params, run } => {
            let model = build(&config)?;
            evaluate_rows(&*model, &params, run, |model, p| Ok(model.evaluate(p)))?;
        }
        Command::Metrics { config, params, key, run } => {
            let model = build(&config)?;
            evaluate_rows(&*model, &params, run, |model, p| model.metrics(p, &key))?;
        }
    }
    Ok(())
}

fn build(config: &Path) -> Result<Box<dyn KineticModel>, Box<dyn Error>> {
    info!("Reading model configuration from {}", config.display());
    Ok(read_config_file(config)?.build(&ModelRegistry::default())?)
}

/// Apply `f` to every parameter vector in `params`, in parallel, and write
/// one output row per vector.
fn evaluate_rows<F>(model: &dyn KineticModel, params: &Path, run: Run, f: F) -> Result<(), Box<dyn Error>>
where
    F: Fn(&dyn KineticModel, &[f64]) -> petkin::Result<Array1<f64>> + Sync,
{
    let Run { out, threads } = run;

    // Wrong-length vectors would panic inside the model: reject them up front
    let rows = read_rows(params)?;
    let n_params = model.layout().len();
    if let Some((line, row)) = rows.iter().find_position(|row| row.len() != n_params) {
        return Err(format!("parameter vector {} in {} has {} values, but {} needs {n_params}: {:?}",
                           line + 1, params.display(), row.len(), model.name(), model.layout().names()).into())
    }
    let n_rows = rows.len();
    let params = Array2::from_shape_vec((n_rows, n_params), rows.concat())?;

    let progress = ProgressBar::new(n_rows as u64);
    progress.set_style(ProgressStyle::default_bar()
                       .template("[{elapsed_precise}] {wide_bar} {pos}/{len} ({eta_precise})")?);

    let now = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let results = pool.install(|| {
        params.axis_iter(Axis(0))
            .into_par_iter()
            .map(|p| {
                let result = f(model, &p.to_vec());
                progress.inc(1);
                result
            })
            .collect::<petkin::Result<Vec<_>>>()
    })?;
    progress.finish_and_clear();
    info!("Evaluated {} parameter vectors in {} ms", group_digits(n_rows), group_digits(now.elapsed().as_millis()));

    let width = results.first().map_or(0, |r| r.len());
    let table = Array2::from_shape_vec((n_rows, width), results.iter().flatten().copied().collect())?;
    match out {
        Some(path) => write_rows(BufWriter::new(File::create(&path)?), table.view())?,
        None       => write_rows(std::io::stdout().lock(), table.view())?,
    }
    Ok(())
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use ndarray::{Array1, Array2, Axis, parallel::prelude::*};
use tracing::info;

use petkin::{
    KineticModel, ModelRegistry,
    config::model::read_config_file,
    io::ascii::{read_rows, write_rows},
    utils::group_digits,
};
