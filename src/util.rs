use std::fs;
use std::rc::Rc;

use clap::ArgMatches;
use serde_json::Value;
use tracing::Level;

use crate::{
    compact_instance::CompactInstance,
    error::{CliqueError, Result},
    graph::{checker, CheckerResult, GraphInstance, VertexId},
    solvers::clique::branch_and_cut::BranchAndCutParams,
};

/** installs the log subscriber. 0: info, 1: debug, 2 or more: trace */
pub fn init_logging(verbosity:u64) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// parses an optional command line value
fn parse_value<T:std::str::FromStr>(main_args:&ArgMatches, name:&str) -> Result<Option<T>> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_| CliqueError::InvalidParameter(
            format!("unable to parse {} '{}'", name, s)
        )),
    }
}

/** reads the search parameters: defaults, then the JSON file (--params), then the command line flags */
pub fn read_search_params(main_args:&ArgMatches) -> Result<BranchAndCutParams> {
    let mut params = match main_args.value_of("params") {
        None => BranchAndCutParams::default(),
        Some(filename) => {
            let content = fs::read_to_string(filename)
                .map_err(|source| CliqueError::Io { path: filename.to_string(), source })?;
            serde_json::from_str(content.as_str()).map_err(|e| CliqueError::InvalidParameter(
                format!("{}: {}", filename, e)
            ))?
        }
    };
    if let Some(precision) = parse_value::<f64>(main_args, "precision")? { params.precision = precision; }
    if let Some(alpha) = parse_value::<f64>(main_args, "alpha")? { params.alpha = alpha; }
    if let Some(rounds) = parse_value::<usize>(main_args, "stagnation")? { params.max_stagnation_rounds = rounds; }
    params.validate()?;
    Ok(params)
}

/** reads command line input and returns the instance name, instance, time limit,
search parameters, solution_filename, stats_filename */
pub fn read_params(main_args:&ArgMatches) -> Result<(
    String, Rc<CompactInstance>, f32, BranchAndCutParams, Option<String>, Option<String>
)> {
    let inst_filename = main_args.value_of("instance")
        .ok_or_else(|| CliqueError::InvalidParameter("missing instance".to_string()))?;
    let t:f32 = parse_value::<f32>(main_args, "time")?.unwrap_or(f32::INFINITY);
    // read value of the solution filename
    let sol_file:Option<String> = main_args.value_of("solution").map(|e| {
        tracing::info!("printing solutions in: {}", e);
        e.to_string()
    });
    // read value of the performance logs filename
    let perf_file:Option<String> = main_args.value_of("perf").map(|e| {
        tracing::info!("printing perfs in: {}", e);
        e.to_string()
    });
    let params = read_search_params(main_args)?;
    // read instance file
    let instance = Rc::new(CompactInstance::from_file(inst_filename)?);
    instance.display_statistics();
    Ok((inst_filename.to_string(), instance, t, params, sol_file, perf_file))
}

/// exports search results to files
pub fn export_results(
    instance:&CompactInstance,
    clique:&[VertexId],
    stats:&Value,
    perf_file:Option<String>,
    sol_file:Option<String>,
    check_result:bool,
) -> Result<()> {
    // export statistics
    if let Some(filename) = perf_file {
        let content = serde_json::to_string(stats)
            .map_err(|e| CliqueError::Export { path: filename.clone(), msg: e.to_string() })?;
        fs::write(filename.as_str(), content)
            .map_err(|e| CliqueError::Export { path: filename.clone(), msg: e.to_string() })?;
    }
    // export solution
    if let Some(filename) = sol_file {
        if check_result {
            match checker(instance, clique) {
                CheckerResult::Ok(_) => {},
                checker_result => {
                    tracing::error!("invalid solution (reason: {:?})", checker_result);
                },
            };
        }
        instance.write_solution(filename.as_str(), clique)?;
    }
    Ok(())
}
