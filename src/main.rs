use std::process;
use std::rc::Rc;

use clap::{App, load_yaml};
use serde_json::json;

use bnc_clique::graph::GraphInstance;
use bnc_clique::lp::GoodLpOracle;
use bnc_clique::solvers::clique::{BranchAndCut, TimeStoppingCriterion};
use bnc_clique::util::{export_results, init_logging, read_params};


/** solves a CLIQUE problem using a branch & cut over the clique cover relaxation. */
fn run() -> bnc_clique::Result<()> {
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    init_logging(main_args.occurrences_of("verbose"));
    let (
        inst_filename,
        instance,
        t,
        params,
        sol_file,
        perf_file
    ) = read_params(&main_args)?;

    // solve it
    let graph:Rc<dyn GraphInstance> = instance.clone();
    let mut search = BranchAndCut::new(graph, GoodLpOracle::new(), params.clone())?;
    let stopping_criterion = TimeStoppingCriterion::new(t);
    let outcome = search.run(&stopping_criterion)?;
    println!(
        "branch & cut took {:.3} seconds. Nb vertices: {}{}",
        outcome.statistics.time_searched,
        outcome.size,
        if outcome.proven_optimal { " (optimal)" } else { "" }
    );
    println!("{}", instance.solution_to_string(&outcome.clique).trim_end());
    let stats = json!({
        "primal_list": outcome.statistics.primal_list,
        "time_searched": outcome.statistics.time_searched,
        "inst_name": inst_filename,
        "proven_optimal": outcome.proven_optimal,
        "clique": outcome.labels,
        "params": params,
        "search": outcome.statistics,
    });

    // export results
    export_results(&instance, &outcome.clique, &stats, perf_file, sol_file, true)
}

pub fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
