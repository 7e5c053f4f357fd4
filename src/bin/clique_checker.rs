use std::fs;
use std::process;

use clap::{App, load_yaml};

use bnc_clique::{
    CliqueError,
    compact_instance::CompactInstance,
    graph::{GraphInstance, VertexId, checker, CheckerResult},
};

/** reads a solution file (labels separated by whitespace) and maps it to internal vertex ids */
fn read_solution(inst:&CompactInstance, filename:&str) -> bnc_clique::Result<Vec<VertexId>> {
    let content = fs::read_to_string(filename)
        .map_err(|source| CliqueError::Io { path: filename.to_string(), source })?;
    let mut res = Vec::new();
    for token in content.split_whitespace() {
        let label = token.parse::<usize>().map_err(|_| CliqueError::InvalidClique(
            format!("'{}' is not a vertex label", token)
        ))?;
        match inst.vertex_of_label(label) {
            Some(v) => res.push(v),
            None => return Err(CliqueError::InvalidClique(format!("unknown vertex {}", label))),
        }
    }
    Ok(res)
}

/** checks a clique solution */
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("clique_checker.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let inst_filename = main_args.value_of("instance").unwrap_or_default();
    let sol_filename = main_args.value_of("solution").unwrap_or_default();
    // read files
    let instance = match CompactInstance::from_file(inst_filename) {
        Ok(inst) => inst,
        Err(e) => { eprintln!("ERROR: {}", e); process::exit(1); }
    };
    let solution = match read_solution(&instance, sol_filename) {
        Ok(sol) => sol,
        Err(e) => { println!("ERROR: {}", e); process::exit(1); }
    };
    // call checker
    match checker(&instance, &solution) {
        CheckerResult::Ok(n) => {
            println!("{}", n);
        },
        CheckerResult::VertexAddedTwice(v) => {
            println!("ERROR: vertex {} added twice", instance.label(v));
            process::exit(1);
        },
        CheckerResult::UnknownVertex(v) => {
            println!("ERROR: unknown vertex {}", v);
            process::exit(1);
        },
        CheckerResult::NonAdjacent(a, b) => {
            println!("ERROR: vertices {} and {} are not adjacent", instance.label(a), instance.label(b));
            process::exit(1);
        },
    };
}
