use crate::graph::{GraphInstance, Solution};
use crate::solvers::coloring::{color_classes, ColoringStrategy};

/** runs every coloring strategy and collects all their color classes.
Each class is an independent set, hence Σ_{v∈S} x_v <= 1 is valid for every clique.
Classes found by several strategies appear several times.
*/
pub fn initial_cover(inst:&dyn GraphInstance, strategies:&[Box<dyn ColoringStrategy>]) -> Solution {
    let mut res = Vec::new();
    for strategy in strategies {
        let classes = color_classes(&strategy.color(inst));
        tracing::debug!(strategy = strategy.name(), nb_colors = classes.len(), "initial coloring");
        res.extend(classes);
    }
    res
}
