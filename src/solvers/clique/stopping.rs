use std::cell::Cell;
use std::fmt::Debug;
use std::time::Instant;

/** decides when a search should stop */
pub trait StoppingCriterion: Debug {
    /// true if the search should stop now
    fn is_finished(&self) -> bool;
}

/** never stops: the search runs until optimality is proven */
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStoppingCriterion;

impl StoppingCriterion for NeverStoppingCriterion {
    fn is_finished(&self) -> bool { false }
}

/** stops after a time limit (in seconds) */
#[derive(Debug, Clone, Copy)]
pub struct TimeStoppingCriterion {
    t_start: Instant,
    time_limit: f32,
}

impl TimeStoppingCriterion {
    /// starts the clock now
    pub fn new(time_limit:f32) -> Self {
        Self { t_start: Instant::now(), time_limit }
    }

    /// seconds since creation
    pub fn elapsed(&self) -> f32 { self.t_start.elapsed().as_secs_f32() }
}

impl StoppingCriterion for TimeStoppingCriterion {
    fn is_finished(&self) -> bool { self.elapsed() >= self.time_limit }
}

/** stops after a given number of checks (one per search node) */
#[derive(Debug, Clone)]
pub struct NodeLimitStoppingCriterion {
    remaining: Cell<usize>,
}

impl NodeLimitStoppingCriterion {
    /// allows `nb_nodes` nodes
    pub fn new(nb_nodes:usize) -> Self { Self { remaining: Cell::new(nb_nodes) } }
}

impl StoppingCriterion for NodeLimitStoppingCriterion {
    fn is_finished(&self) -> bool {
        match self.remaining.get() {
            0 => true,
            r => { self.remaining.set(r-1); false }
        }
    }
}
