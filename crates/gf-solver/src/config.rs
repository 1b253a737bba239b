//! Solver tuning knobs.

/// Iteration limits and physical constants for the relaxation solver.
///
/// The defaults converge well on layouts of a few hundred parts; raising
/// `max_rounds` only matters for networks with long pull chains or cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Hard cap on relaxation rounds. Exhausting the budget never fails
    /// the solve; the result is flagged unstable instead.
    pub max_rounds: usize,
    /// Convergence threshold on the largest per-edge flow change between
    /// rounds. Also the cutoff below which a flow carries no liquid.
    pub tolerance: f64,
    /// Fraction of co-moving flow a powered pump adds to its own pressure,
    /// saturating at the pump's rated pressure.
    pub pump_acceleration: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            tolerance: 1e-6,
            pump_acceleration: 0.5,
        }
    }
}
