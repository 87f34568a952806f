//! Simulation module - Monte Carlo price paths and their distribution.

mod histogram;
mod monte_carlo;

#[cfg(test)]
mod monte_carlo_tests;

pub use histogram::{histogram, Histogram, HistogramBin, DEFAULT_HISTOGRAM_BINS};
pub use monte_carlo::{
    run_simulation, simulate, MonteCarloParams, MonteCarloResult, DEFAULT_MONTHS, DEFAULT_MU,
    DEFAULT_SIGMA, DEFAULT_SIMULATIONS, MAX_MONTHS, MAX_SIMULATIONS,
};
