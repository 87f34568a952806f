use std::f64::consts::PI;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::errors::{CalculatorError, Error, Result};

/// Default annual drift.
pub const DEFAULT_MU: f64 = 0.10;
/// Default annual volatility.
pub const DEFAULT_SIGMA: f64 = 0.25;
pub const DEFAULT_MONTHS: u32 = 12;
pub const DEFAULT_SIMULATIONS: usize = 1_000;
/// Hard ceiling on paths per request.
pub const MAX_SIMULATIONS: usize = 100_000;
/// Longest simulated horizon, one hundred years of monthly steps.
pub const MAX_MONTHS: u32 = 1_200;

/// Monthly time step, in years.
const DT: f64 = 1.0 / 12.0;

fn default_mu() -> f64 {
    DEFAULT_MU
}

fn default_sigma() -> f64 {
    DEFAULT_SIGMA
}

fn default_months() -> u32 {
    DEFAULT_MONTHS
}

fn default_simulations() -> usize {
    DEFAULT_SIMULATIONS
}

/// Parameters of a geometric Brownian motion simulation with monthly steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloParams {
    pub start_price: f64,
    #[serde(default = "default_mu")]
    pub mu: f64,
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    #[serde(default = "default_months")]
    pub months: u32,
    #[serde(default = "default_simulations")]
    pub simulations: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MonteCarloParams {
    /// Parameters with every default applied.
    pub fn new(start_price: f64) -> Self {
        Self {
            start_price,
            mu: DEFAULT_MU,
            sigma: DEFAULT_SIGMA,
            months: DEFAULT_MONTHS,
            simulations: DEFAULT_SIMULATIONS,
            seed: None,
        }
    }

    pub fn validate(&self, max_simulations: usize) -> Result<()> {
        if !self.start_price.is_finite() || self.start_price <= 0.0 {
            return Err(CalculatorError::InvalidStartPrice(self.start_price).into());
        }
        if !self.mu.is_finite() {
            return Err(Error::invalid_input("mu must be a finite number"));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(Error::invalid_input("sigma must be zero or positive"));
        }
        if self.months == 0 {
            return Err(Error::invalid_input("months must be greater than 0"));
        }
        if self.months > MAX_MONTHS {
            return Err(Error::invalid_input(format!(
                "months must not exceed {}",
                MAX_MONTHS
            )));
        }
        if self.simulations == 0 {
            return Err(Error::invalid_input("simulations must be greater than 0"));
        }
        if self.simulations > max_simulations {
            return Err(Error::invalid_input(format!(
                "simulations must not exceed {}",
                max_simulations
            )));
        }
        Ok(())
    }
}

/// Sorted terminal prices with their headline percentiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloResult {
    pub samples: Vec<f64>,
    pub median: f64,
    pub p90: f64,
}

/// Uniform draw from the open interval (0, 1).
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.gen();
        if u > 0.0 {
            return u;
        }
    }
}

/// Standard normal draw via the Box-Muller transform.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u = open_unit(rng);
    let v = open_unit(rng);
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

/// Runs the simulation with the supplied generator.
///
/// Each path compounds `exp((mu - sigma^2/2) dt + sigma sqrt(dt) Z)` for
/// `months` steps. The returned samples are sorted ascending.
pub fn simulate<R: Rng + ?Sized>(
    params: &MonteCarloParams,
    max_simulations: usize,
    rng: &mut R,
) -> Result<MonteCarloResult> {
    params.validate(max_simulations)?;

    let drift = (params.mu - 0.5 * params.sigma * params.sigma) * DT;
    let diffusion = params.sigma * DT.sqrt();

    let mut samples: Vec<f64> = (0..params.simulations)
        .map(|_| {
            (0..params.months).fold(params.start_price, |price, _| {
                price * (drift + diffusion * standard_normal(rng)).exp()
            })
        })
        .collect();
    samples.sort_by(|a, b| a.total_cmp(b));

    let n = samples.len();
    let median = samples[n / 2];
    let p90 = samples[(n * 9 / 10).min(n - 1)];

    debug!(
        "Monte Carlo: {} paths over {} months from {} -> median {:.2}, p90 {:.2}",
        n, params.months, params.start_price, median, p90
    );

    Ok(MonteCarloResult {
        samples,
        median,
        p90,
    })
}

/// Runs the simulation with a `StdRng`, seeded from `params.seed` when given.
pub fn run_simulation(params: &MonteCarloParams, max_simulations: usize) -> Result<MonteCarloResult> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    simulate(params, max_simulations, &mut rng)
}
