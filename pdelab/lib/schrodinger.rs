//! Explicit (forward Euler) integration of the 1D time-dependent Schrödinger
//! equation in units where `ħ = 2m = 1`:
//! ```text
//! ∂ψ/∂t = i (∇²ψ - V ψ)
//! ψ'[k] = ψ[k] + δt i ((ψ[k+1] - 2 ψ[k] + ψ[k-1]) / δx² - V[k] ψ[k])
//! ```
//! Forward Euler amplifies every mode of this operator, so the scheme is
//! unconditionally unstable. It is kept as a demonstration of that fact: no
//! correction is applied, but a warning is logged when the predicted growth
//! over a run is large. Both ends of the wavefunction are pinned to zero.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::{ GridError, ParamError },
    grid::{ Cadence, Field1, History, Run },
    utils::{ probability_density, second_diff },
};

pub type SchrodingerResult<T> = Result<T, ParamError>;

/// A discretized wavefunction.
pub type Wavefunction = nd::Array1<C64>;

/// Predicted amplification over a run above which a warning is logged.
pub const GROWTH_WARN: f64 = 10.0;

/// Number of points in the zoo preset.
pub const PRESET_N: usize = 100;

/// Number of steps in the zoo preset.
pub const PRESET_STEPS: usize = 500;

/// Explicit Schrödinger stepper over a fixed potential.
#[derive(Clone, Debug)]
pub struct Schrodinger {
    potential: Field1,
    dx: f64,
    dt: f64,
}

impl Schrodinger {
    /// Create a new stepper with grid spacing `dx` and time increment `dt`.
    ///
    /// Fails if the potential has fewer than 3 points or either increment is
    /// not positive.
    pub fn new(potential: Field1, dx: f64, dt: f64) -> SchrodingerResult<Self> {
        GridError::check_points(potential.len())?;
        GridError::check_length(dx)?;
        ParamError::check_time(dt)?;
        Ok(Self { potential, dx, dt })
    }

    /// Potential energy at each grid point.
    pub fn potential(&self) -> &Field1 { &self.potential }

    /// Grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Time increment.
    pub fn dt(&self) -> f64 { self.dt }

    /// Worst-case amplification of a single step, `|1 + i δt λ|` for the
    /// largest-magnitude eigenvalue `λ` of `∇² - V`.
    pub fn step_growth(&self) -> f64 {
        let vmax = self.potential.iter()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let lambda = 4.0 / self.dx.powi(2) + vmax;
        (self.dt * lambda).hypot(1.0)
    }

    /// Worst-case amplification over `steps` steps.
    pub fn predicted_growth(&self, steps: usize) -> f64 {
        self.step_growth().powf(steps as f64)
    }

    /// Take one step from `cur` into `next`.
    ///
    /// *Panics if the arrays differ in length from the potential*.
    pub fn step(&self, cur: &Wavefunction, next: &mut Wavefunction) {
        let n = cur.len();
        let (dt, odx2) = (self.dt, self.dx.powi(-2));
        nd::Zip::from(next.slice_mut(nd::s![1..n - 1]))
            .and(cur.windows(3))
            .and(self.potential.slice(nd::s![1..n - 1]))
            .for_each(|qk, w, &vk| {
                let lap = second_diff(&w, 1) * odx2;
                *qk = w[1] + C64::i() * dt * (lap - w[1] * vk);
            });
        next[0] = C64::from(0.0);
        next[n - 1] = C64::from(0.0);
    }

    /// Integrate `psi0` over `steps` steps, recording snapshots per `cadence`.
    ///
    /// The `ratio` of the returned run is the single-step growth estimate.
    pub fn run<S>(&self, psi0: &Arr1<S>, steps: usize, cadence: Cadence)
        -> SchrodingerResult<Run<Wavefunction>>
    where S: nd::Data<Elem = C64>
    {
        GridError::check_shape(psi0, &[self.potential.len()])?;
        let growth = self.predicted_growth(steps);
        if growth > GROWTH_WARN {
            log::warn!(
                "schrodinger::run: explicit scheme predicted to amplify by up \
                to {growth:.3e} over {steps} steps"
            );
        }
        let n = psi0.len();
        let mut cur = psi0.to_owned();
        cur[0] = C64::from(0.0);
        cur[n - 1] = C64::from(0.0);
        let mut next = cur.clone();
        let mut history = History::new(cadence);
        for k in 0..steps {
            self.step(&cur, &mut next);
            std::mem::swap(&mut cur, &mut next);
            history.observe(k, steps, &cur);
        }
        Ok(Run {
            field: cur,
            history,
            dt: self.dt,
            ratio: self.step_growth(),
            steps,
        })
    }
}

/// Gaussian wave packet `exp(-(x/σ)²) exp(i k₀ x)`.
pub fn gaussian_packet<S>(x: &Arr1<S>, sigma: f64, k0: f64) -> Wavefunction
where S: nd::Data<Elem = f64>
{
    x.mapv(|xk| (-(xk / sigma).powi(2)).exp() * C64::cis(k0 * xk))
}

/// Square well on `n` points: `height` on the first and last quarters, zero on
/// the middle half.
pub fn square_well(n: usize, height: f64) -> Field1 {
    nd::Array1::from_shape_fn(n, |k| {
        if k < n / 4 || k >= 3 * n / 4 { height } else { 0.0 }
    })
}

/// Final state of the zoo preset.
#[derive(Clone, Debug)]
pub struct WellDensity {
    /// Coordinates.
    pub x: Field1,
    /// Potential.
    pub potential: Field1,
    /// Final probability density.
    pub density: Field1,
}

/// Zoo preset: 100 points spanning `[-50, 50]` stepped with `δx = 1` and
/// `δt = 0.001` for 500 steps, square well of height 1000, packet with `σ = 5`
/// and `k₀ = 1`.
pub fn preset() -> SchrodingerResult<WellDensity> {
    let n = PRESET_N;
    let x = nd::Array1::linspace(-(n as f64) / 2.0, n as f64 / 2.0, n);
    let potential = square_well(n, 1000.0);
    let stepper = Schrodinger::new(potential.clone(), 1.0, 0.001)?;
    let psi0 = gaussian_packet(&x, 5.0, 1.0);
    let run = stepper.run(&psi0, PRESET_STEPS, Cadence::never())?;
    Ok(WellDensity { x, potential, density: probability_density(&run.field) })
}
