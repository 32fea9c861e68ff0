//! Step-size constraints for the explicit schemes.
//!
//! Every explicit stepper except the Schrödinger integrator passes its time
//! increment through here before iterating. A violating increment is rescaled
//! downward to [`SAFETY`] times the bound, never rejected: the caller trades
//! the requested accuracy for a run that stays bounded.
//!
//! ```text
//! diffusion number (1D)   r = α δt / δx²                ≤ 1/2
//! diffusion number (2D)   r = α δt (1/δx² + 1/δy²)      ≤ 1/2
//! Courant number          C = c δt / δx                 ≤ 1
//! ```

/// Fraction of the stability bound used when an increment has to be derived or
/// rescaled.
pub const SAFETY: f64 = 0.9;

/// Upper bound on the diffusion number for the explicit heat schemes.
pub const MAX_DIFFUSION: f64 = 0.5;

/// Upper bound on the Courant number for the leapfrog wave scheme.
pub const MAX_COURANT: f64 = 1.0;

/// A time increment after passing through a stability check.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Clamped {
    /// Time increment to use.
    pub dt: f64,
    /// Stability number evaluated at `dt`.
    pub ratio: f64,
    /// `true` if `dt` differs from the requested increment.
    pub rescaled: bool,
}

/// Diffusion number `α δt / δx²` for a single axis.
pub fn diffusion_number(alpha: f64, dt: f64, dx: f64) -> f64 {
    alpha * dt / dx.powi(2)
}

/// Generalized diffusion number `α δt (1/δx² + 1/δy²)` for two axes.
pub fn diffusion_number_2d(alpha: f64, dt: f64, dx: f64, dy: f64) -> f64 {
    alpha * dt * (dx.powi(-2) + dy.powi(-2))
}

/// Courant number `c δt / δx`.
pub fn courant_number(c: f64, dt: f64, dx: f64) -> f64 {
    c * dt / dx
}

/// Largest stable increment for 1D diffusion, with the [`SAFETY`] margin.
pub fn diffusion_dt(alpha: f64, dx: f64) -> f64 {
    SAFETY * MAX_DIFFUSION * dx.powi(2) / alpha
}

/// Largest stable increment for 2D diffusion, with the [`SAFETY`] margin.
///
/// This is `0.9 δx² δy² / (2 α (δx² + δy²))`.
pub fn diffusion_dt_2d(alpha: f64, dx: f64, dy: f64) -> f64 {
    let (dx2, dy2) = (dx.powi(2), dy.powi(2));
    SAFETY * dx2 * dy2 / (2.0 * alpha * (dx2 + dy2))
}

/// Largest stable increment for the wave equation, with the [`SAFETY`]
/// margin.
pub fn courant_dt(c: f64, dx: f64) -> f64 {
    SAFETY * MAX_COURANT * dx / c
}

/// Check `dt` against the 1D diffusion bound, rescaling it if needed.
pub fn clamp_diffusion(alpha: f64, dt: f64, dx: f64) -> Clamped {
    let ratio = diffusion_number(alpha, dt, dx);
    if ratio <= MAX_DIFFUSION {
        return Clamped { dt, ratio, rescaled: false };
    }
    let dt_new = diffusion_dt(alpha, dx);
    log::debug!(
        "stability::clamp_diffusion: r = {ratio:.4} > {MAX_DIFFUSION}; \
        dt {dt:.3e} -> {dt_new:.3e}"
    );
    Clamped {
        dt: dt_new,
        ratio: diffusion_number(alpha, dt_new, dx),
        rescaled: true,
    }
}

/// Check `dt` against the 2D diffusion bound, rescaling it if needed.
pub fn clamp_diffusion_2d(alpha: f64, dt: f64, dx: f64, dy: f64) -> Clamped {
    let ratio = diffusion_number_2d(alpha, dt, dx, dy);
    if ratio <= MAX_DIFFUSION {
        return Clamped { dt, ratio, rescaled: false };
    }
    let dt_new = diffusion_dt_2d(alpha, dx, dy);
    log::debug!(
        "stability::clamp_diffusion_2d: r = {ratio:.4} > {MAX_DIFFUSION}; \
        dt {dt:.3e} -> {dt_new:.3e}"
    );
    Clamped {
        dt: dt_new,
        ratio: diffusion_number_2d(alpha, dt_new, dx, dy),
        rescaled: true,
    }
}

/// Check `dt` against the Courant bound, rescaling it if needed.
///
/// Also returns the number of steps needed to cover `duration`: unchanged
/// from `steps` if no rescaling happened, otherwise `⌊duration / δt⌋ + 1`.
pub fn clamp_courant(c: f64, dt: f64, dx: f64, duration: f64, steps: usize)
    -> (Clamped, usize)
{
    let ratio = courant_number(c, dt, dx);
    if ratio <= MAX_COURANT {
        return (Clamped { dt, ratio, rescaled: false }, steps);
    }
    let dt_new = courant_dt(c, dx);
    let steps_new = (duration / dt_new).floor() as usize + 1;
    log::debug!(
        "stability::clamp_courant: C = {ratio:.4} > {MAX_COURANT}; \
        dt {dt:.3e} -> {dt_new:.3e}, steps {steps} -> {steps_new}"
    );
    let clamped = Clamped {
        dt: dt_new,
        ratio: courant_number(c, dt_new, dx),
        rescaled: true,
    };
    (clamped, steps_new)
}
