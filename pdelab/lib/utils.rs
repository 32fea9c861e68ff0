//! Miscellaneous tools.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{ Arr1, Arr2 };

/// Unscaled centered second difference `u[i + 1] - 2 u[i] + u[i - 1]`.
///
/// *Panics if `i` is not an interior index*.
#[inline]
pub fn second_diff<S, A>(u: &Arr1<S>, i: usize) -> A
where
    S: nd::Data<Elem = A>,
    A: Copy + std::ops::Add<Output = A> + std::ops::Sub<Output = A>,
{
    u[i + 1] - u[i] - u[i] + u[i - 1]
}

/// Scaled five-point Laplacian at an interior point of a 2D field, with axis 0
/// spaced by `dx` and axis 1 by `dy`.
#[inline]
pub fn laplacian_2d<S>(u: &Arr2<S>, i: usize, j: usize, dx: f64, dy: f64) -> f64
where S: nd::Data<Elem = f64>
{
    let c = u[[i, j]];
    (u[[i + 1, j]] - 2.0 * c + u[[i - 1, j]]) / dx.powi(2)
        + (u[[i, j + 1]] - 2.0 * c + u[[i, j - 1]]) / dy.powi(2)
}

/// Sum of the four orthogonal neighbors of an interior point.
#[inline]
pub fn neighbor_sum<S>(u: &Arr2<S>, i: usize, j: usize) -> f64
where S: nd::Data<Elem = f64>
{
    u[[i + 1, j]] + u[[i - 1, j]] + u[[i, j + 1]] + u[[i, j - 1]]
}

/// Smallest and largest values in a field, ignoring NaNs.
///
/// Returns `(+∞, -∞)` for an empty field.
pub fn extent<'a, I>(values: I) -> (f64, f64)
where I: IntoIterator<Item = &'a f64>
{
    values.into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S>(y: &Arr1<S>, dx: f64) -> f64
where S: nd::Data<Elem = f64>
{
    let n: usize = y.len();
    (dx / 2.0) * (y[0] + 2.0 * y.slice(nd::s![1..n - 1]).sum() + y[n - 1])
}

/// Pointwise probability density `re² + im²` of a wavefunction.
pub fn probability_density<S>(q: &Arr1<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = C64>
{
    q.mapv(|qk| qk.norm_sqr())
}

/// Calculate the norm of a wavefunction.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_norm<S>(q: &Arr1<S>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    trapz(&probability_density(q), dx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_diff_of_parabola() {
        let u: nd::Array1<f64> = (0..5).map(|k| (k * k) as f64).collect();
        assert_eq!(second_diff(&u, 2), 2.0);
        let q: nd::Array1<C64> = u.mapv(|uk| C64::new(0.0, uk));
        assert_eq!(second_diff(&q, 3), C64::new(0.0, 2.0));
    }

    #[test]
    fn laplacian_of_quadratic_bowl() {
        let u = nd::Array2::from_shape_fn((5, 5), |(i, j)| {
            let (x, y) = (i as f64 * 0.5, j as f64 * 0.25);
            x * x + y * y
        });
        assert!((laplacian_2d(&u, 2, 2, 0.5, 0.25) - 4.0).abs() < 1e-12);
        assert_eq!(neighbor_sum(&u, 1, 1), u[[2, 1]] + u[[0, 1]] + u[[1, 2]] + u[[1, 0]]);
    }

    #[test]
    fn extent_and_trapz() {
        let y = nd::array![1.0, -2.0, 3.0, 0.5];
        assert_eq!(extent(&y), (-2.0, 3.0));
        let flat = nd::Array1::from_elem(11, 2.0);
        assert!((trapz(&flat, 0.1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn density_sums_components() {
        let q = nd::array![C64::new(3.0, 4.0), C64::new(0.0, 1.0)];
        assert_eq!(probability_density(&q), nd::array![25.0, 1.0]);
    }
}
