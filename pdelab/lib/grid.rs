//! Grid descriptions, boundary values, and snapshot histories shared by all
//! steppers.
//!
//! Fields themselves are plain [`ndarray`] arrays. For 2D fields, axis 0 is the
//! `x` axis (rows) and axis 1 is the `y` axis (columns); row 0 is called the
//! "top" edge and column 0 the "left" edge.

use ndarray as nd;
use crate::{ Arr1, Arr2, error::GridError };

pub type GridResult<T> = Result<T, GridError>;

/// A 1D scalar field.
pub type Field1 = nd::Array1<f64>;

/// A 2D scalar field.
pub type Field2 = nd::Array2<f64>;

/// Uniform grid over `[0, length]` with `n` points, including both endpoints.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid1 {
    n: usize,
    length: f64,
    dx: f64,
}

impl Grid1 {
    /// Create a new grid.
    ///
    /// Fails if `n < 3` or `length <= 0`.
    pub fn new(n: usize, length: f64) -> GridResult<Self> {
        GridError::check_points(n)?;
        GridError::check_length(length)?;
        Ok(Self { n, length, dx: length / (n - 1) as f64 })
    }

    /// Create a new grid over the unit interval.
    pub fn unit(n: usize) -> GridResult<Self> { Self::new(n, 1.0) }

    /// Number of points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.n }

    /// Domain length.
    pub fn length(&self) -> f64 { self.length }

    /// Grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Coordinate array.
    pub fn coords(&self) -> nd::Array1<f64> {
        nd::Array1::linspace(0.0, self.length, self.n)
    }

    /// Return a zero field over this grid.
    pub fn zeros(&self) -> Field1 { nd::Array1::zeros(self.n) }

    /// Check that `u` lives on this grid.
    pub fn check<S>(&self, u: &Arr1<S>) -> GridResult<()>
    where S: nd::Data<Elem = f64>
    {
        GridError::check_shape(u, &[self.n])
    }
}

/// Uniform rectangular grid; the product of two [`Grid1`]s.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid2 {
    x: Grid1,
    y: Grid1,
}

impl Grid2 {
    /// Create a new grid with `nx` rows spanning `lx` and `ny` columns
    /// spanning `ly`.
    pub fn new(nx: usize, lx: f64, ny: usize, ly: f64) -> GridResult<Self> {
        Ok(Self { x: Grid1::new(nx, lx)?, y: Grid1::new(ny, ly)? })
    }

    /// Create a new `n × n` grid over a square of side `length`.
    pub fn square(n: usize, length: f64) -> GridResult<Self> {
        Self::new(n, length, n, length)
    }

    /// Array shape `(nx, ny)`.
    pub fn shape(&self) -> (usize, usize) { (self.x.len(), self.y.len()) }

    /// Grid along axis 0.
    pub fn x(&self) -> Grid1 { self.x }

    /// Grid along axis 1.
    pub fn y(&self) -> Grid1 { self.y }

    /// Spacing along axis 0.
    pub fn dx(&self) -> f64 { self.x.dx() }

    /// Spacing along axis 1.
    pub fn dy(&self) -> f64 { self.y.dx() }

    /// Return a zero field over this grid.
    pub fn zeros(&self) -> Field2 { nd::Array2::zeros(self.shape()) }

    /// Check that `u` lives on this grid.
    pub fn check<S>(&self, u: &Arr2<S>) -> GridResult<()>
    where S: nd::Data<Elem = f64>
    {
        GridError::check_shape(u, &[self.x.len(), self.y.len()])
    }
}

/// Boundary condition at the two ends of a 1D field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Boundary1 {
    /// Fixed values at the first and last points.
    Dirichlet { left: f64, right: f64 },
    /// Zero normal derivative: each end copies its inner neighbor.
    ZeroFlux,
}

impl Boundary1 {
    /// Both ends held at zero.
    pub const fn zero() -> Self { Self::Dirichlet { left: 0.0, right: 0.0 } }

    /// Return `true` if `self` is `Dirichlet`.
    pub fn is_dirichlet(&self) -> bool {
        matches!(self, Self::Dirichlet { .. })
    }

    /// Return `true` if `self` is `ZeroFlux`.
    pub fn is_zero_flux(&self) -> bool { matches!(self, Self::ZeroFlux) }

    /// Reassign the end values of `u`.
    ///
    /// *Panics if `u` has length less than 2*.
    pub fn apply<S>(&self, u: &mut Arr1<S>)
    where S: nd::DataMut<Elem = f64>
    {
        let n = u.len();
        match *self {
            Self::Dirichlet { left, right } => {
                u[0] = left;
                u[n - 1] = right;
            },
            Self::ZeroFlux => {
                u[0] = u[1];
                u[n - 1] = u[n - 2];
            },
        }
    }

    /// Return `true` if the end values of `u` are exactly what [`Self::apply`]
    /// would have written.
    pub fn holds<S>(&self, u: &Arr1<S>) -> bool
    where S: nd::Data<Elem = f64>
    {
        let n = u.len();
        match *self {
            Self::Dirichlet { left, right } => {
                u[0].to_bits() == left.to_bits()
                    && u[n - 1].to_bits() == right.to_bits()
            },
            Self::ZeroFlux => {
                u[0].to_bits() == u[1].to_bits()
                    && u[n - 1].to_bits() == u[n - 2].to_bits()
            },
        }
    }
}

/// Fixed values on the four edges of a 2D field.
///
/// Rows are written after columns, so the four corners take the `top` and
/// `bottom` values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edges {
    /// Row 0.
    pub top: f64,
    /// Last row.
    pub bottom: f64,
    /// Column 0.
    pub left: f64,
    /// Last column.
    pub right: f64,
}

impl Edges {
    /// All edges held at zero.
    pub const fn zero() -> Self { Self::uniform(0.0) }

    /// All edges held at `v`.
    pub const fn uniform(v: f64) -> Self {
        Self { top: v, bottom: v, left: v, right: v }
    }

    /// Reassign the edge values of `u`.
    pub fn apply<S>(&self, u: &mut Arr2<S>)
    where S: nd::DataMut<Elem = f64>
    {
        let (nr, nc) = u.dim();
        u.column_mut(0).fill(self.left);
        u.column_mut(nc - 1).fill(self.right);
        u.row_mut(0).fill(self.top);
        u.row_mut(nr - 1).fill(self.bottom);
    }

    /// Return `true` if the edge values of `u` are exactly what
    /// [`Self::apply`] would have written.
    pub fn holds<S>(&self, u: &Arr2<S>) -> bool
    where S: nd::Data<Elem = f64>
    {
        let (nr, nc) = u.dim();
        let same = |v: f64, w: f64| v.to_bits() == w.to_bits();
        u.row(0).iter().all(|&v| same(v, self.top))
            && u.row(nr - 1).iter().all(|&v| same(v, self.bottom))
            && u.column(0).iter().skip(1).take(nr - 2)
                .all(|&v| same(v, self.left))
            && u.column(nc - 1).iter().skip(1).take(nr - 2)
                .all(|&v| same(v, self.right))
    }
}

impl Default for Edges {
    fn default() -> Self { Self::zero() }
}

/// Fixed-interval snapshot schedule.
///
/// A step index `k` (0-based, counted before the step is taken) is captured
/// after its update if `k` is a multiple of `every`, or if `last` is set and
/// `k` is the final step. `every = 0` disables periodic captures.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cadence {
    pub every: usize,
    pub last: bool,
}

impl Cadence {
    /// Capture every `every` steps (at least every step).
    pub fn every(every: usize) -> Self { Self { every: every.max(1), last: false } }

    /// Spread `count` captures evenly over `steps` steps.
    pub fn spread(steps: usize, count: usize) -> Self {
        Self::every(steps / count.max(1))
    }

    /// Capture nothing.
    pub fn never() -> Self { Self { every: 0, last: false } }

    /// Also capture the final step.
    pub fn with_last(self) -> Self { Self { last: true, ..self } }

    /// Return `true` if step `k` of `steps` should be captured.
    pub fn captures(&self, k: usize, steps: usize) -> bool {
        (self.every != 0 && k % self.every == 0) || (self.last && k + 1 == steps)
    }
}

/// A single captured field, tagged with the number of steps taken so far.
#[derive(Clone, Debug)]
pub struct Snapshot<A> {
    pub steps: usize,
    pub field: A,
}

/// Ordered, finite sequence of [`Snapshot`]s.
#[derive(Clone, Debug)]
pub struct History<A> {
    cadence: Cadence,
    snapshots: Vec<Snapshot<A>>,
}

impl<A: Clone> History<A> {
    /// Create a new, empty history following `cadence`.
    pub fn new(cadence: Cadence) -> Self {
        Self { cadence, snapshots: Vec::new() }
    }

    /// Record `field` if step `k` of `steps` is due for capture.
    pub fn observe(&mut self, k: usize, steps: usize, field: &A) {
        if self.cadence.captures(k, steps) {
            self.snapshots.push(Snapshot { steps: k + 1, field: field.clone() });
        }
    }
}

impl<A> History<A> {
    /// Number of captured snapshots.
    pub fn len(&self) -> usize { self.snapshots.len() }

    /// Return `true` if nothing was captured.
    pub fn is_empty(&self) -> bool { self.snapshots.is_empty() }

    /// Iterate over captured snapshots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot<A>> {
        self.snapshots.iter()
    }

    /// Most recent snapshot.
    pub fn last(&self) -> Option<&Snapshot<A>> { self.snapshots.last() }

    /// Consume `self`, returning the snapshots.
    pub fn into_vec(self) -> Vec<Snapshot<A>> { self.snapshots }
}

/// Outcome of a time-stepping run.
#[derive(Clone, Debug)]
pub struct Run<A> {
    /// Field after the last step.
    pub field: A,
    /// Snapshots captured along the way.
    pub history: History<A>,
    /// Time increment actually used.
    pub dt: f64,
    /// Stability number at `dt`.
    pub ratio: f64,
    /// Number of steps taken.
    pub steps: usize,
}

impl<A> IntoIterator for History<A> {
    type Item = Snapshot<A>;
    type IntoIter = std::vec::IntoIter<Snapshot<A>>;

    fn into_iter(self) -> Self::IntoIter { self.snapshots.into_iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_needs_three_points() {
        assert!(matches!(Grid1::new(2, 1.0), Err(GridError::TooFewPoints(2))));
        assert!(matches!(Grid1::new(3, 0.0), Err(GridError::BadLength(_))));
        let g = Grid1::new(3, 1.0).unwrap();
        assert_eq!(g.dx(), 0.5);
    }

    #[test]
    fn grid2_spacing_follows_axes() {
        let g = Grid2::new(5, 1.0, 11, 2.0).unwrap();
        assert_eq!(g.shape(), (5, 11));
        assert_eq!(g.dx(), 0.25);
        assert_eq!(g.dy(), 0.2);
        assert!(g.check(&g.zeros()).is_ok());
        assert!(g.check(&nd::Array2::<f64>::zeros((11, 5))).is_err());
    }

    #[test]
    fn edges_rows_win_corners() {
        let mut u: Field2 = nd::Array2::from_elem((4, 5), 7.0);
        let edges = Edges { top: 100.0, bottom: -1.0, left: 2.0, right: 3.0 };
        edges.apply(&mut u);
        assert_eq!(u[[0, 0]], 100.0);
        assert_eq!(u[[0, 4]], 100.0);
        assert_eq!(u[[3, 0]], -1.0);
        assert_eq!(u[[1, 0]], 2.0);
        assert_eq!(u[[2, 4]], 3.0);
        assert_eq!(u[[1, 1]], 7.0);
        assert!(edges.holds(&u));
        u[[1, 0]] = 2.5;
        assert!(!edges.holds(&u));
    }

    #[test]
    fn zero_flux_copies_neighbors() {
        let mut u: Field1 = nd::array![9.0, 1.0, 2.0, 3.0, 9.0];
        Boundary1::ZeroFlux.apply(&mut u);
        assert_eq!(u, nd::array![1.0, 1.0, 2.0, 3.0, 3.0]);
        assert!(Boundary1::ZeroFlux.holds(&u));
        assert!(!Boundary1::zero().holds(&u));
    }

    #[test]
    fn cadence_with_last() {
        let c = Cadence::spread(1000, 4).with_last();
        let k: Vec<usize> = (0..1000).filter(|&k| c.captures(k, 1000)).collect();
        assert_eq!(k, vec![0, 250, 500, 750, 999]);
    }

    #[test]
    fn cadence_never() {
        let c = Cadence::never();
        assert!((0..10).all(|k| !c.captures(k, 10)));
        assert!(c.with_last().captures(9, 10));
    }

    #[test]
    fn history_records_steps_taken() {
        let mut h: History<f64> = History::new(Cadence::every(2));
        (0..5).for_each(|k| h.observe(k, 5, &(k as f64)));
        let steps: Vec<usize> = h.iter().map(|s| s.steps).collect();
        assert_eq!(steps, vec![1, 3, 5]);
    }
}
