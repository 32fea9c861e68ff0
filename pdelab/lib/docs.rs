//! Theoretical background.
//!
//! # Contents
//! - [General form](#general-form)
//! - [Classification](#classification)
//! - [Initial and boundary conditions](#initial-and-boundary-conditions)
//! - [Finite differences](#finite-differences)
//! - [Stability](#stability)
//! - [AI solvers](#ai-solvers)
//!
//! # General form
//! A partial differential equation (PDE) relates an unknown function of
//! several independent variables to its partial derivatives. In full
//! generality,
//! ```text
//!            ∂u        ∂u    ∂²u
//! F(x₁, ..., xₙ, u, ---, ..., ---, ---, ...) = 0
//!                   ∂x₁       ∂xₙ  ∂x₁²
//! ```
//! where the unknown *u* is usually a physical quantity (temperature,
//! pressure, displacement, a wavefunction), the independent variables are
//! spatial coordinates (*x*, *y*, *z*) and possibly time *t*, and the partial
//! derivatives describe rates of change in space or time.
//!
//! # Classification
//! Second-order linear equations in two variables,
//! ```text
//! A u_xx + 2B u_xy + C u_yy + (lower-order terms) = 0
//! ```
//! are classified by the sign of the discriminant *B*² − *AC*. The class
//! determines how information propagates and hence how the equation must be
//! solved numerically.
//!
//! | Class | *B*² − *AC* | Behavior | Example | Structure |
//! | :---- | :---------: | :------- | :------ | :-------- |
//! | Elliptic   | < 0 | equilibrium; information reaches the whole domain at once | Laplace, ∇²*u* = 0 | spatial derivatives only |
//! | Parabolic  | = 0 | diffusion; features smooth out over time | heat, ∂*u*/∂*t* = *α* ∇²*u* | first order in time, second order in space |
//! | Hyperbolic | > 0 | propagation at finite speed | wave, ∂²*u*/∂*t*² = *c*² ∇²*u* | second order in time and space |
//!
//! In this crate the elliptic problems ([`relax`][crate::relax],
//! [`helmholtz`][crate::helmholtz]) are solved as steady states, while the
//! parabolic and hyperbolic ones ([`heat`][crate::heat],
//! [`wave`][crate::wave]) are marched forward in time. The Schrödinger
//! equation is formally parabolic (first order in time) but, with its factor of
//! *i*, behaves like a dispersive wave equation.
//!
//! # Initial and boundary conditions
//! A PDE alone does not determine a unique solution; it must be supplemented
//! with conditions on the solution.
//!
//! *Initial conditions* apply to time-dependent (parabolic and hyperbolic)
//! equations and fix the state of the system at *t* = 0:
//! ```text
//! u(x, t = 0) = f(x)
//! ```
//! Hyperbolic equations, being second order in time, additionally need the
//! initial velocity ∂*u*/∂*t* at *t* = 0. The [wave][crate::wave::Wave]
//! stepper takes it to be zero.
//!
//! *Boundary conditions* apply to all equations posed on a bounded spatial
//! domain and fix the behavior of the solution on its edge. The three
//! classical types are:
//! - **Dirichlet** (first kind): the value of *u* is prescribed on the
//!   boundary. Every stepper in this crate uses this type, as
//!   [`Boundary1::Dirichlet`][crate::grid::Boundary1::Dirichlet] or
//!   [`Edges`][crate::grid::Edges].
//! - **Neumann** (second kind): the normal derivative ∂*u*/∂*n* (the flux) is
//!   prescribed. The zero-flux case is available for the 1D heat equation as
//!   [`Boundary1::ZeroFlux`][crate::grid::Boundary1::ZeroFlux].
//! - **Robin** (third kind): a linear combination *a u* + *b* ∂*u*/∂*n* is
//!   prescribed.
//!
//! # Finite differences
//! The finite-difference method (FDM) replaces derivatives with algebraic
//! differences on a regular grid. With nodes
//! ```text
//! x[i] = i Δx, i ∊ {0, ..., N - 1}, Δx = L / (N - 1)
//! t[k] = k Δt
//! u[i, k] ≈ u(x[i], t[k])
//! ```
//! the building blocks are the centered second difference
//! ```text
//! ∂²u     u[i + 1] - 2 u[i] + u[i - 1]
//! ---  ≈  ----------------------------
//! ∂x²                 Δx²
//! ```
//! (see [`utils::second_diff`][crate::utils::second_diff]), and its 2D
//! five-point analogue ([`utils::laplacian_2d`][crate::utils::laplacian_2d]).
//!
//! Forward Euler in time gives the explicit heat scheme
//! ```text
//! u[i, k + 1] = u[i, k] + γ (u[i + 1, k] - 2 u[i, k] + u[i - 1, k])
//! γ = α Δt / Δx²
//! ```
//! and a centered second difference in time gives the leapfrog wave scheme
//! ```text
//! u[i, k + 1] = 2 u[i, k] - u[i, k - 1] + C² (u[i + 1, k] - 2 u[i, k] + u[i - 1, k])
//! C = c Δt / Δx
//! ```
//! Steady-state problems instead set the time derivative to zero and solve
//! the resulting linear system, either iteratively (Jacobi relaxation, where
//! each node is repeatedly replaced by the average of its four neighbors) or
//! directly (a dense solve of the assembled operator).
//!
//! # Stability
//! Explicit schemes are only *conditionally* stable: if the time increment is
//! too large relative to the grid spacing, round-off errors are amplified at
//! every step and the solution blows up. A von Neumann analysis, substituting
//! a single Fourier mode *u*[*i*, *k*] = *g*ᵏ exp(i *q* *i* Δx) and requiring
//! |*g*| ≤ 1 for every *q*, gives
//! ```text
//! heat, 1D:  γ = α Δt / Δx²                ≤ 1/2
//! heat, 2D:  α Δt (1 / Δx² + 1 / Δy²)      ≤ 1/2
//! wave:      C = c Δt / Δx                 ≤ 1    (CFL condition)
//! ```
//! The [`stability`][crate::stability] module enforces these before any
//! stepping begins, reducing an offending Δt to a safety fraction
//! ([`SAFETY`][crate::stability::SAFETY]) of its limit.
//!
//! Forward Euler applied to the Schrödinger equation has no such window: a
//! mode with wavenumber *q* in a constant potential *V* is amplified by
//! ```text
//! |g|² = 1 + Δt² (4 sin²(q Δx / 2) / Δx² + V)²  ≥ 1
//! ```
//! so every non-constant mode grows, however small Δt is.
//! [`schrodinger`][crate::schrodinger] runs unguarded and instead reports the
//! predicted growth; an unconditionally stable alternative would be the
//! implicit Crank–Nicolson scheme[^1].
//!
//! # AI solvers
//! Classical grids become expensive for high-dimensional, inverse, or
//! many-query problems. Machine-learning methods from scientific machine
//! learning attack these cases differently. None of them is implemented in
//! this crate; the sketches below are schematic pseudo-code.
//!
//! ## Physics-informed neural networks
//! A network *u*<sub>θ</sub>(*x*, *t*) is trained with the PDE, initial and
//! boundary conditions folded into its loss. Derivatives come from automatic
//! differentiation, so no mesh is needed[^2]. Little labelled data is
//! required, and unknown coefficients can be fitted alongside the solution
//! (inverse problems). Typical uses are complex flows and materials science.
//! For the 1D heat equation:
//! ```text
//! physics_loss(θ; x, t):
//!     u    = u_θ(x, t)
//!     u_t  = ∂u/∂t             (autodiff)
//!     u_xx = ∂²u/∂x²           (autodiff)
//!     r    = u_t - α u_xx      (PDE residual)
//!     return mean(r²)
//!
//! loss = loss_bc + loss_ic + physics_loss
//! ```
//!
//! ## Deep Galerkin method
//! The solution is again a deep network, but the residual is measured in an
//! integral (*L*²) sense and the integral is estimated by Monte Carlo
//! sampling of the domain[^3]. Because no grid is built, the cost does not
//! explode with dimension, which suits high-dimensional problems such as
//! quantum chemistry or derivative pricing.
//! ```text
//! loss = E_x[(L[u_θ](x) - f(x))²]
//!     1. sample many points x uniformly in the domain
//!     2. evaluate the PDE residual at each point
//!     3. take the mean square
//! ```
//!
//! ## Operator learning
//! Instead of one solution, the network learns the solution operator
//! *G*: *a* ↦ *u*, mapping an input function (initial data, source,
//! coefficients) to the output function. Once trained, the whole field for a
//! new input is a single forward pass, which makes it useful for real-time
//! simulation, digital twins, and rapid design loops.
//!
//! The Fourier neural operator[^4] lifts the input to a wide channel space,
//! applies layers that act on a truncated set of Fourier modes (capturing
//! global structure), and projects back:
//! ```text
//! FNO(a) = project ∘ (fourier_layer)ᴸ ∘ lift (a)
//! loss   = MSE(FNO(a_i), u_i)
//! ```
//! DeepONet[^5] splits the work between a *branch* network, fed the input
//! function sampled at *N* sensor points, and a *trunk* network, fed the
//! query coordinate. Both end in *P* features, which are combined by a dot
//! product:
//! ```text
//! b = branch(a(y₁), ..., a(y_N))    ∊ ℝᴾ
//! τ = trunk(x)                      ∊ ℝᴾ
//! u(x) ≈ Σ_k b_k τ_k
//! loss = MSE(DeepONet(a_i)(x), u_i(x))
//! ```
//!
//! ## Surrogate models
//! A network is fit to a data set of conventional simulations, learning the
//! map from input parameters straight to the solution. Prediction after
//! training is very fast, so the surrogate replaces the expensive solver in
//! engineering optimization, sensitivity analysis, or black-box
//! acceleration[^6].
//! ```text
//! offline: for i in 1..=N
//!              draw parameters P_i (diffusivity, boundary values, ...)
//!              U_i = solve(P_i)            (FDM/FEM, e.g. this crate)
//!          D = {(P_i, U_i)}
//! online:  fit NN: P ↦ U on D, loss = MSE(NN(P_i), U_i)
//! ```
//!
//! [^1]: J. Crank and P. Nicolson, "A practical method for numerical
//! evaluation of solutions of partial differential equations of the
//! heat-conduction type." Proc. Camb. Phil. Soc. **43**, 50 (1947).
//!
//! [^2]: M. Raissi, P. Perdikaris, and G. E. Karniadakis, "Physics-informed
//! neural networks: A deep learning framework for solving forward and inverse
//! problems involving nonlinear partial differential equations." J. Comput.
//! Phys. **378**, 686 (2019). Open-source implementation: DeepXDE.
//!
//! [^3]: J. Sirignano and K. Spiliopoulos, "DGM: A deep learning algorithm for
//! solving partial differential equations." J. Comput. Phys. **375**, 1339
//! (2018).
//!
//! [^4]: Z. Li et al., "Fourier neural operator for parametric partial
//! differential equations." arXiv:2010.08895 (2020).
//!
//! [^5]: L. Lu, P. Jin, G. Pang, Z. Zhang, and G. E. Karniadakis, "Learning
//! nonlinear operators via DeepONet based on the universal approximation
//! theorem of operators." Nat. Mach. Intell. **3**, 218 (2021).
//!
//! [^6]: "Rapid CFD prediction based on machine learning surrogate model in
//! built environment: a review." Fluids **10**, 193 (2025).
