//! Provides small, illustrative finite-difference (FDM) simulations of the
//! classic partial differential equations, along with the glue needed to
//! present them: a plotting adapter, a quiz engine, and a Q&A chat
//! collaborator.
//!
//! Provides implementations for the following numerical routines:
//! - Steady state (time-independent):
//!     - Laplace and Poisson equations via Jacobi relaxation ([`relax`])
//!     - Helmholtz equation via a single dense linear solve ([`helmholtz`])
//!     - Lid-driven cavity flow via a simplified vorticity-streamfunction
//!       iteration ([`cavity`])
//! - Time-dependent:
//!     - 1D/2D heat equation, explicit forward-time central-space ([`heat`])
//!     - 1D wave equation, leapfrog ([`wave`])
//!     - 1D Schrödinger equation, explicit forward Euler ([`schrodinger`])
//!
//! All explicit steppers derive or clamp their time increment through
//! [`stability`] before iterating, with the deliberate exception of the
//! Schrödinger integrator. None of these is meant as a production solver:
//! resolutions, boundary conditions, and iteration counts are fixed presets
//! chosen to produce a readable picture.
//!
//! ```
//! use pdelab::{ grid::Edges, relax };
//!
//! let sol = relax::laplace(20, Edges { top: 100.0, ..Edges::zero() }, 200)
//!     .unwrap();
//! assert!(sol.iter().all(|&u| (0.0..=100.0).contains(&u)));
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod stability;
pub mod utils;

pub mod relax;
pub mod heat;
pub mod wave;
pub mod helmholtz;
pub mod cavity;
pub mod schrodinger;

pub mod plot;
pub mod zoo;
pub mod demo;
pub mod quiz;
pub mod chat;
pub mod config;

pub mod docs;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
