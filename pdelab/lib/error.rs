//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! Note that none of the numerical routines fail once their inputs have been
//! validated: instability is handled by clamping and singular systems by
//! substitution (see [`helmholtz`][crate::helmholtz]). The errors below are
//! all raised at construction time or at the outer (I/O, network) edges.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when a grid would be too small for a centered second difference,
/// or would span a degenerate domain.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when an axis has fewer than 3 points.
    #[error("grid axes must have at least 3 points; got {0}")]
    TooFewPoints(usize),

    /// Returned when a non-positive domain length is encountered.
    #[error("domain length must be greater than 0; got {0}")]
    BadLength(f64),

    /// Returned when a field's shape does not match the grid it is paired with.
    #[error("field shape {0:?} does not match grid shape {1:?}")]
    Shape(Vec<usize>, Vec<usize>),
}

impl GridError {
    pub(crate) fn check_points(n: usize) -> Result<(), Self> {
        (n >= 3).then_some(()).ok_or(Self::TooFewPoints(n))
    }

    pub(crate) fn check_length(length: f64) -> Result<(), Self> {
        (length > 0.0).then_some(()).ok_or(Self::BadLength(length))
    }

    pub(crate) fn check_shape<S, A, D>(
        field: &nd::ArrayBase<S, D>,
        expected: &[usize],
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        D: nd::Dimension,
    {
        (field.shape() == expected).then_some(())
            .ok_or_else(|| Self::Shape(field.shape().to_vec(), expected.to_vec()))
    }
}

/// Returned when a time-stepping parameter is unusable.
#[derive(Debug, Error)]
pub enum ParamError {
    /// Returned when a non-positive coefficient (diffusivity, wave speed) is
    /// encountered.
    #[error("coefficient must be greater than 0; got {0}")]
    BadCoefficient(f64),

    /// Returned when a non-positive time increment or duration is encountered.
    #[error("time increment and duration must be greater than 0; got {0}")]
    BadTime(f64),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

impl ParamError {
    pub(crate) fn check_coefficient(a: f64) -> Result<(), Self> {
        (a > 0.0 && a.is_finite()).then_some(()).ok_or(Self::BadCoefficient(a))
    }

    pub(crate) fn check_time(t: f64) -> Result<(), Self> {
        (t > 0.0 && t.is_finite()).then_some(()).ok_or(Self::BadTime(t))
    }
}

/// Returned from [`config`][crate::config] when loading or validating
/// configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when an online model source is selected without an API key.
    #[error("no API key configured for {0}")]
    MissingApiKey(&'static str),

    /// Returned when the configuration file cannot be read.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Returned when the configuration file cannot be parsed.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Returned from a chat completion request.
///
/// These never leave [`chat`][crate::chat] as errors; they are converted to
/// the text shown in place of an answer.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The API answered with a non-success status.
    #[error("API 请求失败（{status} {code}）。请检查 Base URL, Key 或模型。\n错误详情：{message}")]
    Status { status: u16, code: String, message: String },

    /// The API answered successfully but without any choices.
    #[error("API 响应无内容 (choices 列表为空)。")]
    EmptyChoices,

    /// Connection, timeout, or TLS failure.
    #[error("处理时发生未知错误：{0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("处理时发生未知错误：{0}")]
    Decode(#[from] std::io::Error),
}

/// Returned from [`plot`][crate::plot] rendering functions.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Returned when there is nothing to draw.
    #[error("plot has no data")]
    Empty,

    /// Returned when the drawing backend fails.
    #[error("drawing error: {0}")]
    Draw(String),

    /// Returned when the output directory cannot be created.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
