//! Host side of two small OpenCL demos: integer vector addition and an
//! escape-time Mandelbrot renderer that writes a binary PPM image.

// ─── Feature‑Module ───────────────────────────────────────────────────
#[cfg(feature = "metrics")]
pub mod metrics;
#[cfg(feature = "metrics")]
pub use metrics::{summary, ALLOCS, ALLOC_BYTES};

// ─── Module ───────────────────────────────────────────────────────────
pub mod buffer;
pub mod device;
pub mod dispatch;
pub mod kernels;
pub mod mandelbrot;
pub mod ppm;
pub mod program;
pub mod simple_add;

pub use buffer::{GpuBuffer, GpuEventGuard, InFlight, Queued, Ready, State};
pub use device::ComputeEnv;
pub use dispatch::enqueue_kernel;
pub use mandelbrot::MandelbrotConfig;
pub use program::build_kernel;

// ─── Fehler‑Typ ───────────────────────────────────────────────────────
#[derive(thiserror::Error, Debug)]
pub enum ClError {
    #[error("OpenCL API error: {0}")]
    Api(i32),
    #[error("No platforms found. Check OpenCL installation!")]
    NoPlatform,
    #[error("No devices found. Check OpenCL installation!")]
    NoDevice,
    #[error("Error building: {0}")]
    Build(String),
    #[error("Invalid buffer size: {0}")]
    InvalidSize(usize),
    #[error("Host slice holds {actual} elements, device buffer holds {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Invalid work size: {0:?}")]
    InvalidWorkSize(Vec<usize>),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<opencl3::error_codes::ClError> for ClError {
    #[inline]
    fn from(err: opencl3::error_codes::ClError) -> Self {
        ClError::Api(err.0)
    }
}
