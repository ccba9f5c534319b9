//! Escape-time Mandelbrot renderer.
//!
//! The image is a row-major `Vec<i32>` of iteration counts: row `j` holds
//! points with imaginary part `y0 + j * dy`.

use crate::{
    build_kernel, enqueue_kernel,
    kernels::{MANDELBROT, MANDELBROT_SRC},
    ClError, ComputeEnv, GpuBuffer, Queued,
};

pub const OUTPUT_FILE: &str = "mandelbrot.ppm";

/// Viewport, resolution and iteration cap. Floats are `f32` because the
/// kernel works in single precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotConfig {
    pub width: usize,
    pub height: usize,
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
    pub max_iters: i32,
}

impl Default for MandelbrotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            x0: -2.0,
            x1: 1.0,
            y0: -1.0,
            y1: 1.0,
            max_iters: 256,
        }
    }
}

impl MandelbrotConfig {
    pub fn validate(&self) -> Result<(), ClError> {
        if self.width == 0 || self.height == 0 {
            return Err(ClError::InvalidConfig(format!(
                "image size {}x{} is empty",
                self.width, self.height
            )));
        }
        // the kernel indexes with `int`
        let fits = self
            .width
            .checked_mul(self.height)
            .is_some_and(|n| i32::try_from(n).is_ok());
        if !fits {
            return Err(ClError::InvalidConfig(format!(
                "image size {}x{} exceeds the kernel's int indexing",
                self.width, self.height
            )));
        }
        if self.max_iters <= 0 {
            return Err(ClError::InvalidConfig(format!(
                "max_iters must be positive, got {}",
                self.max_iters
            )));
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn dx(&self) -> f32 {
        (self.x1 - self.x0) / self.width as f32
    }

    pub fn dy(&self) -> f32 {
        (self.y1 - self.y0) / self.height as f32
    }

    /// Complex point sampled by pixel `(i, j)`.
    pub fn point(&self, i: usize, j: usize) -> (f32, f32) {
        (self.x0 + i as f32 * self.dx(), self.y0 + j as f32 * self.dy())
    }
}

/// Number of steps of `z = z² + c`, starting at `z = c`, before `|z|² > 4`.
/// Returns `count` for points that never escape.
pub fn escape_time(c_re: f32, c_im: f32, count: i32) -> i32 {
    let (mut z_re, mut z_im) = (c_re, c_im);
    let mut i = 0;
    while i < count {
        if z_re * z_re + z_im * z_im > 4.0 {
            break;
        }
        let new_re = z_re * z_re - z_im * z_im;
        let new_im = 2.0 * z_re * z_im;
        z_re = c_re + new_re;
        z_im = c_im + new_im;
        i += 1;
    }
    i
}

/// Scalar, single-threaded rendering of the same recurrence the kernel runs.
pub fn render_reference(cfg: &MandelbrotConfig) -> Result<Vec<i32>, ClError> {
    cfg.validate()?;

    let mut out = Vec::with_capacity(cfg.pixel_count());
    for j in 0..cfg.height {
        for i in 0..cfg.width {
            let (x, y) = cfg.point(i, j);
            out.push(escape_time(x, y, cfg.max_iters));
        }
    }
    Ok(out)
}

/// Renders on the device, one work item per pixel.
pub fn render(env: &ComputeEnv, cfg: &MandelbrotConfig) -> Result<Vec<i32>, ClError> {
    cfg.validate()?;

    /* ---------- Kernel bauen ------------------------------------ */
    let kernel = build_kernel(env, MANDELBROT_SRC, MANDELBROT)?;

    /* ---------- Ausgabe-Buffer, mit Nullen initialisiert -------- */
    let zeros = vec![0_i32; cfg.pixel_count()];
    let out_dev = GpuBuffer::<i32, Queued>::from_slice(env.context(), env.queue(), &zeros)?
        .launch();

    /* ---------- Argumente & Launch ------------------------------ */
    let (dx, dy) = (cfg.dx(), cfg.dy());
    // validated above
    let width = cfg.width as i32;
    // mandelbrot(float, float, float, float, int, int, int*)
    kernel.set_arg(0, &dx)?;
    kernel.set_arg(1, &dy)?;
    kernel.set_arg(2, &cfg.x0)?;
    kernel.set_arg(3, &cfg.y0)?;
    kernel.set_arg(4, &width)?;
    kernel.set_arg(5, &cfg.max_iters)?;
    kernel.set_arg(6, out_dev.raw())?;
    let guard = enqueue_kernel(env.queue(), &kernel, &[cfg.width, cfg.height])?;
    env.finish()?;
    let out_dev = out_dev.complete(guard)?;

    /* ---------- Device → Host ----------------------------------- */
    out_dev.download(env.queue())
}
