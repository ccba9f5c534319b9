//! Element-wise `C = A + B` over two small `int` arrays.

use crate::{
    build_kernel, enqueue_kernel,
    kernels::{SIMPLE_ADD, SIMPLE_ADD_SRC},
    ClError, ComputeEnv, GpuBuffer, Queued,
};

pub const LEN: usize = 10;

pub const A: [i32; LEN] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
pub const B: [i32; LEN] = [0, 1, 2, 0, 1, 2, 0, 1, 2, 0];

/// Scalar reference; wraps on overflow like the device does.
pub fn add_reference(a: &[i32], b: &[i32]) -> Result<Vec<i32>, ClError> {
    if a.len() != b.len() {
        return Err(ClError::SizeMismatch { expected: a.len(), actual: b.len() });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x.wrapping_add(*y)).collect())
}

/// Runs `simple_add` on the device: upload A and B, one work item per
/// element, wait, read C back.
pub fn run(env: &ComputeEnv, a: &[i32], b: &[i32]) -> Result<Vec<i32>, ClError> {
    if a.len() != b.len() {
        return Err(ClError::SizeMismatch { expected: a.len(), actual: b.len() });
    }
    let n = a.len();

    let kernel = build_kernel(env, SIMPLE_ADD_SRC, SIMPLE_ADD)?;

    /* ---------- Device-Buffer + Host → Device ------------------- */
    let a_dev = GpuBuffer::<i32, Queued>::from_slice(env.context(), env.queue(), a)?;
    let b_dev = GpuBuffer::<i32, Queued>::from_slice(env.context(), env.queue(), b)?;
    let c_dev = GpuBuffer::<i32, Queued>::new(env.context(), n)?.launch();

    /* ---------- Kernel ------------------------------------------ */
    kernel.set_arg(0, a_dev.raw())?;
    kernel.set_arg(1, b_dev.raw())?;
    kernel.set_arg(2, c_dev.raw())?;
    let guard = enqueue_kernel(env.queue(), &kernel, &[n])?;
    env.finish()?;
    let c_dev = c_dev.complete(guard)?;

    /* ---------- Device → Host ----------------------------------- */
    c_dev.download(env.queue())
}
