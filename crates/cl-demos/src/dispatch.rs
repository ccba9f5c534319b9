use opencl3::{command_queue::CommandQueue, kernel::Kernel};
use std::ptr;

use crate::{ClError, GpuEventGuard};

/// Launches `kernel` over a `global` index space of 1 to 3 dimensions.
///
/// The local size is left to the runtime. Kernel arguments must be set
/// before the call.
pub fn enqueue_kernel(
    queue: &CommandQueue,
    kernel: &Kernel,
    global: &[usize],
) -> Result<GpuEventGuard, ClError> {
    if global.is_empty() || global.len() > 3 || global.contains(&0) {
        return Err(ClError::InvalidWorkSize(global.to_vec()));
    }

    log::debug!("enqueue kernel, global = {global:?}");

    // no offsets, no local size, no wait list
    let evt = queue.enqueue_nd_range_kernel(
        kernel.get(),
        global.len() as u32,
        ptr::null(),
        global.as_ptr(),
        ptr::null(),
        &[],
    )?;

    Ok(GpuEventGuard::new(evt))
}
