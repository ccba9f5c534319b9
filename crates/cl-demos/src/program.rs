use opencl3::{kernel::Kernel, program::Program};

use crate::{ClError, ComputeEnv};

/// Compiles `source` for the selected device and returns the kernel `entry`.
///
/// A failed build carries the compiler log in [`ClError::Build`].
pub fn build_kernel(env: &ComputeEnv, source: &str, entry: &str) -> Result<Kernel, ClError> {
    log::debug!("building '{entry}' ({} bytes of source)", source.len());

    let program = Program::create_and_build_from_source(env.context(), source, "")
        .map_err(|build_log| {
            log::error!("build of '{entry}' failed on {}", env.device_name());
            ClError::Build(build_log)
        })?;

    // the kernel keeps its own reference to the program
    Ok(Kernel::create(&program, entry)?)
}
