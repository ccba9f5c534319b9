//! Platform and device discovery.
//!
//! Selection is deliberately naive: first platform, first device of any
//! type on it.

use opencl3::{
    command_queue::CommandQueue,
    context::Context,
    device::{Device, CL_DEVICE_TYPE_ALL},
    error_codes::CL_DEVICE_NOT_FOUND,
    platform::get_platforms,
};

use crate::ClError;

/// Returned by ICD loaders when no vendor runtime is installed.
const CL_PLATFORM_NOT_FOUND_KHR: i32 = -1001;

/// Context and in-order queue on the selected device.
pub struct ComputeEnv {
    platforms: Vec<String>,
    devices: Vec<String>,
    context: Context,
    queue: CommandQueue,
}

impl ComputeEnv {
    pub fn discover() -> Result<Self, ClError> {
        /* ---------- 1. Plattformen --------------------------------- */
        let all_platforms = match get_platforms() {
            Ok(p) => p,
            Err(e) if e.0 == CL_PLATFORM_NOT_FOUND_KHR => return Err(ClError::NoPlatform),
            Err(e) => return Err(e.into()),
        };
        let Some(platform) = all_platforms.first() else {
            return Err(ClError::NoPlatform);
        };

        let platforms = all_platforms
            .iter()
            .map(|p| p.name())
            .collect::<Result<Vec<_>, _>>()?;
        for name in &platforms {
            log::debug!("Got '{name}' platform");
        }

        /* ---------- 2. Geräte der ersten Plattform ----------------- */
        let device_ids = match platform.get_devices(CL_DEVICE_TYPE_ALL) {
            Ok(ids) => ids,
            Err(e) if e.0 == CL_DEVICE_NOT_FOUND => return Err(ClError::NoDevice),
            Err(e) => return Err(e.into()),
        };
        let Some(&device_id) = device_ids.first() else {
            return Err(ClError::NoDevice);
        };

        let devices = device_ids
            .iter()
            .map(|&id| Device::new(id).name())
            .collect::<Result<Vec<_>, _>>()?;
        for name in &devices {
            log::debug!("Got '{name}' device");
        }

        /* ---------- 3. Kontext & Queue ----------------------------- */
        let device = Device::new(device_id);
        let context = Context::from_device(&device)?;
        let queue = CommandQueue::create(&context, device.id(), 0)?;

        log::debug!("Using device: {}", devices[0]);

        Ok(Self { platforms, devices, context, queue })
    }

    /// Names of all platforms, in discovery order.
    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    /// Names of all devices on the selected platform.
    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    pub fn device_name(&self) -> &str {
        &self.devices[0]
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    /// Blocks until every command on the queue has finished.
    pub fn finish(&self) -> Result<(), ClError> {
        self.queue.finish()?;
        Ok(())
    }
}
