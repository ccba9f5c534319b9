//! Device buffers whose synchronisation state lives in the type.
//!
//! `Queued` buffers are allocated but hold undefined contents, `InFlight`
//! buffers are the target of a running kernel and `Ready` buffers hold data
//! the host may read. Every transition consumes the buffer, so a buffer
//! cannot be read back before the kernel writing it has finished.

use bytemuck::Pod;
use opencl3::{
    command_queue::CommandQueue,
    context::Context,
    event::Event,
    memory::{Buffer, CL_MEM_READ_WRITE},
    types::CL_BLOCKING,
};
use std::{marker::PhantomData, ptr};

#[cfg(feature = "metrics")]
use crate::metrics::{record, track_alloc, track_free};
#[cfg(feature = "metrics")]
use std::time::Instant;

use crate::ClError;

// ─── Typ‑State‑Marker ────────────────────────────────────────────────
mod sealed {
    pub trait Sealed {}
}

pub trait State: sealed::Sealed {}

pub struct Queued;
impl sealed::Sealed for Queued {}
impl State for Queued {}

pub struct InFlight;
impl sealed::Sealed for InFlight {}
impl State for InFlight {}

pub struct Ready;
impl sealed::Sealed for Ready {}
impl State for Ready {}

// ─── GPU‑Buffer ──────────────────────────────────────────────────────

pub struct GpuBuffer<T, S> {
    inner: GpuBufferInner<T>,
    _state: PhantomData<S>,
}

struct GpuBufferInner<T> {
    buf: Buffer<T>,
    len: usize,
}

#[cfg(feature = "metrics")]
impl<T> Drop for GpuBufferInner<T> {
    fn drop(&mut self) {
        track_free(self.len * std::mem::size_of::<T>());
    }
}

impl<T, S> std::fmt::Debug for GpuBuffer<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuBuffer")
            .field("len", &self.inner.len)
            .field("elem", &std::any::type_name::<T>())
            .field("state", &std::any::type_name::<S>())
            .finish()
    }
}

impl<T, S: State> GpuBuffer<T, S> {
    #[inline(always)]
    fn into_state<N: State>(self) -> GpuBuffer<T, N> {
        GpuBuffer { inner: self.inner, _state: PhantomData }
    }

    fn check_len(&self, host_len: usize) -> Result<(), ClError> {
        if host_len != self.inner.len {
            return Err(ClError::SizeMismatch { expected: self.inner.len, actual: host_len });
        }
        Ok(())
    }

    /// Raw OpenCL buffer, e.g. for `Kernel::set_arg`.
    #[inline(always)]
    pub fn raw(&self) -> &Buffer<T> {
        &self.inner.buf
    }

    /// Length in elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inner.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Size in bytes.
    #[inline(always)]
    pub fn byte_len(&self) -> usize {
        self.inner.len * std::mem::size_of::<T>()
    }
}

// ── Queued ───────────────────────────────────────────────────────────
impl<T: Pod> GpuBuffer<T, Queued> {
    /// Allocates `len` elements on the device. Contents are undefined.
    pub fn new(ctx: &Context, len: usize) -> Result<Self, ClError> {
        if len == 0 {
            return Err(ClError::InvalidSize(len));
        }

        #[cfg(feature = "metrics")]
        let t = Instant::now();

        let buf = Buffer::<T>::create(ctx, CL_MEM_READ_WRITE, len, ptr::null_mut())?;

        #[cfg(feature = "metrics")]
        {
            record("GpuBuffer::new", t);
            track_alloc(len * std::mem::size_of::<T>());
        }

        log::debug!("allocated {} x {} on device", len, std::any::type_name::<T>());
        Ok(Self { inner: GpuBufferInner { buf, len }, _state: PhantomData })
    }

    /// Allocates a buffer sized to `data` and uploads it.
    pub fn from_slice(ctx: &Context, queue: &CommandQueue, data: &[T])
        -> Result<GpuBuffer<T, Ready>, ClError> {
        Self::new(ctx, data.len())?.upload(queue, data)
    }

    /// Blocking host → device copy of the whole buffer.
    pub fn upload(mut self, queue: &CommandQueue, host: &[T])
        -> Result<GpuBuffer<T, Ready>, ClError> {
        self.check_len(host.len())?;

        #[cfg(feature = "metrics")]
        let t = Instant::now();

        queue.enqueue_write_buffer(&mut self.inner.buf, CL_BLOCKING, 0, host, &[])?;

        #[cfg(feature = "metrics")]
        record("upload", t);

        Ok(self.into_state())
    }

    /// Hands the buffer to a kernel as output.
    #[inline(always)]
    pub fn launch(self) -> GpuBuffer<T, InFlight> {
        self.into_state()
    }
}

// ── InFlight ─────────────────────────────────────────────────────────
impl<T: Pod> GpuBuffer<T, InFlight> {
    /// Waits for the kernel writing this buffer.
    pub fn complete(self, guard: GpuEventGuard) -> Result<GpuBuffer<T, Ready>, ClError> {
        #[cfg(feature = "metrics")]
        let t = Instant::now();

        guard.wait()?;

        #[cfg(feature = "metrics")]
        record("complete", t);

        Ok(self.into_state())
    }
}

// ── Ready ────────────────────────────────────────────────────────────
impl<T: Pod> GpuBuffer<T, Ready> {
    /// Blocking device → host copy into `host_out`.
    pub fn read_into(&self, queue: &CommandQueue, host_out: &mut [T]) -> Result<(), ClError> {
        self.check_len(host_out.len())?;

        #[cfg(feature = "metrics")]
        let t = Instant::now();

        queue.enqueue_read_buffer(&self.inner.buf, CL_BLOCKING, 0, host_out, &[])?;

        #[cfg(feature = "metrics")]
        record("download", t);

        Ok(())
    }

    pub fn download(&self, queue: &CommandQueue) -> Result<Vec<T>, ClError> {
        let mut out = vec![T::zeroed(); self.inner.len];
        self.read_into(queue, &mut out)?;
        Ok(out)
    }

    /// Hands the buffer to a kernel as output again.
    #[inline(always)]
    pub fn launch(self) -> GpuBuffer<T, InFlight> {
        self.into_state()
    }
}

// ── Guard (wartet bei Drop auf Event) ────────────────────────────────
pub struct GpuEventGuard {
    evt: Option<Event>,
}

impl GpuEventGuard {
    pub(crate) fn new(evt: Event) -> Self {
        Self { evt: Some(evt) }
    }

    /// Explicit wait; errors are reported instead of swallowed by `Drop`.
    pub fn wait(mut self) -> Result<(), ClError> {
        match self.evt.take() {
            Some(evt) => evt.wait().map_err(ClError::from),
            None => Ok(()),
        }
    }
}

impl Drop for GpuEventGuard {
    fn drop(&mut self) {
        if let Some(evt) = self.evt.take() {
            if let Err(e) = evt.wait() {
                log::warn!("waiting on dropped kernel event failed: {e}");
            }
        }
    }
}
