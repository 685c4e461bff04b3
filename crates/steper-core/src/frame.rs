//! Per-frame callback scheduling
//!
//! Controllers never loop on their own. They request a frame, remember the
//! handle, and the host hands due handles back through `on_frame`. A handle
//! that does not match the controller's pending one is ignored, which makes
//! cancellation idempotent.

use std::collections::VecDeque;

/// Cancellable token for one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Display-synchronised callback scheduler provided by the host
pub trait FrameScheduler {
    /// Ask for one callback on the next frame
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request; unknown or already-run handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// FIFO frame scheduler for hosts without a native one
///
/// Requests made while a frame is being dispatched land in the next frame,
/// as with a browser's animation frame queue.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every handle due for the frame about to run
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        self.pending.drain(..).collect()
    }

    /// Whether no frame is requested
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}
