//! Frame scheduling supplied by the host.
//!
//! Animation is driven one tick per display frame. The renderer never loops
//! on its own: it asks a [`FrameScheduler`] to run the next tick, and the host
//! decides when frames happen (a display-sync callback, a timer, or a test
//! stepping frames by hand with [`ManualScheduler`]).

use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    fmt, mem,
};

/// Work to run on a future frame.
pub type Tick = Box<dyn FnOnce()>;

/// Handle identifying one scheduled tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

/// Host capability to run a callback on the next display frame.
pub trait FrameScheduler {
    /// Queue `tick` for the next frame and return a handle for cancelling it.
    fn request_frame(&self, tick: Tick) -> FrameId;

    /// Withdraw a queued tick. Unknown or already-run handles are ignored.
    fn cancel_frame(&self, id: FrameId);
}

/// A scheduler whose frames are advanced explicitly with [`step`].
///
/// Ticks requested while a frame is running are deferred to the following
/// frame, and a tick cancelled by an earlier tick of the same frame does not
/// run, matching how display-sync callbacks behave.
///
/// [`step`]: ManualScheduler::step
#[derive(Default)]
pub struct ManualScheduler {
    /// Source of frame handles.
    next_id: Cell<u64>,
    /// Ticks waiting for the next frame, in request order.
    queue: RefCell<Vec<(FrameId, Tick)>>,
    /// Ticks of the running frame cancelled before their turn.
    cancelled: RefCell<HashSet<FrameId>>,
    /// Frames run so far.
    frames: Cell<u64>,
}

impl ManualScheduler {
    /// An idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Whether no tick is waiting.
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Number of frames that have run ticks so far.
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }

    /// Run one frame: every tick queued before this call, in request order.
    ///
    /// Returns the number of ticks run.
    pub fn step(&self) -> usize {
        let due = mem::take(&mut *self.queue.borrow_mut());
        self.cancelled.borrow_mut().clear();
        if due.is_empty() {
            return 0;
        }
        self.frames.set(self.frames.get() + 1);
        let mut count = 0;
        for (id, tick) in due {
            if self.cancelled.borrow_mut().remove(&id) {
                continue;
            }
            tick();
            count += 1;
        }
        count
    }

    /// Step frames until nothing is queued or `max_frames` have run.
    ///
    /// Returns the number of frames run.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.step() > 0 {
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, tick: Tick) -> FrameId {
        let id = FrameId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.queue.borrow_mut().push((id, tick));
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        let mut queue = self.queue.borrow_mut();
        let before = queue.len();
        queue.retain(|(queued, _)| *queued != id);
        if queue.len() == before {
            // Possibly due later in the frame being run.
            self.cancelled.borrow_mut().insert(id);
        }
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending())
            .field("frames", &self.frames.get())
            .finish()
    }
}
