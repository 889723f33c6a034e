use std::cell::Cell;
use std::rc::Rc;

/// Run flag shared by the frame loop and the page teardown handler.
///
/// Clones share one flag. Once stopped, the loop stops rescheduling itself
/// and the guard never restarts.
#[derive(Clone, Debug)]
pub struct LoopGuard {
    running: Rc<Cell<bool>>,
}

impl Default for LoopGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopGuard {
    pub fn new() -> Self {
        Self {
            running: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Returns true only for the call that actually stopped the loop.
    pub fn stop(&self) -> bool {
        self.running.replace(false)
    }
}
