//! In-memory window source and virtual clock for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::geometry::{Point, Rect, Size};
use crate::reposition::Clock;
use crate::window::{ScreenWindow, WindowError, WindowHandle, WindowSource};

#[derive(Debug, Default)]
struct FakeWindowState {
    position: Point,
    size: Size,
    title: Option<String>,
    /// Ignores position writes entirely.
    frozen: bool,
    /// Position reads fail.
    unreadable: bool,
    /// Number of upcoming position writes to reject.
    reject_position_writes: u32,
    /// Number of upcoming size writes to reject.
    reject_size_writes: u32,
    /// Position writes that are accepted but not applied before this many writes.
    lag_writes: u32,
    /// Offset the "window manager" applies to every accepted position write.
    settle_offset: Point,
    position_writes: u32,
    size_writes: u32,
}

/// A fake controllable window. Clones share state, like handles to the same
/// underlying window.
#[derive(Debug, Clone, Default)]
pub struct FakeWindow {
    state: Rc<RefCell<FakeWindowState>>,
}

impl FakeWindow {
    pub fn new(frame: Rect, title: Option<&str>) -> Self {
        let window = Self::default();
        {
            let mut state = window.state.borrow_mut();
            state.position = frame.origin;
            state.size = frame.size;
            state.title = title.map(str::to_string);
        }
        window
    }

    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Rect::from_xywh(x, y, width, height), None)
    }

    pub fn titled(self, title: &str) -> Self {
        self.state.borrow_mut().title = Some(title.to_string());
        self
    }

    pub fn frozen(self) -> Self {
        self.state.borrow_mut().frozen = true;
        self
    }

    pub fn unreadable(self) -> Self {
        self.state.borrow_mut().unreadable = true;
        self
    }

    pub fn rejecting_position_writes(self, count: u32) -> Self {
        self.state.borrow_mut().reject_position_writes = count;
        self
    }

    pub fn rejecting_size_writes(self, count: u32) -> Self {
        self.state.borrow_mut().reject_size_writes = count;
        self
    }

    pub fn lagging(self, writes: u32) -> Self {
        self.state.borrow_mut().lag_writes = writes;
        self
    }

    pub fn settling_off_by(self, dx: f64, dy: f64) -> Self {
        self.state.borrow_mut().settle_offset = Point::new(dx, dy);
        self
    }

    pub fn current_position(&self) -> Point {
        self.state.borrow().position
    }

    pub fn current_size(&self) -> Size {
        self.state.borrow().size
    }

    pub fn position_writes(&self) -> u32 {
        self.state.borrow().position_writes
    }

    pub fn size_writes(&self) -> u32 {
        self.state.borrow().size_writes
    }

    pub fn same_window(&self, other: &FakeWindow) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl WindowHandle for FakeWindow {
    fn title(&self) -> Option<String> {
        self.state.borrow().title.clone()
    }

    fn position(&self) -> Result<Point, WindowError> {
        let state = self.state.borrow();
        if state.unreadable {
            return Err(WindowError::AttributeReadFailed {
                attribute: "position",
                message: "fake unreadable".to_string(),
            });
        }
        Ok(state.position)
    }

    fn size(&self) -> Result<Size, WindowError> {
        let state = self.state.borrow();
        if state.unreadable {
            return Err(WindowError::AttributeReadFailed {
                attribute: "size",
                message: "fake unreadable".to_string(),
            });
        }
        Ok(state.size)
    }

    fn set_position(&self, position: Point) -> Result<(), WindowError> {
        let mut state = self.state.borrow_mut();
        if state.reject_position_writes > 0 {
            state.reject_position_writes -= 1;
            return Err(WindowError::AttributeWriteFailed {
                attribute: "position",
                message: "fake rejected".to_string(),
            });
        }
        state.position_writes += 1;
        if state.frozen || state.position_writes <= state.lag_writes {
            return Ok(());
        }
        state.position = Point::new(
            position.x + state.settle_offset.x,
            position.y + state.settle_offset.y,
        );
        Ok(())
    }

    fn set_size(&self, size: Size) -> Result<(), WindowError> {
        let mut state = self.state.borrow_mut();
        if state.reject_size_writes > 0 {
            state.reject_size_writes -= 1;
            return Err(WindowError::AttributeWriteFailed {
                attribute: "size",
                message: "fake rejected".to_string(),
            });
        }
        state.size_writes += 1;
        if !state.frozen {
            state.size = size;
        }
        Ok(())
    }
}

/// In-memory [`WindowSource`].
#[derive(Debug, Default)]
pub struct FakeWindowSource {
    screen: Vec<ScreenWindow>,
    processes: HashMap<i32, Vec<FakeWindow>>,
    failing_pids: HashSet<i32>,
    screen_unavailable: bool,
    ax_calls: Cell<u32>,
}

impl FakeWindowSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_screen_window(mut self, window: ScreenWindow) -> Self {
        self.screen.push(window);
        self
    }

    pub fn with_process(mut self, pid: i32, windows: Vec<FakeWindow>) -> Self {
        self.processes.insert(pid, windows);
        self
    }

    pub fn with_failing_pid(mut self, pid: i32) -> Self {
        self.failing_pids.insert(pid);
        self
    }

    pub fn with_screen_unavailable(mut self) -> Self {
        self.screen_unavailable = true;
        self
    }

    pub fn ax_calls(&self) -> u32 {
        self.ax_calls.get()
    }
}

impl WindowSource for FakeWindowSource {
    type Handle = FakeWindow;

    fn list_on_screen_windows(&self) -> Result<Vec<ScreenWindow>, WindowError> {
        if self.screen_unavailable {
            return Err(WindowError::EnumerationFailed {
                message: "fake window list unavailable".to_string(),
            });
        }
        Ok(self.screen.clone())
    }

    fn list_controllable_windows(&self, pid: i32) -> Result<Vec<FakeWindow>, WindowError> {
        self.ax_calls.set(self.ax_calls.get() + 1);
        if self.failing_pids.contains(&pid) {
            return Err(WindowError::ControllableWindowsUnavailable {
                pid,
                message: "fake AX failure".to_string(),
            });
        }
        Ok(self.processes.get(&pid).cloned().unwrap_or_default())
    }
}

/// Virtual clock: `sleep` advances time instantly.
#[derive(Debug)]
pub struct FakeClock {
    start: Instant,
    offset: Cell<Duration>,
    sleeps: Cell<u32>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Cell::new(Duration::ZERO),
            sleeps: Cell::new(0),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }

    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.start + self.offset.get()
    }

    fn sleep(&self, duration: Duration) {
        self.offset.set(self.offset.get() + duration);
        self.sleeps.set(self.sleeps.get() + 1);
    }
}
