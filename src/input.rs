//! Host-assembled input snapshot and window control surface
//!
//! The host polls its window system, captures events into a side buffer, and
//! swaps a finished snapshot in once per frame; the snapshot is immutable for
//! the duration of a step. That double-buffering handoff is the host's
//! contract - nothing here locks.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    W,
    A,
    S,
    D,
    /// Debug overlay toggle
    X,
    /// Flycam toggle
    Z,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Space,
}

impl Key {
    pub const COUNT: usize = 13;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// One frame's input, immutable during the step
#[derive(Debug, Clone)]
pub struct Input {
    /// Viewport size in pixels
    pub width: u32,
    pub height: u32,
    /// Elapsed host time in seconds
    pub time: f32,
    /// Absolute mouse position in pixels
    pub xpos: f32,
    pub ypos: f32,
    /// Mouse motion since the previous frame
    pub xinc: f32,
    pub yinc: f32,
    /// Mouse buttons (left, right, middle)
    pub buttons: [bool; 3],
    keys: [bool; Key::COUNT],
}

impl Default for Input {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            time: 0.0,
            xpos: 0.0,
            ypos: 0.0,
            xinc: 0.0,
            yinc: 0.0,
            buttons: [false; 3],
            keys: [false; Key::COUNT],
        }
    }
}

impl Input {
    /// Whether `key` is held this frame
    #[inline]
    pub fn key(&self, key: Key) -> bool {
        self.keys[key.index()]
    }

    /// Record a key state (host side)
    pub fn set_key(&mut self, key: Key, down: bool) {
        self.keys[key.index()] = down;
    }

    /// Clear per-frame motion deltas (host side, after the swap)
    pub fn clear_deltas(&mut self) {
        self.xinc = 0.0;
        self.yinc = 0.0;
    }

    /// Mouse position mapped to [-1, 1] on both axes, +Y up
    pub fn cursor_ndc(&self) -> (f32, f32) {
        let x = self.xpos / self.width.max(1) as f32 * 2.0 - 1.0;
        let y = self.ypos / self.height.max(1) as f32 * 2.0 - 1.0;
        (x, -y)
    }
}

/// One-way signals the core issues to the windowing host
pub trait WindowIo {
    /// Ask the host to shut the application down
    fn request_close(&mut self);
    /// Show or hide the mouse cursor
    fn set_cursor_visible(&mut self, visible: bool);
}

/// Window surface that records signals instead of forwarding them.
///
/// Used by the demo binary and by tests; a real host wires these calls into
/// its window system.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    pub close_requested: bool,
    pub cursor_visible: bool,
}

impl WindowIo for HeadlessWindow {
    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        let mut input = Input::default();
        assert!(!input.key(Key::Enter));
        input.set_key(Key::Enter, true);
        assert!(input.key(Key::Enter));
        input.set_key(Key::Enter, false);
        assert!(!input.key(Key::Enter));
    }

    #[test]
    fn test_cursor_ndc() {
        let mut input = Input {
            width: 200,
            height: 100,
            ..Default::default()
        };
        input.xpos = 100.0;
        input.ypos = 50.0;
        let (x, y) = input.cursor_ndc();
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);

        input.ypos = 0.0;
        let (_, top) = input.cursor_ndc();
        assert!((top - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_headless_window_records() {
        let mut win = HeadlessWindow::default();
        win.set_cursor_visible(true);
        assert!(win.cursor_visible);
        win.request_close();
        assert!(win.close_requested);
    }
}
