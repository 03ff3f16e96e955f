//! Mode arbiter context — state carried across frames.

/// Laneless mode selection policy (`LanelessMode` parameter-store value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanelessMode {
    /// Always track the lane-line path.
    AlwaysLane,
    /// Always track the raw model path.
    AlwaysLaneless,
    /// Choose automatically by lane-line confidence with hysteresis.
    Auto,
}

impl LanelessMode {
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => LanelessMode::AlwaysLane,
            1 => LanelessMode::AlwaysLaneless,
            _ => LanelessMode::Auto,
        }
    }
}

/// State the arbiter owns across frames (spec.md §3 "Arbiter context").
#[derive(Debug, Clone, Copy)]
pub struct ArbiterContext {
    pub laneless_mode: LanelessMode,
    /// Refreshed from the parameter store at ~1 Hz by the caller.
    pub use_lanelines: bool,
    /// Whether the laneless path was selected this frame (published as `lanelessMode`).
    pub laneless_status: bool,
    /// Hysteresis latch for `laneless_mode == Auto`.
    pub buffer: bool,
    /// Whether the stopping-laneless kick-in is currently active.
    pub at_stopping: bool,
    /// Ticks remaining before the stopping-laneless debounce expires.
    pub stopping_ticks: u32,
}

impl Default for ArbiterContext {
    fn default() -> Self {
        Self {
            laneless_mode: LanelessMode::AlwaysLane,
            use_lanelines: true,
            laneless_status: false,
            buffer: false,
            at_stopping: false,
            stopping_ticks: 0,
        }
    }
}
