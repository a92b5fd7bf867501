//! Bidirectional occupancy counter driven by two doorway IR beams.
//!
//! The two beams are mounted a few centimetres apart across the door
//! frame, so the order in which a person breaks them encodes direction
//! of travel:
//!
//! ```text
//!          A first, then B  =  entry  (count += 1)
//!          B first, then A  =  exit   (count -= 1)
//!
//!  IDLE ──[A broken]──▶ A_FIRST ──[B broken]──▶ BOTH ──[released]──▶ IDLE
//!  IDLE ──[B broken]──▶ B_FIRST ──[A broken]──▶ BOTH ──[released]──▶ IDLE
//! ```
//!
//! `BothTriggered` is a debounce hold-state: while the subject still
//! blocks both beams no further counting happens, which prevents a slow
//! walker from being counted twice.  A timeout guards against a beam
//! stuck "broken" after a missed paired event — any non-idle sequence
//! older than the configured window is abandoned.
//!
//! The counter is pure logic over boolean inputs; it is evaluated once
//! per control cycle by the [`AppService`](crate::app::service::AppService).

/// Phase of the two-beam crossing sequence.  Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyState {
    /// Neither beam broken, no crossing in progress.
    Idle,
    /// Beam A was broken first — a potential entry.
    AFirst,
    /// Beam B was broken first — a potential exit.
    BFirst,
    /// Both beams broken — subject occupies the doorway, count already
    /// adjusted, waiting for both beams to clear.
    BothTriggered,
}

/// The occupancy counter.  Owned by the control loop; mutated only by
/// [`update`](Self::update) once per cycle.
pub struct OccupancyCounter {
    count: u16,
    state: OccupancyState,
    /// Monotonic timestamp (ms, wrapping) of the last state change.
    last_change_ms: u32,
    /// Stuck-sequence abandon window (ms).
    timeout_ms: u32,
}

impl OccupancyCounter {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            count: 0,
            state: OccupancyState::Idle,
            last_change_ms: 0,
            timeout_ms,
        }
    }

    /// Evaluate one control cycle of beam input.
    ///
    /// `beam_a` / `beam_b` are true while the respective beam is broken.
    /// `now_ms` must come from a monotonic clock; elapsed time is
    /// computed with wrapping subtraction so the u32 rollover (~49.7
    /// days) does not produce a spurious huge elapsed value.
    ///
    /// Returns the occupant count after evaluation.
    pub fn update(&mut self, beam_a: bool, beam_b: bool, now_ms: u32) -> u16 {
        // Stuck-sequence guard: runs before the transition table so a
        // beam wedged "broken" cannot pin the machine forever.
        if self.state != OccupancyState::Idle
            && now_ms.wrapping_sub(self.last_change_ms) > self.timeout_ms
        {
            self.state = OccupancyState::Idle;
        }

        match self.state {
            OccupancyState::Idle => {
                if beam_a && !beam_b {
                    self.enter(OccupancyState::AFirst, now_ms);
                } else if beam_b && !beam_a {
                    self.enter(OccupancyState::BFirst, now_ms);
                }
                // Both broken simultaneously from idle: direction is
                // unknowable, so no transition.  Defined no-op.
            }
            OccupancyState::AFirst => {
                if beam_b {
                    self.count = self.count.saturating_add(1);
                    self.enter(OccupancyState::BothTriggered, now_ms);
                } else if !beam_a {
                    self.state = OccupancyState::Idle;
                }
            }
            OccupancyState::BFirst => {
                if beam_a {
                    // Exits past zero are sensor noise — clamp, not error.
                    self.count = self.count.saturating_sub(1);
                    self.enter(OccupancyState::BothTriggered, now_ms);
                } else if !beam_b {
                    self.state = OccupancyState::Idle;
                }
            }
            OccupancyState::BothTriggered => {
                if !beam_a && !beam_b {
                    self.state = OccupancyState::Idle;
                }
            }
        }

        self.count
    }

    /// Carry an existing count into a fresh counter (used when the
    /// timeout is reconfigured at runtime — occupants don't leave just
    /// because the config changed).
    pub fn carrying_count(mut self, count: u16) -> Self {
        self.count = count;
        self
    }

    /// Maintenance reset: count to 0, state to Idle.
    pub fn reset(&mut self) {
        self.count = 0;
        self.state = OccupancyState::Idle;
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn state(&self) -> OccupancyState {
        self.state
    }

    fn enter(&mut self, state: OccupancyState, now_ms: u32) {
        self.state = state;
        self.last_change_ms = now_ms;
    }
}
