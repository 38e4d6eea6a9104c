//! Debounced rep counting
//!
//! `RepCounter` enforces the minimum time between increments so a noisy
//! frame around a threshold cannot count the same rep twice.
//! `RepCycle` and `ThresholdCycle` pair it with a two-phase hysteresis: the
//! movement has to reach the contracted position, then the relaxed one, and
//! only the completing crossing counts.

use tracing::debug;

/// Monotonic counter with a cooldown between increments
#[derive(Clone, Debug, PartialEq)]
pub struct RepCounter {
    count: u32,
    /// Minimum time between increments
    cooldown_ms: f64,
    /// Timestamp of the last accepted increment
    last_count_ms: Option<f64>,
}

impl RepCounter {
    pub const fn new(cooldown_ms: f64) -> Self {
        Self {
            count: 0,
            cooldown_ms,
            last_count_ms: None,
        }
    }

    /// Count one rep unless the previous one was less than `cooldown_ms` ago
    pub fn try_increment(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_count_ms {
            if now_ms - last < self.cooldown_ms {
                debug!(cooldown_ms = self.cooldown_ms, "rep suppressed by cooldown");
                return false;
            }
        }
        self.count = self.count.saturating_add(1);
        self.last_count_ms = Some(now_ms);
        true
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn cooldown_ms(&self) -> f64 {
        self.cooldown_ms
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.last_count_ms = None;
    }
}

/// One side of a hysteresis band
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Threshold {
    /// value <= limit
    AtMost(f32),
    /// value < limit
    Below(f32),
    /// value >= limit
    AtLeast(f32),
    /// value > limit
    Above(f32),
}

impl Threshold {
    /// NaN never crosses
    pub fn crossed(self, value: f32) -> bool {
        match self {
            Threshold::AtMost(limit) => value <= limit,
            Threshold::Below(limit) => value < limit,
            Threshold::AtLeast(limit) => value >= limit,
            Threshold::Above(limit) => value > limit,
        }
    }
}

/// Position within a two-phase movement cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclePhase {
    /// Start/finish position (standing, arms extended, heels down)
    Relaxed,
    /// Working position (bottom of the squat, chest at the floor)
    Contracted,
}

/// What a single update did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleEvent {
    /// No transition
    Hold,
    /// Relaxed → Contracted
    Contracted,
    /// Contracted → Relaxed; `counted` is false when the cooldown swallowed it
    Completed { counted: bool },
}

/// Two-phase cycle with a debounced completion count
///
/// Driven by precomputed crossing decisions, for movements whose phase
/// conditions combine several signals.
#[derive(Clone, Debug, PartialEq)]
pub struct RepCycle {
    phase: CyclePhase,
    counter: RepCounter,
}

impl RepCycle {
    pub const fn new(cooldown_ms: f64) -> Self {
        Self {
            phase: CyclePhase::Relaxed,
            counter: RepCounter::new(cooldown_ms),
        }
    }

    /// Enter `Contracted` on `contract_hit`, complete on `relax_hit`
    ///
    /// Each flag only matters in the phase it leaves.
    pub fn step(&mut self, contract_hit: bool, relax_hit: bool, now_ms: f64) -> CycleEvent {
        match self.phase {
            CyclePhase::Relaxed if contract_hit => {
                self.phase = CyclePhase::Contracted;
                CycleEvent::Contracted
            }
            CyclePhase::Contracted if relax_hit => {
                self.phase = CyclePhase::Relaxed;
                let counted = self.counter.try_increment(now_ms);
                if counted {
                    debug!(count = self.counter.count(), "rep completed");
                }
                CycleEvent::Completed { counted }
            }
            _ => CycleEvent::Hold,
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn count(&self) -> u32 {
        self.counter.count()
    }

    pub fn reset(&mut self) {
        self.phase = CyclePhase::Relaxed;
        self.counter.reset();
    }
}

/// Debounced threshold crossing shared by the single-metric analyzers
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdCycle {
    contract: Threshold,
    relax: Threshold,
    cycle: RepCycle,
}

impl ThresholdCycle {
    pub const fn new(contract: Threshold, relax: Threshold, cooldown_ms: f64) -> Self {
        Self {
            contract,
            relax,
            cycle: RepCycle::new(cooldown_ms),
        }
    }

    /// Feed one metric sample
    ///
    /// A transition fires only when the metric crosses the threshold that
    /// leaves the current phase; values in the dead zone hold the phase.
    pub fn update(&mut self, metric: f32, now_ms: f64) -> CycleEvent {
        self.cycle
            .step(self.contract.crossed(metric), self.relax.crossed(metric), now_ms)
    }

    /// Like `update`, with extra conditions each crossing must also satisfy
    pub fn update_guarded(&mut self, metric: f32, contract_ok: bool, relax_ok: bool, now_ms: f64) -> CycleEvent {
        self.cycle.step(
            contract_ok && self.contract.crossed(metric),
            relax_ok && self.relax.crossed(metric),
            now_ms,
        )
    }

    pub fn phase(&self) -> CyclePhase {
        self.cycle.phase()
    }

    pub fn count(&self) -> u32 {
        self.cycle.count()
    }

    pub fn reset(&mut self) {
        self.cycle.reset();
    }
}
