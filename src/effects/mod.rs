//! Battlefield effects: transient pools, ground marks, trampling, and the
//! per-cell scene built from them.

pub mod marks;
pub mod pool;
pub mod scene;

pub use marks::{GridMark, MarkLedger, TrampleCounter};
pub use pool::{Blip, EffectPool, Expiring, Flash, Tint};
pub use scene::{Layer, ResolvedCell, Scene};

/// Everything the interpreter writes to for one battle.
#[derive(Debug, Clone, Default)]
pub struct BattleEffects {
    pub blips: EffectPool<Blip>,
    pub flashes: EffectPool<Flash>,
    pub tints: EffectPool<Tint>,
    pub marks: MarkLedger,
    pub trample: TrampleCounter,
}

impl BattleEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops expired transient effects. Marks and trampling persist.
    pub fn sweep(&mut self, now: f64) {
        self.blips.sweep(now);
        self.flashes.sweep(now);
        self.tints.sweep(now);
    }

    /// Clears everything for a new battle.
    pub fn reset(&mut self) {
        self.blips.clear();
        self.flashes.clear();
        self.tints.clear();
        self.marks.clear();
        self.trample.clear();
    }
}
