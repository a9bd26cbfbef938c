//! Chart-instance registry: at most one live handle per slot.
//!
//! `render` is the only way charts are created or destroyed. A slot's previous
//! handle is released (consumed) before its replacement is created, so no
//! stale handle stays reachable or keeps drawing after a new analysis.

use std::rc::Rc;

use super::overlay::{HookSet, OverlayTextRenderer};
use super::spec::ChartSpec;
use super::{ChartSlot, RenderError};

/// A live, resource-holding chart.
pub trait ChartHandle {
    /// Stop any animation and free backing buffers. Consumes the handle.
    fn release(self);

    /// Advance one animation frame. Returns whether the chart changed.
    fn tick(&mut self) -> bool {
        false
    }
}

/// The drawing library the registry drives.
pub trait ChartEngine {
    type Handle: ChartHandle;

    /// Build a new handle for `spec`. `hooks` are the pre-draw hooks the
    /// handle must run on every draw pass.
    fn create(
        &mut self,
        slot: ChartSlot,
        spec: ChartSpec,
        hooks: &HookSet,
    ) -> Result<Self::Handle, RenderError>;
}

/// Lifetime counters, mostly for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub created: u64,
    pub released: u64,
}

impl RegistryStats {
    pub fn outstanding(&self) -> u64 {
        self.created - self.released
    }
}

/// Owns the engine and the live handle of each slot.
pub struct ChartInstanceRegistry<E: ChartEngine> {
    engine: E,
    hooks: HookSet,
    slots: [Option<E::Handle>; 3],
    initialized: bool,
    stats: RegistryStats,
}

impl<E: ChartEngine> ChartInstanceRegistry<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            hooks: HookSet::new(),
            slots: std::array::from_fn(|_| None),
            initialized: false,
            stats: RegistryStats::default(),
        }
    }

    /// Register the built-in draw hooks. Repeated calls are no-ops.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.hooks.register(Rc::new(OverlayTextRenderer::default()));
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Release the slot's current chart, if any, then create one from `spec`.
    ///
    /// If the engine fails, the slot is left empty and the error returned.
    pub fn render(&mut self, slot: ChartSlot, spec: ChartSpec) -> Result<(), RenderError> {
        self.release_slot(slot);

        let kind = spec.kind();
        let handle = self.engine.create(slot, spec, &self.hooks)?;
        self.stats.created += 1;
        self.slots[slot.index()] = Some(handle);
        tracing::debug!(slot = slot.id(), kind = kind.label(), "chart created");
        Ok(())
    }

    fn release_slot(&mut self, slot: ChartSlot) {
        if let Some(previous) = self.slots[slot.index()].take() {
            previous.release();
            self.stats.released += 1;
            tracing::debug!(slot = slot.id(), "chart released");
        }
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&E::Handle> {
        self.slots[slot.index()].as_ref()
    }

    pub fn get_mut(&mut self, slot: ChartSlot) -> Option<&mut E::Handle> {
        self.slots[slot.index()].as_mut()
    }

    /// Live handles, in slot order.
    pub fn handles_mut(&mut self) -> impl Iterator<Item = (ChartSlot, &mut E::Handle)> {
        ChartSlot::ALL
            .into_iter()
            .zip(self.slots.iter_mut())
            .filter_map(|(slot, handle)| handle.as_mut().map(|h| (slot, h)))
    }

    /// Advance every live chart's animation. True while any is still moving.
    pub fn tick_all(&mut self) -> bool {
        let mut changed = false;
        for (_, handle) in self.handles_mut() {
            changed |= handle.tick();
        }
        changed
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    pub fn hooks(&self) -> &HookSet {
        &self.hooks
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Release every live chart.
    pub fn clear(&mut self) {
        for slot in ChartSlot::ALL {
            self.release_slot(slot);
        }
    }
}

impl<E: ChartEngine> Drop for ChartInstanceRegistry<E> {
    fn drop(&mut self) {
        self.clear();
    }
}
