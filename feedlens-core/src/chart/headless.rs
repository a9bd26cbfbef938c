//! Engine that keeps specs without drawing them.
//!
//! Used by the CLI to emit the dashboard as JSON, and by tests that need to
//! observe what the registry holds.

use std::cell::Cell;
use std::rc::Rc;

use super::overlay::HookSet;
use super::registry::{ChartEngine, ChartHandle};
use super::spec::ChartSpec;
use super::{ChartSlot, RenderError};

/// Shared live-handle counter.
#[derive(Debug, Clone, Default)]
pub struct LiveCounter(Rc<Cell<usize>>);

impl LiveCounter {
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

#[derive(Debug, Default)]
pub struct HeadlessEngine {
    live: LiveCounter,
    created: usize,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter of handles created and not yet released.
    pub fn live(&self) -> LiveCounter {
        self.live.clone()
    }

    pub fn created(&self) -> usize {
        self.created
    }
}

#[derive(Debug)]
pub struct HeadlessChart {
    pub slot: ChartSlot,
    pub spec: ChartSpec,
    /// Ids of the hooks registered when the chart was created.
    pub hook_ids: Vec<&'static str>,
    live: LiveCounter,
}

impl ChartHandle for HeadlessChart {
    fn release(self) {
        self.live.0.set(self.live.0.get().saturating_sub(1));
    }
}

impl ChartEngine for HeadlessEngine {
    type Handle = HeadlessChart;

    fn create(
        &mut self,
        slot: ChartSlot,
        spec: ChartSpec,
        hooks: &HookSet,
    ) -> Result<HeadlessChart, RenderError> {
        if spec.data().datasets.is_empty() {
            return Err(RenderError::EmptySpec {
                slot: slot.id(),
                kind: spec.kind().label(),
            });
        }
        self.created += 1;
        self.live.0.set(self.live.0.get() + 1);
        Ok(HeadlessChart {
            slot,
            spec,
            hook_ids: hooks.ids(),
            live: self.live.clone(),
        })
    }
}
