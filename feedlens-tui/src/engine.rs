//! Terminal chart engine.
//!
//! Each [`TerminalChart`] owns a backing buffer with its last rasterized
//! frame and a grow-in animation counter. The event loop advances the
//! animation with [`TerminalChart::tick`]; releasing a chart drops the buffer
//! and stops the animation. Pre-draw hooks run on every rasterization, before
//! the chart body is painted.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use feedlens_core::chart::{
    ChartEngine, ChartHandle, ChartSlot, ChartSpec, HookSet, RenderError,
};

use crate::canvas::{plot_area, BufferCanvas};
use crate::ui::widgets::{Doughnut, HorizontalBars};

pub struct TerminalEngine {
    animation_frames: u16,
    live: Rc<Cell<usize>>,
}

impl TerminalEngine {
    /// `animation_frames` ticks to grow a new chart in; 0 draws it complete.
    pub fn new(animation_frames: u16) -> Self {
        Self {
            animation_frames,
            live: Rc::new(Cell::new(0)),
        }
    }

    /// Charts created and not yet released.
    pub fn live(&self) -> usize {
        self.live.get()
    }
}

impl ChartEngine for TerminalEngine {
    type Handle = TerminalChart;

    fn create(
        &mut self,
        slot: ChartSlot,
        spec: ChartSpec,
        hooks: &HookSet,
    ) -> Result<TerminalChart, RenderError> {
        if spec.data().datasets.is_empty() {
            return Err(RenderError::EmptySpec {
                slot: slot.id(),
                kind: spec.kind().label(),
            });
        }
        self.live.set(self.live.get() + 1);
        Ok(TerminalChart {
            slot,
            spec,
            hooks: hooks.clone(),
            frame: 0,
            frames: self.animation_frames,
            backing: RefCell::new(None),
            live: self.live.clone(),
        })
    }
}

pub struct TerminalChart {
    slot: ChartSlot,
    spec: ChartSpec,
    hooks: HookSet,
    frame: u16,
    frames: u16,
    backing: RefCell<Option<Buffer>>,
    live: Rc<Cell<usize>>,
}

impl TerminalChart {
    pub fn slot(&self) -> ChartSlot {
        self.slot
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    /// Animation progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.frames == 0 {
            1.0
        } else {
            self.frame as f64 / self.frames as f64
        }
    }

    pub fn is_animating(&self) -> bool {
        self.frame < self.frames
    }

    /// Copy the chart into `buf` at `area`, rasterizing if the cached frame
    /// is missing or was drawn for a different size.
    pub fn draw(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut backing = self.backing.borrow_mut();
        if backing.as_ref().map_or(true, |b| b.area != area) {
            *backing = Some(self.rasterize(area));
        }
        let Some(frame) = backing.as_ref() else {
            return;
        };
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let (Some(src), Some(dst)) = (frame.cell((x, y)), buf.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }

    fn rasterize(&self, area: Rect) -> Buffer {
        let mut frame = Buffer::empty(area);
        let progress = self.progress();
        match &self.spec {
            ChartSpec::Doughnut { data, options } => {
                let widget = Doughnut::new(data, options, progress);
                self.run_hooks(widget.plot_rect(area), &mut frame);
                widget.render(area, &mut frame);
            }
            ChartSpec::Bar { data, options } => {
                let widget = HorizontalBars::new(data, options, progress);
                self.run_hooks(widget.plot_rect(area), &mut frame);
                widget.render(area, &mut frame);
            }
        }
        frame
    }

    fn run_hooks(&self, plot: Rect, frame: &mut Buffer) {
        let mut canvas = BufferCanvas::new(frame, plot);
        self.hooks
            .before_draw(&mut canvas, plot_area(plot), self.spec.overlay_caption());
    }

    pub fn has_backing(&self) -> bool {
        self.backing.borrow().is_some()
    }
}

impl ChartHandle for TerminalChart {
    fn release(self) {
        tracing::debug!(
            slot = self.slot.id(),
            frame = self.frame,
            cached = self.has_backing(),
            "releasing terminal chart"
        );
        self.live.set(self.live.get().saturating_sub(1));
    }

    fn tick(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }
        self.frame += 1;
        self.backing.get_mut().take();
        true
    }
}

/// Widget adapter so charts compose with ratatui layouts.
pub struct ChartView<'a> {
    chart: &'a TerminalChart,
}

impl<'a> ChartView<'a> {
    pub fn new(chart: &'a TerminalChart) -> Self {
        Self { chart }
    }
}

impl Widget for ChartView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.chart.draw(area, buf);
    }
}
