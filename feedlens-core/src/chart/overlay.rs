//! Pre-draw hooks and the center-caption overlay.
//!
//! Engines call every registered [`DrawHook`] once per draw pass, before
//! drawing the chart itself, passing the plot-area geometry and the caption
//! configured for that chart. Hooks draw through the [`DrawContext`]
//! capability and must leave its state as they found it.

use std::rc::Rc;

use super::color::Rgb;

/// Plotting-area bounding box in engine coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Geometric center `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        ((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// Font request. Engines that cannot scale text map weight to emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub weight: u16,
    pub size_px: u16,
    pub family: String,
}

impl Font {
    pub fn new(weight: u16, size_px: u16, family: impl Into<String>) -> Self {
        Self {
            weight,
            size_px,
            family: family.into(),
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new(400, 12, "sans-serif")
    }
}

/// Mutable drawing state a hook may change between `save` and `restore`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub fill: Rgb,
    pub font: Font,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Rgb(0, 0, 0),
            font: Font::default(),
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
        }
    }
}

/// Drawing surface handed to hooks.
pub trait DrawContext {
    /// Push the current state.
    fn save(&mut self);
    /// Pop back to the last saved state. No-op on an empty stack.
    fn restore(&mut self);
    fn set_fill(&mut self, color: Rgb);
    fn set_font(&mut self, font: Font);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    /// Draw `text` anchored at `(x, y)` per the current align/baseline.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// Capability invoked by an engine before each draw pass.
pub trait DrawHook {
    /// Stable identifier; registration is keyed on it.
    fn id(&self) -> &'static str;

    fn before_draw(&self, ctx: &mut dyn DrawContext, area: PlotArea, caption: Option<&str>);
}

/// Draws the configured caption at the center of the plot area.
#[derive(Debug, Clone)]
pub struct OverlayTextRenderer {
    pub color: Rgb,
    pub font: Font,
}

impl OverlayTextRenderer {
    pub const ID: &'static str = "center_text";
}

impl Default for OverlayTextRenderer {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            font: Font::new(600, 20, "Inter, Arial, sans-serif"),
        }
    }
}

impl DrawHook for OverlayTextRenderer {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn before_draw(&self, ctx: &mut dyn DrawContext, area: PlotArea, caption: Option<&str>) {
        let Some(text) = caption.filter(|t| !t.is_empty()) else {
            return;
        };
        let (x, y) = area.center();
        ctx.save();
        ctx.set_fill(self.color);
        ctx.set_font(self.font.clone());
        ctx.set_text_align(TextAlign::Center);
        ctx.set_text_baseline(TextBaseline::Middle);
        ctx.fill_text(text, x, y);
        ctx.restore();
    }
}

/// Ordered set of hooks, unique by id.
#[derive(Clone, Default)]
pub struct HookSet {
    hooks: Vec<Rc<dyn DrawHook>>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` unless one with the same id is present.
    /// Returns whether it was added.
    pub fn register(&mut self, hook: Rc<dyn DrawHook>) -> bool {
        if self.contains(hook.id()) {
            return false;
        }
        tracing::debug!(hook = hook.id(), "registered draw hook");
        self.hooks.push(hook);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.hooks.iter().any(|h| h.id() == id)
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook, in registration order.
    pub fn before_draw(&self, ctx: &mut dyn DrawContext, area: PlotArea, caption: Option<&str>) {
        for hook in &self.hooks {
            hook.before_draw(ctx, area, caption);
        }
    }
}

impl std::fmt::Debug for HookSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|h| h.id()))
            .finish()
    }
}
