//! `DrawContext` over a ratatui `Buffer`.
//!
//! Coordinates are cell units: `x` is a column, `y` a row. Text never leaves
//! the clip rect.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;

use feedlens_core::chart::overlay::{DrawState, Font, TextAlign, TextBaseline};
use feedlens_core::chart::{DrawContext, PlotArea, Rgb};

use crate::theme;

pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    clip: Rect,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl<'a> BufferCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, clip: Rect) -> Self {
        Self {
            buf,
            clip,
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    /// Unbalanced `save` calls still on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    fn style(&self) -> Style {
        let style = Style::default().fg(theme::color(self.state.fill));
        if self.state.font.is_bold() {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

/// Plot area of a cell rect.
pub fn plot_area(rect: Rect) -> PlotArea {
    PlotArea::new(
        rect.x as f64,
        rect.y as f64,
        rect.right() as f64,
        rect.bottom() as f64,
    )
}

impl DrawContext for BufferCanvas<'_> {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_fill(&mut self, color: Rgb) {
        self.state.fill = color;
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let width = Line::raw(text).width() as f64;
        let left = match self.state.align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        let row = match self.state.baseline {
            TextBaseline::Top | TextBaseline::Middle => y.floor(),
            TextBaseline::Bottom => y.ceil() - 1.0,
        };

        if row < self.clip.y as f64 || row >= self.clip.bottom() as f64 {
            return;
        }

        // Columns left of the clip are cut from the head of the text.
        let mut col = left.floor();
        let mut text = text;
        let hidden = self.clip.x as f64 - col;
        if hidden > 0.0 {
            let cut = text
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(text.len()))
                .find(|&i| Line::raw(&text[..i]).width() as f64 >= hidden)
                .unwrap_or(text.len());
            col += Line::raw(&text[..cut]).width() as f64;
            text = &text[cut..];
        }
        if text.is_empty() || col >= self.clip.right() as f64 {
            return;
        }

        let col = col as u16;
        let max_width = (self.clip.right() - col) as usize;
        let style = self.style();
        self.buf.set_stringn(col, row as u16, text, max_width, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedlens_core::chart::{DrawHook, OverlayTextRenderer};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn centered_caption_lands_mid_area() {
        let area = Rect::new(0, 0, 11, 5);
        let mut buf = Buffer::empty(area);
        let mut canvas = BufferCanvas::new(&mut buf, area);
        OverlayTextRenderer::default().before_draw(&mut canvas, plot_area(area), Some("42"));
        assert_eq!(canvas.depth(), 0);

        assert_eq!(row_text(&buf, 2), "    42     ");
        let cell = buf.cell((4, 2)).unwrap();
        assert_eq!(cell.fg, ratatui::style::Color::Rgb(255, 255, 255));
        assert!(cell.modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn text_is_clipped() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        let mut canvas = BufferCanvas::new(&mut buf, area);
        canvas.fill_text("abcdefgh", -2.0, 0.0);
        canvas.fill_text("zz", 0.0, 3.0);
        assert_eq!(row_text(&buf, 0), "cdef");
    }

    #[test]
    fn text_left_of_the_clip_is_cut_not_shifted() {
        let area = Rect::new(2, 0, 6, 1);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        let mut canvas = BufferCanvas::new(&mut buf, area);
        canvas.fill_text("abc", 1.0, 0.0);
        assert_eq!(row_text(&buf, 0), "  bc      ");
    }

    #[test]
    fn wide_caption_stays_centered() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        let mut canvas = BufferCanvas::new(&mut buf, area);
        OverlayTextRenderer::default().before_draw(&mut canvas, plot_area(area), Some("123456"));
        assert_eq!(row_text(&buf, 0), "2345");
    }

    #[test]
    fn restore_on_empty_stack_is_a_no_op() {
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        let mut canvas = BufferCanvas::new(&mut buf, area);
        canvas.set_fill(Rgb::WHITE);
        canvas.restore();
        assert_eq!(canvas.state().fill, Rgb::WHITE);
    }
}
