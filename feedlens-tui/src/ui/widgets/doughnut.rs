//! Doughnut chart rendered straight into the buffer.
//!
//! - Title on the first row, legend on the first or last row
//! - Ring cells painted by angle, clockwise from 12 o'clock
//! - Terminal cells are about twice as tall as wide; columns are halved
//!   before measuring distance so the ring comes out round
//! - Slice labels sit halfway through the ring once the sweep completes

use std::f64::consts::TAU;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use feedlens_core::chart::spec::{BorderColor, ChartData, DoughnutOptions, LegendPosition};
use feedlens_core::chart::Rgb;

use crate::theme;

const RING: &str = "█";
const CELL_ASPECT: f64 = 2.0;

pub struct Doughnut<'a> {
    data: &'a ChartData,
    options: &'a DoughnutOptions,
    /// Sweep progress in `[0, 1]`.
    progress: f64,
}

impl<'a> Doughnut<'a> {
    pub fn new(data: &'a ChartData, options: &'a DoughnutOptions, progress: f64) -> Self {
        Self {
            data,
            options,
            progress: progress.clamp(0.0, 1.0),
        }
    }

    /// Area left for the ring after title and legend rows.
    pub fn plot_rect(&self, area: Rect) -> Rect {
        let mut plot = area;
        if self.options.title.is_some() && plot.height > 0 {
            plot.y += 1;
            plot.height -= 1;
        }
        match self.options.legend {
            LegendPosition::Top if plot.height > 0 => {
                plot.y += 1;
                plot.height -= 1;
            }
            LegendPosition::Bottom if plot.height > 0 => plot.height -= 1,
            _ => {}
        }
        plot
    }

    fn values(&self) -> &[f64] {
        self.data
            .datasets
            .first()
            .map(|d| d.values.as_slice())
            .unwrap_or(&[])
    }

    /// Slice index for a clockwise fraction of the full turn.
    fn slice_at(&self, fraction: f64, total: f64) -> Option<usize> {
        let mut start = 0.0;
        for (i, v) in self.values().iter().enumerate() {
            let end = start + v.max(0.0) / total;
            if fraction >= start && fraction < end {
                return Some(i);
            }
            start = end;
        }
        None
    }

    fn slice_color(&self, index: usize, t: f32) -> Rgb {
        self.data
            .datasets
            .first()
            .and_then(|d| d.fill.gradient_for(index))
            .map(|g| g.color_at(t))
            .unwrap_or(Rgb::WHITE)
    }

    fn border_color(&self, index: usize, t: f32) -> Rgb {
        match self.data.datasets.first().map(|d| &d.border.color) {
            Some(BorderColor::PerPoint(colors)) if !colors.is_empty() => {
                colors[index % colors.len()]
            }
            Some(BorderColor::Series(color)) => *color,
            _ => self.slice_color(index, t),
        }
    }

    fn render_ring(&self, plot: Rect, buf: &mut Buffer) {
        let total: f64 = self.values().iter().map(|v| v.max(0.0)).sum();
        if total <= 0.0 || plot.width == 0 || plot.height == 0 {
            return;
        }

        let cx = plot.x as f64 + plot.width as f64 / 2.0;
        let cy = plot.y as f64 + plot.height as f64 / 2.0;
        let outer = (plot.width as f64 / CELL_ASPECT).min(plot.height as f64) / 2.0;
        let inner = outer * self.options.cutout_pct.min(95) as f64 / 100.0;
        let border_width = self
            .data
            .datasets
            .first()
            .map(|d| d.border.width)
            .unwrap_or(0);

        for y in plot.top()..plot.bottom() {
            let t = (y - plot.y) as f32 / plot.height.max(1) as f32;
            for x in plot.left()..plot.right() {
                let dx = (x as f64 + 0.5 - cx) / CELL_ASPECT;
                let dy = y as f64 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < inner || dist > outer {
                    continue;
                }
                let fraction = dx.atan2(-dy).rem_euclid(TAU) / TAU;
                if fraction > self.progress {
                    continue;
                }
                let Some(index) = self.slice_at(fraction, total) else {
                    continue;
                };
                let on_edge = border_width > 0 && outer - dist < 0.5;
                let rgb = if on_edge {
                    self.border_color(index, t)
                } else {
                    self.slice_color(index, t)
                };
                buf.set_string(x, y, RING, Style::default().fg(theme::color(rgb)));
            }
        }

        if self.progress >= 1.0 {
            self.render_slice_labels(plot, total, (inner + outer) / 2.0, buf);
        }
    }

    fn render_slice_labels(&self, plot: Rect, total: f64, radius: f64, buf: &mut Buffer) {
        let cx = plot.x as f64 + plot.width as f64 / 2.0;
        let cy = plot.y as f64 + plot.height as f64 / 2.0;
        let style = Style::default()
            .fg(theme::color(Rgb::WHITE))
            .add_modifier(Modifier::BOLD);

        let mut start = 0.0;
        for v in self.values() {
            let share = v.max(0.0) / total;
            if share > 0.0 {
                let mid = (start + share / 2.0) * TAU;
                let label = self.options.value_labels.format(*v);
                let width = Line::raw(label.as_str()).width() as f64;
                let x = cx + mid.sin() * radius * CELL_ASPECT - width / 2.0;
                let y = cy - mid.cos() * radius;
                if x >= plot.x as f64 && y >= plot.y as f64 {
                    let (col, row) = (x.floor() as u16, y.floor() as u16);
                    if row < plot.bottom() && col < plot.right() {
                        let max = (plot.right() - col) as usize;
                        buf.set_stringn(col, row, &label, max, style);
                    }
                }
            }
            start += share;
        }
    }

    fn legend_line(&self) -> Line<'a> {
        let mut spans = Vec::new();
        for (i, label) in self.data.labels.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let swatch = Style::default().fg(theme::color(self.slice_color(i, 0.0)));
            spans.push(Span::styled("■ ", swatch));
            spans.push(Span::styled(label.clone(), theme::text()));
        }
        Line::from(spans).centered()
    }
}

impl Widget for Doughnut<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut row = area.y;
        if let Some(title) = &self.options.title {
            Line::styled(title.as_str(), theme::text().add_modifier(Modifier::BOLD))
                .centered()
                .render(Rect::new(area.x, row, area.width, 1), buf);
            row += 1;
        }

        let legend_row = match self.options.legend {
            LegendPosition::Top => Some(row),
            LegendPosition::Bottom => Some(area.bottom().saturating_sub(1)),
            LegendPosition::Hidden => None,
        };
        if let Some(y) = legend_row.filter(|y| *y < area.bottom()) {
            self.legend_line().render(Rect::new(area.x, y, area.width, 1), buf);
        }

        let plot = self.plot_rect(area);
        self.render_ring(plot, buf);
    }
}
