//! Horizontal bar chart: one row per category, labels on the left axis.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Widget;

use feedlens_core::chart::spec::{BarOptions, BorderColor, ChartData, LabelAnchor, LegendPosition, ValueLabels};
use feedlens_core::chart::Rgb;

use crate::theme;

const BAR: &str = "█";
const AXIS: &str = "│";
const NO_DATA: &str = "No data";

pub struct HorizontalBars<'a> {
    data: &'a ChartData,
    options: &'a BarOptions,
    /// Grow-in progress in `[0, 1]`.
    progress: f64,
}

impl<'a> HorizontalBars<'a> {
    pub fn new(data: &'a ChartData, options: &'a BarOptions, progress: f64) -> Self {
        Self {
            data,
            options,
            progress: progress.clamp(0.0, 1.0),
        }
    }

    /// Area left for bars after the legend row.
    pub fn plot_rect(&self, area: Rect) -> Rect {
        let mut plot = area;
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

    fn fill_color(&self, index: usize, t: f32) -> Rgb {
        self.data
            .datasets
            .first()
            .and_then(|d| d.fill.gradient_for(index))
            .map(|g| g.color_at(t))
            .unwrap_or(Rgb::WHITE)
    }

    /// Color of the bar's end cell.
    fn cap_color(&self, index: usize, t: f32) -> Rgb {
        match self.data.datasets.first().map(|d| (&d.border.color, d.border.width)) {
            Some((BorderColor::Series(color), w)) if w > 0 => *color,
            Some((BorderColor::PerPoint(colors), w)) if w > 0 && !colors.is_empty() => {
                colors[index % colors.len()]
            }
            _ => self.fill_color(index, t),
        }
    }

    fn legend_text(&self) -> String {
        self.data
            .datasets
            .iter()
            .filter_map(|d| d.label.as_deref())
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn render_bars(&self, plot: Rect, buf: &mut Buffer) {
        let values = self.values();
        let count = self.data.labels.len().min(values.len());
        if count == 0 || plot.height == 0 {
            let y = plot.y + plot.height / 2;
            if plot.height > 0 {
                Line::styled(NO_DATA, theme::muted())
                    .centered()
                    .render(Rect::new(plot.x, y, plot.width, 1), buf);
            }
            return;
        }

        let step: u16 = if plot.height as usize >= count * 2 { 2 } else { 1 };
        let visible = count.min((plot.height / step).max(1) as usize);

        let labels = &self.data.labels[..visible];
        let formatted: Vec<String> = values[..visible]
            .iter()
            .map(|v| self.options.value_labels.format(*v))
            .collect();

        let label_width = labels
            .iter()
            .map(|l| Line::raw(l.as_str()).width())
            .max()
            .unwrap_or(0)
            .min(plot.width as usize / 3) as u16;
        let value_width = formatted
            .iter()
            .map(|f| f.chars().count())
            .max()
            .unwrap_or(0) as u16
            + 1;
        let bar_x = plot.x + label_width + 1;
        let bar_width = plot.width.saturating_sub(label_width + 1 + value_width);

        let max = values[..visible].iter().cloned().fold(0.0_f64, f64::max);
        let scale = if max > 0.0 { max } else { 1.0 };
        let tick_style = Style::default().fg(theme::color(self.options.tick_color));
        let label_style = Style::default().fg(theme::color(self.options.label_color));

        for (i, label) in labels.iter().enumerate() {
            let y = plot.y + i as u16 * step;

            let shown = Line::raw(label.as_str()).width().min(label_width as usize) as u16;
            buf.set_stringn(
                plot.x + label_width - shown,
                y,
                label,
                label_width as usize,
                tick_style,
            );
            buf.set_string(plot.x + label_width, y, AXIS, tick_style);

            let full = (values[i].max(0.0) / scale * bar_width as f64).round();
            let len = (full * self.progress).round() as u16;
            for col in 0..len {
                let t = col as f32 / bar_width.saturating_sub(1).max(1) as f32;
                let rgb = if col + 1 == len {
                    self.cap_color(i, t)
                } else {
                    self.fill_color(i, t)
                };
                buf.set_string(bar_x + col, y, BAR, Style::default().fg(theme::color(rgb)));
            }

            let text = &formatted[i];
            let x = match self.options.value_labels {
                ValueLabels::Rounded {
                    anchor: LabelAnchor::Center,
                } if len as usize > text.len() => bar_x + (len - text.len() as u16) / 2,
                _ => bar_x + len + 1,
            };
            if x < plot.right() {
                buf.set_stringn(x, y, text, (plot.right() - x) as usize, label_style);
            }
        }
    }
}

impl Widget for HorizontalBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let legend_row = match self.options.legend {
            LegendPosition::Top => Some(area.y),
            LegendPosition::Bottom => Some(area.bottom() - 1),
            LegendPosition::Hidden => None,
        };
        if let Some(y) = legend_row {
            Line::styled(self.legend_text(), theme::text())
                .centered()
                .render(Rect::new(area.x, y, area.width, 1), buf);
        }
        let plot = self.plot_rect(area);
        self.render_bars(plot, buf);
    }
}
