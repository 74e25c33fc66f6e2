//! Terminal and JSON rendering of [`crate::views`] models.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::Serialize;

use crate::views::{BarChartView, GroupedBarChartView, MapView, NoticeView, TableView};

/// How views are written to the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned tables and `#` bars.
    #[default]
    Text,
    /// Pretty-printed JSON of the view model.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

/// Text layout knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Width in characters of the longest bar.
    pub bar_width: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self { bar_width: 40 }
    }
}

/// A view that can be drawn as plain text.
pub trait TextRender {
    fn render_text(&self, opts: &TextOptions) -> String;
}

/// Renders views in the configured [`OutputFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    /// Text or JSON.
    pub format: OutputFormat,
    /// Layout used for text output.
    pub text: TextOptions,
}

impl Renderer {
    /// Renderer for `format` with the given text layout.
    pub fn new(format: OutputFormat, text: TextOptions) -> Self {
        Self { format, text }
    }

    /// Render `view` as text or pretty-printed JSON.
    pub fn render<V>(&self, view: &V) -> serde_json::Result<String>
    where
        V: TextRender + Serialize,
    {
        match self.format {
            OutputFormat::Text => Ok(view.render_text(&self.text)),
            OutputFormat::Json => serde_json::to_string_pretty(view),
        }
    }
}

/// `scale` is the largest magnitude on the chart; it maps to `width` glyphs.
fn bar(value: i64, scale: u64, width: usize) -> String {
    if scale == 0 || value == 0 {
        return String::new();
    }
    let len = (u128::from(value.unsigned_abs()) * width as u128 / u128::from(scale)).max(1) as usize;
    let glyph = if value < 0 { "-" } else { "#" };
    glyph.repeat(len)
}

fn pad(s: &str, width: usize) -> String {
    let n = s.chars().count();
    if n >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - n))
    }
}

impl TextRender for TableView {
    fn render_text(&self, _opts: &TextOptions) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, &w)| pad(c, w))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", line(self.columns.as_slice()));
        let _ = writeln!(
            out,
            "{}",
            widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("-+-")
        );
        for row in &self.rows {
            let _ = writeln!(out, "{}", line(row.as_slice()));
        }
        if self.rows.len() < self.total_rows {
            let _ = writeln!(out, "... {} of {} rows shown", self.rows.len(), self.total_rows);
        }
        out
    }
}

impl TextRender for MapView {
    fn render_text(&self, _opts: &TextOptions) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.header);
        match self.center {
            Some(c) => {
                let _ = writeln!(
                    out,
                    "center: lat {:.4}, lon {:.4} (zoom {}, pitch {})",
                    c.latitude, c.longitude, self.zoom, self.pitch
                );
            }
            None => {
                let _ = writeln!(out, "no volcanoes recorded for {}", self.country);
            }
        }
        for m in &self.markers {
            let _ = writeln!(
                out,
                "  ({:>9.4}, {:>9.4})  {}",
                m.point.latitude, m.point.longitude, m.tooltip
            );
        }
        out
    }
}

impl TextRender for BarChartView {
    fn render_text(&self, opts: &TextOptions) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let label_w = self
            .bars
            .iter()
            .map(|b| b.value.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.x_label.chars().count());
        let max = self.bars.iter().map(|b| b.count).max().unwrap_or(0) as u64;

        let _ = writeln!(out, "{}  {}", pad(&self.x_label, label_w), self.y_label);
        for b in &self.bars {
            let _ = writeln!(
                out,
                "{}  {} {}",
                pad(&b.value, label_w),
                bar(i64::try_from(b.count).unwrap_or(i64::MAX), max, opts.bar_width),
                b.count
            );
        }
        out
    }
}

impl TextRender for GroupedBarChartView {
    fn render_text(&self, opts: &TextOptions) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        if self.groups.is_empty() {
            let _ = writeln!(out, "no eligible countries selected");
            return out;
        }

        let series_w = self.series.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        let scale = self
            .groups
            .iter()
            .flat_map(|g| [g.mean_m, g.max_m, g.min_m])
            .map(i64::unsigned_abs)
            .max()
            .unwrap_or(0);

        for g in &self.groups {
            let _ = writeln!(out, "{}", g.country);
            for (name, value) in self.series.iter().zip([g.mean_m, g.max_m, g.min_m]) {
                let _ = writeln!(
                    out,
                    "  {}  {} {}",
                    pad(name, series_w),
                    bar(value, scale, opts.bar_width),
                    value
                );
            }
        }
        out
    }
}

impl TextRender for NoticeView {
    fn render_text(&self, _opts: &TextOptions) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.guidance);
        if !self.choices.is_empty() {
            let _ = writeln!(out, "choose from: {}", self.choices.join(", "));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{ElevationSummary, RankedValue};
    use crate::types::CategoricalField;

    fn ranked(pairs: &[(&str, usize)]) -> Vec<RankedValue> {
        pairs
            .iter()
            .map(|&(v, c)| RankedValue {
                value: v.to_string(),
                count: c,
            })
            .collect()
    }

    #[test]
    fn bar_scales_to_width_and_keeps_small_values_visible() {
        assert_eq!(bar(10, 10, 4), "####");
        assert_eq!(bar(5, 10, 4), "##");
        assert_eq!(bar(1, 1000, 4), "#");
        assert_eq!(bar(-10, 10, 2), "--");
        assert_eq!(bar(0, 10, 4), "");
    }

    #[test]
    fn grouped_chart_scales_extreme_elevations() {
        let view = GroupedBarChartView::new(vec![ElevationSummary {
            country: "Deep".to_string(),
            mean_m: i64::MIN / 2,
            max_m: 0,
            min_m: i64::MIN,
        }]);
        let text = view.render_text(&TextOptions { bar_width: 4 });
        assert!(text.contains(&format!("---- {}", i64::MIN)));
        assert!(text.contains(&format!("-- {}", i64::MIN / 2)));
    }

    #[test]
    fn bar_chart_text_lists_bars_in_order() {
        let view = BarChartView::new(CategoricalField::Country, 2, 4, ranked(&[("A", 5), ("B", 3)]));
        let text = view.render_text(&TextOptions { bar_width: 10 });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Top 2 Volcano Counts for Countries");
        assert!(lines[2].starts_with("A "));
        assert!(lines[2].ends_with("########## 5"));
        assert!(lines[3].ends_with("###### 3"));
    }

    #[test]
    fn grouped_chart_text_has_three_series_per_country() {
        let view = GroupedBarChartView::new(vec![ElevationSummary {
            country: "A".to_string(),
            mean_m: 200,
            max_m: 300,
            min_m: 100,
        }]);
        let text = view.render_text(&TextOptions::default());
        assert!(text.contains("Average Elevation"));
        assert!(text.contains("Max Elevation"));
        assert!(text.trim_end().ends_with("100"));
    }

    #[test]
    fn json_renderer_serializes_view() {
        let renderer = Renderer::new(OutputFormat::Json, TextOptions::default());
        let view = BarChartView::new(CategoricalField::DominantRockType, 1, 1, ranked(&[("Andesite", 2)]));
        let out = renderer.render(&view).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["bars"][0]["value"], "Andesite");
        assert_eq!(v["bars"][0]["count"], 2);
    }

    #[test]
    fn output_format_parses() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn notice_renders_as_text_or_json() {
        let notice = NoticeView::ineligible_countries(vec!["Peru".to_string()], vec!["Chile".to_string()]);
        let text = notice.render_text(&TextOptions::default());
        assert!(text.ends_with("not eligible: Peru\nchoose from: Chile\n"));

        let renderer = Renderer::new(OutputFormat::Json, TextOptions::default());
        let out = renderer.render(&notice).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["choices"][0], "Chile");
    }
}
