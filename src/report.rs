// Terminal report: bordered box, optional color, JSON alternative.

use crate::models::{CpuSnapshot, Metric};
use crossterm::style::Stylize;
use std::fmt::Display;
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const TITLE: &str = "C P U   I N F O R M A T I O N";

/// Smallest inner width that still fits a label and a few value columns.
pub const MIN_WIDTH: usize = 40;

const NA: &str = "N/A";
const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStyle {
    /// Inner width of the box (between the borders), in terminal columns.
    pub width: usize,
    pub color: bool,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            width: 100,
            color: true,
        }
    }
}

/// One labelled line of the box.
struct Row {
    label: &'static str,
    value: String,
}

fn percent(v: f64) -> String {
    format!("{:.2}%", v)
}

fn ghz(v: f64) -> String {
    format!("{:.2} GHz", v)
}

fn text_or_na(s: &str) -> String {
    if s.trim().is_empty() {
        NA.into()
    } else {
        s.to_string()
    }
}

fn temperature(t: &Metric<f64>) -> String {
    match t {
        Metric::Value(c) => format!("{:.1}°C", c),
        Metric::Unavailable => NA.into(),
    }
}

fn per_core_speeds(speeds: &[Metric<f64>]) -> String {
    if speeds.iter().all(|s| !s.is_available()) {
        return NA.into();
    }
    let list: Vec<String> = speeds
        .iter()
        .map(|s| s.map(|v| format!("{:.2}", v)).display_or_na())
        .collect();
    format!("{} GHz", list.join(", "))
}

fn rows(s: &CpuSnapshot) -> Vec<Row> {
    vec![
        Row { label: "CPU Model:", value: text_or_na(&s.model) },
        Row { label: "CPU Vendor:", value: text_or_na(&s.vendor) },
        Row { label: "CPU Speed:", value: s.base_speed_ghz.map(ghz).display_or_na() },
        Row { label: "CPU Cores:", value: s.core_count.to_string() },
        Row { label: "CPU Physical Cores:", value: s.physical_cores.display_or_na() },
        Row { label: "CPU Usage:", value: percent(s.current_load_percent) },
        Row { label: "CPU Average:", value: format!("{}%", s.average_load_percent) },
        Row { label: "CPU Temperature:", value: temperature(&s.temperature_celsius) },
        Row { label: "CPU Free:", value: percent(s.free_percent) },
        Row { label: "CPU Per-Core Speed:", value: per_core_speeds(&s.per_core_speed_ghz) },
        Row { label: "CPU Full Load:", value: percent(s.full_load_percent) },
        Row { label: "CPU Sample Window:", value: format!("{} ms", s.usage.elapsed_ms) },
    ]
}

/// Cut `s` to at most `max` display columns.
pub fn truncate_to_width(s: &str, max: usize) -> &str {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            return &s[..i];
        }
        used += w;
    }
    s
}

/// Break a comma separated value into lines of at most `max` columns.
/// A single item wider than `max` is truncated.
fn wrap_value(value: &str, max: usize) -> Vec<String> {
    if value.width() <= max {
        return vec![value.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for item in value.split_inclusive(", ") {
        if !current.is_empty() && current.width() + item.trim_end().width() > max {
            lines.push(current.trim_end().to_string());
            current.clear();
        }
        current.push_str(item);
    }
    if !current.is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
        .into_iter()
        .map(|l| truncate_to_width(&l, max).to_string())
        .collect()
}

struct BoxWriter<'a> {
    style: &'a ReportStyle,
    out: String,
}

impl<'a> BoxWriter<'a> {
    fn new(style: &'a ReportStyle) -> Self {
        let mut out = String::new();
        out.push('╭');
        out.push_str(&"─".repeat(style.width));
        out.push_str("╮\n");
        Self { style, out }
    }

    /// Append one inner line; `plain` decides the padding, `styled` is what gets printed.
    fn line(&mut self, plain: &str, styled: &str) {
        let pad = self.style.width.saturating_sub(plain.width());
        self.out.push('│');
        self.out.push_str(styled);
        self.out.push_str(&" ".repeat(pad));
        self.out.push_str("│\n");
    }

    fn plain(&mut self, text: &str) {
        let text = truncate_to_width(text, self.style.width);
        self.line(text, text);
    }

    fn row(&mut self, row: &Row) {
        let lead = format!("{INDENT}{} ", row.label);
        let lead = truncate_to_width(&lead, self.style.width).to_string();
        let avail = self.style.width.saturating_sub(lead.width());
        let continuation = " ".repeat(lead.width());
        for (i, part) in wrap_value(&row.value, avail).iter().enumerate() {
            let head = if i == 0 { lead.as_str() } else { continuation.as_str() };
            let plain = format!("{head}{part}");
            let styled = if self.style.color {
                format!("{}{}", head.white(), part.as_str().green())
            } else {
                plain.clone()
            };
            self.line(&plain, &styled);
        }
    }

    fn finish(mut self) -> String {
        self.out.push('╰');
        self.out.push_str(&"─".repeat(self.style.width));
        self.out.push('╯');
        self.out
    }
}

/// Bordered report block. Every line has the same display width; "N/A" marks unavailable values.
pub fn render_box(snapshot: &CpuSnapshot, style: &ReportStyle) -> String {
    let mut w = BoxWriter::new(style);
    w.plain(&format!(" {TITLE}"));
    w.plain("");
    for row in rows(snapshot) {
        w.row(&row);
    }
    w.plain("");
    w.finish()
}

pub fn render_json(snapshot: &CpuSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

pub fn render_banner(style: &ReportStyle) -> String {
    let text = "CPU information retrieval now started...";
    if style.color {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}

pub fn render_timing(elapsed: Duration, style: &ReportStyle) -> String {
    let ms = elapsed.as_millis();
    if style.color {
        format!(
            "{}{}{}",
            "CPU information retrieval took".yellow(),
            format!(" {}", ms).green(),
            " ms".yellow()
        )
    } else {
        format!("CPU information retrieval took {} ms", ms)
    }
}

pub fn render_error(err: &dyn Display, style: &ReportStyle) -> String {
    let text = format!("An error occurred: {}", err);
    if style.color {
        text.dark_red().to_string()
    } else {
        text
    }
}
