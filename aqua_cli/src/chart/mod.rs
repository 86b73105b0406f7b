//! Usage chart: one horizontal bar per category.
//!
//! The model here is independent of the terminal so it can be unit tested:
//! bar geometry, the growth animation and the hover tooltip state machine.
//! `terminal` drives it interactively, `text` prints a static rendition.

pub mod terminal;
pub mod text;

use aqua_core::config::ChartConfig;
use aqua_core::{Category, CategoryTotals};
use ratatui::layout::Rect;
use std::time::Duration;

pub const TITLE: &str = "Total Water Usage";
pub const X_LABEL: &str = "Total Water Usage (liters)";
pub const Y_LABEL: &str = "Activities";
pub const FOOTER: &str = "AquaTrack - track every drop";

/// Width reserved left of the bars for category names
pub const LABEL_WIDTH: u16 = 10;

/// Tooltip offset from the cursor, in cells
pub const TOOLTIP_OFFSET: (u16, u16) = (2, 1);

/// Cosmetic bar growth: every frame multiplies bar length by `1 + growth`
#[derive(Clone, Debug)]
pub struct Animation {
    frame: u32,
    frames: u32,
    growth: f64,
}

impl Animation {
    pub fn new(frames: u32, growth_percent: f64) -> Self {
        Self {
            frame: 0,
            frames,
            growth: growth_percent / 100.0,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.frames, config.growth_percent)
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Scale applied to bar lengths at the current frame
    pub fn factor(&self) -> f64 {
        self.factor_at(self.frame)
    }

    /// Scale after the last frame
    pub fn final_factor(&self) -> f64 {
        self.factor_at(self.frames)
    }

    fn factor_at(&self, frame: u32) -> f64 {
        (1.0 + self.growth).powf(f64::from(frame))
    }

    /// Move to the next frame; false once the animation has finished
    pub fn advance(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.frame += 1;
        true
    }

    pub fn is_done(&self) -> bool {
        self.frame >= self.frames
    }
}

/// Where a bar is currently drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarGeometry {
    pub category: Category,
    pub total: u64,
    /// Row band reserved for this bar, including the label column
    pub band: Rect,
    /// Filled part of the bar; zero width when the total is zero
    pub bar: Rect,
}

impl BarGeometry {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.bar.width > 0
            && column >= self.bar.x
            && column < self.bar.x + self.bar.width
            && row >= self.bar.y
            && row < self.bar.y + self.bar.height
    }
}

/// Axis ceiling: the largest total once fully grown
pub fn axis_ceiling(totals: &CategoryTotals, animation: &Animation) -> f64 {
    (totals.max() as f64 * animation.final_factor()).max(1.0)
}

/// Lay the four bars out top to bottom inside `plot`
///
/// Each category gets an equal band with a one-row gap between bands. Bar
/// length is proportional to `total * factor / ceiling` of the space right
/// of the label column.
pub fn layout_bars(plot: Rect, totals: &CategoryTotals, factor: f64, ceiling: f64) -> Vec<BarGeometry> {
    let count = Category::ALL.len() as u16;
    let gaps = count - 1;
    let band_height = (plot.height.saturating_sub(gaps) / count).max(1);
    let bar_x = plot.x + LABEL_WIDTH.min(plot.width);
    let bar_span = plot.width.saturating_sub(LABEL_WIDTH);

    totals
        .entries()
        .iter()
        .enumerate()
        .map(|(i, &(category, total))| {
            let y = plot.y + i as u16 * (band_height + 1);
            let height = band_height.min((plot.y + plot.height).saturating_sub(y));
            let scaled = total as f64 * factor / ceiling * f64::from(bar_span);
            let width = (scaled.round() as u16).min(bar_span);
            BarGeometry {
                category,
                total,
                band: Rect::new(plot.x, y, plot.width, height),
                bar: Rect::new(bar_x, y, width, height),
            }
        })
        .collect()
}

/// Hover label state; there is only ever one label
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tooltip {
    Hidden,
    Shown {
        category: Category,
        total: u64,
        /// Cursor position that placed the label
        anchor: (u16, u16),
    },
}

impl Tooltip {
    /// Update for a pointer motion to (`column`, `row`)
    pub fn on_motion(&mut self, column: u16, row: u16, bars: &[BarGeometry]) {
        *self = match bars.iter().find(|b| b.contains(column, row)) {
            Some(bar) => Tooltip::Shown {
                category: bar.category,
                total: bar.total,
                anchor: (column, row),
            },
            None => Tooltip::Hidden,
        };
    }

    pub fn text(&self) -> Option<String> {
        match self {
            Tooltip::Hidden => None,
            Tooltip::Shown {
                category, total, ..
            } => Some(format!("{}: {} L", category, total)),
        }
    }

    /// Box for the label, offset from the cursor and kept inside `area`
    pub fn area(&self, area: Rect) -> Option<Rect> {
        let text = self.text()?;
        let Tooltip::Shown { anchor, .. } = self else {
            return None;
        };

        // Border plus one cell of padding on each side
        let width = (text.chars().count() as u16 + 4).min(area.width);
        let height = 3u16.min(area.height);

        let max_x = (area.x + area.width).saturating_sub(width);
        let max_y = (area.y + area.height).saturating_sub(height);
        let x = anchor.0.saturating_add(TOOLTIP_OFFSET.0).clamp(area.x, max_x.max(area.x));
        let y = anchor.1.saturating_add(TOOLTIP_OFFSET.1).clamp(area.y, max_y.max(area.y));

        Some(Rect::new(x, y, width, height))
    }
}

/// Everything the interactive chart needs between frames
pub struct ChartState {
    pub totals: CategoryTotals,
    pub animation: Animation,
    /// Time between animation frames
    pub frame_interval: Duration,
    pub tooltip: Tooltip,
    /// Bars as drawn in the most recent frame
    pub bars: Vec<BarGeometry>,
}

impl ChartState {
    pub fn new(totals: CategoryTotals, animation: Animation, frame_interval: Duration) -> Self {
        Self {
            totals,
            animation,
            frame_interval,
            tooltip: Tooltip::Hidden,
            bars: Vec::new(),
        }
    }

    pub fn ceiling(&self) -> f64 {
        axis_ceiling(&self.totals, &self.animation)
    }

    pub fn on_motion(&mut self, column: u16, row: u16) {
        self.tooltip.on_motion(column, row, &self.bars);
    }

    /// Advance one frame if a full interval has passed since the last one
    pub fn tick(&mut self, since_last_frame: Duration) -> bool {
        since_last_frame >= self.frame_interval && self.animation.advance()
    }
}
