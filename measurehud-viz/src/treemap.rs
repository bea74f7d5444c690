//! Rectangle treemap: squarified layout and the terminal widget.
//!
//! Layout works in continuous coordinates; the widget snaps rectangles to
//! cells by rounding both edges, so neighbours never overlap and the whole
//! area is covered.

use crate::encoder::EncodedItem;
use crate::{contrast_color, term_color};
use measurehud_utils::string::safe_truncate;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// A laid-out rectangle and the index of the item it represents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaidOutItem {
    pub index: usize,
    pub rect: LayoutRect,
}

/// Squarified treemap layout of `sizes` into a `width` x `height` area.
///
/// Items are placed largest first; non-positive sizes are skipped. The
/// returned rectangles tile the area and their areas are proportional to
/// the sizes.
pub fn squarify(sizes: &[f64], width: f64, height: f64) -> Vec<LaidOutItem> {
    let total: f64 = sizes.iter().filter(|s| **s > 0.0).sum();
    if total <= 0.0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let scale = width * height / total;
    let mut order: Vec<(usize, f64)> = sizes
        .iter()
        .enumerate()
        .filter(|(_, size)| **size > 0.0)
        .map(|(index, size)| (index, size * scale))
        .collect();
    order.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut out = Vec::with_capacity(order.len());
    let mut remaining = LayoutRect::new(0.0, 0.0, width, height);
    let mut row: Vec<(usize, f64)> = Vec::new();
    let mut next = 0;

    while next < order.len() {
        let side = remaining.shorter_side();
        let candidate = order[next];
        let keeps_improving = row.is_empty() || {
            let mut extended = row.clone();
            extended.push(candidate);
            worst_ratio(&extended, side) <= worst_ratio(&row, side)
        };

        if keeps_improving {
            row.push(candidate);
            next += 1;
        } else {
            remaining = layout_row(&row, remaining, &mut out);
            row.clear();
        }
    }
    if !row.is_empty() {
        layout_row(&row, remaining, &mut out);
    }

    out
}

/// Worst aspect ratio of a row laid along a side of length `side`
fn worst_ratio(row: &[(usize, f64)], side: f64) -> f64 {
    let sum: f64 = row.iter().map(|(_, area)| area).sum();
    if sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    row.iter()
        .map(|(_, area)| {
            let ratio = side_sq * area / sum_sq;
            ratio.max(1.0 / ratio)
        })
        .fold(0.0, f64::max)
}

/// Place `row` against the shorter side of `rect`, return what is left
fn layout_row(row: &[(usize, f64)], rect: LayoutRect, out: &mut Vec<LaidOutItem>) -> LayoutRect {
    let sum: f64 = row.iter().map(|(_, area)| area).sum();
    if sum <= 0.0 {
        return rect;
    }

    if rect.width >= rect.height {
        // Column on the left edge
        let thickness = if rect.height > 0.0 { sum / rect.height } else { 0.0 };
        let mut y = rect.y;
        for &(index, area) in row {
            let height = if thickness > 0.0 { area / thickness } else { 0.0 };
            out.push(LaidOutItem {
                index,
                rect: LayoutRect::new(rect.x, y, thickness, height),
            });
            y += height;
        }
        LayoutRect::new(rect.x + thickness, rect.y, (rect.width - thickness).max(0.0), rect.height)
    } else {
        // Row along the top edge
        let thickness = if rect.width > 0.0 { sum / rect.width } else { 0.0 };
        let mut x = rect.x;
        for &(index, area) in row {
            let width = if thickness > 0.0 { area / thickness } else { 0.0 };
            out.push(LaidOutItem {
                index,
                rect: LayoutRect::new(x, rect.y, width, thickness),
            });
            x += width;
        }
        LayoutRect::new(rect.x, rect.y + thickness, rect.width, (rect.height - thickness).max(0.0))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn snap(value: f64) -> u16 {
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Terminal cells covered by each item inside `area`; empty snaps are dropped
pub fn cell_rects(items: &[EncodedItem], area: Rect) -> Vec<(usize, Rect)> {
    let sizes: Vec<f64> = items.iter().map(|item| item.size).collect();
    squarify(&sizes, f64::from(area.width), f64::from(area.height))
        .into_iter()
        .filter_map(|laid_out| {
            let r = laid_out.rect;
            let x0 = snap(r.x);
            let y0 = snap(r.y);
            let x1 = snap(r.x + r.width).min(area.width);
            let y1 = snap(r.y + r.height).min(area.height);
            if x1 <= x0 || y1 <= y0 {
                return None;
            }
            Some((
                laid_out.index,
                Rect::new(area.x + x0, area.y + y0, x1 - x0, y1 - y0),
            ))
        })
        .collect()
}

/// Index of the item drawn at terminal cell (`column`, `row`)
pub fn item_at(rects: &[(usize, Rect)], column: u16, row: u16) -> Option<usize> {
    rects
        .iter()
        .find(|(_, rect)| {
            column >= rect.x
                && column < rect.x.saturating_add(rect.width)
                && row >= rect.y
                && row < rect.y.saturating_add(rect.height)
        })
        .map(|(index, _)| *index)
}

/// Treemap widget over encoded items
pub struct TreeMap<'a> {
    items: &'a [EncodedItem],
}

impl<'a> TreeMap<'a> {
    pub fn new(items: &'a [EncodedItem]) -> Self {
        Self { items }
    }
}

impl Widget for TreeMap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (index, rect) in cell_rects(self.items, area) {
            let item = &self.items[index];

            for y in rect.y..rect.y + rect.height {
                for x in rect.x..rect.x + rect.width {
                    let fill = match (item.color, item.gradient) {
                        (Some(color), _) => color,
                        (None, Some(gradient)) => gradient.color_at(x - area.x, y - area.y),
                        (None, None) => measurehud_core::theme::colors::GRAY_71,
                    };
                    buf.get_mut(x, y).set_symbol(" ").set_bg(term_color(fill));
                }
            }

            // Right edge separates neighbours of similar color
            if rect.width > 1 {
                let edge = rect.x + rect.width - 1;
                for y in rect.y..rect.y + rect.height {
                    buf.get_mut(edge, y).set_symbol("▕").set_fg(Color::Black);
                }
            }

            if rect.width > 2 {
                let background = item
                    .color
                    .unwrap_or(measurehud_core::theme::colors::GRAY_71);
                let text = format!("{} {}", item.icon.icon(), item.label);
                let width = usize::from(rect.width - 1);
                let text = safe_truncate(&text, width);
                buf.set_stringn(
                    rect.x,
                    rect.y,
                    &text,
                    width,
                    Style::default().fg(contrast_color(background)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_area(items: &[LaidOutItem]) -> f64 {
        items.iter().map(|item| item.rect.area()).sum()
    }

    #[test]
    fn test_areas_are_proportional() {
        let laid_out = squarify(&[6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0], 6.0, 4.0);
        assert_eq!(laid_out.len(), 7);
        assert!((total_area(&laid_out) - 24.0).abs() < 1e-9);

        for item in &laid_out {
            let expected = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0][item.index];
            assert!((item.rect.area() - expected).abs() < 1e-9, "item {}", item.index);
        }
    }

    #[test]
    fn test_rects_stay_inside_bounds() {
        let laid_out = squarify(&[10.0, 3.0, 7.0, 1.0], 80.0, 20.0);
        for item in laid_out {
            let r = item.rect;
            assert!(r.x >= -1e-9 && r.y >= -1e-9);
            assert!(r.x + r.width <= 80.0 + 1e-9);
            assert!(r.y + r.height <= 20.0 + 1e-9);
        }
    }

    #[test]
    fn test_skips_non_positive_sizes_and_empty_area() {
        let laid_out = squarify(&[0.0, 5.0, -1.0], 10.0, 10.0);
        assert_eq!(laid_out.len(), 1);
        assert_eq!(laid_out[0].index, 1);
        assert!(squarify(&[1.0], 0.0, 10.0).is_empty());
        assert!(squarify(&[], 10.0, 10.0).is_empty());
    }

    #[test]
    fn test_item_at_hit_testing() {
        let rects = vec![(0, Rect::new(0, 0, 5, 4)), (1, Rect::new(5, 0, 3, 4))];
        assert_eq!(item_at(&rects, 0, 0), Some(0));
        assert_eq!(item_at(&rects, 4, 3), Some(0));
        assert_eq!(item_at(&rects, 5, 0), Some(1));
        assert_eq!(item_at(&rects, 8, 0), None);
        assert_eq!(item_at(&rects, 0, 4), None);
    }
}
