//! PNG rendering of a [`PointsDistribution`]: one panel per team laid out
//! on a fixed grid, bars on a shared count scale. Title, team labels and
//! the axis caption use the 8x8 bitmap glyphs from `font8x8`.

use std::path::Path;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};

use super::histogram::PointsDistribution;
use crate::config::PlotConfig;
use crate::error::Result;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const PANEL_FRAME: Rgb<u8> = Rgb([51, 51, 51]);
const BAR_FILL: Rgb<u8> = Rgb([89, 89, 89]);
const GRID_LINE: Rgb<u8> = Rgb([235, 235, 235]);

/// Outer margin and gap between panels, pixels
const MARGIN: u32 = 24;
/// Horizontal gridlines per panel
const GRID_STEPS: u32 = 4;
/// Rows reserved above the grid for the title, and below it for the axis caption
const HEADER_HEIGHT: u32 = 32;
const FOOTER_HEIGHT: u32 = 32;
/// Glyph pixel size; 8x8 glyphs become 16x16
const TEXT_SCALE: u32 = 2;
const GLYPH: u32 = 8 * TEXT_SCALE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl Rect {
    fn right(&self) -> u32 {
        self.x + self.w
    }

    fn bottom(&self) -> u32 {
        self.y + self.h
    }
}

fn fill(img: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    let x_end = rect.right().min(img.width());
    let y_end = rect.bottom().min(img.height());
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            img.put_pixel(x, y, color);
        }
    }
}

fn outline(img: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    fill(img, Rect { h: 1, ..rect }, color);
    fill(img, Rect { y: rect.bottom().saturating_sub(1), h: 1, ..rect }, color);
    fill(img, Rect { w: 1, ..rect }, color);
    fill(img, Rect { x: rect.right().saturating_sub(1), w: 1, ..rect }, color);
}

/// Draw `text` with its top-left corner at (x, y), clipped to the image.
/// Characters without a glyph advance as blanks.
fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) {
    for (i, c) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(c) else {
            continue;
        };
        let left = x + i as u32 * GLYPH;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8u32 {
                // bit 0 is the leftmost pixel
                if bits & (1 << col) != 0 {
                    let px = Rect {
                        x: left + col * TEXT_SCALE,
                        y: y + row as u32 * TEXT_SCALE,
                        w: TEXT_SCALE,
                        h: TEXT_SCALE,
                    };
                    fill(img, px, color);
                }
            }
        }
    }
}

/// Panel rectangles, row-major, `columns` per row, between the title and
/// the caption. Each panel keeps a `MARGIN` gap above it for its label.
fn panel_layout(panels: usize, columns: usize, width: u32, height: u32) -> Vec<Rect> {
    if panels == 0 {
        return Vec::new();
    }
    let columns = columns.min(panels).max(1) as u32;
    let rows = (panels as u32).div_ceil(columns);
    let cell_w = width.saturating_sub(MARGIN) / columns;
    let cell_h = height.saturating_sub(MARGIN + HEADER_HEIGHT + FOOTER_HEIGHT) / rows;

    (0..panels as u32)
        .map(|i| {
            let (col, row) = (i % columns, i / columns);
            Rect {
                x: MARGIN + col * cell_w,
                y: HEADER_HEIGHT + MARGIN + row * cell_h,
                w: cell_w.saturating_sub(MARGIN),
                h: cell_h.saturating_sub(MARGIN),
            }
        })
        .collect()
}

/// Draw the distribution into an in-memory image.
pub fn rasterize(dist: &PointsDistribution, config: &PlotConfig) -> RgbImage {
    let mut img = RgbImage::from_pixel(config.width, config.height, BACKGROUND);
    let max_count = dist.max_count().max(1);
    let bins = dist.bins().max(1) as u64;

    let title = format!("Points per game by team, {} to {}", config.start, config.end);
    draw_text(&mut img, MARGIN, (HEADER_HEIGHT + MARGIN - GLYPH) / 2, &title, PANEL_FRAME);
    let (lo, hi) = match (dist.edges.first(), dist.edges.last()) {
        (Some(lo), Some(hi)) => (*lo, *hi),
        _ => (0.0, 0.0),
    };
    let caption = format!("x: points {} to {}, {} bins   y: games per bin (max {})", lo, hi, bins, max_count);
    let caption_y = config.height.saturating_sub(FOOTER_HEIGHT - (FOOTER_HEIGHT - GLYPH) / 2);
    draw_text(&mut img, MARGIN, caption_y, &caption, PANEL_FRAME);

    for (panel, rect) in dist.panels.iter().zip(panel_layout(dist.panels.len(), config.columns, config.width, config.height)) {
        for step in 1..GRID_STEPS {
            let y = rect.bottom() - rect.h * step / GRID_STEPS;
            fill(&mut img, Rect { y, h: 1, ..rect }, GRID_LINE);
        }

        for (b, count) in panel.counts.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            // bin b spans [x0, x1) of the panel; at least one pixel, never past the frame
            let x0 = rect.x + (b as u64 * rect.w as u64 / bins) as u32;
            let x1 = rect.x + ((b as u64 + 1) * rect.w as u64 / bins) as u32;
            let bar_w = x1.saturating_sub(x0 + 1).max(1).min(rect.right().saturating_sub(x0));
            let bar_h = ((*count as u64 * rect.h as u64) / max_count as u64) as u32;
            fill(&mut img, Rect { x: x0, y: rect.bottom() - bar_h, w: bar_w, h: bar_h }, BAR_FILL);
        }

        outline(&mut img, rect, PANEL_FRAME);
        draw_text(&mut img, rect.x, rect.y.saturating_sub(GLYPH + 4), &panel.team, PANEL_FRAME);
    }

    img
}

/// Render and write a PNG, replacing any existing file.
pub fn render_points_distribution(dist: &PointsDistribution, config: &PlotConfig, path: &Path) -> Result<()> {
    let img = rasterize(dist, config);
    img.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("Wrote {}x{} histogram grid to {}", img.width(), img.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::histogram::TeamHistogram;

    fn panel(team: &str, counts: Vec<u32>) -> TeamHistogram {
        let games = counts.iter().sum::<u32>() as usize;
        TeamHistogram { team: team.to_string(), counts, games, players: 1 }
    }

    #[test]
    fn test_layout_fifteen_panels_three_rows() {
        let rects = panel_layout(15, 5, 2000, 1000);
        assert_eq!(rects.len(), 15);
        assert_eq!(rects[0].y, rects[4].y);
        assert!(rects[5].y > rects[0].y);
        assert!(rects[10].y > rects[5].y);
        for rect in &rects {
            assert!(rect.right() <= 2000 && rect.bottom() <= 1000);
        }
    }

    #[test]
    fn test_rasterize_draws_tallest_bar_full_height() {
        let dist = PointsDistribution {
            edges: vec![0.0, 10.0, 20.0],
            panels: vec![panel("ATL", vec![4, 2])],
        };
        let config = PlotConfig { bins: 2, ..Default::default() };
        let img = rasterize(&dist, &config);
        assert_eq!((img.width(), img.height()), (2000, 1000));

        let rect = panel_layout(1, config.columns, config.width, config.height)[0];
        // just inside the frame, first bin is full height, second half height
        let x0 = rect.x + 2;
        let x1 = rect.x + rect.w / 2 + 2;
        assert_eq!(*img.get_pixel(x0, rect.y + 2), BAR_FILL);
        assert_eq!(*img.get_pixel(x1, rect.y + 2), BACKGROUND);
        assert_eq!(*img.get_pixel(x1, rect.bottom() - 2), BAR_FILL);
    }

    fn has_pixel(img: &RgbImage, area: Rect, color: Rgb<u8>) -> bool {
        (area.y..area.bottom()).any(|y| (area.x..area.right()).any(|x| *img.get_pixel(x, y) == color))
    }

    #[test]
    fn test_team_labels_and_title_drawn() {
        let dist = PointsDistribution {
            edges: vec![0.0, 10.0, 20.0],
            panels: vec![panel("ATL", vec![1, 1]), panel("BOS", vec![2, 0])],
        };
        let config = PlotConfig { bins: 2, ..Default::default() };
        let img = rasterize(&dist, &config);
        let rects = panel_layout(2, config.columns, config.width, config.height);

        for rect in &rects {
            let label = Rect { x: rect.x, y: rect.y - GLYPH - 4, w: 3 * GLYPH, h: GLYPH };
            assert!(has_pixel(&img, label, PANEL_FRAME));
        }
        let title = Rect { x: 0, y: 0, w: config.width, h: HEADER_HEIGHT };
        assert!(has_pixel(&img, title, PANEL_FRAME));
        let caption = Rect { x: 0, y: config.height - FOOTER_HEIGHT, w: config.width, h: FOOTER_HEIGHT };
        assert!(has_pixel(&img, caption, PANEL_FRAME));
    }

    #[test]
    fn test_bars_stay_inside_narrow_panel() {
        // more bins than the panel is wide
        let counts = vec![1; 50];
        let dist = PointsDistribution {
            edges: (0..=50).map(f64::from).collect(),
            panels: vec![panel("ATL", counts.clone()), panel("BOS", counts)],
        };
        let config = PlotConfig { bins: 50, width: 100, height: 300, ..Default::default() };
        let img = rasterize(&dist, &config);
        let rects = panel_layout(2, config.columns, config.width, config.height);
        assert!(rects[0].w < 50);

        let gap = Rect { x: rects[0].right(), y: rects[0].y, w: rects[1].x - rects[0].right(), h: rects[0].h };
        assert!(gap.w > 0);
        assert!(!has_pixel(&img, gap, BAR_FILL));
        assert!(has_pixel(&img, rects[0], BAR_FILL));
    }

    #[test]
    fn test_render_writes_png() {
        let dist = PointsDistribution { edges: vec![0.0, 1.0], panels: vec![panel("BOS", vec![3])] };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist.png");
        render_points_distribution(&dist, &PlotConfig { bins: 1, ..Default::default() }, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
