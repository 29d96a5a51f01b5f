// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor-by-floor PNG rendering.
//!
//! Every floor shares one viewport (the padded bounding box of all cell
//! spaces) so consecutive floors line up when flipped through.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_hollow_rect_mut,
    draw_line_segment_mut, draw_polygon_mut, Blend,
};
use imageproc::point::Point;
use imageproc::rect::Rect;
use indoorgml_lite_core::{
    detect_level, floor_sort_key, Bounds, CellSpace, Coord, Geometry, UNKNOWN_FLOOR,
};
use indoorgml_lite_topology::{Adjacency, Transition};
use rustc_hash::FxHashMap;

use crate::config::PreviewConfig;
use crate::error::{Error, Result};
use crate::feature_type::FeatureType;

type Surface = Blend<RgbaImage>;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GRID: Rgba<u8> = Rgba([0, 0, 0, 30]);
const ADJACENCY: Rgba<u8> = Rgba([128, 128, 128, 153]);
const LEGEND_BORDER: Rgba<u8> = Rgba([180, 180, 180, 255]);

/// Polygon fill opacity (40 %).
const FILL_ALPHA: u8 = 102;
const POINT_RADIUS: i32 = 5;
const PADDING_RATIO: f64 = 0.05;
const MAX_GRID_LINES: usize = 100;
const MAX_DASHES: usize = 4096;

/// Cell spaces grouped by detected floor, floors in display order
/// (`B`, `G`, numeric ascending, then everything else).
///
/// The `None` floor is included; callers decide whether to draw it.
pub fn group_by_floor(cell_spaces: &[CellSpace]) -> Vec<(String, Vec<&CellSpace>)> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut floors: Vec<(String, Vec<&CellSpace>)> = Vec::new();
    for cell in cell_spaces {
        let label = detect_level(cell.properties());
        match index.get(&label) {
            Some(&i) => floors[i].1.push(cell),
            None => {
                index.insert(label.clone(), floors.len());
                floors.push((label, vec![cell]));
            }
        }
    }
    floors.sort_by(|a, b| floor_sort_key(&a.0).cmp(&floor_sort_key(&b.0)));
    floors
}

/// File name of the preview for `label`: `<output-stem>.floor-<label>.png`.
pub fn preview_path(output: &Path, label: &str, config: &PreviewConfig) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "indoorgml".to_string());
    let safe_label: String = label
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let name = format!("{}.floor-{}.png", stem, safe_label);
    match &config.output_dir {
        Some(dir) => dir.join(name),
        None => output.with_file_name(name),
    }
}

/// Renders one PNG per detected floor (the `None` floor is skipped) and
/// returns the written paths in floor order.
pub fn render_previews(
    cell_spaces: &[CellSpace],
    transitions: &[Transition],
    output: &Path,
    config: &PreviewConfig,
) -> Result<Vec<PathBuf>> {
    let Some(viewport) = Viewport::fit(cell_spaces, config.size) else {
        tracing::info!("no drawable geometry, skipping previews");
        return Ok(Vec::new());
    };

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir).map_err(|source| Error::Io {
            path: dir.clone(),
            source,
        })?;
    }

    let adjacency = Adjacency::new(cell_spaces, transitions);
    let mut written = Vec::new();
    for (label, cells) in group_by_floor(cell_spaces) {
        if label == UNKNOWN_FLOOR {
            tracing::debug!(cells = cells.len(), "skipping cell spaces without a floor");
            continue;
        }
        let image = render_floor(&cells, &adjacency, &viewport);
        let path = preview_path(output, &label, config);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| Error::Image {
                path: path.clone(),
                source,
            })?;
        tracing::info!(floor = %label, path = %path.display(), "wrote floor preview");
        written.push(path);
    }
    Ok(written)
}

fn render_floor(cells: &[&CellSpace], adjacency: &Adjacency, viewport: &Viewport) -> RgbaImage {
    let mut canvas = Blend(RgbaImage::from_pixel(viewport.size, viewport.size, WHITE));
    draw_grid(&mut canvas, viewport);

    // same-floor adjacency between centroids, each pair once
    let on_floor: FxHashMap<&str, (usize, Option<Coord>)> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| (cell.id(), (i, cell.geometry().centroid())))
        .collect();
    for cell in cells {
        let Some(&(i, Some(a))) = on_floor.get(cell.id()) else {
            continue;
        };
        for neighbor in adjacency.neighbors(cell.id()) {
            if let Some(&(j, Some(b))) = on_floor.get(neighbor.as_str()) {
                if i < j {
                    pattern_line(
                        &mut canvas,
                        viewport.project(a),
                        viewport.project(b),
                        (2.0, 4.0),
                        ADJACENCY,
                    );
                }
            }
        }
    }

    // polygons below lines below points
    for cell in cells {
        if let Geometry::Polygon { exterior, .. } = cell.geometry() {
            let colour = colour_of(cell, FILL_ALPHA);
            let projected: Vec<(f32, f32)> = exterior.iter().map(|c| viewport.project(*c)).collect();
            if let Some(pixels) = polygon_pixels(&projected) {
                draw_polygon_mut(&mut canvas, &pixels, colour);
            }
            for pair in projected.windows(2) {
                draw_line_segment_mut(&mut canvas, pair[0], pair[1], BLACK);
            }
        }
    }
    for cell in cells {
        if let Geometry::LineString(coords) = cell.geometry() {
            let colour = colour_of(cell, 255);
            for pair in coords.windows(2) {
                let (a, b) = (viewport.project(pair[0]), viewport.project(pair[1]));
                for offset in [0.0, 1.0] {
                    pattern_line(
                        &mut canvas,
                        (a.0 + offset, a.1),
                        (b.0 + offset, b.1),
                        (8.0, 5.0),
                        colour,
                    );
                }
            }
        }
    }
    for cell in cells {
        if let Geometry::Point(coord) = cell.geometry() {
            let (x, y) = viewport.project(*coord);
            let centre = (x.round() as i32, y.round() as i32);
            draw_filled_circle_mut(&mut canvas, centre, POINT_RADIUS, colour_of(cell, 255));
            draw_hollow_circle_mut(&mut canvas, centre, POINT_RADIUS, BLACK);
        }
    }

    draw_legend(&mut canvas, viewport.size);
    canvas.0
}

fn colour_of(cell: &CellSpace, alpha: u8) -> Rgba<u8> {
    let [r, g, b] = FeatureType::classify(cell.properties()).colour();
    Rgba([r, g, b, alpha])
}

/// Integer polygon vertices as `draw_polygon_mut` expects them: at least
/// three, no repeats, first distinct from last.
fn polygon_pixels(projected: &[(f32, f32)]) -> Option<Vec<Point<i32>>> {
    let mut pixels: Vec<Point<i32>> = Vec::with_capacity(projected.len());
    for &(x, y) in projected {
        let p = Point::new(x.round() as i32, y.round() as i32);
        if pixels.last() != Some(&p) {
            pixels.push(p);
        }
    }
    while pixels.len() > 1 && pixels.first() == pixels.last() {
        pixels.pop();
    }
    (pixels.len() >= 3).then_some(pixels)
}

/// Draws a dashed or dotted segment: `(on, off)` lengths in pixels.
fn pattern_line(
    canvas: &mut Surface,
    a: (f32, f32),
    b: (f32, f32),
    (on, off): (f32, f32),
    colour: Rgba<u8>,
) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let length = (dx * dx + dy * dy).sqrt();
    if !length.is_finite() || length < f32::EPSILON {
        return;
    }
    let period = on + off;
    let dashes = ((length / period).ceil() as usize).min(MAX_DASHES);
    let (ux, uy) = (dx / length, dy / length);
    for i in 0..dashes {
        let t = i as f32 * period;
        let end = (t + on).min(length);
        draw_line_segment_mut(
            canvas,
            (a.0 + ux * t, a.1 + uy * t),
            (a.0 + ux * end, a.1 + uy * end),
            colour,
        );
    }
}

fn draw_grid(canvas: &mut Surface, viewport: &Viewport) {
    let Bounds { min, max } = viewport.world;
    let step = nice_step((max.x - min.x).max(max.y - min.y) / 10.0);
    let size = viewport.size as f32;

    for x in grid_positions(min.x, max.x, step) {
        let (px, _) = viewport.project(Coord::new(x, min.y));
        pattern_line(canvas, (px, 0.0), (px, size), (4.0, 4.0), GRID);
    }
    for y in grid_positions(min.y, max.y, step) {
        let (_, py) = viewport.project(Coord::new(min.x, y));
        pattern_line(canvas, (0.0, py), (size, py), (4.0, 4.0), GRID);
    }
}

/// Multiples of `step` within `[min, max]`, computed from an integer index
/// so large offsets cannot stall the walk. Empty when the step is unusable
/// or the range would need more than `MAX_GRID_LINES` lines.
fn grid_positions(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let first = (min / step).ceil();
    let last = (max / step).floor();
    let count = last - first;
    if !count.is_finite() || count < 0.0 || count >= MAX_GRID_LINES as f64 {
        return Vec::new();
    }
    (0..=count as usize)
        .map(|k| (first + k as f64) * step)
        .collect()
}

/// Rounds `raw` up to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Colour swatches for the five categories plus the adjacency line style,
/// stacked in the upper-right corner.
fn draw_legend(canvas: &mut Surface, size: u32) {
    const SWATCH: u32 = 14;
    const ROW: i32 = 20;
    let rows = FeatureType::ALL.len() as i32 + 1;
    let x = size as i32 - SWATCH as i32 - 18;
    let top = 12;

    let frame = Rect::at(x - 6, top - 6).of_size(SWATCH + 12, (rows * ROW) as u32 + 6);
    draw_filled_rect_mut(canvas, frame, Rgba([255, 255, 255, 220]));
    draw_hollow_rect_mut(canvas, frame, LEGEND_BORDER);

    for (i, kind) in FeatureType::ALL.iter().enumerate() {
        let [r, g, b] = kind.colour();
        let swatch = Rect::at(x, top + i as i32 * ROW).of_size(SWATCH, SWATCH);
        draw_filled_rect_mut(canvas, swatch, Rgba([r, g, b, FILL_ALPHA]));
        draw_hollow_rect_mut(canvas, swatch, BLACK);
    }
    let y = (top + (rows - 1) * ROW) as f32 + SWATCH as f32 / 2.0;
    pattern_line(canvas, (x as f32, y), ((x + SWATCH as i32) as f32, y), (2.0, 3.0), ADJACENCY);
}

/// World-to-pixel mapping with equal aspect, y pointing up.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    world: Bounds,
    size: u32,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    /// Fits the padded bounding box of every cell space into a square
    /// image of `size` pixels. `None` when nothing has coordinates.
    fn fit(cell_spaces: &[CellSpace], size: u32) -> Option<Self> {
        let bounds = cell_spaces
            .iter()
            .filter_map(|cell| cell.geometry().bounds())
            .filter(|b| b.min.is_finite() && b.max.is_finite())
            .reduce(|a, b| a.union(&b))?;

        let mut pad = bounds.width().max(bounds.height()) * PADDING_RATIO;
        if pad <= 0.0 {
            pad = 1.0;
        }
        let world = Bounds {
            min: Coord::new(bounds.min.x - pad, bounds.min.y - pad),
            max: Coord::new(bounds.max.x + pad, bounds.max.y + pad),
        };

        let margin = f64::from(size) / 40.0;
        let area = f64::from(size) - 2.0 * margin;
        let scale = (area / world.width()).min(area / world.height());
        Some(Self {
            world,
            size,
            scale,
            offset_x: margin + (area - world.width() * scale) / 2.0,
            offset_y: margin + (area - world.height() * scale) / 2.0,
        })
    }

    fn project(&self, c: Coord) -> (f32, f32) {
        let x = self.offset_x + (c.x - self.world.min.x) * self.scale;
        let y = self.offset_y + (self.world.max.y - c.y) * self.scale;
        (x as f32, y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoorgml_lite_core::{Properties, PropertyValue};

    fn cell(id: &str, geometry: Geometry, floor: Option<&str>) -> CellSpace {
        let properties: Properties = floor
            .map(|f| vec![("floor", PropertyValue::from(f))])
            .unwrap_or_default()
            .into_iter()
            .collect();
        CellSpace::new(id, geometry, properties)
    }

    #[test]
    fn floors_sorted_for_display() {
        let cells = vec![
            cell("a", Geometry::Empty, Some("2")),
            cell("b", Geometry::Empty, Some("Roof")),
            cell("c", Geometry::Empty, None),
            cell("d", Geometry::Empty, Some("basement")),
            cell("e", Geometry::Empty, Some("10th")),
            cell("f", Geometry::Empty, Some("ground")),
            cell("g", Geometry::Empty, Some("2nd")),
        ];
        let floors = group_by_floor(&cells);
        let labels: Vec<&str> = floors.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["B", "G", "2", "10", "None", "Roof"]);

        let second: Vec<&str> = floors[2].1.iter().map(|c| c.id()).collect();
        assert_eq!(second, vec!["a", "g"]);
    }

    #[test]
    fn preview_paths() {
        let config = PreviewConfig::default();
        assert_eq!(
            preview_path(Path::new("out/building.gml"), "1-3", &config),
            PathBuf::from("out/building.floor-1-3.png")
        );
        assert_eq!(
            preview_path(Path::new("plan.xml"), "Upper Deck", &config),
            PathBuf::from("plan.floor-Upper_Deck.png")
        );
        let config = PreviewConfig {
            output_dir: Some(PathBuf::from("/tmp/previews")),
            ..Default::default()
        };
        assert_eq!(
            preview_path(Path::new("out/building.gml"), "G", &config),
            PathBuf::from("/tmp/previews/building.floor-G.png")
        );
    }

    #[test]
    fn polygon_pixels_are_sanitized() {
        let closed = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)];
        let pixels = polygon_pixels(&closed).unwrap();
        assert_eq!(pixels.len(), 3);
        assert_ne!(pixels.first(), pixels.last());

        assert!(polygon_pixels(&[]).is_none());
        assert!(polygon_pixels(&[(1.0, 1.0), (1.2, 1.1), (0.9, 1.0)]).is_none());
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(0.7), 1.0);
        assert_eq!(nice_step(1.5), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(42.0), 50.0);
        assert_eq!(nice_step(0.0), 1.0);
    }

    #[test]
    fn grid_positions_are_bounded() {
        assert_eq!(grid_positions(-1.0, 11.0, 5.0), vec![0.0, 5.0, 10.0]);
        assert!(grid_positions(0.0, 10.0, f64::NAN).is_empty());
        assert!(grid_positions(0.0, 1e9, 1.0).is_empty());
        // step smaller than one ulp of the offset
        let lines = grid_positions(1e18, 1e18 + 70.0, 10.0);
        assert!(lines.len() <= MAX_GRID_LINES);
    }

    #[test]
    fn far_offset_coordinates_render() {
        let dir = tempfile::tempdir().unwrap();
        let cells = vec![cell(
            "far",
            Geometry::rectangle(1e18, 0.0, 1e18 + 64.0, 10.0),
            Some("1"),
        )];
        let config = PreviewConfig {
            size: 100,
            ..Default::default()
        };
        let written =
            render_previews(&cells, &[], &dir.path().join("far.gml"), &config).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].exists());
    }

    #[test]
    fn viewport_keeps_aspect_and_flips_y() {
        let cells = vec![cell("a", Geometry::rectangle(0.0, 0.0, 20.0, 10.0), None)];
        let viewport = Viewport::fit(&cells, 400).unwrap();
        let (x0, y0) = viewport.project(Coord::new(0.0, 0.0));
        let (x1, y1) = viewport.project(Coord::new(20.0, 10.0));
        assert!(x1 > x0);
        assert!(y1 < y0);
        let ratio = (x1 - x0) / (y0 - y1);
        assert!((ratio - 2.0).abs() < 1e-3);
        assert!(x0 >= 0.0 && x1 <= 400.0);
    }

    #[test]
    fn writes_one_png_per_known_floor() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("building.gml");
        let cells = vec![
            cell("r1", Geometry::rectangle(0.0, 0.0, 10.0, 10.0), Some("1")),
            cell("r2", Geometry::rectangle(10.0, 0.0, 20.0, 10.0), Some("1")),
            cell("g1", Geometry::rectangle(0.0, 0.0, 20.0, 10.0), Some("ground")),
            cell("x", Geometry::Point(Coord::new(5.0, 5.0)), None),
        ];
        let transitions = vec![Transition::new("r1", "r2"), Transition::new("r2", "r1")];
        let config = PreviewConfig {
            size: 200,
            ..Default::default()
        };

        let written = render_previews(&cells, &transitions, &output, &config).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("building.floor-G.png"),
                dir.path().join("building.floor-1.png"),
            ]
        );

        let image = image::open(&written[1]).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (200, 200));
        // inside r1: translucent room blue over white
        let viewport = Viewport::fit(&cells, 200).unwrap();
        let (px, py) = viewport.project(Coord::new(3.0, 7.0));
        let pixel = image.get_pixel(px as u32, py as u32);
        assert!(pixel[2] > pixel[0], "expected blue tint, got {:?}", pixel);
        assert_ne!(*pixel, WHITE);
    }

    #[test]
    fn nothing_drawable_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cells = vec![cell("a", Geometry::Empty, Some("1"))];
        let written =
            render_previews(&cells, &[], &dir.path().join("x.gml"), &PreviewConfig::default())
                .unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn creates_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = PreviewConfig {
            output_dir: Some(dir.path().join("nested").join("previews")),
            size: 100,
        };
        let cells = vec![cell("a", Geometry::rectangle(0.0, 0.0, 1.0, 1.0), Some("3rd"))];
        let written = render_previews(&cells, &[], Path::new("doc.gml"), &config).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("nested/previews/doc.floor-3.png"));
        assert!(written[0].exists());
    }
}
