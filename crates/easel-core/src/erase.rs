//! Eraser: square region removal with line splitting.

use crate::shapes::{Line, Shape, ShapeId};
use crate::store::ObjectStore;
use kurbo::{Point, Rect};

/// What one eraser invocation did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraseOutcome {
    /// The shape removed from the store.
    pub removed: ShapeId,
    /// Fragments created when a line was split (back-to-front order).
    pub fragments: Vec<ShapeId>,
}

/// The square eraser region centered on the pointer. The half-width is
/// floored so odd widths match the integer arithmetic of the on-screen
/// indicator.
pub fn eraser_region(center: Point, eraser_width: f64) -> Rect {
    let half = (eraser_width / 2.0).floor();
    Rect::new(
        center.x - half,
        center.y - half,
        center.x + half,
        center.y + half,
    )
}

/// Inclusive containment, unlike `Rect::contains` which is half-open.
fn region_contains(region: Rect, p: Point) -> bool {
    region.x0 <= p.x && p.x <= region.x1 && region.y0 <= p.y && p.y <= region.y1
}

/// Erase at a pointer position.
///
/// Shapes overlapping the region are visited back to front. A line is
/// split: maximal runs of at least two points outside the region
/// survive as new lines inheriting its color and width. Any other kind
/// is deleted whole. The pass stops after the first removal, so one
/// invocation erases at most one shape; held drags invoke repeatedly.
pub fn erase_at(
    store: &mut ObjectStore,
    center: Point,
    eraser_width: f64,
) -> Option<EraseOutcome> {
    let region = eraser_region(center, eraser_width);
    for id in store.overlapping(region) {
        let Some(shape) = store.get(id) else { continue };
        match shape {
            Shape::Line(line) => {
                let fragments = split_runs(&line.points, region)
                    .into_iter()
                    .map(|points| {
                        let mut fragment = Line::from_points(points);
                        fragment.style = line.style.clone();
                        fragment
                    })
                    .collect::<Vec<_>>();
                let fragment_ids = fragments
                    .into_iter()
                    .map(|f| store.insert(Shape::Line(f)))
                    .collect();
                store.remove(id);
                log::debug!("erased line {id}");
                return Some(EraseOutcome {
                    removed: id,
                    fragments: fragment_ids,
                });
            }
            _ => {
                store.remove(id);
                log::debug!("erased {id}");
                return Some(EraseOutcome {
                    removed: id,
                    fragments: Vec::new(),
                });
            }
        }
    }
    None
}

/// Maximal runs of consecutive points outside the region; runs shorter
/// than two points are dropped.
fn split_runs(points: &[Point], region: Rect) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for &p in points {
        if region_contains(region, p) {
            if current.len() >= 2 {
                runs.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        } else {
            current.push(p);
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}
