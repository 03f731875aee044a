//! Tool set, toolbox settings, and the in-progress draft machinery.

use crate::fonts::FontSpec;
use crate::shapes::{Color, Line, Oval, Polygon, Rectangle, Shape, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default pen stroke width.
pub const DEFAULT_PEN_WIDTH: f64 = 5.0;
/// Default side length of the square eraser region.
pub const DEFAULT_ERASER_WIDTH: f64 = 20.0;
/// Default point size for new text.
pub const DEFAULT_TEXT_FONT_SIZE: u32 = 12;

/// Stroke width drawn while a bounded shape is being sized.
pub const DRAFT_STROKE_WIDTH: f64 = 5.0;
/// Interior color given to finalized bounded shapes.
pub const SHAPE_FILL_COLOR: Color = Color::BLACK;

/// Radius of the vertex markers shown while collecting a polygon.
pub const POLYGON_VERTEX_RADIUS: f64 = 6.0;
/// Chebyshev distance within which a click snaps to an existing
/// polygon vertex.
pub const POLYGON_HOVER_TOLERANCE: f64 = 10.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pen,
    Erase,
    Move,
    Fill,
    Text,
    Rectangle,
    Circle,
    Triangle,
    Line,
    Polygon,
}

impl ToolKind {
    /// Whether this tool places a new shape on the board.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle
                | ToolKind::Circle
                | ToolKind::Triangle
                | ToolKind::Line
                | ToolKind::Polygon
        )
    }

    /// The drag-to-size geometry for this tool, if it has one.
    pub fn sized_kind(&self) -> Option<SizedKind> {
        match self {
            ToolKind::Rectangle => Some(SizedKind::Rectangle),
            ToolKind::Circle => Some(SizedKind::Circle),
            ToolKind::Triangle => Some(SizedKind::Triangle),
            ToolKind::Line => Some(SizedKind::Line),
            _ => None,
        }
    }
}

/// Live toolbox settings, queried by every engine at use time.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub pen_color: Color,
    pub pen_width: f64,
    pub fill_color: Color,
    pub eraser_width: f64,
    pub text_color: Color,
    pub text_font: FontSpec,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            pen_color: Color::BLACK,
            pen_width: DEFAULT_PEN_WIDTH,
            fill_color: Color::BLACK,
            eraser_width: DEFAULT_ERASER_WIDTH,
            text_color: Color::BLACK,
            text_font: FontSpec::fallback(DEFAULT_TEXT_FONT_SIZE),
        }
    }
}

/// Shapes created by dragging out two corner points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizedKind {
    Rectangle,
    Circle,
    Triangle,
    Line,
}

/// State of the in-progress draft, if any.
#[derive(Debug, Clone, Default)]
pub enum Draft {
    /// No draft in progress.
    #[default]
    Idle,
    /// Pen stroke accumulating points while the button is held.
    Drawing { points: Vec<Point> },
    /// Two-corner shape being dragged out.
    Sizing {
        kind: SizedKind,
        anchor: Point,
        current: Point,
    },
    /// Polygon vertices being collected click by click.
    Collecting { vertices: Vec<Point> },
}

/// What happened to a polygon draft after a click.
#[derive(Debug)]
pub enum PolygonClick {
    /// The click added a vertex.
    Added,
    /// The click landed on an existing vertex and was ignored.
    Absorbed,
    /// The click closed the ring; the committed polygon is returned.
    Committed(Shape),
    /// The click closed a ring with fewer than three vertices, which
    /// discards the draft.
    Discarded,
}

/// Renderer-facing view of the in-progress draft. Drafts are never
/// store members; hosts draw these on top of the committed shapes.
#[derive(Debug)]
pub enum Preview<'a> {
    /// Pen stroke so far, drawn with the live pen settings.
    Stroke(&'a [Point]),
    /// Sized shape outline at the draft stroke width, no fill.
    Shape(Shape),
    /// Collected polygon vertices; hosts draw the markers and the
    /// dashed closing ring.
    PolygonOutline(&'a [Point]),
}

/// Chebyshev (max-axis) distance between two points.
fn chebyshev(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Triangle vertices for a base dragged from `anchor` to `current`.
///
/// The apex sits at `(x1 + dx/2, y1 + dy/2 + h*dx/side)` with
/// `h = side * sqrt(3)/2`. A zero-length base leaves all three
/// vertices at the anchor.
pub fn triangle_points(anchor: Point, current: Point) -> [Point; 3] {
    let dx = current.x - anchor.x;
    let dy = current.y - anchor.y;
    let side = (dx * dx + dy * dy).sqrt();
    if side == 0.0 {
        return [anchor; 3];
    }
    let h = side * 3.0_f64.sqrt() / 2.0;
    let apex = Point::new(anchor.x + dx / 2.0, anchor.y + dy / 2.0 + h * dx / side);
    [anchor, current, apex]
}

/// Geometry of a sized draft between its two corner points.
fn sized_shape(kind: SizedKind, anchor: Point, current: Point, style: ShapeStyle) -> Shape {
    match kind {
        SizedKind::Rectangle => {
            let mut r = Rectangle::from_corners(anchor, current);
            r.style = style;
            Shape::Rectangle(r)
        }
        SizedKind::Circle => {
            let radius = anchor.distance(current) / 2.0;
            let center = anchor.midpoint(current);
            let mut o = Oval::circle(center, radius);
            o.style = style;
            Shape::Oval(o)
        }
        SizedKind::Triangle => {
            let mut p = Polygon::from_points(triangle_points(anchor, current).to_vec());
            p.style = style;
            Shape::Polygon(p)
        }
        SizedKind::Line => {
            let mut l = Line::new(anchor, current);
            l.style = style;
            Shape::Line(l)
        }
    }
}

/// Drives the pen, sized-shape, and polygon drafts.
#[derive(Debug, Default)]
pub struct DraftEngine {
    state: Draft,
}

impl DraftEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Draft {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, Draft::Idle)
    }

    /// Abandon any in-progress draft. Called on tool switches.
    pub fn abandon(&mut self) {
        if !self.is_idle() {
            log::debug!("abandoning in-progress draft");
        }
        self.state = Draft::Idle;
    }

    /// Start a pen stroke at the press position.
    pub fn begin_stroke(&mut self, position: Point) {
        self.state = Draft::Drawing {
            points: vec![position],
        };
    }

    /// Append a point to the active pen stroke.
    pub fn extend_stroke(&mut self, position: Point) {
        if let Draft::Drawing { points } = &mut self.state {
            points.push(position);
        }
    }

    /// Commit the pen stroke as a line with the live pen settings.
    /// Without an active stroke this is a no-op.
    pub fn finish_stroke(&mut self, settings: &ToolSettings) -> Option<Shape> {
        match std::mem::take(&mut self.state) {
            Draft::Drawing { points } => {
                let mut line = Line::from_points(points);
                line.style = ShapeStyle {
                    stroke: settings.pen_color,
                    stroke_width: settings.pen_width,
                    fill: None,
                };
                Some(Shape::Line(line))
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Start sizing a two-corner shape at the press position.
    pub fn begin_sizing(&mut self, kind: SizedKind, anchor: Point) {
        self.state = Draft::Sizing {
            kind,
            anchor,
            current: anchor,
        };
    }

    /// Move the free corner of the sizing draft.
    pub fn update_sizing(&mut self, position: Point) {
        if let Draft::Sizing { current, .. } = &mut self.state {
            *current = position;
        }
    }

    /// Commit the sized draft as a permanent shape: black fill (line
    /// draws its stroke black) at the configured pen width. Degenerate
    /// zero-size geometry commits unchanged. No-op without a draft.
    pub fn finish_sizing(&mut self, settings: &ToolSettings) -> Option<Shape> {
        match std::mem::take(&mut self.state) {
            Draft::Sizing {
                kind,
                anchor,
                current,
            } => {
                let style = ShapeStyle {
                    stroke: Color::BLACK,
                    stroke_width: settings.pen_width,
                    fill: match kind {
                        SizedKind::Line => None,
                        _ => Some(SHAPE_FILL_COLOR),
                    },
                };
                Some(sized_shape(kind, anchor, current, style))
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Handle a polygon-tool click.
    ///
    /// A click within the hover tolerance of the start vertex closes
    /// the ring: three or more vertices commit a polygon, fewer
    /// discard the draft. A click on any later vertex is absorbed.
    /// Any other click appends a vertex.
    pub fn polygon_click(&mut self, position: Point, settings: &ToolSettings) -> PolygonClick {
        let vertices = match &mut self.state {
            Draft::Collecting { vertices } => vertices,
            Draft::Idle => {
                self.state = Draft::Collecting {
                    vertices: vec![position],
                };
                return PolygonClick::Added;
            }
            _ => return PolygonClick::Absorbed,
        };

        if chebyshev(position, vertices[0]) <= POLYGON_HOVER_TOLERANCE {
            let vertices = std::mem::take(vertices);
            self.state = Draft::Idle;
            if vertices.len() >= 3 {
                let mut polygon = Polygon::from_points(vertices);
                polygon.style = ShapeStyle {
                    stroke: Color::BLACK,
                    stroke_width: settings.pen_width,
                    fill: Some(SHAPE_FILL_COLOR),
                };
                return PolygonClick::Committed(Shape::Polygon(polygon));
            }
            log::debug!("polygon closed with fewer than three vertices, discarding");
            return PolygonClick::Discarded;
        }

        if vertices[1..]
            .iter()
            .any(|&v| chebyshev(position, v) <= POLYGON_HOVER_TOLERANCE)
        {
            return PolygonClick::Absorbed;
        }

        vertices.push(position);
        PolygonClick::Added
    }

    /// The in-progress geometry for a renderer, if any.
    pub fn preview(&self) -> Option<Preview<'_>> {
        match &self.state {
            Draft::Idle => None,
            Draft::Drawing { points } => Some(Preview::Stroke(points)),
            Draft::Sizing {
                kind,
                anchor,
                current,
            } => {
                let style = ShapeStyle {
                    stroke: Color::BLACK,
                    stroke_width: DRAFT_STROKE_WIDTH,
                    fill: None,
                };
                Some(Preview::Shape(sized_shape(*kind, *anchor, *current, style)))
            }
            Draft::Collecting { vertices } => Some(Preview::PolygonOutline(vertices)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pen_stroke_commits_with_settings() {
        let mut draft = DraftEngine::new();
        let settings = ToolSettings {
            pen_color: Color::rgb(255, 0, 0),
            pen_width: 3.0,
            ..Default::default()
        };
        draft.begin_stroke(Point::new(0.0, 0.0));
        draft.extend_stroke(Point::new(5.0, 5.0));
        draft.extend_stroke(Point::new(10.0, 0.0));
        let shape = draft.finish_stroke(&settings).unwrap();
        let Shape::Line(line) = shape else {
            panic!("expected line");
        };
        assert_eq!(line.points.len(), 3);
        assert_eq!(line.style.stroke, Color::rgb(255, 0, 0));
        assert_eq!(line.style.stroke_width, 3.0);
        assert!(draft.is_idle());
    }

    #[test]
    fn test_single_point_stroke_commits() {
        let mut draft = DraftEngine::new();
        draft.begin_stroke(Point::new(4.0, 4.0));
        let shape = draft.finish_stroke(&ToolSettings::default()).unwrap();
        let Shape::Line(line) = shape else {
            panic!("expected line");
        };
        assert_eq!(line.points, vec![Point::new(4.0, 4.0)]);
    }

    #[test]
    fn test_finish_without_draft_is_noop() {
        let mut draft = DraftEngine::new();
        assert!(draft.finish_stroke(&ToolSettings::default()).is_none());
        assert!(draft.finish_sizing(&ToolSettings::default()).is_none());
    }

    #[test]
    fn test_circle_sizing_geometry() {
        let mut draft = DraftEngine::new();
        draft.begin_sizing(SizedKind::Circle, Point::new(0.0, 0.0));
        draft.update_sizing(Point::new(10.0, 0.0));
        let shape = draft.finish_sizing(&ToolSettings::default()).unwrap();
        let Shape::Oval(oval) = shape else {
            panic!("expected oval");
        };
        assert_eq!(oval.center, Point::new(5.0, 0.0));
        assert_eq!((oval.radius_x, oval.radius_y), (5.0, 5.0));
        assert_eq!(oval.style.fill, Some(Color::BLACK));
    }

    #[test]
    fn test_triangle_apex() {
        let [a, b, apex] = triangle_points(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(a, Point::new(0.0, 0.0));
        assert_eq!(b, Point::new(10.0, 0.0));
        assert!((apex.x - 5.0).abs() < 1e-9);
        assert!((apex.y - 10.0 * 3.0_f64.sqrt() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangle_degenerate_stays_at_anchor() {
        let pts = triangle_points(Point::new(3.0, 3.0), Point::new(3.0, 3.0));
        assert_eq!(pts, [Point::new(3.0, 3.0); 3]);
    }

    #[test]
    fn test_degenerate_rectangle_commits() {
        let mut draft = DraftEngine::new();
        draft.begin_sizing(SizedKind::Rectangle, Point::new(5.0, 5.0));
        let shape = draft.finish_sizing(&ToolSettings::default()).unwrap();
        let Shape::Rectangle(rect) = shape else {
            panic!("expected rectangle");
        };
        assert_eq!((rect.width, rect.height), (0.0, 0.0));
    }

    #[test]
    fn test_polygon_closes_at_start_vertex() {
        let mut draft = DraftEngine::new();
        let settings = ToolSettings::default();
        for p in [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(50.0, 80.0),
        ] {
            assert!(matches!(
                draft.polygon_click(p, &settings),
                PolygonClick::Added
            ));
        }
        // Within Chebyshev tolerance of the start vertex
        let result = draft.polygon_click(Point::new(8.0, -8.0), &settings);
        let PolygonClick::Committed(Shape::Polygon(poly)) = result else {
            panic!("expected commit");
        };
        assert_eq!(poly.points.len(), 3);
        assert!(draft.is_idle());
    }

    #[test]
    fn test_polygon_close_with_two_vertices_discards() {
        let mut draft = DraftEngine::new();
        let settings = ToolSettings::default();
        draft.polygon_click(Point::new(0.0, 0.0), &settings);
        draft.polygon_click(Point::new(100.0, 0.0), &settings);
        assert!(matches!(
            draft.polygon_click(Point::new(2.0, 2.0), &settings),
            PolygonClick::Discarded
        ));
        assert!(draft.is_idle());
    }

    #[test]
    fn test_polygon_click_near_existing_vertex_absorbed() {
        let mut draft = DraftEngine::new();
        let settings = ToolSettings::default();
        draft.polygon_click(Point::new(0.0, 0.0), &settings);
        draft.polygon_click(Point::new(100.0, 0.0), &settings);
        assert!(matches!(
            draft.polygon_click(Point::new(105.0, 5.0), &settings),
            PolygonClick::Absorbed
        ));
        let Draft::Collecting { vertices } = draft.state() else {
            panic!("still collecting");
        };
        assert_eq!(vertices.len(), 2);
    }

    #[test]
    fn test_abandon_clears_draft() {
        let mut draft = DraftEngine::new();
        draft.polygon_click(Point::new(0.0, 0.0), &ToolSettings::default());
        draft.abandon();
        assert!(draft.is_idle());
        assert!(draft.preview().is_none());
    }
}
