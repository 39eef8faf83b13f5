//! SVG render sink.

use std::path::Path;

use log::{debug, warn};
use svg::{Document, node::element as svg_element};

use settle_core::{color::Color, geometry::Size, scene::Scene};

use crate::{
    driver::{Frame, RenderSink},
    error::SettleError,
    layout::Positions,
};

const EDGE_COLOR: &str = "#8b5cf6";
const NODE_STROKE_COLOR: &str = "white";
const LABEL_COLOR: &str = "white";
const LABEL_FONT_FAMILY: &str = "Inter, sans-serif";
const LABEL_FONT_SIZE: f32 = 11.0;
/// Gap between a node's bottom edge and its label baseline
const LABEL_OFFSET: f32 = 14.0;

/// Renders the latest frame as an SVG document.
///
/// Each call to [`RenderSink::render`] replaces the previous document, so
/// after a drive the sink holds the final frame.
#[derive(Debug, Clone)]
pub struct SvgSink {
    canvas: Size,
    background: Color,
    document: Option<Document>,
    tick: Option<u64>,
}

impl SvgSink {
    /// Create a sink for a canvas of the given size
    pub fn new(canvas: Size, background: Color) -> Self {
        Self {
            canvas,
            background,
            document: None,
            tick: None,
        }
    }

    /// Returns the last rendered document, if any frame was rendered
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Tick of the last rendered frame
    pub fn tick(&self) -> Option<u64> {
        self.tick
    }

    /// Returns the last rendered document as a string.
    ///
    /// # Errors
    ///
    /// Returns [`SettleError::Export`] if no frame has been rendered.
    pub fn to_svg_string(&self) -> Result<String, SettleError> {
        self.document
            .as_ref()
            .map(ToString::to_string)
            .ok_or_else(|| SettleError::Export("No frame has been rendered".to_string()))
    }

    /// Write the last rendered document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SettleError::Export`] if no frame has been rendered, or
    /// [`SettleError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettleError> {
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| SettleError::Export("No frame has been rendered".to_string()))?;
        svg::save(path, document)?;
        Ok(())
    }

    fn render_document(&self, scene: &Scene, positions: &Positions) -> Document {
        let width = self.canvas.width();
        let height = self.canvas.height();

        let doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height)
            .set("fill", self.background.to_string())
            .set("fill-opacity", self.background.alpha());

        let edges = self.render_edges(scene, positions);
        let nodes = self.render_nodes(scene, positions);

        doc.add(background).add(edges).add(nodes)
    }

    fn render_edges(&self, scene: &Scene, positions: &Positions) -> svg_element::Group {
        let base = Color::new(EDGE_COLOR).unwrap_or_default();
        let mut group = svg_element::Group::new().set("id", "edges");

        for edge in scene.edges() {
            let (Some(source), Some(target)) =
                (positions.get(edge.source()), positions.get(edge.target()))
            else {
                continue;
            };

            let weight = edge.weight();
            let color = base.with_alpha(0.1 + weight / 5000.0);
            let line = svg_element::Line::new()
                .set("x1", source.x())
                .set("y1", source.y())
                .set("x2", target.x())
                .set("y2", target.y())
                .set("stroke", color.to_string())
                .set("stroke-opacity", color.alpha())
                .set("stroke-width", 1.0 + weight / 1000.0);
            group = group.add(line);
        }

        group
    }

    fn render_nodes(&self, scene: &Scene, positions: &Positions) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("id", "nodes");

        for node in scene.nodes() {
            let Some(position) = positions.get(node.id()) else {
                continue;
            };

            let fill = Color::new(node.color()).unwrap_or_else(|err| {
                warn!(node = node.id().value(), err:%; "Falling back to default node color");
                Color::default()
            });

            let circle = svg_element::Circle::new()
                .set("cx", position.x())
                .set("cy", position.y())
                .set("r", node.radius())
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha())
                .set("stroke", NODE_STROKE_COLOR)
                .set("stroke-opacity", 0.3)
                .set("stroke-width", 1);

            let label = svg_element::Text::new(node.label())
                .set("x", position.x())
                .set("y", position.y() + node.radius() + LABEL_OFFSET)
                .set("text-anchor", "middle")
                .set("font-family", LABEL_FONT_FAMILY)
                .set("font-size", LABEL_FONT_SIZE)
                .set("fill", LABEL_COLOR);

            group = group.add(circle).add(label);
        }

        group
    }
}

impl RenderSink for SvgSink {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), SettleError> {
        debug!(tick = frame.tick(); "Rendering SVG frame");
        self.document = Some(self.render_document(frame.scene(), frame.positions()));
        self.tick = Some(frame.tick());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use settle_core::{
        geometry::Point,
        identifier::NodeId,
        scene::{NodeKind, SceneEdge, SceneNode},
    };

    use super::*;

    fn scene() -> Scene {
        Scene::new(
            vec![
                SceneNode::new(
                    NodeId::new(0),
                    "Search",
                    NodeKind::Product,
                    "#f28e2b",
                    400.0,
                    Point::new(100.0, 100.0),
                    17.0,
                ),
                SceneNode::new(
                    NodeId::new(1),
                    "Queries",
                    NodeKind::Cluster,
                    "not-a-color",
                    400.0,
                    Point::new(200.0, 150.0),
                    14.0,
                ),
            ],
            vec![SceneEdge::new(NodeId::new(0), NodeId::new(1), 2000.0)],
        )
    }

    fn positions(scene: &Scene) -> Positions {
        scene
            .nodes()
            .iter()
            .map(|node| (node.id(), node.position()))
            .collect()
    }

    #[test]
    fn test_no_frame_is_an_error() {
        let sink = SvgSink::new(Size::new(600.0, 450.0), Color::default());
        assert!(matches!(sink.to_svg_string(), Err(SettleError::Export(_))));
        assert!(sink.document().is_none());
    }

    #[test]
    fn test_renders_edges_nodes_and_labels() {
        let scene = scene();
        let mut sink = SvgSink::new(Size::new(600.0, 450.0), Color::new("#0a0a0f").unwrap());

        sink.render(&Frame::new(7, positions(&scene), &scene)).unwrap();
        let svg = sink.to_svg_string().unwrap();

        assert_eq!(sink.tick(), Some(7));
        assert!(svg.contains(r#"viewBox="0 0 600 450""#));
        assert_eq!(svg.matches("<line").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains(r#"stroke-width="3""#));
        assert!(svg.contains(">Search</text>") || svg.contains(">\nSearch\n</text>"));
        assert!(svg.contains("Queries"));
        // Label sits below the node: 100 + 17 + 14
        assert!(svg.contains(r#"y="131""#));
    }

    #[test]
    fn test_latest_frame_replaces_previous() {
        let scene = scene();
        let mut sink = SvgSink::new(Size::new(600.0, 450.0), Color::default());

        sink.render(&Frame::new(1, positions(&scene), &scene)).unwrap();
        let moved: Positions = [
            (NodeId::new(0), Point::new(321.0, 100.0)),
            (NodeId::new(1), Point::new(200.0, 150.0)),
        ]
        .into_iter()
        .collect();
        sink.render(&Frame::new(2, moved, &scene)).unwrap();

        let svg = sink.to_svg_string().unwrap();
        assert_eq!(sink.tick(), Some(2));
        assert!(svg.contains(r#"cx="321""#));
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn test_skips_nodes_missing_from_frame() {
        let scene = scene();
        let mut sink = SvgSink::new(Size::new(600.0, 450.0), Color::default());
        let partial: Positions = [(NodeId::new(0), Point::new(10.0, 10.0))]
            .into_iter()
            .collect();

        sink.render(&Frame::new(0, partial, &scene)).unwrap();
        let svg = sink.to_svg_string().unwrap();
        assert_eq!(svg.matches("<circle").count(), 1);
        assert_eq!(svg.matches("<line").count(), 0);
    }
}
