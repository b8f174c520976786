//! Rendering module
//!
//! The simulation hands its scene to a [`Renderer`] once per frame.
//! [`MeshRenderer`] turns every visible body into a flat triangle list that a
//! GPU host can upload as-is.

pub mod shapes;
pub mod vertex;

use glam::DVec2;

use crate::board::BoardScene;
pub use shapes::Viewport;
pub use vertex::Vertex;

/// Drawing collaborator driven by the session loop
pub trait Renderer {
    /// Set the world-space rectangle that fills the view
    fn init(&mut self, min: DVec2, max: DVec2);

    /// Draw the current set of bodies
    fn draw(&mut self, scene: &BoardScene);
}

/// Builds one vertex batch per frame on the CPU
#[derive(Debug, Default)]
pub struct MeshRenderer {
    viewport: Viewport,
    vertices: Vec<Vertex>,
    frames: u64,
}

impl MeshRenderer {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self {
            viewport: Viewport::new(min, max),
            vertices: Vec::new(),
            frames: 0,
        }
    }

    /// Vertices produced by the last `draw`
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The last batch as raw bytes, ready for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for MeshRenderer {
    fn init(&mut self, min: DVec2, max: DVec2) {
        self.viewport = Viewport::new(min, max);
        self.vertices.clear();
    }

    fn draw(&mut self, scene: &BoardScene) {
        self.vertices.clear();
        for body in scene.iter().filter(|b| !b.is_removed()) {
            // The gravity source sits far below the view
            if !self.viewport.intersects(body.shape()) {
                continue;
            }
            self.vertices.extend(shapes::convex_polygon(
                body.shape(),
                body.centroid(),
                body.color().to_rgba(),
                &self.viewport,
            ));
        }
        self.frames += 1;
    }
}
