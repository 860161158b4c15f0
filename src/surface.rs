use crate::math::TAU;
use crate::vertex::Vertex;

pub type Rgba = [f32; 4];

pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];

/// 2D drawing surface boundary, mirroring the platform drawing context
/// the drop handler issues calls against.
pub trait Surface2d {
    fn set_stroke_style(&mut self, color: Rgba);
    fn set_fill_style(&mut self, color: Rgba);
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn begin_path(&mut self);
    fn arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    );
    fn stroke(&mut self);
    fn fill(&mut self);
    fn close_path(&mut self);
}

const CIRCLE_SEGMENTS: u32 = 32;

/// Drawing surface that tessellates primitive calls into a triangle
/// mesh for the GPU renderer. Geometry accumulates across drops; the
/// renderer uploads the mesh each frame.
pub struct MeshSurface {
    stroke_style: Rgba,
    fill_style: Rgba,
    stroke_width: f32,
    path: Vec<[f32; 2]>,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    index_offset: u16,
}

impl MeshSurface {
    pub fn new() -> Self {
        Self {
            stroke_style: BLACK,
            fill_style: BLACK,
            stroke_width: 2.0,
            path: Vec::new(),
            vertices: Vec::new(),
            indices: Vec::new(),
            index_offset: 0,
        }
    }

    pub fn mesh(&self) -> (&[Vertex], &[u16]) {
        (&self.vertices, &self.indices)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.path.clear();
        self.vertices.clear();
        self.indices.clear();
        self.index_offset = 0;
    }

    fn push_line(&mut self, start: [f32; 2], end: [f32; 2], width: f32, color: Rgba) {
        let dx = end[0] - start[0];
        let dy = end[1] - start[1];
        let len = (dx * dx + dy * dy).sqrt();
        if len > 0.0 {
            let nx = -dy / len * width * 0.5;
            let ny = dx / len * width * 0.5;

            self.vertices.extend_from_slice(&[
                Vertex {
                    position: [start[0] - nx, start[1] - ny],
                    color,
                },
                Vertex {
                    position: [start[0] + nx, start[1] + ny],
                    color,
                },
                Vertex {
                    position: [end[0] + nx, end[1] + ny],
                    color,
                },
                Vertex {
                    position: [end[0] - nx, end[1] - ny],
                    color,
                },
            ]);
            self.indices.extend_from_slice(&[
                self.index_offset,
                self.index_offset + 1,
                self.index_offset + 2,
                self.index_offset,
                self.index_offset + 2,
                self.index_offset + 3,
            ]);
            self.index_offset += 4;
        }
    }

    fn push_quad(&mut self, corners: [[f32; 2]; 4], color: Rgba) {
        for corner in corners {
            self.vertices.push(Vertex {
                position: corner,
                color,
            });
        }
        self.indices.extend_from_slice(&[
            self.index_offset,
            self.index_offset + 1,
            self.index_offset + 2,
            self.index_offset,
            self.index_offset + 2,
            self.index_offset + 3,
        ]);
        self.index_offset += 4;
    }

    fn path_centroid(&self) -> Option<[f32; 2]> {
        if self.path.is_empty() {
            return None;
        }
        let n = self.path.len() as f32;
        let sum = self
            .path
            .iter()
            .fold([0.0f32, 0.0], |acc, p| [acc[0] + p[0], acc[1] + p[1]]);
        Some([sum[0] / n, sum[1] / n])
    }
}

impl Default for MeshSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface2d for MeshSurface {
    fn set_stroke_style(&mut self, color: Rgba) {
        self.stroke_style = color;
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.fill_style = color;
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let corners = [
            [x, y],
            [x + width, y],
            [x + width, y + height],
            [x, y + height],
        ];
        let color = self.stroke_style;
        let stroke_width = self.stroke_width;
        for i in 0..4 {
            self.push_line(corners[i], corners[(i + 1) % 4], stroke_width, color);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let color = self.fill_style;
        self.push_quad(
            [
                [x, y],
                [x + width, y],
                [x + width, y + height],
                [x, y + height],
            ],
            color,
        );
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        counterclockwise: bool,
    ) {
        let mut sweep = end_angle - start_angle;
        if sweep.abs() >= TAU {
            sweep = if counterclockwise { -TAU } else { TAU };
        } else if counterclockwise && sweep > 0.0 {
            sweep -= TAU;
        } else if !counterclockwise && sweep < 0.0 {
            sweep += TAU;
        }

        let segments = ((CIRCLE_SEGMENTS as f32 * sweep.abs() / TAU).ceil() as u32).max(1);
        for i in 0..=segments {
            let angle = start_angle + sweep * (i as f32 / segments as f32);
            self.path
                .push([cx + angle.cos() * radius, cy + angle.sin() * radius]);
        }
    }

    fn stroke(&mut self) {
        let color = self.stroke_style;
        let stroke_width = self.stroke_width;
        let path = std::mem::take(&mut self.path);
        for pair in path.windows(2) {
            self.push_line(pair[0], pair[1], stroke_width, color);
        }
        self.path = path;
    }

    fn fill(&mut self) {
        let Some(centroid) = self.path_centroid() else {
            return;
        };
        let color = self.fill_style;
        let center_index = self.index_offset;
        self.vertices.push(Vertex {
            position: centroid,
            color,
        });

        let ring = self.path.clone();
        for point in &ring {
            self.vertices.push(Vertex {
                position: *point,
                color,
            });
        }
        let ring_len = ring.len() as u16;
        for i in 0..ring_len.saturating_sub(1) {
            self.indices.extend_from_slice(&[
                center_index,
                center_index + 1 + i,
                center_index + 2 + i,
            ]);
        }
        self.index_offset += 1 + ring_len;
    }

    fn close_path(&mut self) {
        self.path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_rect_emits_four_edge_quads() {
        let mut surface = MeshSurface::new();
        surface.stroke_rect(10.0, 10.0, 100.0, 50.0);
        let (vertices, indices) = surface.mesh();
        assert_eq!(vertices.len(), 16);
        assert_eq!(indices.len(), 24);
    }

    #[test]
    fn fill_rect_emits_one_quad_in_fill_color() {
        let mut surface = MeshSurface::new();
        surface.set_fill_style([1.0, 0.0, 0.0, 1.0]);
        surface.fill_rect(0.0, 0.0, 20.0, 20.0);
        let (vertices, indices) = surface.mesh();
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 6);
        assert!(vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn full_arc_then_stroke_outlines_a_circle() {
        let mut surface = MeshSurface::new();
        surface.begin_path();
        surface.arc(50.0, 50.0, 25.0, 0.0, TAU, true);
        surface.stroke();
        surface.close_path();
        let (vertices, _) = surface.mesh();
        // 32 chords, 4 vertices each
        assert_eq!(vertices.len(), 128);
        for v in vertices {
            let dx = v.position[0] - 50.0;
            let dy = v.position[1] - 50.0;
            let dist = (dx * dx + dy * dy).sqrt();
            assert!((dist - 25.0).abs() < 2.0, "vertex off the ring: {dist}");
        }
    }

    #[test]
    fn fill_fans_around_the_path_centroid() {
        let mut surface = MeshSurface::new();
        surface.begin_path();
        surface.arc(0.0, 0.0, 10.0, 0.0, TAU, true);
        surface.fill();
        surface.close_path();
        let (vertices, indices) = surface.mesh();
        // center + 33 ring points, 32 triangles
        assert_eq!(vertices.len(), 34);
        assert_eq!(indices.len(), 96);
        let center = vertices[0].position;
        assert!(center[0].abs() < 0.5 && center[1].abs() < 0.5);
    }

    #[test]
    fn fill_without_a_path_draws_nothing() {
        let mut surface = MeshSurface::new();
        surface.fill();
        assert!(surface.is_empty());
    }

    #[test]
    fn clear_resets_accumulated_geometry() {
        let mut surface = MeshSurface::new();
        surface.fill_rect(0.0, 0.0, 5.0, 5.0);
        assert!(!surface.is_empty());
        surface.clear();
        assert!(surface.is_empty());
        let (_, indices) = surface.mesh();
        assert!(indices.is_empty());
    }
}
