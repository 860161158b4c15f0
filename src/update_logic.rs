use crate::app_state::State;
use crate::document::{CANVAS_ID, FILL_SWATCH_ID, STROKE_SWATCH_ID};
use crate::surface::BLACK;
use wgpu::util::DeviceExt;

impl State {
    /// Uploads the accumulated canvas mesh and the palette geometry
    /// for this frame.
    pub fn update(&mut self) {
        self.update_canvas_buffers();

        let stroke_color = self
            .document
            .swatch_color(STROKE_SWATCH_ID)
            .unwrap_or(BLACK);
        let fill_color = self.document.swatch_color(FILL_SWATCH_ID).unwrap_or(BLACK);

        let (ui_vertices, ui_indices) = self.palette.generate_ui_vertices(
            stroke_color,
            fill_color,
            self.input.drag_source.as_deref(),
        );

        if !ui_vertices.is_empty() {
            self.ui_geo.vertex = Some(self.gpu.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("UI Vertex Buffer"),
                    contents: bytemuck::cast_slice(&ui_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            ));

            self.ui_geo.index = Some(self.gpu.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("UI Index Buffer"),
                    contents: bytemuck::cast_slice(&ui_indices),
                    usage: wgpu::BufferUsages::INDEX,
                },
            ));

            self.ui_geo.count = ui_indices.len() as u32;
        }
    }

    fn update_canvas_buffers(&mut self) {
        let Some(surface) = self.document.surface(CANVAS_ID) else {
            return;
        };
        let (vertices, indices) = surface.mesh();

        if !vertices.is_empty() {
            self.geometry.vertex = Some(self.gpu.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Vertex Buffer"),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            ));

            self.geometry.index = Some(self.gpu.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Index Buffer"),
                    contents: bytemuck::cast_slice(indices),
                    usage: wgpu::BufferUsages::INDEX,
                },
            ));

            self.geometry.count = indices.len() as u32;
        } else {
            self.geometry.vertex = None;
            self.geometry.index = None;
            self.geometry.count = 0;
        }
    }
}
