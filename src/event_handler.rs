use crate::app_state::State;
use crate::dnd::{self, DragEvent};
use crate::document::CANVAS_ID;
use crate::state::UserInputState::{DraggingShape, Idle};
use crate::surface::BLACK;

use winit::event::*;

impl State {
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.gpu.config.width = new_size.width;
            self.gpu.config.height = new_size.height;
            self.gpu
                .surface
                .configure(&self.gpu.device, &self.gpu.config);

            self.canvas
                .uniform
                .update((new_size.width as f32, new_size.height as f32));
            self.gpu.queue.write_buffer(
                &self.canvas.uniform_buffer,
                0,
                bytemuck::cast_slice(&[self.canvas.uniform]),
            );

            let ui_screen_uniforms = crate::state::UiScreenUniforms {
                screen_size: [new_size.width as f32, new_size.height as f32],
                _padding: [0.0, 0.0],
            };
            self.gpu.queue.write_buffer(
                &self.ui_screen.uniform,
                0,
                bytemuck::cast_slice(&[ui_screen_uniforms]),
            );
        }
    }

    pub fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                match state {
                    ElementState::Pressed => self.on_mouse_pressed(),
                    ElementState::Released => self.on_mouse_released(),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.mouse_pos = [position.x as f32, position.y as f32];

                if self.input.state == DraggingShape {
                    // dragover: the canvas rejects drops unless the
                    // default action is suppressed
                    if !self.palette.is_over_ui(self.input.mouse_pos) {
                        let mut dragover = DragEvent::new(CANVAS_ID, self.input.mouse_pos);
                        match dnd::allow_drop(Some(&mut dragover)) {
                            Ok(()) => self.input.drop_allowed = dragover.default_prevented(),
                            Err(err) => log::warn!("dragover rejected: {err}"),
                        }
                    }
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    fn on_mouse_pressed(&mut self) -> bool {
        let mouse_pos = self.input.mouse_pos;

        if let Some((source_id, offset)) = self.palette.hit_source(mouse_pos) {
            let mut dragstart = DragEvent::new(source_id.clone(), offset);
            match dnd::begin_drag(Some(&mut dragstart)) {
                Ok(()) => {
                    self.input.transfer = Some(dragstart.data_transfer);
                    self.input.drag_source = Some(source_id);
                    self.input.state = DraggingShape;
                    self.input.drop_allowed = false;
                }
                Err(err) => log::warn!("dragstart failed: {err}"),
            }
            return true;
        }

        if let Some(swatch_id) = self.palette.hit_swatch(mouse_pos) {
            let current = self.document.swatch_color(swatch_id).unwrap_or(BLACK);
            let next = crate::ui::PaletteRenderer::next_color(current);
            self.document.set_background(swatch_id, next);
            return true;
        }

        self.palette.is_over_ui(mouse_pos)
    }

    fn on_mouse_released(&mut self) -> bool {
        if self.input.state != DraggingShape {
            return false;
        }

        let over_canvas =
            self.input.drop_allowed && !self.palette.is_over_ui(self.input.mouse_pos);
        if over_canvas {
            let mut drop = DragEvent::new(CANVAS_ID, self.input.mouse_pos);
            drop.data_transfer = self.input.transfer.take().unwrap_or_default();

            match dnd::drop_into_canvas(Some(&mut drop), &mut self.document, &mut self.history) {
                Ok(placed) => log::debug!("placement recorded: {:?}", placed.id),
                Err(err) => log::warn!("drop rejected: {err}"),
            }
        }

        self.input.state = Idle;
        self.input.transfer = None;
        self.input.drag_source = None;
        self.input.drop_allowed = false;
        true
    }
}
