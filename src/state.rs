use wgpu::{BindGroup, Buffer, Device, Queue, RenderPipeline, Surface, SurfaceConfiguration};

use crate::canvas::Uniforms;
use crate::payload::DataTransfer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInputState {
    Idle,
    /// A palette item is being dragged toward the canvas.
    DraggingShape,
}

pub struct GpuContext<'a> {
    pub surface: Surface<'a>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    pub render_pipeline: RenderPipeline,
    pub ui_render_pipeline: RenderPipeline,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UiScreenUniforms {
    pub screen_size: [f32; 2],
    pub _padding: [f32; 2], // Padding to make it 16-byte aligned
}

pub struct UiScreenBuffers {
    pub uniform: Buffer,
    pub bind_group: BindGroup,
}

pub struct Canvas {
    pub uniform: Uniforms,
    pub uniform_buffer: Buffer,
    pub uniform_bind_group: BindGroup,
}

pub struct GeometryBuffers {
    pub vertex: Option<Buffer>,
    pub index: Option<Buffer>,
    pub count: u32,
}

pub struct UiBuffers {
    pub vertex: Option<Buffer>,
    pub index: Option<Buffer>,
    pub count: u32,
}

pub struct InputState {
    pub mouse_pos: [f32; 2],
    pub state: UserInputState,
    /// Transfer channel filled by dragstart, consumed by the drop.
    pub transfer: Option<DataTransfer>,
    /// Source id of the palette item currently being dragged.
    pub drag_source: Option<String>,
    /// Set once a dragover has suppressed the default reject action.
    pub drop_allowed: bool,
}
