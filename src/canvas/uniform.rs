use crate::math::{Mat4, ortho};

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    transform: [[f32; 4]; 4],
}

impl Uniforms {
    pub fn new() -> Self {
        Self {
            transform: Mat4::identity().into(),
        }
    }

    /// Rebuilds the projection so canvas geometry is addressed in
    /// window pixels, origin top-left.
    pub fn update(&mut self, window_size: (f32, f32)) {
        self.transform = ortho(0.0, window_size.0, window_size.1, 0.0, -1.0, 1.0).into();
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new()
    }
}
