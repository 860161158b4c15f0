use crate::math::Vec3;

/// Column-major 4x4 matrix; `data[i]` is column `i`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Self { data }
    }

    pub fn identity() -> Self {
        Self {
            data: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let x = self.data[0][0] * point.x
            + self.data[1][0] * point.y
            + self.data[2][0] * point.z
            + self.data[3][0];
        let y = self.data[0][1] * point.x
            + self.data[1][1] * point.y
            + self.data[2][1] * point.z
            + self.data[3][1];
        let z = self.data[0][2] * point.x
            + self.data[1][2] * point.y
            + self.data[2][2] * point.z
            + self.data[3][2];
        let w = self.data[0][3] * point.x
            + self.data[1][3] * point.y
            + self.data[2][3] * point.z
            + self.data[3][3];

        if w != 0.0 {
            Vec3::new(x / w, y / w, z / w)
        } else {
            Vec3::new(x, y, z)
        }
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(mat: Mat4) -> Self {
        mat.data
    }
}

impl From<[[f32; 4]; 4]> for Mat4 {
    fn from(data: [[f32; 4]; 4]) -> Self {
        Self { data }
    }
}

unsafe impl bytemuck::Pod for Mat4 {}
unsafe impl bytemuck::Zeroable for Mat4 {}
