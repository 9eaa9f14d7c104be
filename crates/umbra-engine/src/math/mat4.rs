use super::Vec3;

/// Column-major 4x4 matrix.
///
/// `cols[c][r]` addresses column `c`, row `r`, so the flat memory order
/// matches WGSL `mat4x4<f32>` and can be uploaded without transposition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    pub fn transpose(self) -> Mat4 {
        let m = self.cols;
        Mat4::from_cols([
            [m[0][0], m[1][0], m[2][0], m[3][0]],
            [m[0][1], m[1][1], m[2][1], m[3][1]],
            [m[0][2], m[1][2], m[2][2], m[3][2]],
            [m[0][3], m[1][3], m[2][3], m[3][3]],
        ])
    }

    pub fn mul(self, rhs: Mat4) -> Mat4 {
        let a = self.cols;
        let b = rhs.cols;
        let mut out = [[0.0f32; 4]; 4];
        for c in 0..4 {
            for r in 0..4 {
                out[c][r] = a[0][r] * b[c][0]
                    + a[1][r] * b[c][1]
                    + a[2][r] * b[c][2]
                    + a[3][r] * b[c][3];
            }
        }
        Mat4::from_cols(out)
    }

    /// Right-handed perspective projection with a [0, 1] depth range.
    ///
    /// `fov_y` is the vertical field of view in radians.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (fov_y * 0.5).tan();
        let range = near - far;
        Mat4::from_cols([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, far / range, -1.0],
            [0.0, 0.0, (near * far) / range, 0.0],
        ])
    }

    /// Camera-to-world transform for a camera at `eye` looking at `target`.
    ///
    /// This is the inverse-free construction: the rotation columns are the
    /// camera basis vectors and the translation column is `eye` itself.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalized();
        let right = forward.cross(up).normalized();
        let cam_up = right.cross(forward);

        // Camera space looks down -Z.
        Mat4::from_cols([
            [right.x, right.y, right.z, 0.0],
            [cam_up.x, cam_up.y, cam_up.z, 0.0],
            [-forward.x, -forward.y, -forward.z, 0.0],
            [eye.x, eye.y, eye.z, 1.0],
        ])
    }

    /// General 4x4 inverse via cofactor expansion.
    ///
    /// Returns `None` when the matrix is singular (|det| below epsilon).
    pub fn inverse(self) -> Option<Mat4> {
        // Work on the row-major transposition; the cofactor formulas below
        // are written for row-major m[r][c].
        let t = self.transpose().cols;
        let m = |r: usize, c: usize| t[r][c];

        let s0 = m(0, 0) * m(1, 1) - m(1, 0) * m(0, 1);
        let s1 = m(0, 0) * m(1, 2) - m(1, 0) * m(0, 2);
        let s2 = m(0, 0) * m(1, 3) - m(1, 0) * m(0, 3);
        let s3 = m(0, 1) * m(1, 2) - m(1, 1) * m(0, 2);
        let s4 = m(0, 1) * m(1, 3) - m(1, 1) * m(0, 3);
        let s5 = m(0, 2) * m(1, 3) - m(1, 2) * m(0, 3);

        let c5 = m(2, 2) * m(3, 3) - m(3, 2) * m(2, 3);
        let c4 = m(2, 1) * m(3, 3) - m(3, 1) * m(2, 3);
        let c3 = m(2, 1) * m(3, 2) - m(3, 1) * m(2, 2);
        let c2 = m(2, 0) * m(3, 3) - m(3, 0) * m(2, 3);
        let c1 = m(2, 0) * m(3, 2) - m(3, 0) * m(2, 2);
        let c0 = m(2, 0) * m(3, 1) - m(3, 0) * m(2, 1);

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;
        if det.abs() < 1e-12 {
            return None;
        }
        let inv_det = 1.0 / det;

        // Row-major adjugate rows.
        let rows = [
            [
                (m(1, 1) * c5 - m(1, 2) * c4 + m(1, 3) * c3) * inv_det,
                (-m(0, 1) * c5 + m(0, 2) * c4 - m(0, 3) * c3) * inv_det,
                (m(3, 1) * s5 - m(3, 2) * s4 + m(3, 3) * s3) * inv_det,
                (-m(2, 1) * s5 + m(2, 2) * s4 - m(2, 3) * s3) * inv_det,
            ],
            [
                (-m(1, 0) * c5 + m(1, 2) * c2 - m(1, 3) * c1) * inv_det,
                (m(0, 0) * c5 - m(0, 2) * c2 + m(0, 3) * c1) * inv_det,
                (-m(3, 0) * s5 + m(3, 2) * s2 - m(3, 3) * s1) * inv_det,
                (m(2, 0) * s5 - m(2, 2) * s2 + m(2, 3) * s1) * inv_det,
            ],
            [
                (m(1, 0) * c4 - m(1, 1) * c2 + m(1, 3) * c0) * inv_det,
                (-m(0, 0) * c4 + m(0, 1) * c2 - m(0, 3) * c0) * inv_det,
                (m(3, 0) * s4 - m(3, 1) * s2 + m(3, 3) * s0) * inv_det,
                (-m(2, 0) * s4 + m(2, 1) * s2 - m(2, 3) * s0) * inv_det,
            ],
            [
                (-m(1, 0) * c3 + m(1, 1) * c1 - m(1, 2) * c0) * inv_det,
                (m(0, 0) * c3 - m(0, 1) * c1 + m(0, 2) * c0) * inv_det,
                (-m(3, 0) * s3 + m(3, 1) * s1 - m(3, 2) * s0) * inv_det,
                (m(2, 0) * s3 - m(2, 1) * s1 + m(2, 2) * s0) * inv_det,
            ],
        ];

        // Back to column-major.
        Some(Mat4::from_cols(rows).transpose())
    }

    /// Flat column-major array, the upload form for uniform blocks.
    #[inline]
    pub fn to_cols_array_2d(self) -> [[f32; 4]; 4] {
        self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Mat4, b: Mat4, eps: f32) -> bool {
        for c in 0..4 {
            for r in 0..4 {
                if (a.cols[c][r] - b.cols[c][r]).abs() > eps {
                    return false;
                }
            }
        }
        true
    }

    // ── multiply / transpose ──────────────────────────────────────────────

    #[test]
    fn identity_is_multiplicative_neutral() {
        let m = Mat4::perspective(1.0, 1.6, 0.1, 100.0);
        assert!(approx_eq(m.mul(Mat4::IDENTITY), m, 1e-6));
        assert!(approx_eq(Mat4::IDENTITY.mul(m), m, 1e-6));
    }

    #[test]
    fn transpose_is_involution() {
        let m = Mat4::look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::UP);
        assert!(approx_eq(m.transpose().transpose(), m, 0.0));
    }

    // ── inverse ───────────────────────────────────────────────────────────

    #[test]
    fn inverse_of_identity_is_identity() {
        let inv = Mat4::IDENTITY.inverse().unwrap();
        assert!(approx_eq(inv, Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn perspective_times_its_inverse_is_identity() {
        let p = Mat4::perspective(1.2, 16.0 / 9.0, 0.1, 500.0);
        let inv = p.inverse().unwrap();
        assert!(approx_eq(p.mul(inv), Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let zero = Mat4::from_cols([[0.0; 4]; 4]);
        assert!(zero.inverse().is_none());
    }

    // ── look_at ───────────────────────────────────────────────────────────

    #[test]
    fn look_at_translation_column_is_eye() {
        let eye = Vec3::new(4.0, 5.0, 6.0);
        let m = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        assert_eq!(m.cols[3][0], eye.x);
        assert_eq!(m.cols[3][1], eye.y);
        assert_eq!(m.cols[3][2], eye.z);
    }

    #[test]
    fn look_at_basis_is_orthonormal() {
        let m = Mat4::look_at(Vec3::new(3.0, 2.0, 7.0), Vec3::ZERO, Vec3::UP);
        let right = Vec3::new(m.cols[0][0], m.cols[0][1], m.cols[0][2]);
        let up = Vec3::new(m.cols[1][0], m.cols[1][1], m.cols[1][2]);
        let back = Vec3::new(m.cols[2][0], m.cols[2][1], m.cols[2][2]);

        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!((back.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);
        assert!(right.dot(back).abs() < 1e-5);
        assert!(up.dot(back).abs() < 1e-5);
    }
}
