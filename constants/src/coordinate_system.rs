/// Rows negated on the view-projection matrix: the rasteriser mirrors the
/// canvas X and Y axes of a GL perspective. Row 2 (clip depth) is left
/// intact so depth keys grow with distance from the camera.
pub const VIEW_PROJECTION_ROW_FLIPS: [usize; 2] = [0, 1];

/// Negate one row of a column-major 4x4 matrix.
pub fn negate_row(matrix: &mut [f32; 16], row: usize) {
    debug_assert!(row < 4);
    for column in 0..4 {
        matrix[column * 4 + row] = -matrix[column * 4 + row];
    }
}

/// Apply a set of row negations to a column-major matrix.
pub fn to_rasteriser_convention(mut matrix: [f32; 16], rows: &[usize]) -> [f32; 16] {
    for &row in rows {
        negate_row(&mut matrix, row);
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negate_row_touches_only_that_row() {
        let mut m: [f32; 16] = std::array::from_fn(|i| i as f32 + 1.0);
        negate_row(&mut m, 1);
        assert_eq!(m[1], -2.0);
        assert_eq!(m[5], -6.0);
        assert_eq!(m[9], -10.0);
        assert_eq!(m[13], -14.0);
        assert_eq!(m[0], 1.0);
        assert_eq!(m[2], 3.0);
    }

    #[test]
    fn view_projection_keeps_depth_row() {
        let m: [f32; 16] = std::array::from_fn(|i| i as f32 + 1.0);
        let flipped = to_rasteriser_convention(m, &VIEW_PROJECTION_ROW_FLIPS);
        for column in 0..4 {
            assert_eq!(flipped[column * 4 + 2], m[column * 4 + 2]);
            assert_eq!(flipped[column * 4], -m[column * 4]);
        }
    }
}
