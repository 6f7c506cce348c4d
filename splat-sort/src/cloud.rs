use glam::Vec3;

use crate::error::SplatError;

pub const POSITION_COMPONENTS: usize = 3;
pub const COLOR_COMPONENTS: usize = 3;
/// Upper triangle of the symmetric 3x3 covariance: xx, xy, xz, yy, yz, zz.
pub const COVARIANCE_COMPONENTS: usize = 6;

/// Immutable per-splat attributes for one loaded scene.
///
/// Attributes are stored as flat structure-of-arrays buffers, the layout the
/// GPU upload expects. A cloud is built once per scene load and replaced
/// wholesale on the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplatCloud {
    positions: Vec<f32>,
    colors: Vec<f32>,
    opacities: Vec<f32>,
    covariances: Vec<f32>,
    count: usize,
}

impl SplatCloud {
    /// Assemble a cloud of `count` splats, validating every attribute length.
    pub fn new(
        positions: Vec<f32>,
        colors: Vec<f32>,
        opacities: Vec<f32>,
        covariances: Vec<f32>,
        count: usize,
    ) -> Result<Self, SplatError> {
        check_length("positions", &positions, POSITION_COMPONENTS, count)?;
        check_length("colors", &colors, COLOR_COMPONENTS, count)?;
        check_length("opacities", &opacities, 1, count)?;
        check_length("covariances", &covariances, COVARIANCE_COMPONENTS, count)?;

        Ok(Self {
            positions,
            colors,
            opacities,
            covariances,
            count,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    pub fn covariances(&self) -> &[f32] {
        &self.covariances
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let start = index * POSITION_COMPONENTS;
        Vec3::from_slice(&self.positions[start..start + POSITION_COMPONENTS])
    }

    /// Axis-aligned bounds of all splat centres, or `None` for an empty cloud.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.is_empty() {
            return None;
        }

        let bounds = self
            .positions
            .chunks_exact(POSITION_COMPONENTS)
            .map(Vec3::from_slice)
            .fold((Vec3::INFINITY, Vec3::NEG_INFINITY), |(min, max), p| {
                (min.min(p), max.max(p))
            });

        Some(bounds)
    }
}

fn check_length(
    attribute: &'static str,
    values: &[f32],
    components: usize,
    count: usize,
) -> Result<(), SplatError> {
    let expected = count * components;
    if values.len() != expected {
        return Err(SplatError::AttributeLength {
            attribute,
            expected,
            actual: values.len(),
            count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud_of(count: usize) -> Result<SplatCloud, SplatError> {
        SplatCloud::new(
            vec![0.0; count * 3],
            vec![0.0; count * 3],
            vec![0.0; count],
            vec![0.0; count * 6],
            count,
        )
    }

    #[test]
    fn accepts_consistent_lengths() {
        let cloud = cloud_of(4).unwrap();
        assert_eq!(cloud.len(), 4);
        assert!(!cloud.is_empty());
    }

    #[test]
    fn empty_cloud_is_valid() {
        let cloud = cloud_of(0).unwrap();
        assert!(cloud.is_empty());
        assert_eq!(cloud.bounds(), None);
    }

    #[test]
    fn rejects_short_covariance() {
        let err = SplatCloud::new(
            vec![0.0; 6],
            vec![0.0; 6],
            vec![0.0; 2],
            vec![0.0; 11],
            2,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SplatError::AttributeLength {
                attribute: "covariances",
                expected: 12,
                actual: 11,
                count: 2,
            }
        );
    }

    #[test]
    fn bounds_cover_all_centres() {
        let cloud = SplatCloud::new(
            vec![1.0, -2.0, 0.5, -3.0, 4.0, 2.0],
            vec![0.0; 6],
            vec![1.0; 2],
            vec![0.0; 12],
            2,
        )
        .unwrap();

        let (min, max) = cloud.bounds().unwrap();
        assert_eq!(min, Vec3::new(-3.0, -2.0, 0.5));
        assert_eq!(max, Vec3::new(1.0, 4.0, 2.0));
        assert_eq!(cloud.position(1), Vec3::new(-3.0, 4.0, 2.0));
    }
}
