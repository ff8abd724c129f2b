//! Rigid transforms, placement frames and bounding boxes.

use crate::{Error, Result};
use nalgebra::{Point3, Rotation3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vectors shorter than this are treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// A 3D rigid transformation (rotation, then translation).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform3D {
    /// World-space position of the local origin.
    pub position: Point3<f64>,
    /// Orientation of the local axes.
    pub rotation: Rotation3<f64>,
}

impl Transform3D {
    /// Creates a new identity transform.
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: Rotation3::identity(),
        }
    }

    /// Creates a transform from position and rotation.
    pub fn new(position: Point3<f64>, rotation: Rotation3<f64>) -> Self {
        Self { position, rotation }
    }

    /// Transforms a local point into world space.
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.position + self.rotation * point.coords
    }

    /// Transforms a slice of local points into world space.
    pub fn transform_points(&self, points: &[Point3<f64>]) -> Vec<Point3<f64>> {
        points.iter().map(|p| self.transform_point(p)).collect()
    }

    /// Composes two transforms: `other` is applied first, then `self`.
    pub fn then(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(&other.position),
            rotation: self.rotation * other.rotation,
        }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Orthonormal placement frame of a shelf or stack.
///
/// Local X runs along the placement direction, local Z along the normal and
/// local Y along `normal × direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// World-space origin.
    pub origin: Point3<f64>,
    /// Columns are the local X, Y and Z axes in world space.
    pub basis: Rotation3<f64>,
}

impl Frame {
    /// Builds a frame from a direction and a normal.
    ///
    /// The normal is made orthogonal to the direction. Fails if the direction
    /// has no length or the normal is parallel to it.
    pub fn from_direction_normal(
        origin: Point3<f64>,
        direction: &Vector3<f64>,
        normal: &Vector3<f64>,
    ) -> Result<Self> {
        if !origin.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidAnchor("origin must be finite".into()));
        }

        let x_axis = direction
            .try_normalize(DEGENERATE_EPSILON)
            .ok_or_else(|| Error::InvalidAnchor("direction has zero length".into()))?;

        let z_axis = (normal - x_axis * normal.dot(&x_axis))
            .try_normalize(DEGENERATE_EPSILON)
            .ok_or_else(|| {
                Error::InvalidAnchor("normal is zero or parallel to the direction".into())
            })?;

        let y_axis = z_axis.cross(&x_axis);

        Ok(Self {
            origin,
            basis: Rotation3::from_basis_unchecked(&[x_axis, y_axis, z_axis]),
        })
    }

    /// The frame as a transform from frame-local to world space.
    pub fn to_transform(&self) -> Transform3D {
        Transform3D::new(self.origin, self.basis)
    }

    /// Maps a frame-local offset to a world-space point.
    pub fn to_world(&self, local: &Vector3<f64>) -> Point3<f64> {
        self.origin + self.basis * *local
    }

    /// Placement direction in world space.
    pub fn direction(&self) -> Vector3<f64> {
        self.basis * Vector3::x()
    }

    /// Depth axis in world space.
    pub fn depth_axis(&self) -> Vector3<f64> {
        self.basis * Vector3::y()
    }

    /// Normal in world space.
    pub fn normal(&self) -> Vector3<f64> {
        self.basis * Vector3::z()
    }
}

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AABB3D {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl AABB3D {
    /// Creates a new AABB from its corners.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from a set of points.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut aabb = Self::new(*first, *first);
        for p in rest {
            aabb.min = aabb.min.inf(p);
            aabb.max = aabb.max.sup(p);
        }
        Some(aabb)
    }

    /// Returns the union (bounding box) of two AABBs.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }
}
