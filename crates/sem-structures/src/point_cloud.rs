// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unordered XYZ point sets, the geometric representation a feature may take.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SemError};

/// Single XYZ point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Organized point cloud of `height` rows by `width` points.
///
/// Invariant: `points.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointCloud {
    width: usize,
    height: usize,
    points: Vec<Point3>,
}

impl PointCloud {
    /// Create an organized cloud.
    ///
    /// # Errors
    /// `SemError::Shape` if the number of points does not match `width * height`.
    pub fn new(width: usize, height: usize, points: Vec<Point3>) -> Result<Self> {
        if points.len() != width * height {
            return Err(SemError::shape(format!(
                "point count {} does not match {}x{} cloud",
                points.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            points,
        })
    }

    /// Unorganized cloud: a single row holding every point
    pub fn from_points(points: Vec<Point3>) -> Self {
        let width = points.len();
        let height = if width == 0 { 0 } else { 1 };
        Self {
            width,
            height,
            points,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }
}
