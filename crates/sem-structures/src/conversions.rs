// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Conversions between dense matrices and point clouds.
//!
//! Both directions deep-copy: the result never aliases its source.

use ndarray::Array2;

use crate::error::{Result, SemError};
use crate::point_cloud::{Point3, PointCloud};

/// Convert a dense matrix of floats to an XYZ point cloud.
///
/// - Empty matrix: empty cloud
/// - Columns divisible by 3: one point per 3 consecutive elements
/// - Otherwise columns divisible by 4: one point per 4 elements, the 4th is ignored
///
/// The resulting cloud is `cols / group` points wide and `rows` high.
///
/// # Errors
/// `SemError::Shape` when the column count is a multiple of neither 3 nor 4.
pub fn mat_to_cloud(m: &Array2<f32>) -> Result<PointCloud> {
    if m.is_empty() {
        return Ok(PointCloud::empty());
    }

    let (rows, cols) = m.dim();
    let group = if cols % 3 == 0 {
        3
    } else if cols % 4 == 0 {
        4
    } else {
        return Err(SemError::shape(format!(
            "Failed to convert {}x{} matrix to point cloud. No. of columns must be a multiple of 3",
            rows, cols
        )));
    };

    // logical (row-major) order regardless of memory layout
    let flat: Vec<f32> = m.iter().copied().collect();
    let points = flat
        .chunks_exact(group)
        .map(|p| Point3::new(p[0], p[1], p[2]))
        .collect();

    PointCloud::new(cols / group, rows, points)
}

/// Convert an XYZ point cloud to a dense matrix.
///
/// Each point occupies 4 columns `x, y, z, 1.0`, so the result is
/// `height` x `width * 4`.
pub fn cloud_to_mat(cloud: &PointCloud) -> Result<Array2<f32>> {
    if cloud.is_empty() {
        return Ok(Array2::zeros((0, 0)));
    }

    let mut data = Vec::with_capacity(cloud.len() * 4);
    for p in cloud.iter() {
        data.extend_from_slice(&[p.x, p.y, p.z, 1.0]);
    }

    Array2::from_shape_vec((cloud.height(), cloud.width() * 4), data)
        .map_err(|e| SemError::shape(format!("Failed to convert point cloud to matrix: {}", e)))
}
