// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Typed feature values
//!
//! A [`TypedValue`] holds one logical feature in one of a closed set of
//! representations and converts lazily on request:
//!
//! ```text
//! get::<R>()
//!   stored variant is R  -> copy of the stored value
//!   cache holds an R     -> copy of the cache
//!   otherwise            -> convert, replace cache, return copy
//! ```
//!
//! At most one alternate representation is cached. Reassigning the value
//! (or calling [`TypedValue::reset`]) drops it, so the cost of a conversion is
//! paid at most once per assignment per target representation.

use std::cell::{Cell, RefCell};
use std::fmt;

use ndarray::Array2;
use tracing::trace;

use crate::conversions::{cloud_to_mat, mat_to_cloud};
use crate::error::Result;
use crate::point_cloud::PointCloud;

/// Tag naming a representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReprKind {
    Mat,
    Cloud,
}

impl fmt::Display for ReprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReprKind::Mat => write!(f, "Mat"),
            ReprKind::Cloud => write!(f, "Cloud"),
        }
    }
}

/// Closed set of representations a feature can be stored in
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureVariant {
    /// Dense row-major matrix of floats
    Mat(Array2<f32>),
    /// Organized XYZ point cloud
    Cloud(PointCloud),
}

impl FeatureVariant {
    pub fn kind(&self) -> ReprKind {
        match self {
            FeatureVariant::Mat(_) => ReprKind::Mat,
            FeatureVariant::Cloud(_) => ReprKind::Cloud,
        }
    }

    /// Total number of scalar elements
    pub fn total(&self) -> usize {
        match self {
            FeatureVariant::Mat(m) => m.len(),
            FeatureVariant::Cloud(c) => c.len() * 3,
        }
    }
}

impl From<Array2<f32>> for FeatureVariant {
    fn from(value: Array2<f32>) -> Self {
        FeatureVariant::Mat(value)
    }
}

impl From<PointCloud> for FeatureVariant {
    fn from(value: PointCloud) -> Self {
        FeatureVariant::Cloud(value)
    }
}

/// A concrete type a [`TypedValue`] can be read as.
pub trait Representation: Clone + Sized {
    const KIND: ReprKind;

    /// Borrow the value if `variant` already is this representation
    fn borrow_from(variant: &FeatureVariant) -> Option<&Self>;

    /// Convert from any other representation
    fn convert_from(variant: &FeatureVariant) -> Result<Self>;

    fn into_variant(self) -> FeatureVariant;
}

impl Representation for Array2<f32> {
    const KIND: ReprKind = ReprKind::Mat;

    fn borrow_from(variant: &FeatureVariant) -> Option<&Self> {
        match variant {
            FeatureVariant::Mat(m) => Some(m),
            _ => None,
        }
    }

    fn convert_from(variant: &FeatureVariant) -> Result<Self> {
        match variant {
            FeatureVariant::Mat(m) => Ok(m.clone()),
            FeatureVariant::Cloud(c) => cloud_to_mat(c),
        }
    }

    fn into_variant(self) -> FeatureVariant {
        FeatureVariant::Mat(self)
    }
}

impl Representation for PointCloud {
    const KIND: ReprKind = ReprKind::Cloud;

    fn borrow_from(variant: &FeatureVariant) -> Option<&Self> {
        match variant {
            FeatureVariant::Cloud(c) => Some(c),
            _ => None,
        }
    }

    fn convert_from(variant: &FeatureVariant) -> Result<Self> {
        match variant {
            FeatureVariant::Mat(m) => mat_to_cloud(m),
            FeatureVariant::Cloud(c) => Ok(c.clone()),
        }
    }

    fn into_variant(self) -> FeatureVariant {
        FeatureVariant::Cloud(self)
    }
}

/// Feature value with a lazily filled conversion cache.
///
/// The cache is private to the instance. Values handed out by [`get`](Self::get)
/// are independent copies; mutating them never touches the stored value or
/// the cache.
#[derive(Debug, Clone)]
pub struct TypedValue {
    primary: FeatureVariant,
    cache: RefCell<Option<FeatureVariant>>,
    conversions: Cell<usize>,
}

impl TypedValue {
    pub fn new(value: impl Into<FeatureVariant>) -> Self {
        Self {
            primary: value.into(),
            cache: RefCell::new(None),
            conversions: Cell::new(0),
        }
    }

    /// Extract the value in representation `R`, converting at most once per
    /// assignment.
    ///
    /// # Errors
    /// `SemError::Shape` if the stored value cannot be expressed as `R`.
    pub fn get<R: Representation>(&self) -> Result<R> {
        if let Some(value) = R::borrow_from(&self.primary) {
            return Ok(value.clone());
        }

        if let Some(cached) = self.cache.borrow().as_ref().and_then(R::borrow_from) {
            return Ok(cached.clone());
        }

        let converted = R::convert_from(&self.primary)?;
        self.conversions.set(self.conversions.get() + 1);
        trace!(
            "[TYPED-VALUE] converted {} -> {} (conversion #{})",
            self.primary.kind(),
            R::KIND,
            self.conversions.get()
        );
        *self.cache.borrow_mut() = Some(converted.clone().into_variant());
        Ok(converted)
    }

    pub fn mat(&self) -> Result<Array2<f32>> {
        self.get::<Array2<f32>>()
    }

    pub fn cloud(&self) -> Result<PointCloud> {
        self.get::<PointCloud>()
    }

    /// Reassign the stored value. Drops the cache.
    pub fn set(&mut self, value: impl Into<FeatureVariant>) {
        self.primary = value.into();
        self.reset();
    }

    /// Drop the cached alternate representation, keeping the stored value.
    pub fn reset(&self) {
        self.cache.borrow_mut().take();
    }

    pub fn kind(&self) -> ReprKind {
        self.primary.kind()
    }

    pub fn primary(&self) -> &FeatureVariant {
        &self.primary
    }

    pub fn total(&self) -> usize {
        self.primary.total()
    }

    /// Representation currently held in the cache, if any
    pub fn cached_kind(&self) -> Option<ReprKind> {
        self.cache.borrow().as_ref().map(FeatureVariant::kind)
    }

    /// Number of conversions this value has performed since construction
    pub fn conversion_count(&self) -> usize {
        self.conversions.get()
    }
}

impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        self.primary == other.primary
    }
}

impl From<FeatureVariant> for TypedValue {
    fn from(value: FeatureVariant) -> Self {
        TypedValue::new(value)
    }
}

impl From<Array2<f32>> for TypedValue {
    fn from(value: Array2<f32>) -> Self {
        TypedValue::new(value)
    }
}

impl From<PointCloud> for TypedValue {
    fn from(value: PointCloud) -> Self {
        TypedValue::new(value)
    }
}
