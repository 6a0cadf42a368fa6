//! Membership Functions
//!
//! Piecewise-linear fuzzy set shapes and the cached activation each set
//! carries through an inference cycle.
//!
//! ## Shapes
//!
//! | Shape | Parameters | Mean of maximum |
//! |-------|------------|-----------------|
//! | Singleton | m | m |
//! | Triangle | left ≤ mid ≤ right | mid |
//! | Trapezoid | m1 ≤ m2 ≤ m3 ≤ m4 | (m2 + m3) / 2 |
//! | LeftShoulder | m1 ≤ m2 ≤ m3 | (m1 + m2) / 2 |
//! | RightShoulder | m1 ≤ m2 ≤ m3 | (m1 + m2) / 2 |
//!
//! ```text
//!  LeftShoulder          Trapezoid             RightShoulder
//!  m1____m2                m2____m3                 m2____m3
//!  |       \              /        \               /       |
//!  |        \m3       m1 /          \ m4       m1 /        |
//! ```
//!
//! Every shape returns 0 outside its support. A zero-length edge
//! (`m1 == m2`, `m3 == m4`, ...) is a step, never a division by zero.
//!
//! The singleton matches by exact float equality: callers should snap inputs
//! to the singleton value, or prefer a narrow triangle for measured inputs.

use serde::{Deserialize, Serialize};

use crate::{FuzzyError, Result};

/// A piecewise-linear membership shape over a scalar domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Full membership at exactly one point
    Singleton { m: f32 },
    /// Rises on [left, mid], falls on [mid, right]
    Triangle { left: f32, mid: f32, right: f32 },
    /// Rises on [m1, m2], plateau on [m2, m3], falls on [m3, m4]
    Trapezoid { m1: f32, m2: f32, m3: f32, m4: f32 },
    /// Plateau on [m1, m2], falls on [m2, m3]
    LeftShoulder { m1: f32, m2: f32, m3: f32 },
    /// Rises on [m1, m2], plateau on [m2, m3]
    RightShoulder { m1: f32, m2: f32, m3: f32 },
}

impl Shape {
    /// Short lowercase name, used in error messages and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Singleton { .. } => "singleton",
            Shape::Triangle { .. } => "triangle",
            Shape::Trapezoid { .. } => "trapezoid",
            Shape::LeftShoulder { .. } => "left_shoulder",
            Shape::RightShoulder { .. } => "right_shoulder",
        }
    }

    /// Shape parameters in ascending order
    pub fn params(&self) -> Vec<f32> {
        match *self {
            Shape::Singleton { m } => vec![m],
            Shape::Triangle { left, mid, right } => vec![left, mid, right],
            Shape::Trapezoid { m1, m2, m3, m4 } => vec![m1, m2, m3, m4],
            Shape::LeftShoulder { m1, m2, m3 } | Shape::RightShoulder { m1, m2, m3 } => {
                vec![m1, m2, m3]
            }
        }
    }

    /// Reject non-finite or decreasing parameters, and spans too wide for f32
    pub fn validate(&self) -> Result<()> {
        let params = self.params();
        if let Some(bad) = params.iter().find(|p| !p.is_finite()) {
            return Err(FuzzyError::InvalidShape(format!(
                "{} parameter {} is not finite",
                self.kind(),
                bad
            )));
        }
        if params.windows(2).any(|w| w[0] > w[1]) {
            return Err(FuzzyError::InvalidShape(format!(
                "{} parameters must be non-decreasing, got {:?}",
                self.kind(),
                params
            )));
        }
        let (lo, hi) = self.extent();
        if !(hi - lo).is_finite() {
            return Err(FuzzyError::InvalidShape(format!(
                "{} span from {} to {} overflows f32",
                self.kind(),
                lo,
                hi
            )));
        }
        Ok(())
    }

    /// Degree of membership of `x`, always in [0, 1]
    pub fn dom(&self, x: f32) -> f32 {
        let dom = match *self {
            Shape::Singleton { m } => {
                if x == m {
                    1.0
                } else {
                    0.0
                }
            }
            Shape::Triangle { left, mid, right } => {
                if x < left {
                    0.0
                } else if x < mid {
                    (x - left) / (mid - left)
                } else if x < right {
                    (right - x) / (right - mid)
                } else if x == mid {
                    // mid == right
                    1.0
                } else {
                    0.0
                }
            }
            Shape::Trapezoid { m1, m2, m3, m4 } => {
                if x < m1 {
                    0.0
                } else if x <= m2 {
                    rising_edge(x, m1, m2)
                } else if x <= m3 {
                    1.0
                } else if x < m4 {
                    (m4 - x) / (m4 - m3)
                } else {
                    0.0
                }
            }
            Shape::LeftShoulder { m1, m2, m3 } => {
                if x < m1 {
                    0.0
                } else if x <= m2 {
                    1.0
                } else if x < m3 {
                    (m3 - x) / (m3 - m2)
                } else {
                    0.0
                }
            }
            Shape::RightShoulder { m1, m2, m3 } => {
                if x < m1 {
                    0.0
                } else if x <= m2 {
                    rising_edge(x, m1, m2)
                } else if x <= m3 {
                    1.0
                } else {
                    0.0
                }
            }
        };
        debug_assert!(
            (0.0..=1.0).contains(&dom),
            "{} dom {} out of range at {}",
            self.kind(),
            dom,
            x
        );
        dom
    }

    /// Representative crisp value used by mean-of-maximum defuzzification
    pub fn mean_max(&self) -> f32 {
        match *self {
            Shape::Singleton { m } => m,
            Shape::Triangle { mid, .. } => mid,
            Shape::Trapezoid { m2, m3, .. } => (m2 + m3) * 0.5,
            Shape::LeftShoulder { m1, m2, .. } | Shape::RightShoulder { m1, m2, .. } => {
                (m1 + m2) * 0.5
            }
        }
    }

    /// Leftmost and rightmost parameter
    pub fn extent(&self) -> (f32, f32) {
        match *self {
            Shape::Singleton { m } => (m, m),
            Shape::Triangle { left, right, .. } => (left, right),
            Shape::Trapezoid { m1, m4, .. } => (m1, m4),
            Shape::LeftShoulder { m1, m3, .. } | Shape::RightShoulder { m1, m3, .. } => (m1, m3),
        }
    }
}

/// Linear 0 → 1 on [lo, hi]; a zero-length edge is a step to 1
#[inline]
fn rising_edge(x: f32, lo: f32, hi: f32) -> f32 {
    if lo < hi {
        (x - lo) / (hi - lo)
    } else {
        1.0
    }
}

// ============================================================================
// Membership Function - shape plus cached activation
// ============================================================================

/// One linguistic value of a variable: a shape and its current dom
///
/// The cached dom is written by fuzzification and by rule aggregation and
/// read by propositions and defuzzification.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipFunction {
    shape: Shape,
    dom: f32,
    mean_max: f32,
}

impl MembershipFunction {
    /// Create a membership function with zero activation
    pub fn new(shape: Shape) -> Result<Self> {
        shape.validate()?;
        Ok(Self {
            shape,
            dom: 0.0,
            mean_max: shape.mean_max(),
        })
    }

    /// The underlying shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Degree of membership of a crisp input (does not touch the cache)
    #[inline]
    pub fn dom(&self, input: f32) -> f32 {
        self.shape.dom(input)
    }

    /// Cached activation
    #[inline]
    pub fn get_dom(&self) -> f32 {
        self.dom
    }

    /// Overwrite the cached activation
    #[inline]
    pub fn set_dom(&mut self, dom: f32) {
        debug_assert!((0.0..=1.0).contains(&dom), "dom {} out of range", dom);
        self.dom = dom;
    }

    /// Zero the cached activation
    #[inline]
    pub fn reset_dom(&mut self) {
        self.dom = 0.0;
    }

    /// Representative crisp value, fixed at construction
    #[inline]
    pub fn mean_max(&self) -> f32 {
        self.mean_max
    }
}
