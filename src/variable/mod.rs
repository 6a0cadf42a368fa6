//! Linguistic Variables
//!
//! A variable owns the membership functions that partition one domain
//! ("temperature" → cold / warm / hot) and converts between crisp values and
//! per-set degrees of membership.
//!
//! ## Pipeline
//!
//! 1. [`Variable::fuzzify`]: crisp input → cached dom on every set
//! 2. Rules aggregate firing strengths into consequent sets
//! 3. [`Variable::defuzzify_mean_max`] or [`Variable::defuzzify_centroid`]:
//!    cached doms → crisp output
//!
//! Sets are kept in insertion order. The domain bounds are the union of every
//! set's parameter extent and grow as sets are added.

use tracing::warn;

use crate::membership::{MembershipFunction, Shape};
use crate::proposition::SetRef;
use crate::{FuzzyError, Result};

/// Stable identifier of a variable inside one inference system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(u32);

impl VariableId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Registration order of the variable
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A fuzzy variable and the sets it owns
#[derive(Debug, Clone)]
pub struct Variable {
    id: VariableId,
    name: String,
    sets: Vec<MembershipFunction>,
    range: Option<(f32, f32)>,
}

impl Variable {
    pub(crate) fn new(id: VariableId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sets: Vec::new(),
            range: None,
        }
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets in insertion order
    pub fn sets(&self) -> &[MembershipFunction] {
        &self.sets
    }

    pub fn set(&self, index: usize) -> Option<&MembershipFunction> {
        self.sets.get(index)
    }

    pub(crate) fn set_mut(&mut self, index: usize) -> Option<&mut MembershipFunction> {
        self.sets.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Domain bounds `(min, max)`, `None` until a set is added
    pub fn range(&self) -> Option<(f32, f32)> {
        self.range
    }

    // ------------------------------------------------------------------------
    // Set registration
    // ------------------------------------------------------------------------

    /// Add a set of any shape, returning a reference usable in propositions
    pub fn add_set(&mut self, shape: Shape) -> Result<SetRef> {
        let set = MembershipFunction::new(shape)?;
        let (lo, hi) = shape.extent();
        let (min, max) = match self.range {
            Some((min, max)) => (min.min(lo), max.max(hi)),
            None => (lo, hi),
        };
        // Centroid sampling steps across the whole range
        if !(max - min).is_finite() {
            return Err(FuzzyError::InvalidShape(format!(
                "{} range from {} to {} overflows f32",
                self.name, min, max
            )));
        }
        self.range = Some((min, max));
        self.sets.push(set);
        Ok(SetRef::new(self.id, self.sets.len() - 1))
    }

    pub fn add_triangle_set(&mut self, left: f32, mid: f32, right: f32) -> Result<SetRef> {
        self.add_set(Shape::Triangle { left, mid, right })
    }

    pub fn add_trapezoid_set(&mut self, m1: f32, m2: f32, m3: f32, m4: f32) -> Result<SetRef> {
        self.add_set(Shape::Trapezoid { m1, m2, m3, m4 })
    }

    /// Plateau on the left: full membership on [m1, m2], falling to m3
    pub fn add_left_trapezoid_set(&mut self, m1: f32, m2: f32, m3: f32) -> Result<SetRef> {
        self.add_set(Shape::LeftShoulder { m1, m2, m3 })
    }

    /// Plateau on the right: rising on [m1, m2], full membership to m3
    pub fn add_right_trapezoid_set(&mut self, m1: f32, m2: f32, m3: f32) -> Result<SetRef> {
        self.add_set(Shape::RightShoulder { m1, m2, m3 })
    }

    pub fn add_singleton_set(&mut self, m: f32) -> Result<SetRef> {
        self.add_set(Shape::Singleton { m })
    }

    // ------------------------------------------------------------------------
    // Fuzzification
    // ------------------------------------------------------------------------

    /// Cache each set's membership of `input`
    pub fn fuzzify(&mut self, input: f32) {
        for set in &mut self.sets {
            let dom = set.dom(input);
            set.set_dom(dom);
        }
    }

    /// Zero every cached dom
    pub fn reset_dom(&mut self) {
        for set in &mut self.sets {
            set.reset_dom();
        }
    }

    /// Index and dom of the most activated set (first wins on ties)
    pub fn dominant_set(&self) -> Option<(usize, f32)> {
        self.sets
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.get_dom()))
            .fold(None, |best, (i, dom)| match best {
                Some((_, best_dom)) if best_dom >= dom => best,
                _ => Some((i, dom)),
            })
    }

    // ------------------------------------------------------------------------
    // Defuzzification
    // ------------------------------------------------------------------------

    /// Dom-weighted average of each set's mean of maximum
    ///
    /// Returns 0 when the total dom is within `tolerance` of zero.
    pub fn defuzzify_mean_max(&self, tolerance: f32) -> f32 {
        let (total_value, total_dom) = self
            .sets
            .iter()
            .fold((0.0f32, 0.0f32), |(value, dom), s| {
                (value + s.get_dom() * s.mean_max(), dom + s.get_dom())
            });

        weighted_mean(total_value, total_dom, tolerance)
    }

    /// Center of mass of the clipped, max-combined output sets
    ///
    /// Samples `min + k * delta` for `k = 1..=sample_count`, with
    /// `delta = (max - min) / sample_count`; the lower bound itself is not
    /// sampled. Each set contributes its shape clipped at its cached dom.
    /// Returns 0 when the total membership is within `tolerance` of zero or
    /// the variable has no sets.
    pub fn defuzzify_centroid(&self, sample_count: usize, tolerance: f32) -> Result<f32> {
        if sample_count == 0 {
            return Err(FuzzyError::ZeroSampleCount);
        }
        let Some((min, max)) = self.range else {
            warn!(variable = %self.name, "centroid of a variable with no sets");
            return Ok(0.0);
        };

        let delta = (max - min) / sample_count as f32;
        let mut total_dom = 0.0f32;
        let mut total_value = 0.0f32;

        for k in 1..=sample_count {
            let x = min + delta * k as f32;
            let membership = self
                .sets
                .iter()
                .map(|s| s.dom(x).min(s.get_dom()))
                .fold(0.0f32, f32::max);
            total_dom += membership;
            total_value += membership * x;
        }

        Ok(weighted_mean(total_value, total_dom, tolerance))
    }
}

/// `total_value / total_dom`, or 0 when `total_dom` is within `tolerance` of
/// zero. Inclusive, so a tolerance of 0 still catches an exact 0.
#[inline]
fn weighted_mean(total_value: f32, total_dom: f32, tolerance: f32) -> f32 {
    if total_dom.abs() <= tolerance {
        0.0
    } else {
        total_value / total_dom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-6;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    fn variable() -> Variable {
        Variable::new(VariableId::new(3), "speed")
    }

    #[test]
    fn test_add_sets_returns_refs() {
        let mut v = variable();
        let a = v.add_triangle_set(0.0, 5.0, 10.0).unwrap();
        let b = v.add_singleton_set(20.0).unwrap();

        assert_eq!(a, SetRef::new(VariableId::new(3), 0));
        assert_eq!(b.index, 1);
        assert_eq!(b.variable.index(), 3);
        assert_eq!(v.len(), 2);
        assert_eq!(v.name(), "speed");
    }

    #[test]
    fn test_range_grows_with_sets() {
        let mut v = variable();
        assert_eq!(v.range(), None);

        v.add_triangle_set(0.0, 5.0, 10.0).unwrap();
        assert_eq!(v.range(), Some((0.0, 10.0)));

        v.add_left_trapezoid_set(-5.0, -2.0, 1.0).unwrap();
        v.add_right_trapezoid_set(8.0, 12.0, 30.0).unwrap();
        assert_eq!(v.range(), Some((-5.0, 30.0)));

        v.add_singleton_set(15.0).unwrap();
        assert_eq!(v.range(), Some((-5.0, 30.0)));
    }

    #[test]
    fn test_invalid_set_leaves_variable_unchanged() {
        let mut v = variable();
        v.add_singleton_set(1.0).unwrap();
        let err = v.add_trapezoid_set(0.0, 3.0, 2.0, 4.0);
        assert!(matches!(err, Err(FuzzyError::InvalidShape(_))));
        assert_eq!(v.len(), 1);
        assert_eq!(v.range(), Some((1.0, 1.0)));
    }

    #[test]
    fn test_range_span_must_stay_finite() {
        let mut v = variable();
        v.add_singleton_set(-3.0e38).unwrap();
        let err = v.add_singleton_set(3.0e38);
        assert!(matches!(err, Err(FuzzyError::InvalidShape(_))));
        assert_eq!(v.len(), 1);
        assert_eq!(v.range(), Some((-3.0e38, -3.0e38)));
    }

    #[test]
    fn test_fuzzify_and_reset() {
        let mut v = variable();
        v.add_triangle_set(0.0, 5.0, 10.0).unwrap();
        v.add_triangle_set(5.0, 10.0, 15.0).unwrap();

        v.fuzzify(7.5);
        assert!(approx(v.sets()[0].get_dom(), 0.5));
        assert!(approx(v.sets()[1].get_dom(), 0.5));

        v.reset_dom();
        assert!(v.sets().iter().all(|s| s.get_dom() == 0.0));
    }

    #[test]
    fn test_triangle_round_trip() {
        let mut v = variable();
        v.add_triangle_set(0.0, 5.0, 10.0).unwrap();
        v.fuzzify(5.0);
        assert_eq!(v.sets()[0].get_dom(), 1.0);
        assert!(approx(v.defuzzify_mean_max(TOL), 5.0));
    }

    #[test]
    fn test_mean_max_weighted_average() {
        let mut v = variable();
        let low = v.add_singleton_set(10.0).unwrap();
        let high = v.add_singleton_set(90.0).unwrap();
        v.set_mut(low.index).unwrap().set_dom(0.25);
        v.set_mut(high.index).unwrap().set_dom(0.75);
        // (0.25 * 10 + 0.75 * 90) / 1.0
        assert!(approx(v.defuzzify_mean_max(TOL), 70.0));
    }

    #[test]
    fn test_mean_max_all_zero() {
        let mut v = variable();
        v.add_singleton_set(10.0).unwrap();
        v.add_singleton_set(90.0).unwrap();
        assert_eq!(v.defuzzify_mean_max(TOL), 0.0);

        // Below tolerance counts as nothing fired
        v.set_mut(0).unwrap().set_dom(1e-7);
        assert_eq!(v.defuzzify_mean_max(TOL), 0.0);
        assert!(approx(v.defuzzify_mean_max(0.0), 10.0));
    }

    #[test]
    fn test_weighted_mean_tolerance_is_inclusive() {
        assert_eq!(weighted_mean(5.0, 0.005, 0.01), 0.0);
        assert_eq!(weighted_mean(5.0, -0.005, 0.01), 0.0);
        assert!(approx(weighted_mean(5.0, 0.02, 0.01), 250.0));

        // Zero tolerance still treats an exact zero as nothing fired
        assert_eq!(weighted_mean(0.0, 0.0, 0.0), 0.0);
        assert!(approx(weighted_mean(1.0, 0.5, 0.0), 2.0));
    }

    #[test]
    fn test_zero_tolerance_nothing_fired() {
        let mut v = variable();
        v.add_triangle_set(0.0, 5.0, 10.0).unwrap();
        v.add_singleton_set(20.0).unwrap();
        assert_eq!(v.defuzzify_mean_max(0.0), 0.0);
        assert_eq!(v.defuzzify_centroid(50, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_centroid_zero_samples() {
        let mut v = variable();
        v.add_triangle_set(0.0, 5.0, 10.0).unwrap();
        assert!(matches!(
            v.defuzzify_centroid(0, TOL),
            Err(FuzzyError::ZeroSampleCount)
        ));
    }

    #[test]
    fn test_centroid_empty_variable() {
        let v = variable();
        assert_eq!(v.defuzzify_centroid(10, TOL).unwrap(), 0.0);
    }

    #[test]
    fn test_centroid_symmetric_set() {
        let mut v = variable();
        let t = v.add_triangle_set(0.0, 5.0, 10.0).unwrap();
        v.set_mut(t.index).unwrap().set_dom(1.0);
        let c = v.defuzzify_centroid(1000, TOL).unwrap();
        assert!(approx(c, 5.0), "centroid {}", c);
    }

    #[test]
    fn test_centroid_clips_at_cached_dom() {
        let mut v = variable();
        v.add_left_trapezoid_set(0.0, 0.0, 50.0).unwrap();
        v.add_right_trapezoid_set(50.0, 100.0, 100.0).unwrap();

        // Only the right shoulder fired, and only weakly
        v.set_mut(1).unwrap().set_dom(0.2);
        let c = v.defuzzify_centroid(200, TOL).unwrap();
        assert!(c > 50.0 && c < 100.0, "centroid {}", c);

        // Unclipped, more of the mass sits near the plateau at 100
        v.set_mut(1).unwrap().set_dom(1.0);
        let unclipped = v.defuzzify_centroid(200, TOL).unwrap();
        assert!(unclipped > c);
    }

    #[test]
    fn test_centroid_nothing_fired() {
        let mut v = variable();
        v.add_triangle_set(0.0, 5.0, 10.0).unwrap();
        assert_eq!(v.defuzzify_centroid(50, TOL).unwrap(), 0.0);
    }

    #[test]
    fn test_centroid_skips_lower_bound() {
        let mut v = variable();
        // Full membership only at the lower bound
        v.add_left_trapezoid_set(0.0, 0.0, 1.0).unwrap();
        v.set_mut(0).unwrap().set_dom(1.0);

        // One sample lands on x = 1, where the set is already 0
        assert_eq!(v.defuzzify_centroid(1, TOL).unwrap(), 0.0);
        // Two samples: x = 0.5 (dom 0.5) and x = 1 (dom 0)
        assert!(approx(v.defuzzify_centroid(2, TOL).unwrap(), 0.5));
    }

    #[test]
    fn test_dominant_set() {
        let mut v = variable();
        assert_eq!(v.dominant_set(), None);

        v.add_triangle_set(0.0, 5.0, 10.0).unwrap();
        v.add_triangle_set(5.0, 10.0, 15.0).unwrap();
        v.fuzzify(9.0);
        let (index, dom) = v.dominant_set().unwrap();
        assert_eq!(index, 1);
        assert!(approx(dom, 0.8));

        v.reset_dom();
        assert_eq!(v.dominant_set().map(|(i, _)| i), Some(0));
    }
}
