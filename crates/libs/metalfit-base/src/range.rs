//! Stepped ranges of values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

/// Defines a left inclusive, right exclusive range [a, b) of values with a
/// given step.
#[derive(Copy, Clone, PartialEq)]
pub struct StepRangeExcl<T: Copy + Clone> {
    /// Initial value of the range.
    pub start: T,
    /// Final value of the range, never reached.
    pub stop: T,
    /// Step size.
    pub step_size: T,
}

impl<T: Copy + Clone + Debug> Debug for StepRangeExcl<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepRangeExcl")
            .field("start", &self.start)
            .field("stop", &self.stop)
            .field("step_size", &self.step_size)
            .finish()
    }
}

impl<T: Copy + Clone + Display> Display for StepRangeExcl<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {} / {}", self.start, self.stop, self.step_size)
    }
}

impl<T: Copy + Clone> StepRangeExcl<T> {
    /// Creates a new range with the given start, stop and step size.
    pub const fn new(start: T, stop: T, step_size: T) -> Self {
        Self {
            start,
            stop,
            step_size,
        }
    }

    /// Returns the range as a rust range.
    pub fn range_bound(&self) -> std::ops::Range<T> { self.start..self.stop }
}

impl StepRangeExcl<f32> {
    /// Largest number of values a range may hold; beyond it the index of a
    /// value no longer converts exactly to `f32`.
    pub const MAX_STEP_COUNT: usize = 1 << 24;

    /// Number of units in the last place of the largest bound a step must
    /// span for consecutive values to stay strictly ascending.
    const MIN_STEP_ULPS: f32 = 4.0;

    /// Whether the range is well-formed and holds at least one value.
    ///
    /// The step must be resolvable at the magnitude of the bounds and the
    /// range can't hold more than [`Self::MAX_STEP_COUNT`] values.
    pub fn is_valid(&self) -> bool {
        if !(self.start.is_finite()
            && self.stop.is_finite()
            && self.step_size.is_finite()
            && self.step_size > 0.0
            && self.start < self.stop)
        {
            return false;
        }
        let magnitude = self.start.abs().max(self.stop.abs());
        self.step_size >= magnitude * f32::EPSILON * Self::MIN_STEP_ULPS
            && self.raw_step_count() <= Self::MAX_STEP_COUNT as f64
    }

    /// Number of steps before the correction of the last value, computed in
    /// double precision so that it never overflows.
    fn raw_step_count(&self) -> f64 {
        ((self.stop as f64 - self.start as f64) / self.step_size as f64).ceil()
    }

    /// Returns the step count of the exclusive range; zero for an invalid
    /// range.
    pub fn step_count(&self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        let count = self.raw_step_count() as usize;
        // Rounding may land the last value exactly on `stop`.
        if count > 0 && self.value_at(count - 1) >= self.stop {
            count - 1
        } else {
            count
        }
    }

    /// Value of the `i`-th step.
    #[inline]
    pub fn value_at(&self, i: usize) -> f32 { self.start + self.step_size * i as f32 }

    /// Returns all values of the range in ascending order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = f32> + Clone {
        let this = *self;
        (0..self.step_count()).map(move |i| this.value_at(i))
    }
}

/// Error returned when a range can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid range '{0}', expected 'start .. stop / step'")]
pub struct ParseRangeError(pub String);

impl FromStr for StepRangeExcl<f32> {
    type Err = ParseRangeError;

    /// Parses `"start .. stop / step"`; whitespace is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRangeError(s.to_string());
        let (bounds, step) = s.split_once('/').ok_or_else(err)?;
        let (start, stop) = bounds.split_once("..").ok_or_else(err)?;
        let parse = |v: &str| v.trim().parse::<f32>().map_err(|_| err());
        Ok(Self::new(parse(start)?, parse(stop)?, parse(step)?))
    }
}

impl Serialize for StepRangeExcl<f32> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for StepRangeExcl<f32> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_count() {
        assert_eq!(StepRangeExcl::new(0.0f32, 1.0, 0.25).step_count(), 4);
        assert_eq!(StepRangeExcl::new(0.0f32, 1.0, 0.3).step_count(), 4);
        assert_eq!(StepRangeExcl::new(1.0f32, 1.0, 0.1).step_count(), 0);
        assert_eq!(StepRangeExcl::new(2.0f32, 1.0, 0.1).step_count(), 0);
        assert_eq!(StepRangeExcl::new(0.0f32, 1.0, 0.0).step_count(), 0);
        assert_eq!(StepRangeExcl::new(0.0f32, 1.0, -0.1).step_count(), 0);
        assert_eq!(StepRangeExcl::new(0.0f32, f32::NAN, 0.1).step_count(), 0);
    }

    #[test]
    fn unresolvable_steps_are_invalid() {
        for step in [1e-30f32, 1e-7] {
            let range = StepRangeExcl::new(1.0f32, 10.0, step);
            assert!(!range.is_valid(), "step {}", step);
            assert_eq!(range.step_count(), 0);
            assert_eq!(range.values().len(), 0);
        }
        let range = StepRangeExcl::new(1.0f32, 10.0, 1e-5);
        assert!(range.step_count() <= StepRangeExcl::<f32>::MAX_STEP_COUNT);
        assert!(range.values().collect::<Vec<_>>().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn values_stay_below_stop() {
        let range = StepRangeExcl::new(1.001f32, 10.0, 0.001);
        let values = range.values().collect::<Vec<_>>();
        assert!(values.len() >= 8998 && values.len() <= 9000);
        assert_eq!(values[0], 1.001);
        assert!(values.iter().all(|v| (1.001..10.0).contains(v)));
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parse() {
        let range = "1.001 .. 10.0 / 0.001".parse::<StepRangeExcl<f32>>().unwrap();
        assert_eq!(range, StepRangeExcl::new(1.001, 10.0, 0.001));
        let range = "1..2/0.5".parse::<StepRangeExcl<f32>>().unwrap();
        assert_eq!(range, StepRangeExcl::new(1.0, 2.0, 0.5));
        assert!("1 .. 2".parse::<StepRangeExcl<f32>>().is_err());
        assert!("a .. 2 / 1".parse::<StepRangeExcl<f32>>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let range = StepRangeExcl::new(1.5f32, 4.0, 0.25);
        assert_eq!(range.to_string(), "1.5 .. 4 / 0.25");
        assert_eq!(range.to_string().parse::<StepRangeExcl<f32>>().unwrap(), range);
    }
}
