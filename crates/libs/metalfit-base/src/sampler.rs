//! Paired sampling of two reflectance curves over the viewing angle.
//!
//! Samples are taken at the cosines `i / count` for `i` in `1..count`: the
//! open interval (0, 1) subdivided in `count` equal parts, both endpoints
//! excluded.

use std::iter::FusedIterator;

/// One paired sample of two curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePair<T> {
    /// Cosine of the viewing angle.
    pub cos_theta: f32,
    /// Value of the first curve.
    pub a: T,
    /// Value of the second curve.
    pub b: T,
}

/// Evaluates two curves side by side at equally spaced cosines.
///
/// The sampler is lazy and restartable: every call to [`CurveSampler::iter`]
/// starts a new pass over the same cosines.
#[derive(Debug, Clone, Copy)]
pub struct CurveSampler<A, B> {
    eval_a: A,
    eval_b: B,
    count: u32,
}

impl<A, B, T> CurveSampler<A, B>
where
    A: Fn(f32) -> T,
    B: Fn(f32) -> T,
{
    /// Creates a sampler subdividing (0, 1) in `count` parts, which yields
    /// `count - 1` samples.
    pub fn new(eval_a: A, eval_b: B, count: u32) -> Self {
        Self {
            eval_a,
            eval_b,
            count,
        }
    }

    /// Number of samples produced by each pass.
    pub fn len(&self) -> usize { self.count.saturating_sub(1) as usize }

    /// Whether a pass produces no sample at all.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Starts a new pass over the samples.
    pub fn iter(&self) -> CurveSamples<'_, A, B> {
        CurveSamples {
            sampler: self,
            next: 1,
        }
    }
}

impl<'a, A, B, T> IntoIterator for &'a CurveSampler<A, B>
where
    A: Fn(f32) -> T,
    B: Fn(f32) -> T,
{
    type Item = SamplePair<T>;
    type IntoIter = CurveSamples<'a, A, B>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Iterator over one pass of a [`CurveSampler`].
#[derive(Debug)]
pub struct CurveSamples<'a, A, B> {
    sampler: &'a CurveSampler<A, B>,
    next: u32,
}

impl<'a, A, B, T> Iterator for CurveSamples<'a, A, B>
where
    A: Fn(f32) -> T,
    B: Fn(f32) -> T,
{
    type Item = SamplePair<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.sampler.count {
            return None;
        }
        let cos_theta = cosine_at(self.next, self.sampler.count);
        self.next += 1;
        Some(SamplePair {
            cos_theta,
            a: (self.sampler.eval_a)(cos_theta),
            b: (self.sampler.eval_b)(cos_theta),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sampler.count.saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl<'a, A, B, T> ExactSizeIterator for CurveSamples<'a, A, B>
where
    A: Fn(f32) -> T,
    B: Fn(f32) -> T,
{
}

impl<'a, A, B, T> FusedIterator for CurveSamples<'a, A, B>
where
    A: Fn(f32) -> T,
    B: Fn(f32) -> T,
{
}

/// Cosine of the `i`-th sample out of `count` subdivisions.
#[inline(always)]
pub fn cosine_at(i: u32, count: u32) -> f32 { i as f32 / count as f32 }

/// The cosines visited by a sampler with `count` subdivisions.
pub fn cosines(count: u32) -> impl ExactSizeIterator<Item = f32> + Clone {
    (1..count.max(1)).map(move |i| cosine_at(i, count))
}

/// Convenience constructor, see [`CurveSampler::new`].
pub fn sample<A, B, T>(eval_a: A, eval_b: B, count: u32) -> CurveSampler<A, B>
where
    A: Fn(f32) -> T,
    B: Fn(f32) -> T,
{
    CurveSampler::new(eval_a, eval_b, count)
}
