//! Columnar storage for the galaxy's particles.
//!
//! Each physical property lives in its own `Vec<f64>` so that the parallel
//! phase can hand out disjoint mutable slices of the columns it writes
//! (position and velocity) while the mass column stays read-only.
use std::ops::Range;
use crate::utils::GalsimError;

/// Structure-of-arrays particle storage.
///
/// # Examples
///
/// ```
/// use galsim::particles::ParticleSet;
///
/// let mut set = ParticleSet::with_capacity(2).expect("allocation failed");
/// set.push(0.25, 0.5, 1.0, 0.0, 0.0);
/// set.push(0.75, 0.5, 1.0, 0.0, 0.0);
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.total_mass(), 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSet {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
    pub mass: Vec<f64>,
}

/// Mutable view of a contiguous index range, handed to one worker per step.
///
/// Only the columns a step writes are borrowed mutably.
#[derive(Debug)]
pub struct ParticleChunk<'a> {
    /// Index of the first particle of the chunk in the full set.
    pub start: usize,
    pub x: &'a mut [f64],
    pub y: &'a mut [f64],
    pub vx: &'a mut [f64],
    pub vy: &'a mut [f64],
}

impl ParticleChunk<'_> {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Range of global particle indices this chunk covers.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len()
    }
}

impl ParticleSet {
    /// Creates an empty set with room for `n` particles.
    ///
    /// # Errors
    ///
    /// Returns `GalsimError::Allocation` if any column cannot be reserved.
    pub fn with_capacity(n: usize) -> Result<Self, GalsimError> {
        let mut set = ParticleSet::default();
        for column in [&mut set.x, &mut set.y, &mut set.vx, &mut set.vy, &mut set.mass] {
            column
                .try_reserve_exact(n)
                .map_err(|e| GalsimError::Allocation(format!("{} particles: {}", n, e)))?;
        }
        Ok(set)
    }

    pub fn push(&mut self, x: f64, y: f64, mass: f64, vx: f64, vy: f64) {
        self.x.push(x);
        self.y.push(y);
        self.mass.push(mass);
        self.vx.push(vx);
        self.vy.push(vy);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.mass.iter().sum()
    }

    /// Mass-weighted mean position of all particles, `None` for an empty set.
    pub fn center_of_mass(&self) -> Option<(f64, f64)> {
        let total = self.total_mass();
        if self.is_empty() || total == 0.0 {
            return None;
        }
        let (sx, sy) = self.x.iter()
            .zip(&self.y)
            .zip(&self.mass)
            .fold((0.0, 0.0), |(sx, sy), ((x, y), m)| (sx + x * m, sy + y * m));
        Some((sx / total, sy / total))
    }

    /// Checks the one invariant loading must establish: every mass is finite and strictly positive.
    pub fn validate_masses(&self) -> Result<(), GalsimError> {
        match self.mass.iter().position(|m| !(m.is_finite() && *m > 0.0)) {
            Some(index) => Err(GalsimError::InvalidMass { index, mass: self.mass[index] }),
            None => Ok(()),
        }
    }

    /// Index of the first particle whose position or velocity is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<usize> {
        (0..self.len()).find(|&i| {
            !(self.x[i].is_finite()
                && self.y[i].is_finite()
                && self.vx[i].is_finite()
                && self.vy[i].is_finite())
        })
    }

    /// Splits the position and velocity columns into one mutable chunk per range.
    ///
    /// The ranges must be sorted, contiguous and cover `0..len()` exactly, which is
    /// what `simulation::partition` produces.
    ///
    /// # Panics
    ///
    /// Panics if the ranges leave a gap, overlap, or do not end at `len()`.
    pub fn split_ranges_mut(&mut self, ranges: &[Range<usize>]) -> Vec<ParticleChunk<'_>> {
        let mut x = &mut self.x[..];
        let mut y = &mut self.y[..];
        let mut vx = &mut self.vx[..];
        let mut vy = &mut self.vy[..];
        let mut chunks = Vec::with_capacity(ranges.len());
        let mut consumed = 0;

        for range in ranges {
            assert_eq!(range.start, consumed, "ranges must be contiguous");
            let len = range.len();
            let (head_x, tail_x) = std::mem::take(&mut x).split_at_mut(len);
            let (head_y, tail_y) = std::mem::take(&mut y).split_at_mut(len);
            let (head_vx, tail_vx) = std::mem::take(&mut vx).split_at_mut(len);
            let (head_vy, tail_vy) = std::mem::take(&mut vy).split_at_mut(len);
            x = tail_x;
            y = tail_y;
            vx = tail_vx;
            vy = tail_vy;
            chunks.push(ParticleChunk {
                start: range.start,
                x: head_x,
                y: head_y,
                vx: head_vx,
                vy: head_vy,
            });
            consumed = range.end;
        }
        assert!(x.is_empty(), "ranges must cover every particle");
        chunks
    }
}
