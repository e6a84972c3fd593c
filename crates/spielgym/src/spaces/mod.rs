//! Observation and action space types.
//!
//! Gymnasium-style declarations. Every agent of an environment gets its own
//! entry in a [`Dict`]; for game adapters those entries are identical.

mod r#box;
mod dict;
mod discrete;

pub use dict::Dict;
pub use discrete::Discrete;
pub use r#box::Box;

use ndarray::{ArrayD, IxDyn};
use rand::Rng;

/// Trait for observation and action spaces
pub trait Space: Clone + Send + Sync {
    /// The type of samples from this space
    type Sample;

    /// Sample a random element from this space
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Sample;

    /// Check if a value is contained in this space
    fn contains(&self, value: &Self::Sample) -> bool;

    /// Get the shape of samples from this space
    fn shape(&self) -> &[usize];

    /// Get the total number of elements in a sample
    fn num_elements(&self) -> usize {
        self.shape().iter().product()
    }
}

/// Enum for dynamic space types
#[derive(Clone, Debug, PartialEq)]
pub enum DynSpace {
    Discrete(Discrete),
    Box(Box),
}

impl DynSpace {
    /// Get the shape of this space
    pub fn shape(&self) -> &[usize] {
        match self {
            DynSpace::Discrete(s) => s.shape(),
            DynSpace::Box(s) => s.shape(),
        }
    }

    /// Sample from this space as a float tensor
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ArrayD<f32> {
        match self {
            DynSpace::Discrete(s) => ArrayD::from_elem(IxDyn(&[1]), s.sample(rng) as f32),
            DynSpace::Box(s) => s.sample(rng),
        }
    }

    /// Check if this space contains the value
    pub fn contains(&self, value: &ArrayD<f32>) -> bool {
        match self {
            DynSpace::Discrete(s) => match value.iter().next() {
                Some(&v) if value.len() == 1 && v >= 0.0 && v.fract() == 0.0 => {
                    s.contains(&(v as usize))
                }
                _ => false,
            },
            DynSpace::Box(s) => s.contains(value),
        }
    }

    /// The discrete space, if this is one
    pub fn as_discrete(&self) -> Option<&Discrete> {
        match self {
            DynSpace::Discrete(s) => Some(s),
            _ => None,
        }
    }
}
