//! Algorithm-specific kernel trait
//!
//! A kernel packages one detection step, such as per-bin slope fitting, on
//! top of the primitives of an execution engine. Detectors are composed from
//! kernels.

use crate::primitives::ComputePrimitives;

/// Base trait for all statistical kernels
pub trait StatisticalKernel: Clone + Send + Sync {
    /// The type of primitives used by this kernel
    type Primitives: ComputePrimitives;

    /// Get the primitives used by this kernel
    fn primitives(&self) -> &Self::Primitives;

    /// Name of this kernel for debugging/logging
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
