pub mod soft_clip;

pub use self::soft_clip::*;

/// Trait for per-sample output stages
pub trait Effect: Send {
    /// Process a single audio sample through the effect
    fn process(&self, input: f64) -> f64;
}
