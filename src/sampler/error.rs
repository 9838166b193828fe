/// Errors raised while setting up a sampler
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    /// A grid count that would make the step size undefined
    #[error("Invalid grid count: {name} must be at least 1, got {value}")]
    InvalidGridCount {
        /// Name of the offending parameter
        name: &'static str,
        /// Value that was supplied
        value: usize,
    },

    /// A grid count whose closed-form record total overflows `u64`
    #[error("Grid too large: {name} = {value} overflows the record count")]
    GridTooLarge {
        /// Name of the offending parameter
        name: &'static str,
        /// Value that was supplied
        value: usize,
    },

    /// Geometry parameters that do not describe a sampleable region
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}
