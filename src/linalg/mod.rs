pub mod matrix;
pub mod sampler;
