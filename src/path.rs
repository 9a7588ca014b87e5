pub mod codec;
pub mod sampler;
