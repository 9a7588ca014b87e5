pub mod animator;
pub mod engine;
pub mod lerp;
