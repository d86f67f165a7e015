//! Noise processing module for synthetic image generation
//!
//! - **generate**: Seeded noise field generation

pub mod generate;

pub use generate::{offset_standard_normal, NoiseError};
