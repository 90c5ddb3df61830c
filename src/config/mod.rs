/// Detection parameters
pub mod detection;

pub use detection::DetectionConfig;
