pub mod detector;
pub mod fixtures;
mod store;

pub use detector::ScriptedDetector;
pub use store::MemoryContactStore;
