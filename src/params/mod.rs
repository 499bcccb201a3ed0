// Parameter Selection - Tempo buckets and style/scale tables
// Resolves abstract musical categories into concrete numeric parameters

pub mod style;
pub mod tempo;

// Re-export main types
pub use style::{scales, Style};
pub use tempo::{TempoBucket, TempoMarking};
