//! Image codecs used by tests and tools, not by the drawing core.

pub mod png;
