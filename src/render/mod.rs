/// Image presentation module
///
/// This module handles:
/// - Decoding map images from disk or from memory
/// - Fitting them into a bounding box without distortion
/// - Re-encoding them as PNG for the windows

pub mod present;

pub use present::present;
