/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The map catalog and file operations (library.rs)
/// - Window coordination and the selected map (session.rs)

pub mod data;
pub mod library;
pub mod session;
