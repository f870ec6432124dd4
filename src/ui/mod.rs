/// iced views and the iced-backed window system
///
/// - screen.rs: `Screen`, which opens/closes windows and holds their image handles
/// - control.rs: folder browser, file list, form and preview
/// - player.rs: the player-facing map window

pub mod control;
pub mod player;
pub mod screen;

pub use screen::Screen;
