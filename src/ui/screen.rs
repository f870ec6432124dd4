use iced::widget::image::Handle;
use iced::{window, Size, Task};

use crate::state::data::{Bitmap, Dimensions};
use crate::state::session::WindowSystem;
use crate::Message;

/// Room below the map for the "Fit to window" button
pub const FIT_BUTTON_HEIGHT: u32 = 40;

/// Window system backed by iced
///
/// Window operations become `Task`s that are collected here and returned
/// from `update`. Bitmaps are turned into image handles once, when they
/// arrive, so redraws don't decode the PNG again.
#[derive(Default)]
pub struct Screen {
    preview: Option<Handle>,
    player: Option<(window::Id, Handle)>,
    pending: Vec<Task<Message>>,
}

impl Screen {
    /// Image shown in the control window's preview pane
    pub fn preview(&self) -> Option<&Handle> {
        self.preview.as_ref()
    }

    /// Image shown in the given player window
    pub fn player_image(&self, window: window::Id) -> Option<&Handle> {
        self.player
            .as_ref()
            .filter(|(id, _)| *id == window)
            .map(|(_, handle)| handle)
    }

    /// Drain the window operations queued since the last call
    pub fn take_tasks(&mut self) -> Task<Message> {
        Task::batch(std::mem::take(&mut self.pending))
    }
}

/// Size of the map area of a player window of the given size
///
/// The "Fit to window" strip is not part of the area a map can fill.
pub fn player_content_size(size: Size) -> Dimensions {
    Dimensions::from_logical(size.width, size.height - FIT_BUTTON_HEIGHT as f32)
}

fn to_handle(bitmap: &Bitmap) -> Handle {
    Handle::from_bytes(bitmap.png.clone())
}

impl WindowSystem for Screen {
    type Handle = window::Id;

    fn open_player(&mut self, bitmap: &Bitmap) -> window::Id {
        let (id, open) = window::open(window::Settings {
            size: Size::new(
                bitmap.dimensions.width as f32,
                (bitmap.dimensions.height + FIT_BUTTON_HEIGHT) as f32,
            ),
            resizable: true,
            // Closing goes through the coordinator
            exit_on_close_request: false,
            ..window::Settings::default()
        });

        self.pending.push(open.map(Message::PlayerOpened));
        self.player = Some((id, to_handle(bitmap)));
        id
    }

    fn update_preview(&mut self, bitmap: Option<&Bitmap>) {
        self.preview = bitmap.map(to_handle);
    }

    fn update_player(&mut self, window: window::Id, bitmap: &Bitmap) {
        match &mut self.player {
            Some((id, handle)) if *id == window => *handle = to_handle(bitmap),
            _ => log::warn!("no player window {:?} to update", window),
        }
    }

    fn close(&mut self, window: window::Id) {
        if self.player.as_ref().is_some_and(|(id, _)| *id == window) {
            self.player = None;
        }
        self.pending.push(window::close(window));
    }

    fn exit(&mut self) {
        self.pending.push(iced::exit());
    }
}
