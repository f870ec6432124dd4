// dungeon-explorer - Browse battle maps and show them on a player-facing window
// The control window lists a maps folder; picking a map opens a second window
// meant for the shared screen.

use clap::Parser;
use iced::{window, Element, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod cli;
mod config;
mod error;
mod render;
mod state;
mod ui;

use config::Settings;
use state::data::{CatalogEntry, Dimensions};
use state::session::{Coordinator, Event};
use ui::Screen;

/// Main application state
struct DungeonExplorer {
    /// Selection, catalog and window liveness
    coordinator: Coordinator<window::Id>,
    /// Open windows and the images they show
    screen: Screen,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A window finished opening
    ControlOpened(window::Id),
    PlayerOpened(window::Id),
    /// Folder field edited
    FolderEdited(String),
    /// User clicked "Browse" next to the folder field
    BrowseFolder,
    /// User clicked "Default"
    DefaultFolder,
    /// A file was clicked in the list
    FileSelected(CatalogEntry),
    WidthEdited(String),
    HeightEdited(String),
    RemoveFile,
    /// "Fit to window" in the given window
    FitToWindow(window::Id),
    SaveFileEdited(String),
    /// User clicked "Browse" next to the import field
    BrowseSaveFile,
    SaveSubmitted,
    WindowResized(window::Id, Size),
    CloseRequested(window::Id),
}

impl DungeonExplorer {
    /// Open the control window and list the maps folder
    fn new(settings: Settings) -> (Self, Task<Message>) {
        let control_size = settings.control_size();
        let (control, open) = window::open(window::Settings {
            size: Size::new(control_size.width as f32, control_size.height as f32),
            // Closing goes through the coordinator
            exit_on_close_request: false,
            ..window::Settings::default()
        });

        let mut coordinator = Coordinator::new(&settings, control);
        let mut screen = Screen::default();
        coordinator.handle(Event::DefaultRequested, &mut screen);

        log::info!(
            "🎲 Dungeon Explorer initialized with {} maps",
            coordinator.catalog().entries().len()
        );

        let pending = screen.take_tasks();
        (
            DungeonExplorer { coordinator, screen },
            Task::batch([open.map(Message::ControlOpened), pending]),
        )
    }

    fn title(&self, window: window::Id) -> String {
        if window == self.coordinator.control() {
            "Dungeon Explorer".to_string()
        } else {
            "Map".to_string()
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        // Windows may still report events while the exit is pending
        if self.coordinator.is_terminated() {
            return Task::none();
        }

        let event = match message {
            Message::ControlOpened(id) | Message::PlayerOpened(id) => {
                log::debug!("window {:?} opened", id);
                return Task::none();
            }
            Message::FolderEdited(folder) => Event::DirectoryChanged(PathBuf::from(folder)),
            Message::BrowseFolder => {
                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Select Maps Folder")
                    .set_directory(self.coordinator.catalog().directory())
                    .pick_folder();

                match folder {
                    Some(folder) => Event::DirectoryChanged(folder),
                    None => return Task::none(),
                }
            }
            Message::DefaultFolder => Event::DefaultRequested,
            Message::FileSelected(entry) => Event::FileSelected(entry),
            Message::WidthEdited(value) => Event::WidthEdited(value),
            Message::HeightEdited(value) => Event::HeightEdited(value),
            Message::RemoveFile => Event::RemoveFileRequested,
            Message::FitToWindow(id) => Event::ResizeRequested(id),
            Message::SaveFileEdited(value) => Event::SaveFileEdited(value),
            Message::BrowseSaveFile => {
                let file = FileDialog::new()
                    .set_title("Select Map to Import")
                    .add_filter("Images", &["png", "jpg", "jpeg", "tiff", "bmp"])
                    .pick_file();

                match file {
                    Some(file) => Event::SaveFileEdited(file.display().to_string()),
                    None => return Task::none(),
                }
            }
            Message::SaveSubmitted => {
                let file = self.coordinator.form().save_file.trim();
                Event::SaveSubmitted(PathBuf::from(file))
            }
            Message::WindowResized(id, size) if id == self.coordinator.control() => {
                Event::WindowResized(id, Dimensions::from_logical(size.width, size.height))
            }
            Message::WindowResized(id, size) => {
                Event::WindowResized(id, ui::screen::player_content_size(size))
            }
            Message::CloseRequested(id) => Event::CloseRequested(id),
        };

        self.coordinator.handle(event, &mut self.screen);
        self.screen.take_tasks()
    }

    /// Build the user interface of one window
    fn view(&self, window: window::Id) -> Element<'_, Message> {
        if window == self.coordinator.control() {
            ui::control::view(&self.coordinator, self.screen.preview())
        } else {
            ui::player::view(window, self.screen.player_image(window))
        }
    }

    /// Set the application theme
    fn theme(&self, _window: window::Id) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::resize_events().map(|(id, size)| Message::WindowResized(id, size)),
            window::close_requests().map(Message::CloseRequested),
        ])
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let settings = args.settings()?;

    log::info!("Maps folder: {}", settings.maps_dir.display());
    if let Err(err) = settings.ensure_maps_dir() {
        log::warn!(
            "Could not create maps folder {}: {}",
            settings.maps_dir.display(),
            err
        );
    }

    iced::daemon(
        DungeonExplorer::title,
        DungeonExplorer::update,
        DungeonExplorer::view,
    )
    .subscription(DungeonExplorer::subscription)
    .theme(DungeonExplorer::theme)
    .run_with(move || DungeonExplorer::new(settings))?;

    Ok(())
}
