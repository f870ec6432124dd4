/// Window coordination
///
/// The `Coordinator` owns everything that changes while the app runs: the
/// browsed catalog, the selected map, the control form and the liveness of
/// the player window. Toolkit events are turned into `Event`s and fed to
/// `Coordinator::handle` one at a time; each call runs to completion before
/// the next event is read.
///
/// Windows are reached only through the `WindowSystem` trait, so the state
/// machine can be driven without a display.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use super::data::{Bitmap, CatalogEntry, Dimensions, ImageSource};
use super::library::{self, Catalog};
use crate::config::Settings;
use crate::error::CatalogError;
use crate::render::present;

/// The window operations the coordinator needs from a toolkit
pub trait WindowSystem {
    /// Opaque reference to a live window
    type Handle: Copy + Eq + fmt::Debug;

    /// Create the player window showing `bitmap`, sized to fit it
    fn open_player(&mut self, bitmap: &Bitmap) -> Self::Handle;

    /// Replace (or clear) the preview pane of the control window
    fn update_preview(&mut self, bitmap: Option<&Bitmap>);

    /// Replace the image shown in a player window
    fn update_player(&mut self, window: Self::Handle, bitmap: &Bitmap);

    /// Destroy a window
    fn close(&mut self, window: Self::Handle);

    /// Leave the event loop
    fn exit(&mut self);
}

/// Liveness of the player window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerWindow<H> {
    Absent,
    /// `size` is the last known size of the window
    Present { handle: H, size: Dimensions },
}

impl<H: Copy + Eq> PlayerWindow<H> {
    pub fn handle(&self) -> Option<H> {
        match self {
            PlayerWindow::Absent => None,
            PlayerWindow::Present { handle, .. } => Some(*handle),
        }
    }

    fn is(&self, window: H) -> bool {
        self.handle() == Some(window)
    }
}

/// Everything that can happen to the app
#[derive(Debug, Clone, PartialEq)]
pub enum Event<H> {
    /// A folder was typed or picked
    DirectoryChanged(PathBuf),
    /// "Default" was pressed: browse the maps folder
    DefaultRequested,
    /// A file was clicked in the list
    FileSelected(CatalogEntry),
    WidthEdited(String),
    HeightEdited(String),
    SaveFileEdited(String),
    /// A window now has a new size (for the player, the area the map can fill)
    WindowResized(H, Dimensions),
    /// "Fit to window" was pressed in the given window
    ResizeRequested(H),
    /// "Remove file" was pressed
    RemoveFileRequested,
    /// The user asked to close the given window
    CloseRequested(H),
    /// Copy this file into the maps folder
    SaveSubmitted(PathBuf),
}

/// Text fields of the control window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlForm {
    pub folder: String,
    pub width: String,
    pub height: String,
    pub save_file: String,
}

pub struct Coordinator<H> {
    /// Managed maps folder ("Default" target and import destination)
    maps_dir: PathBuf,
    /// Box used when the "Resize to" fields don't hold a size
    fallback_box: Dimensions,
    control: H,
    control_size: Dimensions,
    player: PlayerWindow<H>,
    catalog: Catalog,
    /// Full path of the chosen map
    selection: Option<PathBuf>,
    form: ControlForm,
    /// One-line message for the user (removal results, import failures)
    notice: Option<String>,
    terminated: bool,
}

impl<H: Copy + Eq + fmt::Debug> Coordinator<H> {
    /// Create the coordinator for an already opened control window
    ///
    /// Nothing is listed yet; send `Event::DefaultRequested` to browse the maps folder.
    pub fn new(settings: &Settings, control: H) -> Self {
        Self {
            maps_dir: settings.maps_dir.clone(),
            fallback_box: settings.fallback_box(),
            control,
            control_size: settings.control_size(),
            player: PlayerWindow::Absent,
            catalog: Catalog::default(),
            selection: None,
            form: ControlForm::default(),
            notice: None,
            terminated: false,
        }
    }

    /// Handle one event
    pub fn handle<W>(&mut self, event: Event<H>, windows: &mut W)
    where
        W: WindowSystem<Handle = H>,
    {
        if self.terminated {
            log::debug!("ignoring {:?} after shutdown", event);
            return;
        }

        match event {
            Event::DirectoryChanged(path) => self.browse(path),
            Event::DefaultRequested => self.browse(self.maps_dir.clone()),
            Event::FileSelected(entry) => self.select(&entry, windows),
            Event::WidthEdited(value) => self.form.width = value,
            Event::HeightEdited(value) => self.form.height = value,
            Event::SaveFileEdited(value) => self.form.save_file = value,
            Event::WindowResized(window, size) => self.record_size(window, size),
            Event::ResizeRequested(window) => self.fit_to_window(window, windows),
            Event::RemoveFileRequested => self.remove_selected(windows),
            Event::CloseRequested(window) => self.close(window, windows),
            Event::SaveSubmitted(file) => self.import(&file),
        }
    }

    pub fn control(&self) -> H {
        self.control
    }

    pub fn player(&self) -> PlayerWindow<H> {
        self.player
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> Option<&Path> {
        self.selection.as_deref()
    }

    /// File name of the selection, if it lives in the browsed directory
    pub fn selected_name(&self) -> Option<&OsStr> {
        let selection = self.selection.as_deref()?;
        if selection.parent()? != self.catalog.directory() {
            return None;
        }
        selection.file_name()
    }

    pub fn form(&self) -> &ControlForm {
        &self.form
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Rebuild the list for `directory`
    fn browse(&mut self, directory: PathBuf) {
        self.form.folder = directory.display().to_string();
        self.catalog = Catalog::scan(directory);
        self.notice = None;
    }

    /// Bounding box from the "Resize to" fields, or the fallback box
    fn requested_box(&self) -> Dimensions {
        match Dimensions::parse(&self.form.width, &self.form.height) {
            Ok(size) => size,
            Err(err) => {
                log::debug!("resize fields unusable ({}), using {}", err, self.fallback_box);
                self.fallback_box
            }
        }
    }

    fn select<W>(&mut self, entry: &CatalogEntry, windows: &mut W)
    where
        W: WindowSystem<Handle = H>,
    {
        if !self.catalog.contains(entry) {
            log::warn!("** Error: {:?} is not in the current folder **", entry.file_name());
            return;
        }

        let path = self.catalog.resolve(entry.file_name());
        let bounds = self.requested_box();
        let bitmap = match present(&ImageSource::Path(path.clone()), Some(bounds)) {
            Ok(bitmap) => bitmap,
            Err(err) => {
                // Bad files are skipped, the loop keeps running
                log::error!("** Error {} **", err);
                return;
            }
        };

        log::info!("🗺️  Selected {} at {}", path.display(), bitmap.dimensions);
        self.selection = Some(path);
        self.notice = None;

        // Control window first, then the player window
        windows.update_preview(Some(&bitmap));
        match self.player.handle() {
            None => {
                let handle = windows.open_player(&bitmap);
                log::info!("Opened player window {:?}", handle);
                // The window opens with room for exactly this bitmap
                self.player = PlayerWindow::Present {
                    handle,
                    size: bitmap.dimensions,
                };
            }
            Some(handle) => windows.update_player(handle, &bitmap),
        }
    }

    fn record_size(&mut self, window: H, size: Dimensions) {
        if window == self.control {
            self.control_size = size;
        } else if let PlayerWindow::Present { handle, size: current } = &mut self.player {
            if *handle == window {
                *current = size;
            }
        }
    }

    fn size_of(&self, window: H) -> Option<Dimensions> {
        if window == self.control {
            return Some(self.control_size);
        }
        match self.player {
            PlayerWindow::Present { handle, size } if handle == window => Some(size),
            _ => None,
        }
    }

    /// Re-present the selection at the size of `window` and show it in both windows
    fn fit_to_window<W>(&mut self, window: H, windows: &mut W)
    where
        W: WindowSystem<Handle = H>,
    {
        let Some(selection) = self.selection.clone() else {
            log::debug!("fit to window without a selection");
            return;
        };
        let Some(size) = self.size_of(window) else {
            log::warn!("fit to window from unknown window {:?}", window);
            return;
        };

        let bitmap = match present(&ImageSource::Path(selection), Some(size)) {
            Ok(bitmap) => bitmap,
            Err(err) => {
                log::error!("** Error {} **", err);
                return;
            }
        };

        log::debug!("fitted to {} from {:?}", size, window);
        windows.update_preview(Some(&bitmap));
        if let Some(handle) = self.player.handle() {
            windows.update_player(handle, &bitmap);
        }
    }

    fn remove_selected<W>(&mut self, windows: &mut W)
    where
        W: WindowSystem<Handle = H>,
    {
        let Some(path) = self.selection.clone() else {
            log::debug!("remove requested without a selection");
            return;
        };
        let name = display_name(&path);

        match library::remove_file(&path) {
            Ok(()) => {
                self.notice = Some(format!("Removed {}", name));
                self.forget_selection(windows);
            }
            Err(CatalogError::NotFound(_)) => {
                log::warn!("⚠️  {} was already gone", path.display());
                self.notice = Some(format!("{} no longer exists", name));
                self.forget_selection(windows);
            }
            Err(err) => {
                log::error!("❌ {}", err);
                self.notice = Some(format!("Could not remove {}: {}", name, err));
            }
        }
    }

    /// Drop the selection and everything showing it
    fn forget_selection<W>(&mut self, windows: &mut W)
    where
        W: WindowSystem<Handle = H>,
    {
        self.selection = None;
        windows.update_preview(None);
        if let Some(handle) = self.player.handle() {
            windows.close(handle);
            self.player = PlayerWindow::Absent;
        }
        self.catalog = self.catalog.rescan();
    }

    fn close<W>(&mut self, window: H, windows: &mut W)
    where
        W: WindowSystem<Handle = H>,
    {
        if window == self.control {
            if let Some(handle) = self.player.handle() {
                windows.close(handle);
                self.player = PlayerWindow::Absent;
            }
            windows.close(self.control);
            windows.exit();
            self.terminated = true;
            log::info!("👋 Control window closed, exiting");
        } else if self.player.is(window) {
            windows.close(window);
            self.player = PlayerWindow::Absent;
            log::info!("Closed player window {:?}", window);
        } else {
            log::debug!("close requested for unknown window {:?}", window);
        }
    }

    fn import(&mut self, file: &Path) {
        if file.as_os_str().is_empty() {
            self.notice = Some("Choose a file to import first".to_string());
            return;
        }

        match library::import_file(file, &self.maps_dir) {
            Ok(target) => {
                self.form.save_file.clear();
                self.notice = Some(format!("Imported {}", display_name(&target)));
                if self.catalog.directory() == self.maps_dir {
                    self.catalog = self.catalog.rescan();
                }
            }
            Err(err) => {
                log::error!("❌ {}", err);
                self.notice = Some(format!("Import failed: {}", err));
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const CONTROL: u32 = 0;

    /// Everything a window system was asked to do, in order
    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        OpenPlayer(u32, Dimensions),
        Preview(Option<Dimensions>),
        Player(u32, Dimensions),
        Close(u32),
        Exit,
    }

    #[derive(Default)]
    struct FakeWindows {
        opened: u32,
        ops: Vec<Op>,
    }

    impl FakeWindows {
        fn take(&mut self) -> Vec<Op> {
            std::mem::take(&mut self.ops)
        }
    }

    impl WindowSystem for FakeWindows {
        type Handle = u32;

        fn open_player(&mut self, bitmap: &Bitmap) -> u32 {
            self.opened += 1;
            self.ops.push(Op::OpenPlayer(self.opened, bitmap.dimensions));
            self.opened
        }

        fn update_preview(&mut self, bitmap: Option<&Bitmap>) {
            self.ops.push(Op::Preview(bitmap.map(|b| b.dimensions)));
        }

        fn update_player(&mut self, window: u32, bitmap: &Bitmap) {
            self.ops.push(Op::Player(window, bitmap.dimensions));
        }

        fn close(&mut self, window: u32) {
            self.ops.push(Op::Close(window));
        }

        fn exit(&mut self) {
            self.ops.push(Op::Exit);
        }
    }

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    fn write_map(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([40, 90, 160]))
            .save(&path)
            .expect("failed to write test map");
        path
    }

    /// Maps folder with map1.png (300x200), map1.txt and archive/
    fn maps_folder() -> TempDir {
        let dir = tempdir().unwrap();
        write_map(dir.path(), "map1.png", 300, 200);
        fs::write(dir.path().join("map1.txt"), b"notes").unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();
        dir
    }

    fn start(maps: &Path) -> (Coordinator<u32>, FakeWindows) {
        let settings = Settings {
            maps_dir: maps.to_path_buf(),
            ..Settings::default()
        };
        let mut coordinator = Coordinator::new(&settings, CONTROL);
        let mut windows = FakeWindows::default();
        coordinator.handle(Event::DefaultRequested, &mut windows);
        (coordinator, windows)
    }

    fn select(coordinator: &mut Coordinator<u32>, windows: &mut FakeWindows, name: &str) {
        coordinator.handle(Event::FileSelected(CatalogEntry::new(name)), windows);
    }

    #[test]
    fn test_startup_lists_maps_folder() {
        let maps = maps_folder();
        let (coordinator, mut windows) = start(maps.path());

        let names: Vec<String> = coordinator
            .catalog()
            .entries()
            .iter()
            .map(|e| e.name().into_owned())
            .collect();
        assert_eq!(names, vec!["map1.png"]);
        assert_eq!(coordinator.form().folder, maps.path().display().to_string());
        assert_eq!(coordinator.player(), PlayerWindow::Absent);
        assert!(coordinator.selection().is_none());
        assert!(windows.take().is_empty());
    }

    #[test]
    fn test_first_selection_opens_player_at_fallback_box() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());

        select(&mut coordinator, &mut windows, "map1.png");

        assert_eq!(
            windows.take(),
            vec![Op::Preview(Some(dims(1200, 800))), Op::OpenPlayer(1, dims(1200, 800))]
        );
        assert_eq!(
            coordinator.player(),
            PlayerWindow::Present { handle: 1, size: dims(1200, 800) }
        );
        assert_eq!(coordinator.selection(), Some(maps.path().join("map1.png").as_path()));
        assert_eq!(coordinator.selected_name(), Some(OsStr::new("map1.png")));
    }

    #[test]
    fn test_selection_uses_resize_fields() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());

        coordinator.handle(Event::WidthEdited("600".into()), &mut windows);
        coordinator.handle(Event::HeightEdited("600".into()), &mut windows);
        select(&mut coordinator, &mut windows, "map1.png");

        assert_eq!(
            windows.take(),
            vec![Op::Preview(Some(dims(600, 400))), Op::OpenPlayer(1, dims(600, 400))]
        );
    }

    #[test]
    fn test_non_numeric_resize_fields_fall_back() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());

        coordinator.handle(Event::WidthEdited("wide".into()), &mut windows);
        coordinator.handle(Event::HeightEdited("600".into()), &mut windows);
        select(&mut coordinator, &mut windows, "map1.png");

        assert_eq!(windows.take()[0], Op::Preview(Some(dims(1200, 800))));
    }

    #[test]
    fn test_next_selection_updates_player_in_place() {
        let maps = maps_folder();
        write_map(maps.path(), "map2.jpg", 100, 100);
        let (mut coordinator, mut windows) = start(maps.path());

        select(&mut coordinator, &mut windows, "map1.png");
        windows.take();
        select(&mut coordinator, &mut windows, "map2.jpg");

        assert_eq!(
            windows.take(),
            vec![Op::Preview(Some(dims(800, 800))), Op::Player(1, dims(800, 800))]
        );
        assert_eq!(coordinator.selected_name(), Some(OsStr::new("map2.jpg")));
    }

    #[test]
    fn test_resize_from_player_updates_both_windows() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());
        select(&mut coordinator, &mut windows, "map1.png");
        windows.take();

        coordinator.handle(Event::WindowResized(1, dims(600, 400)), &mut windows);
        coordinator.handle(Event::ResizeRequested(1), &mut windows);

        assert_eq!(
            windows.take(),
            vec![Op::Preview(Some(dims(600, 400))), Op::Player(1, dims(600, 400))]
        );
    }

    // Both windows follow the size of the window that asked, even though
    // only that window changed size. Keep until the layouts are decoupled.
    #[test]
    fn test_resize_from_control_also_drives_player() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());
        select(&mut coordinator, &mut windows, "map1.png");
        coordinator.handle(Event::WindowResized(1, dims(600, 400)), &mut windows);
        windows.take();

        coordinator.handle(Event::WindowResized(CONTROL, dims(900, 300)), &mut windows);
        coordinator.handle(Event::ResizeRequested(CONTROL), &mut windows);

        assert_eq!(
            windows.take(),
            vec![Op::Preview(Some(dims(450, 300))), Op::Player(1, dims(450, 300))]
        );
    }

    #[test]
    fn test_player_size_starts_at_bitmap_size() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());

        coordinator.handle(Event::WidthEdited("600".into()), &mut windows);
        coordinator.handle(Event::HeightEdited("600".into()), &mut windows);
        select(&mut coordinator, &mut windows, "map1.png");

        assert_eq!(
            coordinator.player(),
            PlayerWindow::Present { handle: 1, size: dims(600, 400) }
        );
    }

    #[test]
    fn test_oversized_resize_fields_are_ignored() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());

        coordinator.handle(Event::WidthEdited("4294967295".into()), &mut windows);
        coordinator.handle(Event::HeightEdited("4294967295".into()), &mut windows);
        select(&mut coordinator, &mut windows, "map1.png");

        assert!(windows.take().is_empty());
        assert!(coordinator.selection().is_none());
        assert_eq!(coordinator.player(), PlayerWindow::Absent);
    }

    #[test]
    fn test_oversized_window_resize_is_ignored() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());
        select(&mut coordinator, &mut windows, "map1.png");
        windows.take();

        coordinator.handle(
            Event::WindowResized(1, dims(u32::MAX, u32::MAX)),
            &mut windows,
        );
        coordinator.handle(Event::ResizeRequested(1), &mut windows);

        assert!(windows.take().is_empty());
        assert_eq!(coordinator.selected_name(), Some(OsStr::new("map1.png")));
    }

    #[test]
    fn test_failed_resize_leaves_windows_alone() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());
        select(&mut coordinator, &mut windows, "map1.png");
        windows.take();
        fs::remove_file(maps.path().join("map1.png")).unwrap();

        coordinator.handle(Event::WindowResized(1, dims(600, 400)), &mut windows);
        coordinator.handle(Event::ResizeRequested(1), &mut windows);

        assert!(windows.take().is_empty());
        assert_eq!(coordinator.selection(), Some(maps.path().join("map1.png").as_path()));
        assert!(matches!(coordinator.player(), PlayerWindow::Present { handle: 1, .. }));
    }

    #[test]
    fn test_resize_without_selection_is_ignored() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());

        coordinator.handle(Event::ResizeRequested(CONTROL), &mut windows);

        assert!(windows.take().is_empty());
    }

    #[test]
    fn test_remove_without_selection_is_noop() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());

        coordinator.handle(Event::RemoveFileRequested, &mut windows);

        assert!(windows.take().is_empty());
        assert!(maps.path().join("map1.png").exists());
        assert!(coordinator.notice().is_none());
    }

    #[test]
    fn test_remove_selected_file() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());
        select(&mut coordinator, &mut windows, "map1.png");
        windows.take();

        coordinator.handle(Event::RemoveFileRequested, &mut windows);

        assert!(!maps.path().join("map1.png").exists());
        assert_eq!(windows.take(), vec![Op::Preview(None), Op::Close(1)]);
        assert_eq!(coordinator.player(), PlayerWindow::Absent);
        assert!(coordinator.selection().is_none());
        assert!(coordinator.catalog().entries().is_empty());
        assert_eq!(coordinator.notice(), Some("Removed map1.png"));
    }

    #[test]
    fn test_remove_after_external_delete_is_surfaced() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());
        select(&mut coordinator, &mut windows, "map1.png");
        fs::remove_file(maps.path().join("map1.png")).unwrap();

        coordinator.handle(Event::RemoveFileRequested, &mut windows);

        assert_eq!(coordinator.notice(), Some("map1.png no longer exists"));
        assert!(coordinator.selection().is_none());
        assert!(!coordinator.is_terminated());
    }

    #[test]
    fn test_corrupt_file_leaves_state_untouched() {
        let maps = maps_folder();
        fs::write(maps.path().join("broken.png"), b"this is not a png").unwrap();
        let (mut coordinator, mut windows) = start(maps.path());

        select(&mut coordinator, &mut windows, "broken.png");

        assert!(windows.take().is_empty());
        assert!(coordinator.selection().is_none());
        assert_eq!(coordinator.player(), PlayerWindow::Absent);
    }

    #[test]
    fn test_stale_selection_keeps_previous_state() {
        let maps = maps_folder();
        write_map(maps.path(), "map2.png", 50, 50);
        let (mut coordinator, mut windows) = start(maps.path());
        select(&mut coordinator, &mut windows, "map1.png");
        windows.take();
        fs::remove_file(maps.path().join("map2.png")).unwrap();

        select(&mut coordinator, &mut windows, "map2.png");
        select(&mut coordinator, &mut windows, "not-listed.png");

        assert!(windows.take().is_empty());
        assert_eq!(coordinator.selected_name(), Some(OsStr::new("map1.png")));
    }

    #[test]
    fn test_closing_player_keeps_selection() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());
        select(&mut coordinator, &mut windows, "map1.png");
        windows.take();

        coordinator.handle(Event::CloseRequested(1), &mut windows);

        assert_eq!(windows.take(), vec![Op::Close(1)]);
        assert_eq!(coordinator.player(), PlayerWindow::Absent);
        assert!(coordinator.selection().is_some());

        // A stale close for the same window does nothing
        coordinator.handle(Event::CloseRequested(1), &mut windows);
        assert!(windows.take().is_empty());

        select(&mut coordinator, &mut windows, "map1.png");
        assert_eq!(
            windows.take(),
            vec![Op::Preview(Some(dims(1200, 800))), Op::OpenPlayer(2, dims(1200, 800))]
        );
    }

    #[test]
    fn test_closing_control_closes_everything() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());
        select(&mut coordinator, &mut windows, "map1.png");
        windows.take();

        coordinator.handle(Event::CloseRequested(CONTROL), &mut windows);

        assert_eq!(windows.take(), vec![Op::Close(1), Op::Close(CONTROL), Op::Exit]);
        assert!(coordinator.is_terminated());

        select(&mut coordinator, &mut windows, "map1.png");
        assert!(windows.take().is_empty());
    }

    #[test]
    fn test_directory_change_rescans() {
        let maps = maps_folder();
        let other = tempdir().unwrap();
        write_map(other.path(), "cave.bmp", 10, 10);
        let (mut coordinator, mut windows) = start(maps.path());

        coordinator.handle(Event::DirectoryChanged(other.path().to_path_buf()), &mut windows);
        let names: Vec<String> = coordinator
            .catalog()
            .entries()
            .iter()
            .map(|e| e.name().into_owned())
            .collect();
        assert_eq!(names, vec!["cave.bmp"]);

        coordinator.handle(
            Event::DirectoryChanged(other.path().join("missing")),
            &mut windows,
        );
        assert!(coordinator.catalog().entries().is_empty());

        coordinator.handle(Event::DefaultRequested, &mut windows);
        assert_eq!(coordinator.catalog().entries().len(), 1);
        assert!(windows.take().is_empty());
    }

    #[test]
    fn test_save_imports_into_maps_folder() {
        let maps = maps_folder();
        let downloads = tempdir().unwrap();
        let source = write_map(downloads.path(), "tavern.png", 20, 20);
        let (mut coordinator, mut windows) = start(maps.path());

        coordinator.handle(
            Event::SaveFileEdited(source.display().to_string()),
            &mut windows,
        );
        coordinator.handle(Event::SaveSubmitted(source.clone()), &mut windows);

        assert!(maps.path().join("tavern.png").exists());
        assert!(coordinator.form().save_file.is_empty());
        assert!(coordinator
            .catalog()
            .entries()
            .iter()
            .any(|entry| entry.name() == "tavern.png"));
    }

    #[test]
    fn test_failed_import_keeps_field() {
        let maps = maps_folder();
        let (mut coordinator, mut windows) = start(maps.path());
        let missing = maps.path().join("nowhere").join("ghost.png");

        coordinator.handle(
            Event::SaveFileEdited(missing.display().to_string()),
            &mut windows,
        );
        coordinator.handle(Event::SaveSubmitted(missing), &mut windows);

        assert!(!coordinator.form().save_file.is_empty());
        assert!(coordinator
            .notice()
            .is_some_and(|notice| notice.starts_with("Import failed")));
    }
}
