use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, image, row, scrollable, text, text_input, vertical_rule, Column,
};
use iced::{window, Alignment, ContentFit, Element, Length, Theme};

use crate::state::session::Coordinator;
use crate::Message;

const LIST_WIDTH: f32 = 280.0;
const LIST_HEIGHT: f32 = 380.0;
const SIZE_FIELD_WIDTH: f32 = 64.0;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// The control window: folder browser and file list on the left, preview on the right
pub fn view<'a>(
    coordinator: &'a Coordinator<window::Id>,
    preview: Option<&'a Handle>,
) -> Element<'a, Message> {
    let form = coordinator.form();

    let folder_row = row![
        text("Folder"),
        text_input("Maps folder", &form.folder)
            .on_input(Message::FolderEdited)
            .width(Length::Fixed(LIST_WIDTH - 80.0)),
        button("Browse").on_press(Message::BrowseFolder),
        button("Default").on_press(Message::DefaultFolder),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    // Highlight the selected file
    let selected = coordinator.selected_name();
    let files = coordinator
        .catalog()
        .entries()
        .iter()
        .fold(Column::new().spacing(2), |list, entry| {
            let style: ButtonStyle = if selected == Some(entry.file_name()) {
                button::primary
            } else {
                button::text
            };
            list.push(
                button(text(entry.name()))
                    .style(style)
                    .width(Length::Fill)
                    .on_press(Message::FileSelected(entry.clone())),
            )
        });
    let file_list = container(scrollable(files))
        .width(Length::Fixed(LIST_WIDTH))
        .height(Length::Fixed(LIST_HEIGHT));

    let resize_row = row![
        button("Remove file").on_press(Message::RemoveFile),
        text("Resize to"),
        text_input("W", &form.width)
            .on_input(Message::WidthEdited)
            .width(Length::Fixed(SIZE_FIELD_WIDTH)),
        text_input("H", &form.height)
            .on_input(Message::HeightEdited)
            .width(Length::Fixed(SIZE_FIELD_WIDTH)),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let import_row = row![
        text_input("Map to import", &form.save_file)
            .on_input(Message::SaveFileEdited)
            .on_submit(Message::SaveSubmitted)
            .width(Length::Fixed(LIST_WIDTH - 80.0)),
        button("Browse").on_press(Message::BrowseSaveFile),
        button("Import").on_press(Message::SaveSubmitted),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let left = column![
        folder_row,
        file_list,
        resize_row,
        import_row,
        text(coordinator.notice().unwrap_or_default()).size(14),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    let picture: Element<Message> = match preview {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::ScaleDown)
            .into(),
        None => text("Pick a map from the list").into(),
    };
    let selection = coordinator
        .selection()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    let right = column![
        text(selection).size(14),
        button("Fit to window").on_press(Message::FitToWindow(coordinator.control())),
        container(picture)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    row![left, vertical_rule(1), right]
        .spacing(16)
        .padding(16)
        .into()
}
