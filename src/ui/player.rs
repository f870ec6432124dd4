use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, text};
use iced::{window, Alignment, ContentFit, Element, Length};

use crate::Message;

/// The player-facing window: the map and a "Fit to window" button
pub fn view(window: window::Id, map: Option<&Handle>) -> Element<'_, Message> {
    let picture: Element<Message> = match map {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::ScaleDown)
            .into(),
        None => text("No map selected").into(),
    };

    column![
        container(picture)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
        button("Fit to window").on_press(Message::FitToWindow(window)),
    ]
    .align_x(Alignment::Center)
    .into()
}
