use flow_core::io::photo::Thumbnail;

/// Convert a decoded RGBA8 thumbnail to an egui ColorImage.
pub fn thumbnail_to_color_image(thumbnail: &Thumbnail) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [thumbnail.width as usize, thumbnail.height as usize],
        &thumbnail.rgba,
    )
}
