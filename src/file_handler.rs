use egui::{Align2, Color32, DroppedFile, FontId, Id, LayerId, Order};

use crate::shape::ImageSource;
use crate::texture_manager::{ImageLoadError, TextureManager};

/// Image files dropped onto the window this frame.
pub fn dropped_images(ctx: &egui::Context) -> Vec<DroppedFile> {
    ctx.input(|i| {
        i.raw
            .dropped_files
            .iter()
            .filter(|file| {
                let image = is_image_file(file);
                if !image {
                    log::warn!("Dropped file is not a supported type: {}", file_name(file));
                }
                image
            })
            .cloned()
            .collect()
    })
}

/// Decodes a dropped file, preferring in-memory bytes (web) over the path.
pub fn load_dropped(
    file: &DroppedFile,
    textures: &mut TextureManager,
) -> Result<ImageSource, ImageLoadError> {
    if let Some(bytes) = &file.bytes {
        log::info!("Processing image from memory: {} ({} bytes)", file_name(file), bytes.len());
        let source = ImageSource::new(format!("dropped://{}", file_name(file)));
        return textures.load_bytes(source, bytes);
    }
    if let Some(path) = &file.path {
        return textures.load_path(path);
    }
    Err(ImageLoadError::NoData(file_name(file)))
}

fn file_name(file: &DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(file: &DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }

    let name = match &file.path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => file.name.clone(),
    };
    std::path::Path::new(&name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
}

/// Darkens the window and lists the files hovering over it.
pub fn preview_files_being_dropped(ctx: &egui::Context) {
    let text = ctx.input(|i| {
        if i.raw.hovered_files.is_empty() {
            return None;
        }
        let mut text = "Dropping files:\n".to_owned();
        for file in &i.raw.hovered_files {
            match &file.path {
                Some(path) => text += &format!("\n{}", path.display()),
                None => text += "\n(Path not available)",
            }
        }
        Some(text)
    });
    let Some(text) = text else {
        return;
    };

    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
    let screen_rect = ctx.screen_rect();
    painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
    painter.text(
        screen_rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(20.0),
        Color32::WHITE,
    );
}
