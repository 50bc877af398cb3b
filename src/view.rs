//! Plain-text rendering of a session for the terminal.
//!
//! Rendering is a pure function of the session state and a translator; the
//! session loop decides when to print.

use std::fmt::Write as _;

use crate::controller::{DataUrl, SessionState};
use crate::error::FailureKind;
use crate::i18n::Translator;
use crate::model::ModelId;
use crate::output::decode_payload;

/// Render everything visible: header, controls, canvas, open overlays and
/// the live notification.
#[must_use]
pub fn render(state: &SessionState, tr: &Translator, notification: Option<FailureKind>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", tr.t("main_title"));
    out.push_str(&render_controls(state, tr));
    out.push_str(&render_canvas(state, tr));
    if state.prompt_editor_open {
        out.push_str(&render_prompt_editor(state, tr));
    }
    if state.image_viewer_open {
        out.push_str(&render_image_viewer(state, tr));
    }
    if let Some(kind) = notification {
        out.push_str(&render_notification(kind, tr));
    }
    out
}

/// Model, aspect ratio, language and prompt.
#[must_use]
pub fn render_controls(state: &SessionState, tr: &Translator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", tr.t("model_label"), state.model.display_name());

    let ratio = if state.model.uses_aspect_ratio() {
        state.aspect_ratio.to_string()
    } else {
        tr.t("aspect_ratio_not_applicable").to_string()
    };
    let _ = writeln!(out, "{}: {ratio}", tr.t("aspect_ratio_label"));
    let _ = writeln!(out, "{}: {}", tr.t("language_label"), tr.language());

    let (label, placeholder) = match state.model {
        ModelId::Imagen => ("image_prompt_label", "prompt_placeholder_imagen"),
        ModelId::NanoBanana => ("editing_instructions_label", "prompt_placeholder_nano"),
    };
    if state.prompt.trim().is_empty() {
        let _ = writeln!(out, "{}: ({})", tr.t(label), tr.t(placeholder));
    } else {
        let _ = writeln!(out, "{}: {}", tr.t(label), state.prompt);
    }

    if state.model.accepts_reference_image() {
        match &state.uploaded_image {
            Some(upload) => {
                let _ = writeln!(
                    out,
                    "{}: {}",
                    tr.t("reference_label"),
                    upload.source.display()
                );
            }
            None => {
                let _ = writeln!(out, "{}: -", tr.t("upload_reference"));
            }
        }
    }
    out
}

/// The canvas: loading, error, image, reference or placeholder, in that priority.
#[must_use]
pub fn render_canvas(state: &SessionState, tr: &Translator) -> String {
    let mut out = String::new();

    if state.loading {
        let _ = writeln!(out, "[{}] {}", tr.t("loading_title"), tr.t("loading_description"));
        return out;
    }

    if let Some(kind) = state.error {
        let _ = writeln!(out, "[{}] {}", tr.t("error_title"), tr.t(kind.translation_key()));
        return out;
    }

    let editing = state.model == ModelId::NanoBanana;
    match (&state.generated_image, &state.uploaded_image) {
        (Some(image), _) => {
            if editing {
                let _ = writeln!(out, "[{}] {}", tr.t("after_label"), image_summary(image));
            } else {
                let _ = writeln!(out, "[{}] {}", tr.t("generated_image_title"), image_summary(image));
            }
        }
        (None, Some(upload)) if editing => {
            let _ = writeln!(out, "[{}] {}", tr.t("before_label"), image_summary(&upload.url));
        }
        _ => {
            let _ = writeln!(out, "{}", tr.t("canvas_placeholder"));
        }
    }
    out
}

/// The prompt editor overlay, showing the working copy.
#[must_use]
pub fn render_prompt_editor(state: &SessionState, tr: &Translator) -> String {
    format!(
        "-- {} --\n{}\n({} /save, /cancel)\n",
        tr.t("edit_prompt_title"),
        state.prompt_draft,
        tr.t("save_close_button")
    )
}

/// The enlarged image viewer overlay.
#[must_use]
pub fn render_image_viewer(state: &SessionState, tr: &Translator) -> String {
    let title = if state.prompt.trim().is_empty() {
        tr.t("generated_image_title")
    } else {
        state.prompt.as_str()
    };
    let summary = state.generated_image.as_ref().map(image_summary).unwrap_or_default();
    format!("-- {title} --\n{summary}\n({} /download)\n", tr.t("download_png_button"))
}

/// A transient notification line.
#[must_use]
pub fn render_notification(kind: FailureKind, tr: &Translator) -> String {
    format!("! {}\n", tr.t(kind.translation_key()))
}

/// Dimensions and size of an encoded image, e.g. `"1024x768 PNG, 12345 bytes"`.
fn image_summary(url: &DataUrl) -> String {
    let Ok(bytes) = decode_payload(url.payload()) else {
        return "(unreadable image)".to_string();
    };
    let format = image::guess_format(&bytes).ok();
    match image::load_from_memory(&bytes) {
        Ok(img) => match format {
            Some(format) => {
                format!("{}x{} {format:?}, {} bytes", img.width(), img.height(), bytes.len())
            }
            None => format!("{}x{}, {} bytes", img.width(), img.height(), bytes.len()),
        },
        Err(_) => format!("{} bytes", bytes.len()),
    }
}
