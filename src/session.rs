//! Interactive line-oriented session.
//!
//! Each input line is either a `/command` or plain text. Plain text replaces
//! the prompt, or the editor draft while the prompt editor is open. The view
//! is re-rendered after every action.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::{StudioController, SubmitStart};
use crate::i18n::{parse_language, Preferences};
use crate::model::parse_model;
use crate::params::parse_aspect_ratio;
use crate::view;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text.
    Text(String),
    /// `/model <name>`
    Model(String),
    /// `/ratio <w:h>`
    Ratio(String),
    /// `/upload <file>`
    Upload(PathBuf),
    /// `/clear`
    ClearUpload,
    /// `/edit`
    EditPrompt,
    /// `/save`
    SavePrompt,
    /// `/cancel`
    CancelEdit,
    /// `/generate`
    Generate,
    /// `/view`
    View,
    /// `/close`
    CloseView,
    /// `/download [path]`
    Download(Option<PathBuf>),
    /// `/lang <code>`
    Language(String),
    /// `/status`
    Status,
    /// `/help`
    Help,
    /// `/quit`
    Quit,
    /// Anything else starting with `/`.
    Unknown(String),
}

/// Parse one input line. Blank lines yield `None`.
#[must_use]
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Text(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let command = match (name, arg) {
        ("model", a) if !a.is_empty() => Command::Model(a.to_string()),
        ("ratio", a) if !a.is_empty() => Command::Ratio(a.to_string()),
        ("upload", a) if !a.is_empty() => Command::Upload(PathBuf::from(a)),
        ("clear", _) => Command::ClearUpload,
        ("edit", _) => Command::EditPrompt,
        ("save", _) => Command::SavePrompt,
        ("cancel", _) => Command::CancelEdit,
        ("generate", _) => Command::Generate,
        ("view", _) => Command::View,
        ("close", _) => Command::CloseView,
        ("download", "") => Command::Download(None),
        ("download", a) => Command::Download(Some(PathBuf::from(a))),
        ("lang", a) if !a.is_empty() => Command::Language(a.to_string()),
        ("status", _) => Command::Status,
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

/// Run the session until `/quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run<R, W>(
    controller: &mut StudioController,
    preferences: &mut Preferences,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", preferences.translator().t("main_subtitle"))?;
    writeln!(out, "{}", preferences.translator().t("help_text"))?;
    redraw(controller, preferences, out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            continue;
        };
        tracing::debug!(?command, "Session command");
        if command == Command::Quit {
            break;
        }
        apply(command, controller, preferences, out).await?;
    }
    out.flush()
}

async fn apply<W: Write>(
    command: Command,
    controller: &mut StudioController,
    preferences: &mut Preferences,
    out: &mut W,
) -> std::io::Result<()> {
    let tr = preferences.translator();
    match command {
        Command::Text(text) => {
            if controller.state().prompt_editor_open {
                controller.set_prompt_draft(text);
            } else {
                controller.set_prompt(text);
            }
        }
        Command::Model(name) => match parse_model(&name) {
            Ok(model) => controller.select_model(model),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected model name");
                writeln!(out, "{}", tr.t("unknown_model"))?;
            }
        },
        Command::Ratio(ratio) => match parse_aspect_ratio(&ratio) {
            Ok(ratio) => {
                if !controller.set_aspect_ratio(ratio) {
                    writeln!(out, "{}", tr.t("aspect_ratio_not_applicable"))?;
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected aspect ratio");
                writeln!(out, "{}", tr.t("unknown_aspect_ratio"))?;
            }
        },
        Command::Upload(path) => {
            if !controller.state().model.accepts_reference_image() {
                writeln!(out, "{}", tr.t("upload_not_available"))?;
                return Ok(());
            }
            controller.upload(&path).await;
        }
        Command::ClearUpload => controller.clear_upload(),
        Command::EditPrompt => {
            controller.open_prompt_editor();
        }
        Command::SavePrompt => controller.save_prompt_editor(),
        Command::CancelEdit => controller.close_prompt_editor(),
        Command::Generate => {
            match controller.begin_submit() {
                SubmitStart::Started(request) => {
                    redraw(controller, preferences, out)?;
                    out.flush()?;
                    let result = controller.generate(&request).await;
                    controller.finish_submit(result);
                }
                SubmitStart::Busy => {
                    writeln!(out, "{}", tr.t("generation_in_progress"))?;
                    return Ok(());
                }
                SubmitStart::Rejected => {}
            }
        }
        Command::View => {
            controller.open_image_viewer();
        }
        Command::CloseView => controller.close_image_viewer(),
        Command::Download(target) => {
            if controller.state().generated_image.is_none() {
                writeln!(out, "{}", tr.t("no_image_to_download"))?;
                return Ok(());
            }
            match controller.download(target.as_deref()) {
                Ok(path) => writeln!(out, "{} {}", tr.t("saved_to"), path.display())?,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to save generated image");
                    writeln!(out, "{}", tr.t("download_failed"))?;
                }
            }
        }
        Command::Language(code) => match parse_language(&code) {
            Ok(language) => {
                if let Err(e) = preferences.set_language(language) {
                    tracing::warn!(error = %e, "Failed to persist language preference");
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected language code");
                writeln!(out, "{}", tr.t("unknown_language"))?;
            }
        },
        Command::Status => {}
        Command::Help => {
            writeln!(out, "{}", tr.t("help_text"))?;
            return Ok(());
        }
        Command::Unknown(line) => {
            writeln!(out, "{line}: {}", tr.t("unknown_command"))?;
            return Ok(());
        }
        Command::Quit => return Ok(()),
    }
    redraw(controller, preferences, out)
}

fn redraw<W: Write>(
    controller: &StudioController,
    preferences: &Preferences,
    out: &mut W,
) -> std::io::Result<()> {
    let notification = controller.live_notification(Instant::now());
    write!(out, "{}", view::render(controller.state(), &preferences.translator(), notification))
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use super::*;
    use crate::generation::tests::FakeService;
    use crate::i18n::Language;
    use crate::model::ModelId;
    use crate::output::tests::TINY_PNG;
    use crate::params::AspectRatio;

    fn preferences(name: &str) -> Preferences {
        let path = std::env::temp_dir().join(format!("image_studio_session_{name}.toml"));
        let _ = std::fs::remove_file(&path);
        let mut prefs = Preferences::load(&path);
        prefs.set_language(Language::En).unwrap();
        prefs
    }

    async fn drive(fake: &Arc<FakeService>, script: &str, prefs: &mut Preferences) -> String {
        let mut ctl =
            StudioController::new(Box::new(Arc::clone(fake)), ModelId::Imagen, AspectRatio::Square);
        let mut out = Vec::new();
        run(&mut ctl, prefs, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("a cat"), Some(Command::Text("a cat".into())));
        assert_eq!(parse_command("/model nano-banana"), Some(Command::Model("nano-banana".into())));
        assert_eq!(parse_command("/ratio 16:9"), Some(Command::Ratio("16:9".into())));
        assert_eq!(
            parse_command("/upload  my photo.png"),
            Some(Command::Upload(PathBuf::from("my photo.png")))
        );
        assert_eq!(parse_command("/download"), Some(Command::Download(None)));
        assert_eq!(
            parse_command("/download out.png"),
            Some(Command::Download(Some(PathBuf::from("out.png"))))
        );
        assert_eq!(parse_command("/quit"), Some(Command::Quit));
        assert_eq!(parse_command("/model"), Some(Command::Unknown("/model".into())));
        assert_eq!(parse_command("/dance"), Some(Command::Unknown("/dance".into())));
    }

    #[tokio::test]
    async fn generates_from_typed_prompt() {
        let fake = Arc::new(FakeService::with_image(TINY_PNG));
        let mut prefs = preferences("generate");

        let out = drive(&fake, "a cat\n/ratio 16:9\n/generate\n/quit\n", &mut prefs).await;

        assert!(out.contains("Brewing creativity..."));
        assert!(out.contains("1x1 Png"));
        let sent = fake.images_requests.lock().unwrap();
        assert_eq!(sent[0].prompt, "a cat");
        assert_eq!(sent[0].aspect_ratio, "16:9");
    }

    #[tokio::test]
    async fn empty_submit_shows_notification_without_call() {
        let fake = Arc::new(FakeService::default());
        let mut prefs = preferences("empty");

        let out = drive(&fake, "/generate\n", &mut prefs).await;

        assert!(out.contains("Please enter a prompt or upload an image to generate."));
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn editor_text_goes_to_draft() {
        let fake = Arc::new(FakeService::default());
        let mut prefs = preferences("editor");

        let out =
            drive(&fake, "/model nano-banana\nfirst\n/edit\nsecond\n/save\n/status\n", &mut prefs)
                .await;

        assert!(out.contains("Edit Your Prompt"));
        assert!(out.contains("Editing Instructions: second"));
    }

    #[tokio::test]
    async fn language_switch_persists() {
        let fake = Arc::new(FakeService::default());
        let mut prefs = preferences("lang");

        let out = drive(&fake, "/lang id\n", &mut prefs).await;

        assert_eq!(prefs.language(), Language::Id);
        assert!(out.contains("Studio Gambar AI"));
    }

    #[tokio::test]
    async fn invalid_choices_print_localized_hints() {
        let fake = Arc::new(FakeService::default());
        let mut prefs = preferences("invalid_choices");

        let out = drive(&fake, "/model dall-e\n/ratio 2:1\n/lang fr\n", &mut prefs).await;

        assert!(out.contains("Unknown model. Choose imagen-4 or nano-banana."));
        assert!(out.contains("Unsupported aspect ratio. Choose 1:1, 16:9, 9:16, 4:3 or 3:4."));
        assert!(out.contains("Unsupported language. Choose en or id."));
        assert!(!out.contains("dall-e"));
        assert_eq!(prefs.language(), Language::En);
    }

    #[tokio::test]
    async fn invalid_choices_follow_active_language() {
        let fake = Arc::new(FakeService::default());
        let mut prefs = preferences("invalid_choices_id");

        let out = drive(&fake, "/lang id\n/model dall-e\n", &mut prefs).await;

        assert!(out.contains("Model tidak dikenal. Pilih imagen-4 atau nano-banana."));
    }

    #[tokio::test]
    async fn download_without_image_is_localized() {
        let fake = Arc::new(FakeService::default());
        let mut prefs = preferences("download_empty");

        let out = drive(&fake, "/download\n", &mut prefs).await;

        assert!(out.contains("There is no generated image to download yet."));
        assert!(!out.contains("Invalid argument"));
    }

    #[tokio::test]
    async fn upload_on_imagen_explains_how_to_switch() {
        let fake = Arc::new(FakeService::default());
        let mut prefs = preferences("upload_imagen");
        let reference =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("test_fixtures/reference.png");

        let out = drive(&fake, &format!("/upload {}\n", reference.display()), &mut prefs).await;

        assert!(out.contains("Switch with /model nano-banana."));
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_command_prints_hint() {
        let fake = Arc::new(FakeService::default());
        let mut prefs = preferences("unknown");

        let out = drive(&fake, "/dance\n", &mut prefs).await;
        assert!(out.contains("Unknown command."));
    }
}
