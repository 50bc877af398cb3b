//! CLI argument parsing and validation tests. No network I/O.
//!
//! Invalid arguments must be rejected before any adapter is consulted, and a
//! missing credential must fail before a request is sent.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

/// A scratch directory per test, so preferences never leak between runs.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("image_studio_cli_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn cmd(dir: &std::path::Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("image-studio");
    cmd.env("IMAGE_STUDIO_PREFERENCES", dir.join("preferences.toml"))
        .env("IMAGE_STUDIO_CONFIG", dir.join("config.toml"))
        .env_remove("IMAGE_STUDIO_REPLAY")
        .env_remove("IMAGE_STUDIO_REC")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY");
    cmd
}

#[test]
fn invalid_model_exits_with_error() {
    let dir = scratch("invalid_model");
    cmd(&dir)
        .args(["--model", "dall-e-3", "a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown model 'dall-e-3'"));
}

#[test]
fn invalid_aspect_ratio_exits_with_error() {
    let dir = scratch("invalid_ratio");
    cmd(&dir)
        .args(["--aspect-ratio", "100:200", "a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported aspect ratio"));
}

#[test]
fn invalid_language_exits_with_error() {
    let dir = scratch("invalid_lang");
    cmd(&dir)
        .args(["--lang", "fr", "a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported language"));
}

#[test]
fn reference_image_needs_editing_model() {
    let dir = scratch("image_with_imagen");
    cmd(&dir)
        .args(["--model", "imagen-4", "--image", "photo.png", "a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not accept a reference image"));
}

#[test]
fn unparsable_config_exits_with_error() {
    let dir = scratch("bad_config");
    std::fs::write(dir.join("config.toml"), "[keys\ngemini = ").unwrap();

    cmd(&dir)
        .args(["a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn config_defaults_are_validated() {
    let dir = scratch("config_defaults");
    std::fs::write(dir.join("config.toml"), "[defaults]\nmodel = \"midjourney\"\n").unwrap();

    cmd(&dir)
        .args(["a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown model 'midjourney'"));
}

#[test]
fn missing_api_key_is_reported_localized() {
    let dir = scratch("missing_key");
    cmd(&dir)
        .args(["--lang", "en", "a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("The application's API key is not configured."));
}

#[test]
fn default_language_is_indonesian() {
    let dir = scratch("default_lang");
    cmd(&dir)
        .args(["a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Kunci API aplikasi tidak dikonfigurasi."));
}

#[test]
fn non_image_upload_is_rejected() {
    let dir = scratch("non_image");
    let notes = dir.join("notes.txt");
    std::fs::write(&notes, "not an image").unwrap();

    cmd(&dir)
        .args(["--lang", "en", "--model", "nano-banana", "--image", notes.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please upload a valid image file"));
}
