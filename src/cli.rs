//! CLI argument parsing with clap.

use clap::Parser;

/// AI image studio - generate images with Imagen 4 or edit them with Nano Banana.
#[derive(Parser, Debug)]
#[command(name = "image-studio", version, about)]
pub struct Cli {
    /// Prompt describing the image, or the edit to apply to `--image`.
    pub prompt: Option<String>,

    /// Model name or short alias: imagen-4, nano-banana (default from config).
    #[arg(short, long)]
    pub model: Option<String>,

    /// Aspect ratio for Imagen: 1:1, 16:9, 9:16, 4:3, 3:4 (default from config).
    #[arg(short, long)]
    pub aspect_ratio: Option<String>,

    /// Reference image to edit (Nano Banana only).
    #[arg(short, long)]
    pub image: Option<String>,

    /// Output file or directory (named after the prompt if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Interface language: en, id. Persisted for later runs.
    #[arg(long)]
    pub lang: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Start the interactive session even when a prompt is given.
    #[arg(long)]
    pub interactive: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Whether to run the interactive session instead of a single generation.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive || (self.prompt.is_none() && self.image.is_none())
    }
}
