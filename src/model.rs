//! Model identifiers, aliases and capabilities.

/// The two hosted models the studio can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelId {
    /// Imagen 4, text-to-image.
    Imagen,
    /// Nano Banana, image editing from mixed image and text parts.
    NanoBanana,
}

/// Short name aliases accepted on the command line.
const ALIASES: &[(&str, &str)] = &[
    ("imagen-4", "imagen-4.0-generate-001"),
    ("imagen", "imagen-4.0-generate-001"),
    ("nano-banana", "gemini-2.5-flash-image-preview"),
];

impl ModelId {
    /// Every model, in the order the model picker shows them.
    pub const ALL: [ModelId; 2] = [ModelId::Imagen, ModelId::NanoBanana];

    /// Remote model identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Imagen => "imagen-4.0-generate-001",
            Self::NanoBanana => "gemini-2.5-flash-image-preview",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Imagen => "Imagen 4",
            Self::NanoBanana => "Nano Banana",
        }
    }

    /// Look up a model by its exact remote identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    /// Whether the model takes a reference image.
    #[must_use]
    pub fn accepts_reference_image(self) -> bool {
        matches!(self, Self::NanoBanana)
    }

    /// Whether the model honours the aspect ratio setting.
    #[must_use]
    pub fn uses_aspect_ratio(self) -> bool {
        matches!(self, Self::Imagen)
    }
}

/// Resolve a model name (alias or exact) to the full model identifier.
#[must_use]
pub fn resolve_model(name: &str) -> String {
    for &(alias, full) in ALIASES {
        if name == alias {
            return full.to_string();
        }
    }
    name.to_string()
}

/// Parse a model name or alias.
///
/// # Errors
///
/// Returns an error if the name is neither a known alias nor a supported model id.
pub fn parse_model(name: &str) -> Result<ModelId, String> {
    let resolved = resolve_model(name);
    ModelId::from_id(&resolved).ok_or_else(|| {
        format!(
            "Unknown model '{name}'. Expected 'imagen-4', 'nano-banana', '{}' or '{}'.",
            ModelId::Imagen.id(),
            ModelId::NanoBanana.id()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_aliases() {
        assert_eq!(resolve_model("imagen-4"), "imagen-4.0-generate-001");
        assert_eq!(resolve_model("nano-banana"), "gemini-2.5-flash-image-preview");
    }

    #[test]
    fn resolve_exact_name_passthrough() {
        assert_eq!(resolve_model("gemini-2.5-flash-image-preview"), "gemini-2.5-flash-image-preview");
        assert_eq!(resolve_model("dall-e-3"), "dall-e-3");
    }

    #[test]
    fn parse_known_models() {
        assert_eq!(parse_model("imagen-4").unwrap(), ModelId::Imagen);
        assert_eq!(parse_model("nano-banana").unwrap(), ModelId::NanoBanana);
        assert_eq!(parse_model("imagen-4.0-generate-001").unwrap(), ModelId::Imagen);
    }

    #[test]
    fn parse_unknown_model() {
        let err = parse_model("dall-e-3").unwrap_err();
        assert!(err.contains("Unknown model"));
    }

    #[test]
    fn capabilities() {
        assert!(ModelId::NanoBanana.accepts_reference_image());
        assert!(!ModelId::Imagen.accepts_reference_image());
        assert!(ModelId::Imagen.uses_aspect_ratio());
        assert!(!ModelId::NanoBanana.uses_aspect_ratio());
    }
}
