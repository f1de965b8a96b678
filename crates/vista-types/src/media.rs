//! Image and color descriptors.
//!
//! These stay unresolved on purpose: themed variants carry both the light and
//! dark value and the renderer picks one when it paints, so a theme switch
//! never requires a new document.

use serde::Serialize;

/// Which half of a themed value applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    #[default]
    Dark,
}

/// A color as sent by the extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColorLike {
    /// Hex string, css-like name or a semantic token such as `raycast-red`
    Raw { value: String },

    /// Per-appearance pair
    Themed {
        light: String,
        dark: String,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        adjust_contrast: bool,
    },
}

impl ColorLike {
    #[must_use]
    pub fn raw(value: impl Into<String>) -> Self {
        Self::Raw {
            value: value.into(),
        }
    }

    /// Color string for the given appearance.
    #[must_use]
    pub fn resolve(&self, appearance: Appearance) -> &str {
        match self {
            Self::Raw { value } => value,
            Self::Themed { light, dark, .. } => match appearance {
                Appearance::Light => light,
                Appearance::Dark => dark,
            },
        }
    }

    /// True for `#rgb`, `#rrggbb` and `#rrggbbaa` literals.
    #[must_use]
    pub fn is_hex(&self) -> bool {
        let Self::Raw { value } = self else {
            return false;
        };
        let Some(digits) = value.strip_prefix('#') else {
            return false;
        };
        matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
    }
}

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImageSource {
    /// URL, data URI, builtin icon name, emoji or asset path
    Plain(String),
    Themed { light: String, dark: String },
}

impl ImageSource {
    #[must_use]
    pub fn resolve(&self, appearance: Appearance) -> &str {
        match self {
            Self::Plain(source) => source,
            Self::Themed { light, dark } => match appearance {
                Appearance::Light => light,
                Appearance::Dark => dark,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageMask {
    Circle,
    RoundedRectangle,
}

/// An image reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageLike {
    Source {
        source: ImageSource,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<ImageSource>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tint_color: Option<ColorLike>,
        #[serde(skip_serializing_if = "Option::is_none")]
        mask: Option<ImageMask>,
    },

    /// Icon of the file at `path`, looked up through the desktop's mime database
    FileIcon { path: String },
}

impl ImageLike {
    /// Plain source with no decoration.
    #[must_use]
    pub fn source(source: impl Into<String>) -> Self {
        Self::Source {
            source: ImageSource::Plain(source.into()),
            fallback: None,
            tint_color: None,
            mask: None,
        }
    }

    /// Returns the URI scheme of a plain source (`https`, `file`, `data`...), if any.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        let Self::Source {
            source: ImageSource::Plain(source),
            ..
        } = self
        else {
            return None;
        };
        let (scheme, _) = source.split_once(':')?;
        let valid = !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        valid.then_some(scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_resolve_raw_ignores_appearance() {
        let color = ColorLike::raw("#ff0000");
        assert_eq!(color.resolve(Appearance::Light), "#ff0000");
        assert_eq!(color.resolve(Appearance::Dark), "#ff0000");
    }

    #[test]
    fn test_color_resolve_themed() {
        let color = ColorLike::Themed {
            light: "blue".to_string(),
            dark: "yellow".to_string(),
            adjust_contrast: false,
        };
        assert_eq!(color.resolve(Appearance::Light), "blue");
        assert_eq!(color.resolve(Appearance::Dark), "yellow");
    }

    #[test]
    fn test_color_is_hex() {
        assert!(ColorLike::raw("#0f0").is_hex());
        assert!(ColorLike::raw("#00ff00").is_hex());
        assert!(ColorLike::raw("#00ff00aa").is_hex());
        assert!(!ColorLike::raw("#00ff0").is_hex());
        assert!(!ColorLike::raw("raycast-red").is_hex());
        assert!(!ColorLike::raw("#zzzzzz").is_hex());
    }

    #[test]
    fn test_image_source_resolve() {
        let themed = ImageSource::Themed {
            light: "light.svg".to_string(),
            dark: "dark.svg".to_string(),
        };
        assert_eq!(themed.resolve(Appearance::Light), "light.svg");
        assert_eq!(themed.resolve(Appearance::Dark), "dark.svg");
    }

    #[test]
    fn test_image_scheme() {
        assert_eq!(
            ImageLike::source("https://example.com/a.png").scheme(),
            Some("https")
        );
        assert_eq!(ImageLike::source("data:image/png;base64,AA").scheme(), Some("data"));
        assert_eq!(ImageLike::source("magnifying-glass").scheme(), None);
        assert_eq!(
            ImageLike::FileIcon {
                path: "/tmp/a.txt".to_string()
            }
            .scheme(),
            None
        );
    }

    #[test]
    fn test_image_serializes_tagged() {
        let value = serde_json::to_value(ImageLike::source("icon.png")).unwrap();
        assert_eq!(value["type"], "source");
        assert_eq!(value["source"], "icon.png");
        assert!(value.get("mask").is_none());
    }
}
