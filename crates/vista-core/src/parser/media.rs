//! Image and color sub-parsers.
//!
//! Pure functions of a single JSON value. They return `None` for shapes they
//! do not recognise and leave reporting to the caller, which knows the path.

use serde_json::{Map, Value};
use vista_types::{ColorLike, ImageLike, ImageMask, ImageSource};

/// Parse an image reference.
///
/// A string is a plain source. Objects are resolved by key presence, first
/// match wins: `source`, then `fileIcon`.
#[must_use]
pub fn parse_image(value: &Value) -> Option<ImageLike> {
    match value {
        Value::String(source) => Some(ImageLike::source(source.clone())),
        Value::Object(object) => {
            if let Some(source) = object.get("source") {
                parse_source_image(object, source)
            } else if let Some(path) = object.get("fileIcon").and_then(Value::as_str) {
                Some(ImageLike::FileIcon {
                    path: path.to_string(),
                })
            } else {
                None
            }
        }
        _ => None,
    }
}

fn parse_source_image(object: &Map<String, Value>, source: &Value) -> Option<ImageLike> {
    let source = parse_image_source(source)?;
    let fallback = object.get("fallback").and_then(parse_image_source);
    let tint_color = object.get("tintColor").and_then(parse_color);
    let mask = object.get("mask").and_then(Value::as_str).and_then(parse_mask);

    Some(ImageLike::Source {
        source,
        fallback,
        tint_color,
        mask,
    })
}

fn parse_image_source(value: &Value) -> Option<ImageSource> {
    match value {
        Value::String(source) => Some(ImageSource::Plain(source.clone())),
        Value::Object(object) => {
            let light = object.get("light").and_then(Value::as_str)?;
            let dark = object.get("dark").and_then(Value::as_str)?;
            Some(ImageSource::Themed {
                light: light.to_string(),
                dark: dark.to_string(),
            })
        }
        _ => None,
    }
}

fn parse_mask(mask: &str) -> Option<ImageMask> {
    match mask {
        "circle" => Some(ImageMask::Circle),
        "roundedRectangle" => Some(ImageMask::RoundedRectangle),
        _ => None,
    }
}

/// Parse a color. Strings stay raw; `{light, dark}` pairs stay themed.
#[must_use]
pub fn parse_color(value: &Value) -> Option<ColorLike> {
    match value {
        Value::String(raw) => Some(ColorLike::raw(raw.clone())),
        Value::Object(object) => {
            let light = object.get("light").and_then(Value::as_str)?;
            let dark = object.get("dark").and_then(Value::as_str)?;
            let adjust_contrast = object
                .get("adjustContrast")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            Some(ColorLike::Themed {
                light: light.to_string(),
                dark: dark.to_string(),
                adjust_contrast,
            })
        }
        _ => None,
    }
}
