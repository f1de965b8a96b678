use crate::config::ShortcutConfig;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use vista_types::ShortcutSpec;

/// Built-in chords for the common named shortcuts.
const NAMED_SHORTCUTS: [(&str, &str); 16] = [
    ("copy", "ctrl+shift+c"),
    ("copy-deeplink", "ctrl+shift+d"),
    ("copy-name", "ctrl+shift+n"),
    ("copy-path", "ctrl+shift+."),
    ("duplicate", "ctrl+d"),
    ("edit", "ctrl+e"),
    ("move-down", "ctrl+shift+down"),
    ("move-up", "ctrl+shift+up"),
    ("new", "ctrl+n"),
    ("open", "ctrl+o"),
    ("open-with", "ctrl+shift+o"),
    ("pin", "ctrl+shift+p"),
    ("refresh", "ctrl+r"),
    ("remove", "ctrl+x"),
    ("remove-all", "ctrl+shift+x"),
    ("save", "ctrl+s"),
];

#[allow(clippy::struct_excessive_bools)] // One flag per modifier key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Set the modifier called `name`. Returns `false` for unknown names.
    fn set(&mut self, name: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => self.ctrl = true,
            "shift" => self.shift = true,
            "alt" | "opt" | "option" => self.alt = true,
            "meta" | "cmd" | "command" | "super" | "windows" => self.meta = true,
            _ => return false,
        }
        true
    }
}

/// A concrete key chord such as `ctrl+shift+c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Shortcut {
    pub key: String,
    pub modifiers: Modifiers,
}

impl Shortcut {
    /// Build from a wire `{key, modifiers}` pair.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidShortcut` for an empty key or an unknown modifier.
    pub fn from_parts(key: &str, modifiers: &[String]) -> Result<Self> {
        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() {
            return Err(Error::InvalidShortcut("empty key".to_string()));
        }
        let mut mods = Modifiers::default();
        for name in modifiers {
            if !mods.set(name) {
                return Err(Error::InvalidShortcut(format!("unknown modifier '{name}'")));
            }
        }
        Ok(Self {
            key,
            modifiers: mods,
        })
    }

    /// Whether this chord is plain `enter`.
    #[must_use]
    pub fn is_enter(&self) -> bool {
        self.key == "enter" && self.modifiers == Modifiers::default()
    }
}

impl FromStr for Shortcut {
    type Err = Error;

    /// Parse `mod+mod+key`. The key is the last segment.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = parts.pop().unwrap_or_default();
        if key.is_empty() {
            return Err(Error::InvalidShortcut(s.to_string()));
        }
        let mut modifiers = Modifiers::default();
        for name in parts {
            if !modifiers.set(name) {
                return Err(Error::InvalidShortcut(s.to_string()));
            }
        }
        Ok(Self {
            key: key.to_ascii_lowercase(),
            modifiers,
        })
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers {
            ctrl,
            shift,
            alt,
            meta,
        } = self.modifiers;
        for (on, name) in [(ctrl, "ctrl"), (shift, "shift"), (alt, "alt"), (meta, "meta")] {
            if on {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(&self.key)
    }
}

/// Maps declared shortcuts to chords.
///
/// Built once per session from the keybind settings and handed to the
/// action panel builder.
#[derive(Debug, Clone)]
pub struct KeybindResolver {
    named: HashMap<String, Shortcut>,
}

impl KeybindResolver {
    /// Resolver with only the built-in named chords.
    #[must_use]
    pub fn new() -> Self {
        let named = NAMED_SHORTCUTS
            .iter()
            .filter_map(|(name, chord)| {
                chord
                    .parse()
                    .ok()
                    .map(|shortcut| ((*name).to_string(), shortcut))
            })
            .collect();
        Self { named }
    }

    /// Built-ins plus the user's overrides. Invalid overrides are logged and skipped.
    #[must_use]
    pub fn from_config(config: &ShortcutConfig) -> Self {
        let mut resolver = Self::new();
        for (name, chord) in &config.named {
            match chord.parse() {
                Ok(shortcut) => {
                    resolver.named.insert(name.clone(), shortcut);
                }
                Err(e) => warn!("Ignoring shortcut override for '{name}': {e}"),
            }
        }
        resolver
    }

    #[must_use]
    pub fn named(&self, name: &str) -> Option<&Shortcut> {
        self.named.get(name)
    }

    /// Resolve a declared shortcut. Names not in the table are tried as a
    /// literal chord; anything else is logged and dropped.
    #[must_use]
    pub fn resolve(&self, spec: &ShortcutSpec) -> Option<Shortcut> {
        let resolved = match spec {
            ShortcutSpec::Named { name } => match self.named.get(name) {
                Some(shortcut) => Ok(shortcut.clone()),
                None => name.parse(),
            },
            ShortcutSpec::Keys { key, modifiers } => Shortcut::from_parts(key, modifiers),
        };
        resolved
            .map_err(|e| warn!("Dropping shortcut {spec:?}: {e}"))
            .ok()
    }
}

impl Default for KeybindResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the reserved default chords, skipping invalid entries.
#[must_use]
pub fn default_shortcuts(config: &ShortcutConfig) -> Vec<Shortcut> {
    config
        .default_action_shortcuts
        .iter()
        .filter_map(|chord| match chord.parse() {
            Ok(shortcut) => Some(shortcut),
            Err(e) => {
                warn!("Ignoring default action shortcut: {e}");
                None
            }
        })
        .collect()
}
