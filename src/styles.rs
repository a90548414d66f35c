use std::collections::HashMap;

use crate::error::Error;
use crate::model::Style;

/// The style name that must always resolve.
pub const DEFAULT_STYLE: &str = "default";

/// Named style lookup. Registration overwrites silently (last write wins);
/// insertion order is kept so the generated stylesheet is stable.
pub struct StyleRegistry {
    styles: HashMap<String, Style>,
    order: Vec<String>,
    builtin: Style,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self {
            styles: HashMap::new(),
            order: Vec::new(),
            builtin: Style::named(DEFAULT_STYLE),
        }
    }

    pub fn from_styles(styles: &[Style]) -> Self {
        let mut registry = Self::new();
        for style in styles {
            registry.register(style.clone());
        }
        registry
    }

    pub fn register(&mut self, style: Style) {
        if !self.styles.contains_key(&style.name) {
            self.order.push(style.name.clone());
        }
        self.styles.insert(style.name.clone(), style);
    }

    pub fn resolve(&self, name: &str) -> Result<&Style, Error> {
        self.styles
            .get(name)
            .ok_or_else(|| Error::UnknownStyle(name.to_string()))
    }

    /// Resolve with recovery: a missing name logs a warning and substitutes
    /// the default style so the element still renders.
    pub fn resolve_or_default(&self, name: &str) -> &Style {
        match self.resolve(name) {
            Ok(style) => style,
            Err(e) => {
                log::warn!("{e}; substituting `{DEFAULT_STYLE}`");
                self.default_style()
            }
        }
    }

    /// The registered default style, or the built-in generic sans-serif 10pt
    /// when the registry has none.
    pub fn default_style(&self) -> &Style {
        self.styles.get(DEFAULT_STYLE).unwrap_or(&self.builtin)
    }

    /// Registered styles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.order.iter().filter_map(|name| self.styles.get(name))
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `#rgb` or `#rrggbb`. Anything else is malformed; callers omit the
/// color and keep rendering.
pub fn parse_hex_color(val: &str) -> Result<[u8; 3], Error> {
    let malformed = || Error::MalformedColor(val.to_string());
    let hex = val.strip_prefix('#').ok_or_else(malformed)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16).ok_or_else(malformed)? as u8;
                rgb[i] = v * 16 + v;
            }
            Ok(rgb)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| malformed())?;
            let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| malformed())?;
            let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| malformed())?;
            Ok([r, g, b])
        }
        _ => Err(malformed()),
    }
}

/// Validate a color for pass-through into generated markup. Malformed values
/// are dropped with a warning, never fatal.
pub fn checked_color(val: &str) -> Option<String> {
    match parse_hex_color(val) {
        Ok([r, g, b]) => Some(format!("#{r:02x}{g:02x}{b:02x}")),
        Err(e) => {
            log::warn!("{e}; omitting color");
            None
        }
    }
}
