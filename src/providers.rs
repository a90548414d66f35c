//! External collaborators. The engine never touches media storage or
//! translation catalogs itself; it reaches both through these seams.

use crate::error::Error;
use crate::model::TextDirection;

/// Resolves opaque media references to something the backend can emit.
pub trait MediaResolver {
    /// URL for the reference, given the display size the layout decided on.
    fn resolve_image_url(
        &self,
        media_reference: &str,
        width_hint: f32,
        height_hint: f32,
    ) -> Result<String, Error>;

    /// Intrinsic (width, height) in points, used when the element leaves a
    /// dimension unspecified.
    fn intrinsic_size(&self, media_reference: &str) -> Result<(f32, f32), Error>;
}

/// Localization lookup. All user-facing strings arrive already localized;
/// the engine only asks for direction and the few strings it originates.
pub trait Localizer {
    fn text_direction(&self) -> TextDirection;

    /// Translate `key`, substituting each `%s` with the next argument.
    fn translate(&self, key: &str, args: &[&str]) -> String;
}

/// Media resolver with no backing store: every lookup misses, which the
/// engine recovers from with a placeholder-sized empty region.
pub struct NullMediaResolver;

impl MediaResolver for NullMediaResolver {
    fn resolve_image_url(
        &self,
        media_reference: &str,
        _width_hint: f32,
        _height_hint: f32,
    ) -> Result<String, Error> {
        Err(Error::MediaResolution(media_reference.to_string()))
    }

    fn intrinsic_size(&self, media_reference: &str) -> Result<(f32, f32), Error> {
        Err(Error::MediaResolution(media_reference.to_string()))
    }
}

/// Identity localizer: LTR, keys pass through with `%s` substitution.
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn text_direction(&self) -> TextDirection {
        TextDirection::Ltr
    }

    fn translate(&self, key: &str, args: &[&str]) -> String {
        let mut out = String::with_capacity(key.len());
        let mut args = args.iter();
        let mut rest = key;
        while let Some(pos) = rest.find("%s") {
            out.push_str(&rest[..pos]);
            out.push_str(args.next().copied().unwrap_or(""));
            rest = &rest[pos + 2..];
        }
        out.push_str(rest);
        out
    }
}
