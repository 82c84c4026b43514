use crate::foundation::error::{CakewalkError, CakewalkResult};
use crate::render::backend::FontWeight;

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Stateful helper for building Parley text layouts.
///
/// Typefaces are registered once via [`TextLayoutEngine::register`]; layouts
/// reference them by the returned family name.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register raw TTF/OTF bytes into the font collection, returning the
    /// primary family name for use in later layouts.
    pub(crate) fn register(&mut self, font_bytes: &[u8]) -> CakewalkResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CakewalkError::text("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CakewalkError::text("registered font family has no name"))?
            .to_string();
        Ok(family_name)
    }

    /// Shape and lay out plain text against an already-registered family.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        weight: FontWeight,
        brush: TextBrushRgba8,
    ) -> CakewalkResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CakewalkError::text("text size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(match weight {
            FontWeight::Normal => parley::style::FontWeight::NORMAL,
            FontWeight::Bold => parley::style::FontWeight::BOLD,
        }));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
