use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};
use crate::render::{
    CanvasLayerKind, EllipsePrimitive, LinePrimitive, RectPrimitive, TextPrimitive,
};

/// Primitives of one paint layer.
///
/// Backends paint rects, then lines, then ellipses, then texts within a
/// layer, and layers strictly in frame order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub ellipses: Vec<EllipsePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn new(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            rects: Vec::new(),
            lines: Vec::new(),
            ellipses: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.lines.is_empty()
            && self.ellipses.is_empty()
            && self.texts.is_empty()
    }

    fn validate(&self) -> TimelineResult<()> {
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for ellipse in &self.ellipses {
            ellipse.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one timeline draw pass, in viewport pixels.
///
/// A kind may appear more than once: each day header gets its own layer so a
/// later header covers the text of a pinned header sliding beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: Vec::new(),
        }
    }

    /// Opens a new layer on top of the existing ones.
    pub fn push_layer(&mut self, kind: CanvasLayerKind) -> &mut LayerPrimitives {
        self.layers.push(LayerPrimitives::new(kind));
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    pub fn layers_of(&self, kind: CanvasLayerKind) -> impl Iterator<Item = &LayerPrimitives> {
        self.layers.iter().filter(move |layer| layer.kind == kind)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.layers.iter().flat_map(|layer| layer.lines.iter())
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.layers.iter().flat_map(|layer| layer.rects.iter())
    }

    pub fn ellipses(&self) -> impl Iterator<Item = &EllipsePrimitive> {
        self.layers.iter().flat_map(|layer| layer.ellipses.iter())
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.layers.iter().flat_map(|layer| layer.texts.iter())
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for layer in &self.layers {
            layer.validate()?;
        }

        if self.layers.windows(2).any(|pair| pair[0].kind > pair[1].kind) {
            return Err(TimelineError::InvalidData(
                "frame layers must follow canvas paint order".to_owned(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(LayerPrimitives::is_empty)
    }
}
