//! Layer colours for overlays

/// RGB colour type
pub type LayerColor = [f32; 3];

/// Drawable layers of a solved problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Sites,
    Voronoi,
    Hull,
    Candidates,
    Center,
    Circle,
}

/// Trait for choosing a colour per layer
pub trait LayerPalette {
    fn layer_color(&self, layer: Layer) -> LayerColor;
}

/// Sites red, Voronoi green, hull blue, candidates yellow, circle and center white
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPalette;

impl LayerPalette for BasicPalette {
    fn layer_color(&self, layer: Layer) -> LayerColor {
        match layer {
            Layer::Sites => [1.0, 0.0, 0.0],
            Layer::Voronoi => [0.0, 1.0, 0.0],
            Layer::Hull => [0.0, 0.0, 1.0],
            Layer::Candidates => [1.0, 1.0, 0.0],
            Layer::Center | Layer::Circle => [1.0, 1.0, 1.0],
        }
    }
}

/// Palette with one overridable colour per layer
#[derive(Debug, Clone)]
pub struct CustomPalette {
    pub sites: LayerColor,
    pub voronoi: LayerColor,
    pub hull: LayerColor,
    pub candidates: LayerColor,
    pub center: LayerColor,
    pub circle: LayerColor,
}

impl Default for CustomPalette {
    fn default() -> Self {
        let basic = BasicPalette;
        Self {
            sites: basic.layer_color(Layer::Sites),
            voronoi: basic.layer_color(Layer::Voronoi),
            hull: basic.layer_color(Layer::Hull),
            candidates: basic.layer_color(Layer::Candidates),
            center: basic.layer_color(Layer::Center),
            circle: basic.layer_color(Layer::Circle),
        }
    }
}

impl LayerPalette for CustomPalette {
    fn layer_color(&self, layer: Layer) -> LayerColor {
        match layer {
            Layer::Sites => self.sites,
            Layer::Voronoi => self.voronoi,
            Layer::Hull => self.hull,
            Layer::Candidates => self.candidates,
            Layer::Center => self.center,
            Layer::Circle => self.circle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_palette() {
        let palette = BasicPalette;

        assert_eq!(palette.layer_color(Layer::Sites), [1.0, 0.0, 0.0]);
        assert_eq!(palette.layer_color(Layer::Voronoi), [0.0, 1.0, 0.0]);
        assert_eq!(palette.layer_color(Layer::Hull), [0.0, 0.0, 1.0]);
        assert_eq!(palette.layer_color(Layer::Candidates), [1.0, 1.0, 0.0]);
        assert_eq!(palette.layer_color(Layer::Circle), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_custom_palette() {
        let custom = CustomPalette {
            hull: [0.5, 0.5, 0.5],
            circle: [0.0, 1.0, 1.0],
            ..Default::default()
        };

        assert_eq!(custom.layer_color(Layer::Hull), [0.5, 0.5, 0.5]);
        assert_eq!(custom.layer_color(Layer::Circle), [0.0, 1.0, 1.0]);
        // Untouched layers keep the basic colours
        assert_eq!(custom.layer_color(Layer::Sites), BasicPalette.layer_color(Layer::Sites));
    }
}
