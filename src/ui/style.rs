use crate::poi::IconKind;
use egui::{Color32, FontId, Stroke};

/// Style configuration for the map surface and its decorations
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Background color behind the tiles
    pub background_color: Color32,
    /// Fill for tiles that have not arrived yet
    pub placeholder_color: Color32,
    /// Outline around the map container
    pub border_stroke: Stroke,
    pub zoom_controls: ZoomControlStyle,
    pub attribution: AttributionStyle,
    pub mouse_position: AttributionStyle,
    pub markers: MarkerStyle,
    pub popup: PopupStyle,
    pub list: ListStyle,
}

/// Style for zoom control buttons
#[derive(Debug, Clone)]
pub struct ZoomControlStyle {
    pub background_color: Color32,
    pub hover_color: Color32,
    pub text_color: Color32,
    pub border_stroke: Stroke,
    pub button_size: f32,
    /// Margin from the top-left corner
    pub margin: f32,
    pub rounding: f32,
}

/// Style for text read-outs pinned to a corner of the map
#[derive(Debug, Clone)]
pub struct AttributionStyle {
    pub text_color: Color32,
    pub background_color: Color32,
    pub font_id: FontId,
    pub padding: f32,
    pub margin: f32,
}

/// Style for point-of-interest markers
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    pub border_color: Color32,
    pub border_width: f32,
    pub glyph_color: Color32,
    pub glyph_font: FontId,
}

#[derive(Debug, Clone)]
pub struct PopupStyle {
    pub background_color: Color32,
    pub border_color: Color32,
    pub border_width: f32,
    pub rounding: f32,
    pub padding: f32,
    pub title_font: FontId,
    pub description_font: FontId,
    pub text_color: Color32,
    pub close_color: Color32,
    pub width: f32,
}

/// Style for the object list panel
#[derive(Debug, Clone)]
pub struct ListStyle {
    pub width: f32,
    pub title_color: Color32,
    pub description_color: Color32,
}

impl MarkerStyle {
    pub fn fill_color(&self, kind: IconKind) -> Color32 {
        let [r, g, b] = kind.color();
        Color32::from_rgb(r, g, b)
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(242, 239, 233),
            placeholder_color: Color32::from_rgb(221, 221, 221),
            border_stroke: Stroke::new(1.0, Color32::GRAY),
            zoom_controls: ZoomControlStyle::default(),
            attribution: AttributionStyle::default(),
            mouse_position: AttributionStyle {
                font_id: FontId::monospace(11.0),
                ..AttributionStyle::default()
            },
            markers: MarkerStyle::default(),
            popup: PopupStyle::default(),
            list: ListStyle::default(),
        }
    }
}

impl Default for ZoomControlStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgba_unmultiplied(0, 60, 136, 128),
            hover_color: Color32::from_rgba_unmultiplied(0, 60, 136, 178),
            text_color: Color32::WHITE,
            border_stroke: Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 100)),
            button_size: 22.0,
            margin: 8.0,
            rounding: 2.0,
        }
    }
}

impl Default for AttributionStyle {
    fn default() -> Self {
        Self {
            text_color: Color32::from_rgba_unmultiplied(0, 0, 0, 200),
            background_color: Color32::from_rgba_unmultiplied(255, 255, 255, 180),
            font_id: FontId::proportional(10.0),
            padding: 3.0,
            margin: 6.0,
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            border_color: Color32::WHITE,
            border_width: 1.5,
            glyph_color: Color32::WHITE,
            glyph_font: FontId::proportional(11.0),
        }
    }
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            border_color: Color32::from_gray(204),
            border_width: 1.0,
            rounding: 6.0,
            padding: 10.0,
            title_font: FontId::proportional(14.0),
            description_font: FontId::proportional(12.0),
            text_color: Color32::from_gray(30),
            close_color: Color32::from_gray(120),
            width: 220.0,
        }
    }
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            width: 260.0,
            title_color: Color32::from_gray(20),
            description_color: Color32::from_gray(110),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_colors_follow_icon_kind() {
        let style = MarkerStyle::default();
        assert_eq!(
            style.fill_color(IconKind::Sport),
            Color32::from_rgb(30, 144, 255)
        );
        assert_ne!(
            style.fill_color(IconKind::Park),
            style.fill_color(IconKind::Church)
        );
    }
}
