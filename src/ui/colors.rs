use ratatui::style::{Color, palette::tailwind};

pub struct TableColors {
    pub buffer_bg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub row_fg: Color,
    pub selected_row_style_fg: Color,
    pub normal_row_color: Color,
    pub alt_row_color: Color,
    pub footer_border_color: Color,
}

impl TableColors {
    pub const fn new(color: &tailwind::Palette) -> Self {
        Self {
            buffer_bg: tailwind::SLATE.c950,
            header_bg: color.c900,
            header_fg: tailwind::SLATE.c200,
            row_fg: tailwind::SLATE.c200,
            selected_row_style_fg: color.c400,
            normal_row_color: tailwind::SLATE.c950,
            alt_row_color: tailwind::SLATE.c900,
            footer_border_color: color.c400,
        }
    }

    /// Red for a drop, green for a rise, the plain row colour when unchanged.
    pub fn change_color(&self, change: f64) -> Color {
        if change < 0.0 {
            Color::Red
        } else if change > 0.0 {
            Color::Green
        } else {
            self.row_fg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PALETTE;

    #[test]
    fn change_color_is_tri_state() {
        let colors = TableColors::new(&PALETTE);
        assert_eq!(colors.change_color(-0.01), Color::Red);
        assert_eq!(colors.change_color(0.01), Color::Green);
        assert_eq!(colors.change_color(0.0), colors.row_fg);
        assert_eq!(colors.change_color(-0.0), colors.row_fg);
    }
}
