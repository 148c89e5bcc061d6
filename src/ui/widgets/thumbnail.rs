//! Half-block rendering of image thumbnails.
//!
//! Each terminal cell shows two pixel rows: the upper half block takes the top
//! pixel as foreground and the bottom pixel as background. Corner pixels are
//! painted with the surrounding background to round the outline.

use crate::device::{Rgb, Thumbnail};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

const UPPER_HALF_BLOCK: &str = "▀";

fn is_corner(thumbnail: &Thumbnail, x: u16, y: u16) -> bool {
    let last_x = thumbnail.width.saturating_sub(1);
    let last_y = thumbnail.height.saturating_sub(1);
    (x == 0 || x == last_x) && (y == 0 || y == last_y)
}

fn color_at(thumbnail: &Thumbnail, x: u16, y: u16, background: Color) -> Color {
    if is_corner(thumbnail, x, y) {
        return background;
    }
    match thumbnail.pixel(x, y) {
        Some(Rgb(r, g, b)) => Color::Rgb(r, g, b),
        None => background,
    }
}

/// Convert a thumbnail into styled lines, one per pair of pixel rows.
///
pub fn lines(thumbnail: &Thumbnail, background: Color) -> Vec<Line<'static>> {
    (0..thumbnail.height)
        .step_by(2)
        .map(|y| {
            let spans: Vec<Span> = (0..thumbnail.width)
                .map(|x| {
                    let top = color_at(thumbnail, x, y, background);
                    let bottom = color_at(thumbnail, x, y + 1, background);
                    Span::styled(UPPER_HALF_BLOCK, Style::default().fg(top).bg(bottom))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u16, height: u16) -> Thumbnail {
        Thumbnail {
            width,
            height,
            pixels: vec![Rgb(200, 10, 10); width as usize * height as usize],
        }
    }

    #[test]
    fn two_pixel_rows_per_line() {
        let rendered = lines(&solid(8, 6), Color::Reset);
        assert_eq!(rendered.len(), 3);
        assert!(rendered.iter().all(|line| line.spans.len() == 8));
    }

    #[test]
    fn corners_take_background() {
        let rendered = lines(&solid(4, 4), Color::Black);
        let top_left = rendered[0].spans[0].style;
        assert_eq!(top_left.fg, Some(Color::Black));
        assert_eq!(top_left.bg, Some(Color::Rgb(200, 10, 10)));
        let bottom_right = rendered[1].spans[3].style;
        assert_eq!(bottom_right.fg, Some(Color::Rgb(200, 10, 10)));
        assert_eq!(bottom_right.bg, Some(Color::Black));
        let inner = rendered[0].spans[1].style;
        assert_eq!(inner.fg, Some(Color::Rgb(200, 10, 10)));
    }

    #[test]
    fn odd_height_pads_with_background() {
        let rendered = lines(&solid(3, 3), Color::White);
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[1].spans[1].style.bg, Some(Color::White));
    }
}
