//! Text panel textures
//!
//! Panels show a paragraph of word-wrapped white text on a translucent
//! black background. The texture is drawn once into a render target when
//! the scene meshes are built.

use macroquad::prelude::*;

/// Text texture layout in pixels
pub mod layout {
    pub const TEXTURE_WIDTH: u32 = 512;
    pub const TEXTURE_HEIGHT: u32 = 256;
    pub const PADDING: f32 = 20.0;
    pub const FONT_SIZE: u16 = 24;
    pub const LINE_HEIGHT: f32 = 30.0;
}

/// Greedy word wrap. `measure` returns the drawn width of a string.
///
/// A word wider than `max_width` on its own still gets its own line.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };

        if measure(&candidate) > max_width && !line.is_empty() {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Render `text` into a new texture
pub fn render_text_texture(text: &str) -> Texture2D {
    use layout::*;

    let target = render_target(TEXTURE_WIDTH, TEXTURE_HEIGHT);
    target.texture.set_filter(FilterMode::Linear);

    let (w, h) = (TEXTURE_WIDTH as f32, TEXTURE_HEIGHT as f32);
    let mut camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, w, h));
    camera.render_target = Some(target.clone());
    set_camera(&camera);

    clear_background(Color::new(0.0, 0.0, 0.0, 0.5));

    let lines = wrap_text(text, w - PADDING * 2.0, |s| measure_text(s, None, FONT_SIZE, 1.0).width);
    for (i, line) in lines.iter().enumerate() {
        // draw_text positions the baseline; keep the first line's top at PADDING
        let baseline = PADDING + FONT_SIZE as f32 * 0.8 + i as f32 * LINE_HEIGHT;
        draw_text(line, PADDING, baseline, FONT_SIZE as f32, WHITE);
    }

    set_default_camera();
    target.texture
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-width measure: 10 px per character
    fn mono(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 100.0, mono);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|l| mono(l) <= 100.0));
    }

    #[test]
    fn test_long_word_gets_own_line() {
        let lines = wrap_text("a extraordinarily b", 50.0, mono);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_text("   ", 100.0, mono).is_empty());
    }
}
