//! QR code generation and display.

use std::path::Path;

use anyhow::Context;
use image::Rgba;
use qrcode::{EcLevel, QrCode};

/// Fixed rendering parameters for one output target
pub struct QrStyle {
    pub ec_level: EcLevel,
    /// Minimum image edge in pixels, ignored in the terminal
    pub size: u32,
    pub dark: [u8; 3],
    pub light: [u8; 3],
}

const BRIGHT_GREEN: [u8; 3] = [95, 191, 95];
const BLACK: [u8; 3] = [0, 0, 0];
const BRIGHT_BLACK: [u8; 3] = [128, 128, 128];

/// Style for `--image` output
pub const FILE_STYLE: QrStyle = QrStyle {
    ec_level: EcLevel::L,
    size: 512,
    dark: BLACK,
    light: BRIGHT_GREEN,
};

/// Style for terminal output
pub const TERMINAL_STYLE: QrStyle = QrStyle {
    ec_level: EcLevel::L,
    size: 0,
    dark: BRIGHT_BLACK,
    light: BRIGHT_GREEN,
};

const ANSI_RESET: &str = "\x1b[0m";

fn ansi_fg([r, g, b]: [u8; 3]) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

fn ansi_bg([r, g, b]: [u8; 3]) -> String {
    format!("\x1b[48;2;{};{};{}m", r, g, b)
}

/// Write the QR code as a PNG image.
pub fn write_qr_png(data: &str, style: &QrStyle, path: &Path) -> anyhow::Result<()> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), style.ec_level)
        .context("failed to generate QR code")?;

    let [r, g, b] = style.dark;
    let dark = Rgba([r, g, b, 255]);
    let [r, g, b] = style.light;
    let light = Rgba([r, g, b, 255]);

    code.render::<Rgba<u8>>()
        .dark_color(dark)
        .light_color(light)
        .min_dimensions(style.size, style.size)
        .build()
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

/// Print a QR code to the terminal.
pub fn print_qr_code(data: &str, style: &QrStyle) -> anyhow::Result<()> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), style.ec_level)
        .context("failed to generate QR code")?;

    print!("{}", render_half_blocks(&code, style));
    Ok(())
}

/// Render with Unicode half blocks where each character covers
/// 2 vertical modules.
fn render_half_blocks(code: &QrCode, style: &QrStyle) -> String {
    let colors = code.to_colors();
    let width = code.width();
    let dark = |i: usize| colors.get(i).map(|c| *c == qrcode::Color::Dark).unwrap_or(false);

    // ▀ = top dark, ▄ = bottom dark, █ = both dark
    let fg = ansi_fg(style.dark);
    let bg = ansi_bg(style.light);
    let quiet = " ".repeat(width + 4);
    let mut out = String::new();

    out.push_str(&format!("{}{}{}\n", bg, quiet, ANSI_RESET));

    for y in (0..colors.len()).step_by(width * 2) {
        out.push_str(&bg);
        out.push_str(&fg);
        out.push_str("  ");
        for x in 0..width {
            let ch = match (dark(y + x), dark(y + width + x)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            };
            out.push(ch);
        }
        out.push_str("  ");
        out.push_str(ANSI_RESET);
        out.push('\n');
    }

    out.push_str(&format!("{}{}{}\n", bg, quiet, ANSI_RESET));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_block_rows() {
        let data = b"lndconnect://127.0.0.1:10009?macaroon=AA";
        let code = QrCode::with_error_correction_level(data, EcLevel::L).unwrap();
        let width = code.width();

        let rendered = render_half_blocks(&code, &TERMINAL_STYLE);
        let rows = rendered.lines().count();

        // two quiet rows plus one row per pair of modules
        assert_eq!(rows, 2 + (width + 1) / 2);
        assert!(rendered.contains("\x1b[48;2;95;191;95m"));
    }

    #[test]
    fn test_png_written() {
        let path = std::env::temp_dir()
            .join(format!("lndconnect-qr-test-{}.png", std::process::id()));

        write_qr_png("lndconnect://h:1?macaroon=m", &FILE_STYLE, &path).unwrap();

        let img = image::open(&path).unwrap();
        assert!(img.width() >= FILE_STYLE.size);
        std::fs::remove_file(&path).unwrap();
    }
}
