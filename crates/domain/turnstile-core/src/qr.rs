use qrcode::{Color, QrCode};

/// Pixel size of the square QR image the presentation layer targets.
pub const QR_IMAGE_SIZE: u32 = 512;

#[derive(Debug, thiserror::Error)]
pub enum QrEncodeError {
    #[error("QR encoding failed: {0}")]
    Encode(String),
}

/// A square matrix of binary black/white modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }

    /// Pixel edge length of a single module when rendered into the
    /// fixed-size target image.
    pub fn module_pixel_size(&self) -> u32 {
        QR_IMAGE_SIZE / self.width.max(1) as u32
    }

    /// Terminal rendering: two characters per module so the code stays
    /// roughly square in a monospace font.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width * 2 + 1) * self.width);
        for y in 0..self.width {
            for x in 0..self.width {
                out.push_str(if self.is_dark(x, y) { "██" } else { "  " });
            }
            out.push('\n');
        }
        out
    }
}

/// Encode an entry token into a QR module matrix. Stateless and
/// deterministic; error-correction level is the library default.
pub fn encode_entry_token(token: &str) -> Result<QrMatrix, QrEncodeError> {
    let code = QrCode::new(token.as_bytes()).map_err(|e| QrEncodeError::Encode(e.to_string()))?;
    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();
    Ok(QrMatrix { width, modules })
}
