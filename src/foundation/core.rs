/// Straight (non-premultiplied) RGBA8 color.
///
/// This is the value exchanged by [`crate::PixelBuffer::color_at`] and
/// [`crate::PixelBuffer::set_color_at`]. Grayscale pixels map to and from the
/// color's [`brightness`](Self::brightness).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::rgba(0, 0, 0, 255)
    }
}

impl Color {
    /// Opaque gray with all color channels set to `v`.
    pub const fn gray(v: u8) -> Self {
        Self::rgba(v, v, v, 255)
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// HSB brightness: the largest of the three color channels.
    pub fn brightness(self) -> u8 {
        self.r.max(self.g).max(self.b)
    }

    /// Channels in RGBA byte order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
