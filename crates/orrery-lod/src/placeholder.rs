//! Flat colours shown while a body's textures are unavailable.

/// An sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Channels normalised to `[0, 1]`.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

/// Light-emitting bodies: also the emissive tint once textured.
pub const EMISSIVE_COLOR: Rgb = Rgb(0xff, 0xaa, 0x00);
/// Everything else.
pub const SOLID_COLOR: Rgb = Rgb(0x55, 0x55, 0x55);
/// Shown indefinitely when a body's baseline texture failed to load.
pub const FALLBACK_COLOR: Rgb = Rgb(0x44, 0x44, 0x44);

/// Placeholder colour for a body whose baseline texture is not ready yet.
///
/// Also used for bodies that declare no textures at all.
pub fn placeholder_color(emissive: bool) -> Rgb {
    if emissive { EMISSIVE_COLOR } else { SOLID_COLOR }
}
