//! Palette-indexed lookup tables.
//!
//! Both table kinds are owned by the caller (normally populated by the
//! asset pipeline) and are read-only to the renderers, so they may be
//! shared freely between concurrent draw calls.

/// 256-entry color translation, `dst = map[src]`.
pub type PaletteMap = [u8; 256];

/// 256x256 compositing lookup, indexed `[src_color][dst_color]`.
pub type BlendTable = [[u8; 256]; 256];

pub fn identity_map() -> PaletteMap {
    std::array::from_fn(|i| i as u8)
}

/// Darkening map for palettes laid out as a brightness ramp: level 0 is
/// full bright, `levels - 1` is black. Stand-in for asset-derived light
/// tables in the demo and tests.
pub fn ramp_light_map(level: usize, levels: usize) -> PaletteMap {
    debug_assert!(levels > 1 && level < levels);
    std::array::from_fn(|i| (i * (levels - 1 - level) / (levels - 1)) as u8)
}

/// Index-averaging blend table for ramp palettes: `blend[s][d] = (s+d)/2`.
pub fn ramp_blend_table() -> Box<BlendTable> {
    let mut table: Box<BlendTable> = Box::new([[0u8; 256]; 256]);
    for (s, row) in table.iter_mut().enumerate() {
        for (d, out) in row.iter_mut().enumerate() {
            *out = ((s + d) / 2) as u8;
        }
    }
    table
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_maps_every_index_to_itself() {
        let map = identity_map();
        assert_eq!(map[0], 0);
        assert_eq!(map[0x80], 0x80);
        assert_eq!(map[0xFF], 0xFF);
    }

    #[test]
    fn ramp_light_levels_darken_monotonically() {
        let bright = ramp_light_map(0, 16);
        let dim = ramp_light_map(8, 16);
        let dark = ramp_light_map(15, 16);
        assert_eq!(bright[200], 200);
        assert!(dim[200] < 200);
        assert_eq!(dark[200], 0);
    }

    #[test]
    fn ramp_blend_averages_indices() {
        let blend = ramp_blend_table();
        assert_eq!(blend[10][20], 15);
        assert_eq!(blend[0][0], 0);
        assert_eq!(blend[255][255], 255);
    }
}
