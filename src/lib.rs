pub mod context;
pub mod decode;
pub mod encode;
pub mod palette;
pub mod render;
pub mod sprite;
pub mod surface;

pub use context::DrawContext;
pub use decode::{Command, SpriteFormat};
pub use encode::encode_sprite;
pub use palette::{identity_map, ramp_blend_table, ramp_light_map, BlendTable, PaletteMap};
pub use render::{
    draw, draw_blended, draw_blended_with_map, draw_outline, draw_outline_skip_zero,
    draw_with_map,
};
pub use sprite::Sprite;
pub use surface::{Point, Surface};

#[macro_export]
macro_rules! assert_eq_hex {
    ($left:expr, $right:expr) => {
        let left_val = $left;
        let right_val = $right;
        assert!(
            left_val == right_val,
            "assertion `left == right` failed\n  left: 0x{:X}\n right: 0x{:X}",
            left_val, right_val,
        )
    };
}
