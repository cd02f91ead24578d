use mimalloc::MiMalloc;
use once_cell::sync::Lazy;
use sdl2::{event::Event, keyboard::Keycode, pixels::PixelFormatEnum};

use rleblit::{
    draw_outline_skip_zero, encode_sprite, identity_map, ramp_blend_table, ramp_light_map,
    BlendTable, DrawContext, PaletteMap, Point, Sprite, SpriteFormat, Surface,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const SCREEN_W: usize = 320;
const SCREEN_H: usize = 180;
const LIGHT_LEVELS: usize = 8;

static PALETTE: Lazy<[(u8, u8, u8); 256]> = Lazy::new(|| {
    // Brightness ramp with a warm tint, so the ramp light maps darken
    // and the blend table averages sensibly.
    std::array::from_fn(|i| (i as u8, (i * 3 / 4) as u8, (i / 2) as u8))
});

static LIGHT_MAPS: Lazy<Vec<PaletteMap>> = Lazy::new(|| {
    let mut maps = vec![identity_map()];
    maps.extend((1..LIGHT_LEVELS).map(|level| ramp_light_map(level, LIGHT_LEVELS)));
    maps
});

static BLEND: Lazy<BlendTable> = Lazy::new(|| *ramp_blend_table());

fn diamond(radius: i32, color: u8) -> Vec<Vec<Option<u8>>> {
    let size = radius * 2 + 1;
    (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    if (x - radius).abs() + (y - radius).abs() <= radius {
                        Some(color)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

fn ring(radius: i32, color: u8) -> Vec<Vec<Option<u8>>> {
    let size = radius * 2 + 1;
    let outer = radius * radius;
    let inner = (radius - 4) * (radius - 4);
    (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    let d2 = (x - radius) * (x - radius) + (y - radius) * (y - radius);
                    if d2 <= outer && d2 >= inner {
                        Some(color)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

fn checkerboard(out: &mut Surface<'_>) {
    for y in 0..out.h() {
        for x in 0..out.w() {
            let shade = if ((x / 16) + (y / 16)) % 2 == 0 { 40 } else { 64 };
            out.put_pixel(x, y, shade);
        }
    }
}

fn main() -> Result<(), String> {
    let sprites: Vec<Sprite> = vec![
        encode_sprite(SpriteFormat::Classic, 33, &diamond(16, 200)),
        encode_sprite(SpriteFormat::Extended, 33, &ring(16, 150)),
        encode_sprite(SpriteFormat::Unified, 33, &diamond(16, 240)),
    ];
    let highlighted = encode_sprite(SpriteFormat::Unified, 33, &ring(16, 220));

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let window = video_subsystem
        .window("rleblit", 1280, 720)
        .position_centered()
        .build().unwrap();

    let mut canvas = window.into_canvas().present_vsync().build().unwrap();
    let creator = canvas.texture_creator();
    let mut texture = creator
        .create_texture_target(PixelFormatEnum::RGB24, SCREEN_W as u32, SCREEN_H as u32)
        .unwrap();
    let mut event_pump = sdl_context.event_pump()?;

    let mut ctx = DrawContext::new(LIGHT_MAPS.as_slice(), &BLEND);
    let mut pixels = vec![0u8; SCREEN_W * SCREEN_H];
    let mut frame = vec![0u8; SCREEN_W * SCREEN_H * 3];
    let mut tick: i32 = 0;

    loop {
        let mut out = Surface::new(&mut pixels, SCREEN_W, SCREEN_H);
        checkerboard(&mut out);

        // Sweep across the surface, including past both edges.
        let sweep = tick % (SCREEN_W as i32 + 66) - 33;
        for (i, sprite) in sprites.iter().enumerate() {
            let position = Point::new(sweep + i as i32 * 90, 50 + i as i32 * 40);
            ctx.draw_translucent(&mut out, position, sprite);
        }
        let anchor = Point::new(140, 165);
        draw_outline_skip_zero(&mut out, anchor, &highlighted, 255);
        ctx.draw(&mut out, anchor, &highlighted);

        for (dst, &index) in frame.chunks_exact_mut(3).zip(pixels.iter()) {
            let (r, g, b) = PALETTE[index as usize];
            dst[0] = r;
            dst[1] = g;
            dst[2] = b;
        }
        texture.update(None, &frame, SCREEN_W * 3).unwrap();
        canvas.copy(&texture, None, None).unwrap();
        canvas.present();
        tick += 1;

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } | Event::KeyDown { keycode: Some(Keycode::Escape), .. } => {
                    return Ok(());
                }
                Event::KeyDown { keycode: Some(Keycode::Space), .. } => {
                    ctx.set_transparency(!ctx.transparency());
                }
                Event::KeyDown { keycode: Some(Keycode::Up), .. } => {
                    if ctx.light_index() + 1 < ctx.light_levels() {
                        ctx.set_light_index(ctx.light_index() + 1);
                    }
                }
                Event::KeyDown { keycode: Some(Keycode::Down), .. } => {
                    if ctx.light_index() > 0 {
                        ctx.set_light_index(ctx.light_index() - 1);
                    }
                }
                _ => {}
            }
        }
    }
}
