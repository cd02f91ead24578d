//! Sprite encoders, used by the demo and the test suite to build streams
//! from plain pixel grids.
//!
//! Input rows are given top-down with `None` for transparent cells; the
//! encoder stores them bottom first as the renderers expect. Runs never
//! cross row boundaries in encoded output, which every decoder accepts.

use crate::decode::SpriteFormat;
use crate::sprite::Sprite;

/// Longest run each classic control byte can express.
const CLASSIC_MAX_TRANSPARENT: usize = 128;
const CLASSIC_MAX_PIXELS: usize = 127;

const MAX_TRANSPARENT: usize = 127;
const MAX_FILL_RUN: usize = 63;
const MAX_PIXELS_RUN: usize = 65;

/// A fill run costs two bytes, so shorter runs stay verbatim.
const MIN_FILL_RUN: usize = 3;

pub fn encode_sprite(format: SpriteFormat, width: u16, rows: &[Vec<Option<u8>>]) -> Sprite {
    debug_assert!(!rows.is_empty());
    debug_assert!(rows.iter().all(|row| row.len() == width as usize));
    let mut data = Vec::new();
    for row in rows.iter().rev() {
        match format {
            SpriteFormat::Classic => encode_row_classic(&mut data, row),
            SpriteFormat::Extended | SpriteFormat::Unified => encode_row_runs(&mut data, row),
        }
    }
    Sprite::new(format, width, rows.len() as u16, data)
}

fn encode_row_classic(out: &mut Vec<u8>, row: &[Option<u8>]) {
    let mut i = 0;
    while i < row.len() {
        if row[i].is_none() {
            let start = i;
            while i < row.len() && row[i].is_none() {
                i += 1;
            }
            let mut len = i - start;
            while len > 0 {
                let chunk = len.min(CLASSIC_MAX_TRANSPARENT);
                out.push((256 - chunk) as u8);
                len -= chunk;
            }
        } else {
            let start = i;
            while i < row.len() && row[i].is_some() {
                i += 1;
            }
            let pixels: Vec<u8> = row[start..i].iter().map(|p| p.unwrap()).collect();
            for chunk in pixels.chunks(CLASSIC_MAX_PIXELS) {
                out.push(chunk.len() as u8);
                out.extend_from_slice(chunk);
            }
        }
    }
}

fn encode_row_runs(out: &mut Vec<u8>, row: &[Option<u8>]) {
    let mut i = 0;
    while i < row.len() {
        if row[i].is_none() {
            let start = i;
            while i < row.len() && row[i].is_none() {
                i += 1;
            }
            let mut len = i - start;
            while len > 0 {
                let chunk = len.min(MAX_TRANSPARENT);
                out.push(chunk as u8);
                len -= chunk;
            }
        } else {
            let start = i;
            while i < row.len() && row[i].is_some() {
                i += 1;
            }
            let pixels: Vec<u8> = row[start..i].iter().map(|p| p.unwrap()).collect();
            encode_opaque_runs(out, &pixels);
        }
    }
}

fn encode_opaque_runs(out: &mut Vec<u8>, pixels: &[u8]) {
    let mut i = 0;
    let mut verbatim_start = 0;
    while i < pixels.len() {
        let color = pixels[i];
        let mut run = 1;
        while i + run < pixels.len() && pixels[i + run] == color {
            run += 1;
        }
        if run >= MIN_FILL_RUN {
            flush_verbatim(out, &pixels[verbatim_start..i]);
            let mut len = run;
            while len > 0 {
                let chunk = len.min(MAX_FILL_RUN);
                out.push(0xBF - chunk as u8);
                out.push(color);
                len -= chunk;
            }
            i += run;
            verbatim_start = i;
        } else {
            i += run;
        }
    }
    flush_verbatim(out, &pixels[verbatim_start..]);
}

fn flush_verbatim(out: &mut Vec<u8>, pixels: &[u8]) {
    for chunk in pixels.chunks(MAX_PIXELS_RUN) {
        out.push((256 - chunk.len()) as u8);
        out.extend_from_slice(chunk);
    }
}
