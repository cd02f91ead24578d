//! Control-byte decoding for the three sprite stream formats.
//!
//! All three formats interleave transparent runs with opaque runs. The
//! classic format only knows verbatim pixel runs and its rows always sum
//! exactly to the sprite width. The two newer formats add fill runs and
//! allow transparent runs to cross row boundaries.

/// Stream encoding carried by a [`crate::Sprite`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteFormat {
    /// Oldest format: transparent for control >= 0x80, verbatim otherwise.
    Classic,
    /// Signed-control format with fill runs; transparent runs may cross rows.
    Extended,
    /// Same wire encoding as `Extended`, read through unsigned thresholds.
    Unified,
}

/// One decoded stream command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Transparent { length: u16 },
    Fill { length: u16, color: u8 },
    Pixels { colors: &'a [u8] },
}

impl Command<'_> {
    #[inline(always)]
    pub fn length(&self) -> u16 {
        match self {
            Command::Transparent { length } => *length,
            Command::Fill { length, .. } => *length,
            Command::Pixels { colors } => colors.len() as u16,
        }
    }

    #[inline(always)]
    pub fn is_opaque(&self) -> bool {
        !matches!(self, Command::Transparent { .. })
    }
}

/// A command plus the number of source bytes it occupied, control byte included.
#[derive(Clone, Copy, Debug)]
pub struct Decoded<'a> {
    pub command: Command<'a>,
    pub size: usize,
}

/// Decodes exactly one command from the head of `src`.
///
/// No bounds validation beyond slice indexing: the loader guarantees the
/// declared data size is never exceeded by a well-formed stream.
pub trait Codec {
    fn command(src: &[u8]) -> Decoded<'_>;
}

pub struct ClassicCodec;

impl Codec for ClassicCodec {
    #[inline(always)]
    fn command(src: &[u8]) -> Decoded<'_> {
        let control = src[0];
        if control >= 0x80 {
            Decoded {
                command: Command::Transparent { length: 256 - control as u16 },
                size: 1,
            }
        } else {
            let n = control as usize;
            Decoded {
                command: Command::Pixels { colors: &src[1..1 + n] },
                size: 1 + n,
            }
        }
    }
}

/// A verbatim run longer than this is stored as a fill run instead.
const MAX_PIXELS_RUN: u16 = 65;

pub struct ExtendedCodec;

impl Codec for ExtendedCodec {
    #[inline(always)]
    fn command(src: &[u8]) -> Decoded<'_> {
        let control = src[0] as i8;
        if control >= 0 {
            return Decoded {
                command: Command::Transparent { length: control as u16 },
                size: 1,
            };
        }
        let magnitude = control.unsigned_abs() as u16;
        if magnitude > MAX_PIXELS_RUN {
            Decoded {
                command: Command::Fill { length: magnitude - MAX_PIXELS_RUN, color: src[1] },
                size: 2,
            }
        } else {
            let n = magnitude as usize;
            Decoded {
                command: Command::Pixels { colors: &src[1..1 + n] },
                size: 1 + n,
            }
        }
    }
}

pub(crate) const OPAQUE_MIN: u8 = 0x80;
pub(crate) const FILL_MAX: u8 = 0xBE;

pub struct UnifiedCodec;

impl Codec for UnifiedCodec {
    #[inline(always)]
    fn command(src: &[u8]) -> Decoded<'_> {
        let control = src[0];
        if control < OPAQUE_MIN {
            Decoded {
                command: Command::Transparent { length: control as u16 },
                size: 1,
            }
        } else if control <= FILL_MAX {
            Decoded {
                command: Command::Fill { length: (FILL_MAX + 1 - control) as u16, color: src[1] },
                size: 2,
            }
        } else {
            let n = 256 - control as usize;
            Decoded {
                command: Command::Pixels { colors: &src[1..1 + n] },
                size: 1 + n,
            }
        }
    }
}

/// Monomorphizes `$body` over the codec matching a [`SpriteFormat`].
macro_rules! with_codec {
    ($format:expr, $c:ident => $body:expr) => {
        match $format {
            $crate::decode::SpriteFormat::Classic => {
                type $c = $crate::decode::ClassicCodec;
                $body
            }
            $crate::decode::SpriteFormat::Extended => {
                type $c = $crate::decode::ExtendedCodec;
                $body
            }
            $crate::decode::SpriteFormat::Unified => {
                type $c = $crate::decode::UnifiedCodec;
                $body
            }
        }
    };
}
pub(crate) use with_codec;

#[cfg(test)]
mod test {
    use super::*;
    use crate::assert_eq_hex;

    #[test]
    fn classic_transparent_boundaries() {
        // 0x80 is the longest transparent run, 0xFF the shortest.
        let d = ClassicCodec::command(&[0x80]);
        assert_eq!(d.command, Command::Transparent { length: 128 });
        assert_eq_hex!(d.size, 1);
        let d = ClassicCodec::command(&[0xFF]);
        assert_eq!(d.command, Command::Transparent { length: 1 });
    }

    #[test]
    fn classic_pixels() {
        let d = ClassicCodec::command(&[3, 9, 8, 7, 0xAA]);
        assert_eq!(d.command, Command::Pixels { colors: &[9, 8, 7] });
        assert_eq_hex!(d.size, 4);
    }

    #[test]
    fn unified_thresholds() {
        let d = UnifiedCodec::command(&[0x7F]);
        assert_eq!(d.command, Command::Transparent { length: 0x7F });
        assert_eq_hex!(d.size, 1);

        // 0x80 is the longest fill run, 0xBE the shortest.
        let d = UnifiedCodec::command(&[0x80, 42]);
        assert_eq!(d.command, Command::Fill { length: 63, color: 42 });
        assert_eq_hex!(d.size, 2);
        let d = UnifiedCodec::command(&[0xBE, 42]);
        assert_eq!(d.command, Command::Fill { length: 1, color: 42 });

        // 0xBF is the longest verbatim run, 0xFF the shortest.
        let src: Vec<u8> = std::iter::once(0xBF).chain(0..65).collect();
        let d = UnifiedCodec::command(&src);
        assert_eq!(d.command.length(), 65);
        assert_eq_hex!(d.size, 66);
        let d = UnifiedCodec::command(&[0xFF, 5]);
        assert_eq!(d.command, Command::Pixels { colors: &[5] });
    }

    #[test]
    fn extended_matches_unified() {
        // Both codecs read the same wire encoding.
        let mut streams: Vec<Vec<u8>> = vec![
            vec![0x00],
            vec![0x7F],
            vec![0x80, 1],
            vec![0xB9, 7],
            vec![0xBE, 0],
            vec![0xFE, 1, 2],
            vec![0xFF, 3],
        ];
        streams.push(std::iter::once(0xBF).chain((0..65).map(|i| i as u8)).collect());
        for stream in &streams {
            let a = ExtendedCodec::command(stream);
            let b = UnifiedCodec::command(stream);
            assert_eq!(a.command, b.command, "stream {:02X?}", stream);
            assert_eq!(a.size, b.size, "stream {:02X?}", stream);
        }
    }

    #[test]
    fn fill_consumes_exactly_one_color_byte() {
        let d = ExtendedCodec::command(&[0xB9, 7, 0xEE]);
        assert_eq!(d.command, Command::Fill { length: 6, color: 7 });
        assert_eq_hex!(d.size, 2);
    }
}
