/*!
# imgmark-rs

`imgmark-rs` embeds a short text payload into a still image so that it
survives lossy recompression (JPEG re-encoding) and mild tonal adjustment,
and recovers it later without the original cover (blind watermarking).

The payload rides the mid-frequency 8x8 DCT coefficients of the luminance
channel. It is framed with a systematic Reed-Solomon code for byte-error
correction, rendered into a 128x128 binary mark, and scattered by two
independently-seeded pseudorandom permutations before it ever touches a
cover pixel.

## Pipeline

- [`bits`] — an ordered, randomly-addressable bit buffer.
- [`text`] — a 64-symbol alphabet codec between `&str` and 6-bit groups.
- [`rs`] — systematic Reed-Solomon framing over GF(256).
- [`dct`] — integer-in/integer-out 2D DCT-II for 4x4 and 8x8 blocks.
- [`quantizer`] — the scalar quantizer for the 4x4 mark DCT.
- [`zigzag`] — the 128x128 <-> 16384-entry zig-zag bijection.
- [`permutation`] — the keyed rejection-sampling permutation.
- [`mark`] — painting/reading the 128x128 binary mark.
- [`image_surface`] — the pixel-access boundary, HSB conversion, and the
  padded luminance plane.
- [`embed`] / [`extract`] — the orchestrators tying the above together.
- [`watermark`] — [`Watermark`], the public, immutable codec handle.

## Collaborators

Image container decoding/encoding is delegated to the `image` crate
behind the `image` feature; the `cli` feature additionally pulls in
`clap` and `env_logger` for the `imgmark` binary. The core itself
performs no file or network I/O.
*/

pub mod bits;
pub mod config;
pub mod dct;
pub mod embed;
pub mod error;
pub mod extract;
pub mod image_surface;
pub mod mark;
pub mod permutation;
pub mod quantizer;
pub mod rs;
pub mod text;
pub mod watermark;
pub mod zigzag;

pub use bits::BitBuffer;
pub use config::Parameters;
pub use error::{Result, WatermarkError};
pub use image_surface::ImageSurface;
pub use watermark::Watermark;
