//! The public, immutable codec handle.

use crate::bits::BitBuffer;
use crate::config::Parameters;
use crate::embed::{self, EmbedDiagnostics};
use crate::error::Result;
use crate::extract::{self, ExtractDiagnostics};
use crate::image_surface::ImageSurface;
use crate::text;

/// A configured watermark codec. Immutable after construction, `Send +
/// Sync` — every call allocates its own working buffers, so one handle may
/// be shared across threads embedding or extracting different images
/// concurrently.
#[derive(Debug, Clone, Copy)]
pub struct Watermark {
    params: Parameters,
}

impl Watermark {
    pub fn new(params: Parameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn max_bits_total(&self) -> usize {
        self.params.max_bits_total()
    }

    pub fn max_bits_data(&self) -> usize {
        self.params.max_bits_data()
    }

    pub fn max_text_len(&self) -> usize {
        self.params.max_text_len()
    }

    /// Embeds `payload`, truncated or zero-padded to `max_bits_data` bits.
    pub fn embed(&self, image: &mut impl ImageSurface, payload: &BitBuffer) -> Result<()> {
        embed::embed(image, payload, &self.params)
    }

    /// Encodes `text` over the codec's alphabet and embeds it.
    pub fn embed_text(&self, image: &mut impl ImageSurface, text: &str) -> Result<()> {
        let bits = text::encode(text, &self.params);
        embed::embed(image, &bits, &self.params)
    }

    /// Like [`Self::embed`], but also returns the raw mark bitmap that was
    /// painted, for callers that want to inspect or dump it (e.g. a
    /// `debug` flag).
    pub fn embed_with_diagnostics(
        &self,
        image: &mut impl ImageSurface,
        payload: &BitBuffer,
    ) -> Result<EmbedDiagnostics> {
        embed::embed_with_diagnostics(image, payload, &self.params)
    }

    /// Like [`Self::embed_text`], with the same diagnostics as
    /// [`Self::embed_with_diagnostics`].
    pub fn embed_text_with_diagnostics(
        &self,
        image: &mut impl ImageSurface,
        text: &str,
    ) -> Result<EmbedDiagnostics> {
        let bits = text::encode(text, &self.params);
        embed::embed_with_diagnostics(image, &bits, &self.params)
    }

    /// Recovers the raw `max_bits_data`-bit payload.
    pub fn extract_data(&self, image: &impl ImageSurface) -> Result<BitBuffer> {
        extract::extract(image, &self.params)
    }

    /// Like [`Self::extract_data`], but also returns the recovered mark
    /// bitmap and the Reed-Solomon corrected-byte count.
    pub fn extract_data_with_diagnostics(
        &self,
        image: &impl ImageSurface,
    ) -> Result<(BitBuffer, ExtractDiagnostics)> {
        extract::extract_with_diagnostics(image, &self.params)
    }

    /// Recovers the payload and decodes it back to text, right-trimmed of
    /// padding spaces.
    pub fn extract_text(&self, image: &impl ImageSurface) -> Result<String> {
        let bits = extract::extract(image, &self.params)?;
        Ok(text::decode(&bits, &self.params))
    }

    /// Like [`Self::extract_text`], with the same diagnostics as
    /// [`Self::extract_data_with_diagnostics`].
    pub fn extract_text_with_diagnostics(
        &self,
        image: &impl ImageSurface,
    ) -> Result<(String, ExtractDiagnostics)> {
        let (bits, diagnostics) = extract::extract_with_diagnostics(image, &self.params)?;
        Ok((text::decode(&bits, &self.params), diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn watermark_is_send_and_sync() {
        assert_send_sync::<Watermark>();
    }

    #[test]
    fn capacity_queries_match_parameters() {
        let params = Parameters::default();
        let wm = Watermark::new(params);
        assert_eq!(wm.max_bits_total(), params.max_bits_total());
        assert_eq!(wm.max_bits_data(), params.max_bits_data());
        assert_eq!(wm.max_text_len(), params.max_text_len());
    }
}
