//! Markup sanitization.

use quill_core::ports::Sanitizer;

/// Sanitizer backed by [`ammonia`].
///
/// Ammonia's defaults keep harmless formatting tags and drop `<script>`
/// and `<style>` elements together with their contents, which is the
/// contract the post body relies on.
pub struct AmmoniaSanitizer;

impl Sanitizer for AmmoniaSanitizer {
    fn clean(&self, input: &str) -> String {
        ammonia::clean(input)
    }
}
