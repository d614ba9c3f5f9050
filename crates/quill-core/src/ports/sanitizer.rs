/// Strips unsafe markup from free text before it is persisted.
///
/// Applied to the post body on every write. Titles and image URLs pass
/// through untouched; that asymmetry is part of the service contract.
pub trait Sanitizer: Send + Sync {
    fn clean(&self, input: &str) -> String;
}
