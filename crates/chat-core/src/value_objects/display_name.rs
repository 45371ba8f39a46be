//! Display names
//!
//! A display name is any string, including the empty string when it is
//! registered directly. Defaults are derived from the live registry size,
//! not from a monotonic counter, so two defaults can collide once earlier
//! users have disconnected.

/// Display name bound to a connection
pub type DisplayName = String;

/// Prefix of generated default names
pub const DEFAULT_NAME_PREFIX: &str = "Usuario";

/// Default name for a connection registering while `registry_size` names are live
#[must_use]
pub fn default_display_name(registry_size: usize) -> DisplayName {
    format!("{DEFAULT_NAME_PREFIX} {}", registry_size + 1)
}

/// Resolve the name a `setUsername` request ends up with
///
/// A missing or empty request falls back to [`default_display_name`].
#[must_use]
pub fn resolve_display_name(requested: Option<&str>, registry_size: usize) -> DisplayName {
    match requested {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => default_display_name(registry_size),
    }
}
