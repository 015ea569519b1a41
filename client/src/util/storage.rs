//! Bearer token persistence in `localStorage`.
//!
//! Browser-only; SSR paths report no token and ignore writes.

/// `localStorage` key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[must_use]
pub fn load_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Persist the token. Returns `false` when the browser refused the write
/// (no storage, quota, private mode); the caller keeps the in-memory session.
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn save_token(token: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            leptos::logging::warn!("token not saved: localStorage unavailable");
            return false;
        };
        if let Err(e) = storage.set_item(TOKEN_KEY, token) {
            leptos::logging::warn!("token not saved: {e:?}");
            return false;
        }
        true
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

pub fn clear_token() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(TOKEN_KEY) {
                leptos::logging::warn!("token not cleared: {e:?}");
            }
        }
    }
}
