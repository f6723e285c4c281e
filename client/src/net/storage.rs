//! `localStorage`-backed token storage.
//!
//! The token lives under [`TOKEN_KEY`] so it survives page reloads. Outside
//! the browser there is no storage and every call reports
//! [`StorageError::Unavailable`].

use session::{StorageError, TOKEN_KEY, TokenStore};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStore;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(feature = "csr")]
fn backend(op: &'static str, err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend { op, message: format!("{err:?}") }
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(TOKEN_KEY).map_err(|e| backend("read", &e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = TOKEN_KEY;
            Err(StorageError::Unavailable)
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.set_item(TOKEN_KEY, token).map_err(|e| backend("write", &e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Err(StorageError::Unavailable)
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.remove_item(TOKEN_KEY).map_err(|e| backend("remove", &e))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(StorageError::Unavailable)
        }
    }
}
