#![forbid(unsafe_code)]

//! WASM frontend for Folio.
//!
//! This crate is host-specific (web/WASM). It resolves the page's elements,
//! adapts browser storage to [`folio_core::PreferenceStore`], wires listeners,
//! observers and timers, and applies the effects `folio-core` computes.
//!
//! JS usage:
//!
//! ```js
//! import init, { FolioSite } from "./pkg/folio_web.js";
//! await init();
//! const site = new FolioSite();
//! site.attach();            // or site.attach(JSON.stringify(config))
//! ```

pub mod report;

#[cfg(target_arch = "wasm32")]
mod carousel;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod fade;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod nav;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod splash;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod theme;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use report::{AttachReport, SplashStatus};

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioSite;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct FolioSite;

#[cfg(not(target_arch = "wasm32"))]
impl FolioSite {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
