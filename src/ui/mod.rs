//! Terminal rendering for the picker.
//!
//! ```text
//! PickerState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready snapshot of the picker
//! - [`renderer`]: rendering entry point
//! - [`components`]: one renderer per screen region
//! - [`helpers`]: cursor positioning and text fitting
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    AppBarInfo, ButtonItem, ChipItem, FooterInfo, HeaderInfo, ListItem, LoadingState, PreviewInfo,
    UIViewModel,
};
