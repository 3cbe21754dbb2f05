//! Rendering of check results into the textual views consumed downstream.
//!
//! Every renderer is a pure function of a [`RenderableCheck`].

#![forbid(unsafe_code)]

mod log;
mod markdown;
mod model;
mod rpt;

pub use log::render_log;
pub use markdown::render_markdown;
pub use model::{
    RenderableCheck, RenderableGroup, RenderableItem, RenderableSeverity, RenderableStatus,
};
pub use rpt::render_rpt;

#[cfg(test)]
pub(crate) mod test_support;
