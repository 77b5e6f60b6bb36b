//! Navigation tree builder and menu renderer for symdoc.
//!
//! The sidebar is compiled in two decoupled passes: [`build_member_nav`]
//! turns one kind bucket of symbols into an explicit [`MenuGroup`] tree
//! (optionally grouped by `/`-separated path segments, with per-symbol
//! member/method detail sublists), and [`render_menu`] serializes a tree
//! into nested list markup. Rendering is a pure function of the tree:
//! identical trees produce byte-identical markup.

mod render;
mod tree;

pub use render::render_menu;
pub use tree::{ItemData, LinkFn, MenuGroup, MenuItem, NavEntry, NavOptions, build_member_nav};
