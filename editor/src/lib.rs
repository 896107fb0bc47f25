//! Document model, direct-manipulation engine and theme renderer for the
//! proposal builder.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and is also
//! linked natively by the host binary. It owns the proposal document, turns
//! pointer input into clamped geometry updates for one selected element at
//! a time, and renders a document under a theme into a tree of styled nodes.
//! The host page is responsible only for wiring DOM events to the engine,
//! drawing the node tree, and persisting the proposal.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Geometry controller and document operations ([`engine::EngineCore`]) |
//! | [`doc`] | Proposal, sections, element types, signatories and variables |
//! | [`theme`] | Typography, color, box-model and layout tokens |
//! | [`geometry`] | Points, boxes, resize handles and the drag/resize arithmetic |
//! | [`input`] | Input event types, selection session and gesture state |
//! | [`hit`] | Hit-testing elements, handles and table cells |
//! | [`style`] | Style maps and text style resolution |
//! | [`render`] | Display and editable rendering to a node tree |
//! | [`text_surface`] | Variable trigger detection, insertion and substitution |
//! | [`collab`] | Contracts for persistence, media, variables and generation |
//! | [`bridge`] | `wasm-bindgen` entry points for the page |
//! | [`consts`] | Shared numeric constants (minimum sizes, hit slop, fallbacks) |

pub mod bridge;
pub mod collab;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod style;
pub mod text_surface;
pub mod theme;
