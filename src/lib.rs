//! Mockui is an in-memory stand-in for a native UI backend.
//!
//! A declarative UI runtime drives a native backend through a narrow boundary: it
//! allocates opaque handles, builds and reshapes a node tree, and pushes attribute
//! payloads encoded in a compact binary wire format. Mockui implements that
//! boundary without drawing anything so the runtime can be tested headlessly.
//!
//! # Pieces
//!
//! 1. **Handles**: [`HandleTable`] maps opaque [`Handle`] values to live objects and
//!    owns the release [`ReleaseFinalizer`].
//! 2. **Tree**: [`NodeStore`] keeps the node arena, the root and the element-id
//!    registry. Nodes stay alive while a handle or a parent refers to them.
//! 3. **Wire**: [`Deserializer`] reads primitives and combinators; [`Shape`] plus
//!    [`read_value`] decode whole attribute payloads into [`Value`]s.
//! 4. **Recorder**: [`Recorder`] is the boundary surface tying the above together,
//!    including string marshalling and [`StructureSnapshot`] capture.
//! 5. **Replay**: [`Script`] and [`replay`] drive a recorder from JSON call logs.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Soft misses**: null or stale handles are ignored by tree calls, never panics.
//! - **Deterministic snapshots**: the same tree always serializes to the same bytes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod capture;
mod foundation;
mod handle;
mod recorder;
mod replay;
mod schema;
mod tree;
mod wire;

pub use capture::snapshot::{ElementSnapshot, MAX_CAPTURE_DEPTH, StructureSnapshot};
pub use foundation::error::{MockError, MockResult};
pub use foundation::ids::{Handle, NodeKey};
pub use handle::table::{HandleTable, ReleaseFinalizer};
pub use recorder::kinds::{KindResolver, KindTable};
pub use recorder::session::{Recorder, RecorderOpts};
pub use replay::script::{Call, Replayer, Script, replay};
pub use schema::attributes::AttributeSchema;
pub use schema::shape::{Field, Shape};
pub use schema::value::{Value, decode_payload, read_value};
pub use tree::node::Node;
pub use tree::store::NodeStore;
pub use wire::deserializer::Deserializer;
pub use wire::tags::RuntimeType;
