//! JSON call scripts replayed against a [`Recorder`].
//!
//! Scripts name nodes symbolically; the replayer keeps the name-to-handle map so
//! scripts never contain raw handle values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MockError, MockResult};
use crate::foundation::ids::Handle;
use crate::recorder::session::{Recorder, RecorderOpts};
use crate::schema::attributes::AttributeSchema;
use crate::schema::shape::Shape;

/// A recorded sequence of boundary calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Attribute shapes used by `attribute` calls that carry no inline shape.
    #[serde(default)]
    pub schema: AttributeSchema,
    /// Calls in order.
    pub calls: Vec<Call>,
}

/// One boundary call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    /// `createNode`; binds the new handle to `name`.
    Create {
        /// Script-local name for the node.
        name: String,
        /// Wire kind id.
        kind: i32,
        /// Structural id.
        id: i32,
        /// Construction flags.
        #[serde(default)]
        flags: u32,
    },
    /// `addChild`.
    AddChild {
        /// Parent name.
        parent: String,
        /// Child name.
        child: String,
    },
    /// `removeChild`.
    RemoveChild {
        /// Parent name.
        parent: String,
        /// Child name.
        child: String,
    },
    /// `insertAfter`.
    InsertAfter {
        /// Parent name.
        parent: String,
        /// Child name.
        child: String,
        /// Sibling name; absent means append.
        #[serde(default)]
        sibling: Option<String>,
    },
    /// `insertBefore`.
    InsertBefore {
        /// Parent name.
        parent: String,
        /// Child name.
        child: String,
        /// Sibling name; absent means append.
        #[serde(default)]
        sibling: Option<String>,
    },
    /// `insertAt`.
    InsertAt {
        /// Parent name.
        parent: String,
        /// Child name.
        child: String,
        /// Zero-based position.
        index: i32,
    },
    /// `disposeNode`.
    Dispose {
        /// Node name.
        node: String,
    },
    /// Finalizes the node's handle.
    Release {
        /// Node name.
        node: String,
    },
    /// Sets or clears the external element id.
    SetElementId {
        /// Node name.
        node: String,
        /// New id.
        #[serde(default)]
        id: Option<String>,
    },
    /// Decodes `payload` and stores it on the node.
    Attribute {
        /// Node name.
        node: String,
        /// Attribute name.
        name: String,
        /// Inline shape; falls back to the script schema.
        #[serde(default)]
        shape: Option<Shape>,
        /// Raw wire bytes.
        payload: Vec<u8>,
    },
    /// `captureStructure`; the JSON is collected into the replay output.
    Capture,
}

/// Replays calls while tracking script names.
#[derive(Debug)]
pub struct Replayer {
    recorder: Recorder,
    names: HashMap<String, Handle>,
    captures: Vec<String>,
}

impl Replayer {
    /// Wraps an existing recorder.
    pub fn new(recorder: Recorder) -> Self {
        Self {
            recorder,
            names: HashMap::new(),
            captures: Vec::new(),
        }
    }

    /// Recorder configured with the script's schema and default kinds.
    pub fn for_script(script: &Script) -> Self {
        Self::new(Recorder::new(RecorderOpts {
            schema: script.schema.clone(),
            ..RecorderOpts::default()
        }))
    }

    /// Underlying recorder.
    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Snapshots collected by `capture` calls so far.
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Handle bound to `name`.
    pub fn handle(&self, name: &str) -> MockResult<Handle> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| MockError::validation(format!("unknown node name '{name}'")))
    }

    fn sibling(&self, name: Option<&str>) -> MockResult<Handle> {
        name.map_or(Ok(Handle::NULL), |n| self.handle(n))
    }

    /// Applies one call.
    pub fn apply(&mut self, call: &Call) -> MockResult<()> {
        match call {
            Call::Create {
                name,
                kind,
                id,
                flags,
            } => {
                let h = self.recorder.create_node(*kind, *id, *flags);
                if let Some(prev) = self.names.insert(name.clone(), h) {
                    tracing::debug!(name, ?prev, "script name rebound");
                }
            }
            Call::AddChild { parent, child } => {
                let (p, c) = (self.handle(parent)?, self.handle(child)?);
                self.recorder.add_child(p, c)?;
            }
            Call::RemoveChild { parent, child } => {
                let (p, c) = (self.handle(parent)?, self.handle(child)?);
                self.recorder.remove_child(p, c);
            }
            Call::InsertAfter {
                parent,
                child,
                sibling,
            } => {
                let (p, c) = (self.handle(parent)?, self.handle(child)?);
                let s = self.sibling(sibling.as_deref())?;
                self.recorder.insert_after(p, c, s)?;
            }
            Call::InsertBefore {
                parent,
                child,
                sibling,
            } => {
                let (p, c) = (self.handle(parent)?, self.handle(child)?);
                let s = self.sibling(sibling.as_deref())?;
                self.recorder.insert_before(p, c, s)?;
            }
            Call::InsertAt {
                parent,
                child,
                index,
            } => {
                let (p, c) = (self.handle(parent)?, self.handle(child)?);
                self.recorder.insert_at(p, c, *index)?;
            }
            Call::Dispose { node } => {
                let h = self.handle(node)?;
                self.recorder.dispose_node(h);
            }
            Call::Release { node } => {
                let h = self.handle(node)?;
                self.recorder.release(h);
            }
            Call::SetElementId { node, id } => {
                let h = self.handle(node)?;
                self.recorder.set_element_id(h, id.as_deref());
            }
            Call::Attribute {
                node,
                name,
                shape,
                payload,
            } => {
                let h = self.handle(node)?;
                match shape {
                    Some(shape) => self.recorder.apply_attribute(h, name, shape, payload)?,
                    None => self.recorder.set_attribute(h, name, payload)?,
                }
            }
            Call::Capture => {
                let h = self.recorder.capture_structure()?;
                let json = self
                    .recorder
                    .take_string(h)?
                    .ok_or_else(|| MockError::marshal("capture did not return a string"))?;
                self.captures.push(json);
            }
        }
        Ok(())
    }

    /// Applies every call, stopping at the first error.
    pub fn run(&mut self, calls: &[Call]) -> MockResult<()> {
        for (i, call) in calls.iter().enumerate() {
            if let Err(e) = self.apply(call) {
                tracing::warn!(index = i, error = %e, "replay stopped");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Consumes the replayer, returning the collected snapshots.
    pub fn into_captures(self) -> Vec<String> {
        self.captures
    }
}

/// Replays `script` on a fresh recorder and returns the captured snapshots.
pub fn replay(script: &Script) -> MockResult<Vec<String>> {
    script.schema.validate()?;
    let mut r = Replayer::for_script(script);
    r.run(&script.calls)?;
    Ok(r.into_captures())
}

#[cfg(test)]
#[path = "../../tests/unit/replay/script.rs"]
mod tests;
