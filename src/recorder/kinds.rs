use std::collections::BTreeMap;

/// Maps the integer kind ids used on the wire to kind names.
pub trait KindResolver {
    /// Name for `kind_id`, if known.
    fn kind_name(&self, kind_id: i32) -> Option<String>;
}

impl<F> KindResolver for F
where
    F: Fn(i32) -> Option<String>,
{
    fn kind_name(&self, kind_id: i32) -> Option<String> {
        self(kind_id)
    }
}

/// Fixed id-to-name table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KindTable {
    names: BTreeMap<i32, String>,
}

impl KindTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with a small set of common component kinds; `0` is `Root`.
    pub fn builtin() -> Self {
        [
            "Root",
            "ComponentRoot",
            "Column",
            "Row",
            "Stack",
            "Flex",
            "Text",
            "Button",
            "Image",
            "List",
            "ListItem",
            "Scroll",
            "TextInput",
            "Toggle",
            "Divider",
            "Blank",
        ]
        .into_iter()
        .enumerate()
        .fold(Self::new(), |t, (id, name)| t.with(id as i32, name))
    }

    /// Adds or replaces one entry.
    pub fn with(mut self, kind_id: i32, name: impl Into<String>) -> Self {
        self.names.insert(kind_id, name.into());
        self
    }

    /// Id registered for `name`.
    pub fn id_of(&self, name: &str) -> Option<i32> {
        self.names
            .iter()
            .find_map(|(id, n)| (n == name).then_some(*id))
    }
}

impl KindResolver for KindTable {
    fn kind_name(&self, kind_id: i32) -> Option<String> {
        self.names.get(&kind_id).cloned()
    }
}
