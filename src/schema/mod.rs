pub(crate) mod attributes;
pub(crate) mod shape;
pub(crate) mod value;
