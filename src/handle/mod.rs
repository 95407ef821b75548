pub(crate) mod slots;
pub(crate) mod table;
