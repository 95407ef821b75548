pub(crate) mod deserializer;
pub(crate) mod tags;
