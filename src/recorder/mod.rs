pub(crate) mod kinds;
pub(crate) mod marshal;
pub(crate) mod session;
