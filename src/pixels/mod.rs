pub(crate) mod access;
pub(crate) mod buffer;
pub(crate) mod format;
