pub(crate) mod crop;
pub(crate) mod orient;
pub(crate) mod resize;
