pub(crate) mod palette;
pub(crate) mod source;
