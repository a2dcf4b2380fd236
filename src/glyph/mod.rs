pub(crate) mod font;
pub(crate) mod pattern;
pub(crate) mod vocabulary;
