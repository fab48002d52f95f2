pub(crate) mod driver;
pub(crate) mod perspective;
pub(crate) mod slitscan;
