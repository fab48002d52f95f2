pub(crate) mod buffer;
pub(crate) mod column;
pub(crate) mod mapper;
pub(crate) mod scheduler;
