pub(crate) mod layer;
