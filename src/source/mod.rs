pub(crate) mod extract;
pub(crate) mod points;
