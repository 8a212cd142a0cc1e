#[cfg(feature = "synthetic")]
mod equivalence;
