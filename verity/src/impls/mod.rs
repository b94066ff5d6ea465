#[cfg(feature = "schemars")]
#[cfg_attr(feature = "docs", doc(cfg(feature = "schemars")))]
pub mod schemars;
