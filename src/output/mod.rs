pub mod csv;

#[cfg(feature = "clipboard")]
pub mod clipboard;
