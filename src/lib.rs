pub mod core;
#[cfg(target_os = "windows")]
pub mod platform_layer;
