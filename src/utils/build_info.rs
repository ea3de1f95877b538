//! Build stamp shown in the startup banner

/// Version, build date/time and commit of this binary
pub fn build_stamp() -> String {
    format!(
        "v{} built {} {} from {}",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE"),
        env!("BUILD_TIME"),
        env!("GIT_HASH")
    )
}
