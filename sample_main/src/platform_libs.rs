cfg_if::cfg_if! {
    if #[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))] {
        use anyhow::Result;

        use neogrid_common::Strand;
        use neogrid_platforms_common::StrandConfig;

        pub use neogrid_platforms_stub::delay;

        pub fn hardware_strand(config: &StrandConfig, count: usize) -> Result<Box<dyn Strand>> {
            Ok(Box::new(neogrid_platforms_rpi::platform_init(config, count)?))
        }
    }
}
