cfg_if::cfg_if! {
    if #[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))] {
        pub mod ws281x;
        pub use ws281x::{platform_init, RpiStrand};
    }
}
