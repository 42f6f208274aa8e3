#[macro_export]
macro_rules! assert_at_most_one_feature {
    ($($feature:literal),+ $(,)?) => {
        assert!(
            (0 $(+ cfg!(feature = $feature) as usize)+ ) <= 1,
            "At most one of the following features may be enabled: {}",
            [$($feature),+].join(", ")
        );
    };
}

fn main() {
    // no chip feature means a host build of the library (tests)
    assert_at_most_one_feature!("esp32");
    assert_at_most_one_feature!("log", "defmt");

    #[cfg(feature = "esp32")]
    {
        let target = std::env::var("TARGET").unwrap_or_default();
        assert!(
            target == "xtensa-esp32-none-elf",
            "feature esp32 does not match target {}",
            target
        );
        println!("cargo:rustc-cfg=esp32");
        println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
        #[cfg(feature = "defmt")]
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
    println!("cargo::rustc-check-cfg=cfg(esp32)");
}
