use chrono::Utc;

fn main() {
    // Build version shown by the web interface: crate version + build date.
    let version = format!(
        "{}+{}",
        env!("CARGO_PKG_VERSION"),
        Utc::now().format("%Y%m%d")
    );
    println!("cargo:rustc-env=BUILD_VERSION={version}");
    println!("cargo:rerun-if-changed=build.rs");
}
