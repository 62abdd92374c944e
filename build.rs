fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Version and build time reported by `/health`
    built::write_built_file()
        .expect("Failed to acquire build-time information");
}
