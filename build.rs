#![forbid(unsafe_code)]

fn main() {
    // Capture build provenance for the version endpoint.
    build_data::set_GIT_BRANCH();
    build_data::set_GIT_COMMIT_SHORT();
    build_data::set_GIT_DIRTY();
    build_data::set_SOURCE_TIMESTAMP();  // Using BUILD_TIMESTAMP makes build unreproducible.
    build_data::set_RUSTC_VERSION();
}
