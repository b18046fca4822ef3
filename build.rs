fn main() {
    // The library builds and tests without the desktop host
    if std::env::var_os("CARGO_FEATURE_APP").is_some() {
        tauri_build::build();
    }
}
