fn main() {
    // The headless supervision core builds without the window toolkit.
    if std::env::var_os("CARGO_FEATURE_DESKTOP").is_some() {
        tauri_build::build();
    }
}
