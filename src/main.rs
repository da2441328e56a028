#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    aktools_desktop_lib::run();
}
