// main.rs - CLI entry point

use archtrace::prelude::*;

fn main() {
    let manager = match PluginManager::with_plugins(vec![
        Box::new(SadSamPlugin),
        Box::new(SamCodePlugin),
        Box::new(SadCodePlugin),
    ]) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("❌ ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let report = manager.execute_plugins(std::env::args().skip(1));
    report.print_summary();

    if !report.success() {
        std::process::exit(1);
    }
}
