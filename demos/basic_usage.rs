//! Basic logger usage example
//!
//! Logs through the global root logger, then walks a deep logger's parent
//! chain printing each namespace and its effective level.
//!
//! Run with: cargo run --example basic_usage

use rust_hierarchical_logger::prelude::*;
use rust_hierarchical_logger::{error, info};

fn main() -> Result<()> {
    println!("=== Rust Hierarchical Logger - Basic Usage Example ===\n");

    let root = root_logger();
    println!("1. Root logger: {:?}", root);
    root.info("everything is broken! (%s, %s, %s)", [1, 2, 3])?;

    println!("\n2. Every level through a child logger:");
    let app = get_logger("demo.app");
    app.debug("This is a debug message", NO_ARGS)?;
    app.info("This is an info message", NO_ARGS)?;
    app.warning("This is a warning message", NO_ARGS)?;
    app.error("This is an error message", NO_ARGS)?;
    app.log("notice", "Unmapped levels keep their tag", NO_ARGS)?;

    println!("\n3. Macros capture the call site:");
    info!(app, "listening on port %s", 8080)?;
    error!(app, "request %s failed after %s ms", "GET /", 12.5)?;

    println!("\n4. Effective levels up a deep logger's parent chain:");
    get_logger("greg.thing").set_level(Some(LogLevel::Warning));
    let deep = get_logger("greg.thing.goes.here");
    let mut current = Some(deep);
    while let Some(logger) = current {
        let level = logger
            .effective_level()
            .map(|level| level.to_string())
            .unwrap_or_else(|| "null".to_string());
        println!("   Logger: {:?} {}", logger.namespace(), level);
        current = logger.parent().cloned();
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
