//! Declarative configuration with coloured output
//!
//! Builds a registry from a JSON configuration whose console handler uses a
//! colour formatter, then logs through a few namespaces.
//!
//! Run with: cargo run --example color_config

use rust_hierarchical_logger::prelude::*;

const CONFIG: &str = r#"{
    "formatters": {
        "colored": {
            "kind": "color",
            "template": "%(date)s %(lvl)s [%(name)s] %(msg)s",
            "date_format": {"custom": "%H:%M:%S%.3f"},
            "colors": {
                "lvl": {
                    "error": ["bright_red", "bold"],
                    "warning": ["yellow"],
                    "info": ["green"],
                    "debug": ["dimmed"]
                },
                "name": ["cyan"]
            }
        }
    },
    "filters": {
        "db_warnings": {"kind": "level", "level": "warning"}
    },
    "handlers": {
        "console": {"kind": "console", "formatter": "colored"}
    },
    "loggers": {
        "": {"handlers": ["console"]},
        "app.db": {"filters": ["db_warnings"]}
    }
}"#;

fn main() -> Result<()> {
    println!("=== Rust Hierarchical Logger - Colour Config Example ===\n");

    let registry = Registry::new();
    LoggingConfig::from_json(CONFIG)?.apply(&registry)?;

    let web = registry.get_logger("app.web");
    web.debug("routing table loaded", NO_ARGS)?;
    web.info("GET %s -> %s", [FieldValue::from("/"), FieldValue::from(200)])?;
    web.warning("slow response: %s ms", [850])?;

    let db = registry.get_logger("app.db");
    db.info("this one is filtered out", NO_ARGS)?;
    db.error("connection lost: %s", ["timeout"])?;

    println!("\nConfigured loggers: {:?}", registry.loggers());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
