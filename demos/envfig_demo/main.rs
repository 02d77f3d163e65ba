//! # envfig demo application
//!
//! Resolves a small server configuration from the process environment and
//! prints it with secrets masked. This is **not** a real app; it exists to
//! demonstrate and manually verify envfig's features.
//!
//! ## Running
//!
//! ```sh
//! DEMO_DATABASE_URL=postgres://db DEMO_API_TOKEN=hunter2 \
//!     RUST_LOG=debug cargo run --example envfig_demo
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                     |
//! |-------------------------|--------------------------------------------------------|
//! | Missing required key    | Run without `DEMO_DATABASE_URL`                        |
//! | Defaults                | Leave `DEMO_PORT` unset (falls back to `8080`)         |
//! | Boolean / number access | `DEMO_VERBOSE=true DEMO_PORT=9000`                     |
//! | JSON access             | `DEMO_LIMITS='{"max_connections":64}'`                 |
//! | Malformed JSON          | `DEMO_LIMITS='{oops'` (logged at warn, not fatal)      |
//! | Secret masking          | `DEMO_API_TOKEN=hunter2` prints as `SECRET xxxxxxx`    |
//! | Builder + typed struct  | The "typed" line at the end                            |

use serde::Deserialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use envfig::{ConfigPolicy, Envfig, Environment, Schema};

#[derive(Debug, Deserialize)]
struct Limits {
    max_connections: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct Typed {
    demo_database_url: String,
    demo_port: u16,
    demo_verbose: Option<bool>,
}

fn schema() -> Schema {
    Schema::new()
        .required("DEMO_DATABASE_URL", None::<&str>)
        .required("DEMO_PORT", Some("8080"))
        .optional("DEMO_VERBOSE", None::<&str>)
        .optional("DEMO_LIMITS", None::<&str>)
        .optional("DEMO_API_TOKEN", None::<&str>)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let policy = ConfigPolicy::default().secrets(["DEMO_API_TOKEN", "DEMO_DATABASE_URL"]);
    let env = Environment::from_env(&schema(), policy).unwrap_or_else(|e| {
        eprintln!("Failed to resolve environment:\n{e}");
        std::process::exit(1);
    });

    if let Err(e) = env.print_environment() {
        eprintln!("Failed to print environment:\n{e}");
    }

    println!("verbose = {:?}", env.get_boolean("DEMO_VERBOSE"));
    println!("port    = {:?}", env.get_number("DEMO_PORT"));
    match env.get_json("DEMO_LIMITS").parse::<Limits>() {
        Ok(Some(limits)) => println!("limits  = max_connections {}", limits.max_connections),
        Ok(None) => println!("limits  = unset"),
        Err(e) => eprintln!("limits error: {e}"),
    }

    let typed = Envfig::create(["DEMO_DATABASE_URL", "DEMO_PORT"])
        .optionals(["DEMO_VERBOSE"])
        .defaults([("DEMO_PORT", Value::from(8080))])
        .transform(|s| s.parse::<u16>().map_or(Value::Null, Value::from), ["DEMO_PORT"])
        .transform(|s| Value::Bool(s == "true"), ["DEMO_VERBOSE"])
        .resolve_env()
        .and_then(|env| env.into_typed::<Typed>());
    match typed {
        Ok(typed) => println!(
            "typed   = url {} port {} verbose {:?}",
            typed.demo_database_url, typed.demo_port, typed.demo_verbose
        ),
        Err(e) => eprintln!("typed error: {e}"),
    }
}
