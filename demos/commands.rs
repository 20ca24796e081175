// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing a program with a command that is handled by a
/// callback.
///
/// Set `RUST_LOG=argtree=trace` to see how each argument is parsed.
use argtree::{Parser, Result};
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let mut parser = Parser::new("Usage: example [Options] [Command]", "1.0");

    parser.flag("debug d", "Enable debug mode");

    parser
        .command("boo", "Usage: example boo [Options] [Arguments]")
        .hint("This is command boo")
        .flag("foo f", "Enable feature foo")
        .option("bar b", "default", "Specify the value of bar")
        .callback(|name, boo| {
            println!("---------- boo! ---------- ({})", name);
            print!("{}", boo);
            println!("--------------------------\n");

            Ok(())
        });

    // Exits if help or the version is requested, or on error.
    parser.parse();

    print!("{}", parser);

    Ok(())
}
