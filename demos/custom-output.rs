// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing how to change where help, version and error text is
/// displayed, and the exit status used.
use argtree::{get_args, Parser};
use tracing_subscriber::{fmt, EnvFilter};

const HILITE_ERROR: &str = "\x1b[1;31m";
const HILITE_OK: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

const ERROR_EXIT_CODE: i32 = 42;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    init_tracing();

    let mut parser = Parser::new("Usage: example command [Options]", "1.0");

    parser.set_output(|text, is_error| {
        let hilite = if is_error { HILITE_ERROR } else { HILITE_OK };

        print!("{}{}{}", hilite, text, RESET);

        if is_error {
            ERROR_EXIT_CODE
        } else {
            0
        }
    });

    parser
        .command("boo", "Usage: example boo [Options]")
        .hint("This is command boo")
        .flag("foo f", "Enable feature foo")
        .option("bar b", "default", "Specify the value of bar");

    parser
        .command("zoo", "Usage: example zoo [Options] arg1 ...")
        .hint("This is command zoo")
        .flag("foz f", "Enable feature foz\nwhich is really, really nice")
        .option("baz b", "default", "Specify the value of baz")
        .args_required(1, true);

    let result = parser.parse_with_args(get_args());

    if let Some(code) = parser.report(&result) {
        std::process::exit(code);
    }

    match parser.command_parser() {
        Some(command) => print!("{}", command),
        None => print!("{}", parser),
    }
}
