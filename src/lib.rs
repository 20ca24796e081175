// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Command-aware parsing of command-line arguments.
//!
//! This crate handles programs with _commands_ (like `git commit` or
//! `cargo build`), each of which has its own flags, options and positional
//! arguments. Commands can contain further commands to any depth.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Examples](#examples)
//! * [Details](#details)
//! * [Terminology](#terminology)
//! * [Summary of features and behaviour](#summary-of-features-and-behaviour)
//! * [Logging](#logging)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! Create a [Parser] for the program, register the flags, options and
//! commands it supports, then parse the command-line. Once parsed, query
//! the [Parser] (or the parser of the command that was found) for the
//! results.
//!
//! # Quickstart
//!
//! > **Note:** If you are not familiar with command-line handling,
//! > see the [terminology](#terminology) section.
//!
//! 1. Create a [Parser] variable, specifying the help text and version.
//!
//!    Either may be empty, in which case the automatic `--help` or
//!    `--version` option is not available.
//!
//!    ```rust
//!    use argtree::Parser;
//!
//!    let mut parser = Parser::new("Usage: my-app [Options]", "1.0");
//!    ```
//!
//! 1. Register flags and options.
//!
//!    Each takes a whitespace-separated list of names. Single character
//!    names are short options (`-d`), longer names are long options
//!    (`--debug`).
//!
//!    ```rust
//!    # use argtree::Parser;
//!    #
//!    # let mut parser = Parser::new("Usage: my-app [Options]", "1.0");
//!    #
//!    // Support "-d" and "--debug".
//!    parser.flag("debug d", "Enable debug output");
//!
//!    // Support "-n <value>", "--name <value>" and "--name=<value>".
//!    parser.option("name n", "world", "Name to greet");
//!    ```
//!
//! 1. Register any commands. [Parser::command()] returns the command's own
//!    parser.
//!
//!    ```rust
//!    # use argtree::Parser;
//!    #
//!    # let mut parser = Parser::new("Usage: my-app [Options]", "1.0");
//!    #
//!    parser
//!        .command("greet g", "Usage: my-app greet [Options] <name>")
//!        .hint("Print a greeting")
//!        .flag("shout s", "Greet loudly")
//!        .args_required(1, false);
//!    ```
//!
//! 1. Parse the command-line.
//!
//!    [Parser::parse()] handles everything: if the user asks for help or
//!    the version, or specifies invalid arguments, the appropriate text
//!    is displayed and the program exits.
//!
//!    ```rust,no_run
//!    # use argtree::Parser;
//!    #
//!    # let mut parser = Parser::new("Usage: my-app [Options]", "1.0");
//!    #
//!    parser.parse();
//!    ```
//!
//! 1. Query the results.
//!
//!    ```rust
//!    # use argtree::{Outcome, Parser};
//!    #
//!    # let mut parser = Parser::new("Usage: my-app [Options]", "1.0");
//!    # parser.flag("debug d", "Enable debug output");
//!    # parser.option("name n", "world", "Name to greet");
//!    # parser.command("greet g", "").flag("shout s", "");
//!    #
//!    # let result = parser.parse_with_args(vec!["-d", "greet", "--shout", "Bob"]);
//!    # assert_eq!(result, Ok(Outcome::Success));
//!    #
//!    assert!(parser.found("debug"));
//!    assert_eq!(parser.value("name"), "world");
//!
//!    if let Some(greet) = parser.command_parser() {
//!        assert_eq!(parser.command_name(), "greet");
//!        assert!(greet.found("s"));
//!        assert_eq!(greet.arg(0), "Bob");
//!    }
//!    ```
//!
//! # Examples
//!
//! Below is a full example showing a program with a command that is
//! handled by a callback. It uses [Parser::parse_with_args()] so that the
//! program decides what to do with the [Outcome].
//!
//! ```rust
//! use argtree::{Error, Outcome, Parser, Result};
//!
//! fn main() -> Result<()> {
//!     let mut parser = Parser::new("Usage: my-app [Options] [Command]", "1.0");
//!
//!     parser.flag("verbose v", "Be chatty");
//!
//!     parser
//!         .command("add a", "Usage: my-app add <value>...")
//!         .hint("Add up some numbers")
//!         .args_required(1, true)
//!         .callback(|name, add| {
//!             let mut total = 0;
//!
//!             for arg in add.args() {
//!                 let value: i64 = arg
//!                     .parse()
//!                     .map_err(|_| Error::HandlerError(format!("{}: invalid number {:?}", name, arg)))?;
//!
//!                 total += value;
//!             }
//!
//!             println!("total: {}", total);
//!
//!             Ok(())
//!         });
//!
//!     // Real programs would call parser.parse() instead.
//!     let args = vec!["--verbose", "add", "1", "2", "-3"];
//!
//!     let result = parser.parse_with_args(args);
//!
//!     if let Some(code) = parser.report(&result) {
//!         std::process::exit(code);
//!     }
//!
//!     assert_eq!(result?, Outcome::Success);
//!     assert_eq!(parser.command_name(), "add");
//!
//!     Ok(())
//! }
//! ```
//!
//! For further examples, try out the programs in the `demos/` directory:
//!
//! ```bash
//! $ cargo run --example commands -- -d boo -f --bar=x one two
//! $ cargo run --example commands -- help boo
//! $ cargo run --example custom-output -- zoo
//! ```
//!
//! # Details
//!
//! ## Terminology
//!
//! > **Note:** For further details, see `getopt(3)`.
//!
//! - An "argument" is a value passed to a program on the command-line.
//!
//!   Arguments can be "options", "commands" or "positional arguments".
//!
//! - An "option" is an argument that starts with a dash character (`-`).
//!
//!   A "short option" is a dash followed by a single character name
//!   (`-v`). A "long option" is two dashes followed by a longer name
//!   (`--verbose`).
//!
//! - A "flag" is an option that does not take a value. The number of times
//!   a flag is specified is recorded.
//!
//! - An "option" (in the narrow sense) requires a value, which can be
//!   specified as the next argument (`-n value`, `--name value`) or after
//!   an equals sign (`-n=value`, `--name=value`). Every value is recorded,
//!   in order.
//!
//! - A "command" is a name that, if it is the first positional argument,
//!   hands all the remaining arguments to the command's own parser.
//!
//! - A "positional argument" is any other argument. A lone dash (`-`) and
//!   negative numbers (`-1`) are positional arguments.
//!
//! - The special option `--` is reserved to mean "end of all options": all
//!   arguments that follow it are positional arguments, even if they start
//!   with a dash.
//!
//! ### Example of argument types
//!
//! Assume a program with a `-d` flag, a `-n <value>` option and a `build`
//! command that has a `-r` flag, run as follows:
//!
//! ```bash
//! $ myprog -d -n 3 build -r target -- -x
//! ```
//!
//! The arguments are interpreted as follows:
//!
//! ```text
//! '-d'     # A flag of the program.
//! '-n 3'   # An option of the program with the value '3'.
//! 'build'  # A command; everything that follows is parsed by 'build'.
//! '-r'     # A flag of the build command.
//! 'target' # A positional argument of the build command.
//! '--'     # End of options.
//! '-x'     # A positional argument of the build command.
//! ```
//!
//! # Summary of features and behaviour
//!
//! - Flags and options can have any number of alias names.
//! - Short flags can be grouped (`-vvv`, `-abc`). Each option in a group
//!   consumes the next argument as its value, in order.
//! - Commands can be nested to any depth and have alias names.
//! - Commands are only recognised before the first positional argument,
//!   but may follow options (`myprog -d build`).
//! - A command can require a number of positional arguments, either exactly
//!   or as a minimum (see [Parser::args_required()]).
//! - A command can have a callback, which is called once the command has
//!   parsed all its arguments (see [Parser::callback()]).
//! - If a program has commands, `help <command>` shows the help for that
//!   command.
//! - `-h`/`--help` and `-v`/`--version` are handled automatically unless
//!   registered as flags or options.
//! - Help text is generated automatically, listing every command, flag and
//!   option that has a hint.
//! - Where help, version and error text is written (and the exit status
//!   used) can be changed with [Parser::set_output()].
//!
//! # Logging
//!
//! The crate logs what it parses using the
//! [`tracing`](https://crates.io/crates/tracing) crate. Nothing is logged
//! unless the program installs a subscriber: parse decisions are logged at
//! `trace` level and command dispatch and failures at `debug` level.
//!
//! # Limitations
//!
//! - Registering a name that is already in use silently replaces the
//!   existing binding.
//! - Option values are always returned as strings.
//!
//!   The caller can convert them into numerics, _etc_ as required.
//!
//! - Options with optional values are not supported.
//! - A flag cannot be given a value (`--debug=yes` is an error).

mod error;
mod help;
mod output;
mod parser;
mod registry;
mod stream;

pub use error::{Error, Result};

pub use output::{Output, StdOutput};
pub use parser::{ArgCount, Outcome, Parser};
pub use stream::get_args;
