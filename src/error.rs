// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

use crate::parser::ArgCount;

/// The error type.
///
/// The `Display` form of each variant is the one-line diagnostic shown to
/// the user (without the leading `Error: ` and trailing full stop, which are
/// added when the error is reported).
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Runtime errors (user error)
    //------------------------------
    /// User specified an unknown flag or option.
    ///
    /// The value describes the offending option, for example `--foo`, `-x`
    /// or `'x' in -abx`.
    #[error("{0} is not a recognised flag or option")]
    UnknownOpt(String),

    /// User specified `--name=value` (or `-n=value`) but `name` is not a
    /// registered option.
    #[error("{0} is not a recognised option")]
    UnknownValueOpt(String),

    /// Option was the last argument so it has no value.
    #[error("missing argument for {0}")]
    MissingOptArg(String),

    /// Option was specified as `--name=` with nothing after the `=`.
    #[error("missing value for {0}")]
    MissingOptValue(String),

    /// The automatic `help` command was given an unknown command name.
    #[error("'{0}' is not a recognised command")]
    UnknownCommand(String),

    /// The automatic `help` command was given no command name.
    #[error("the help command requires an argument")]
    MissingHelpCommand,

    /// The number of positional arguments does not satisfy the count
    /// registered with `Parser::args_required()`.
    #[error("invalid number of arguments (expected {expected}, found {found})")]
    InvalidArgCount {
        /// The count the command requires.
        expected: ArgCount,
        /// The number of positional arguments actually specified.
        found: usize,
    },

    //------------------------------
    // Callback errors
    //------------------------------
    /// Returned by a command callback to fail the parse.
    #[error("{0}")]
    HandlerError(String),
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        #[derive(Debug)]
        struct TestData<'a> {
            error: Error,
            display: &'a str,
        }

        let tests = &[
            TestData {
                error: Error::UnknownOpt("--foo".into()),
                display: "--foo is not a recognised flag or option",
            },
            TestData {
                error: Error::UnknownOpt("'x' in -abx".into()),
                display: "'x' in -abx is not a recognised flag or option",
            },
            TestData {
                error: Error::UnknownValueOpt("-f".into()),
                display: "-f is not a recognised option",
            },
            TestData {
                error: Error::MissingOptArg("-b".into()),
                display: "missing argument for -b",
            },
            TestData {
                error: Error::MissingOptValue("--bar".into()),
                display: "missing value for --bar",
            },
            TestData {
                error: Error::UnknownCommand("zap".into()),
                display: "'zap' is not a recognised command",
            },
            TestData {
                error: Error::MissingHelpCommand,
                display: "the help command requires an argument",
            },
            TestData {
                error: Error::InvalidArgCount {
                    expected: ArgCount::Exactly(1),
                    found: 0,
                },
                display: "invalid number of arguments (expected exactly 1, found 0)",
            },
            TestData {
                error: Error::InvalidArgCount {
                    expected: ArgCount::AtLeast(2),
                    found: 1,
                },
                display: "invalid number of arguments (expected at least 2, found 1)",
            },
            TestData {
                error: Error::HandlerError("dang".into()),
                display: "dang",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let value = d.error.to_string();

            let msg = format!("test[{}]: {:?}, value: {:?}", i, d, value);

            assert_eq!(value, d.display, "{}", msg);
        }
    }
}
