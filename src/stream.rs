// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::VecDeque;
use std::env;

/// Get a list of all command-line arguments specified to the program with
/// the program name (the first argument) removed.
///
/// # Note
///
/// Used with [Parser::parse_with_args()](crate::Parser::parse_with_args).
/// However, this isn't usually required: just call
/// [Parser::parse()](crate::Parser::parse).
pub fn get_args() -> Vec<String> {
    // argv may legitimately be empty, so skip rather than remove.
    env::args().skip(1).collect()
}

/// The arguments still to be parsed.
///
/// Arguments are consumed from the front and never put back: a command
/// parser takes everything that follows the command name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ArgStream {
    args: VecDeque<String>,
}

impl ArgStream {
    pub(crate) fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ArgStream {
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Iterator for ArgStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.args.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_stream() {
        let mut stream = ArgStream::new(vec!["one", "-t", "three"]);

        assert_eq!(stream.next(), Some("one".into()));
        assert_eq!(stream.next(), Some("-t".into()));

        // The rest can be taken in one go.
        let rest: Vec<String> = stream.by_ref().collect();
        assert_eq!(rest, vec!["three".to_string()]);

        assert_eq!(stream.next(), None);
        assert_eq!(stream, ArgStream::default());
    }

    #[test]
    fn test_arg_stream_empty() {
        let mut stream = ArgStream::new(Vec::<String>::new());

        assert_eq!(stream.next(), None);
        assert_eq!(stream, ArgStream::default());
    }

    #[test]
    fn test_get_args() {
        let get_args_result = get_args();

        let mut args: Vec<String> = env::args().collect();
        args.remove(0);

        assert_eq!(get_args_result, args);
    }
}
