// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Trait that an output sink must implement.
///
/// The sink receives the complete text of a help, version or error message
/// and decides both where it goes and which exit status the program should
/// terminate with.
pub trait Output {
    /// Emit `text`.
    ///
    /// # Parameters
    ///
    /// - `text` - The complete message, including the trailing newline.
    /// - `is_error` - Set if `text` is an error diagnostic.
    ///
    /// # Return value
    ///
    /// The exit status the program should terminate with.
    fn flush(&mut self, text: &str, is_error: bool) -> i32;
}

impl<F> Output for F
where
    F: FnMut(&str, bool) -> i32,
{
    fn flush(&mut self, text: &str, is_error: bool) -> i32 {
        self(text, is_error)
    }
}

impl<'a> fmt::Debug for dyn Output + 'a {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Output: {:p}", self)
    }
}

/// The default sink: errors go to stderr with exit status `1`, everything
/// else goes to stdout with exit status `0`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StdOutput;

impl Output for StdOutput {
    fn flush(&mut self, text: &str, is_error: bool) -> i32 {
        // Nothing sensible can be done if the write fails: we are about to
        // exit anyway.
        if is_error {
            let _ = io::stderr().write_all(text.as_bytes());
        } else {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(text.as_bytes());
            let _ = Write::flush(&mut stdout);
        }

        is_error as i32
    }
}

/// An output sink shared by every parser in a command tree.
pub(crate) type SharedOutput<'a> = Rc<RefCell<Box<dyn Output + 'a>>>;

pub(crate) fn shared_output<'a, O>(output: O) -> SharedOutput<'a>
where
    O: Output + 'a,
{
    Rc::new(RefCell::new(Box::new(output)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_output_exit_codes() {
        let mut output = StdOutput::default();

        assert_eq!(output.flush("", false), 0);
        assert_eq!(output.flush("", true), 1);
    }

    #[test]
    fn test_closure_output() {
        let mut seen: Vec<(String, bool)> = Vec::new();

        {
            let mut output = |text: &str, is_error: bool| -> i32 {
                seen.push((text.into(), is_error));
                if is_error {
                    42
                } else {
                    7
                }
            };

            assert_eq!(Output::flush(&mut output, "help\n", false), 7);
            assert_eq!(Output::flush(&mut output, "Error: oops.\n", true), 42);
        }

        assert_eq!(
            seen,
            vec![
                ("help\n".to_string(), false),
                ("Error: oops.\n".to_string(), true)
            ]
        );
    }

    #[test]
    fn test_shared_output() {
        let shared = shared_output(|_: &str, is_error: bool| if is_error { 3 } else { 4 });
        let other = shared.clone();

        assert_eq!(other.borrow_mut().flush("x", true), 3);
        assert_eq!(shared.borrow_mut().flush("x", false), 4);

        let value = format!("{:?}", shared.borrow());
        assert!(value.starts_with("Output: "), "{}", value);
    }
}
