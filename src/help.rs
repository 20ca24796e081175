// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use crate::registry::{Flag, Opt, Registry};

const OPT_PREFIX: &str = "-";
const LONG_OPT_PREFIX: &str = "--";

/// Indentation before each label.
const LABEL_INDENT: &str = "  ";

/// Minimum gap between the longest label and the hint text.
const HINT_GAP: usize = 2;

/// Returns the command-line form of an option name: `-x` for single
/// character names and `--name` otherwise.
pub(crate) fn option_name(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("{}{}", OPT_PREFIX, name)
    } else {
        format!("{}{}", LONG_OPT_PREFIX, name)
    }
}

/// A single help line: every alias of an entry and the entry's hint.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Hint<'h> {
    label: String,
    text: &'h str,
}

/// Collects hints for a block of the help output (`Commands:` or
/// `Options:`) so they can be aligned on a shared column.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Hints<'h> {
    hints: Vec<Hint<'h>>,
}

impl<'h> Hints<'h> {
    pub(crate) fn new() -> Self {
        Hints::default()
    }

    fn push(&mut self, label: String, text: &'h str) {
        // Entries without a hint are undocumented.
        if text.is_empty() {
            return;
        }

        self.hints.push(Hint { label, text });
    }

    pub(crate) fn add_flags(&mut self, flags: &'h Registry<Flag>) {
        for (aliases, flag) in flags.groups() {
            let label = aliases
                .iter()
                .map(|a| option_name(a))
                .collect::<Vec<String>>()
                .join(", ");

            self.push(label, &flag.hint);
        }
    }

    pub(crate) fn add_options(&mut self, options: &'h Registry<Opt>) {
        for (aliases, opt) in options.groups() {
            let label = aliases
                .iter()
                .map(|a| {
                    let name = option_name(a);

                    if name.starts_with(LONG_OPT_PREFIX) {
                        format!("{}=<arg>", name)
                    } else {
                        format!("{} <arg>", name)
                    }
                })
                .collect::<Vec<String>>()
                .join(", ");

            self.push(label, &opt.hint);
        }
    }

    /// Add one entry per group of `aliases`, labelled with the bare alias
    /// names (as used for commands).
    pub(crate) fn add_named<I>(&mut self, groups: I)
    where
        I: IntoIterator<Item = (Vec<&'h str>, &'h str)>,
    {
        for (aliases, text) in groups {
            self.push(aliases.join(", "), text);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Append the block, headed by `tag`, to `out`. Nothing is written if
    /// there are no hints.
    pub(crate) fn render(&self, tag: &str, out: &mut String) {
        if self.is_empty() {
            return;
        }

        let mut hints: Vec<&Hint> = self.hints.iter().collect();
        hints.sort_by(|a, b| a.label.cmp(&b.label));

        let width = hints
            .iter()
            .map(|h| h.label.chars().count())
            .max()
            .unwrap_or(0)
            + HINT_GAP;

        out.push_str(tag);

        for hint in hints {
            let pad = width - hint.label.chars().count();

            for (i, line) in hint.text.lines().enumerate() {
                if i == 0 {
                    out.push_str(LABEL_INDENT);
                    out.push_str(&hint.label);
                    out.push_str(&" ".repeat(pad));
                } else {
                    // Continuation lines line up with the first line of text.
                    out.push_str(&" ".repeat(LABEL_INDENT.len() + width));
                }

                out.push_str(line);
                out.push('\n');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_name() {
        #[derive(Debug)]
        struct TestData<'a> {
            name: &'a str,
            result: &'a str,
        }

        let tests = &[
            TestData {
                name: "f",
                result: "-f",
            },
            TestData {
                name: "foo",
                result: "--foo",
            },
            TestData {
                name: "人",
                result: "-人",
            },
            TestData {
                name: "人人",
                result: "--人人",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let value = option_name(d.name);

            let msg = format!("test[{}]: {:?}, value: {:?}", i, d, value);

            assert_eq!(value, d.result, "{}", msg);
        }
    }

    #[test]
    fn test_empty_hints() {
        let mut out = String::new();

        let mut flags = Registry::<Flag>::default();
        flags.add("quiet q", Flag::new(""));

        let mut hints = Hints::new();
        hints.add_flags(&flags);

        assert!(hints.is_empty());

        hints.render("\nOptions:\n", &mut out);
        assert_eq!(out, "");
    }

    #[test]
    fn test_render_alignment() {
        let mut flags = Registry::<Flag>::default();
        flags.add("foo f", Flag::new("Enable feature foo"));
        flags.add("debug", Flag::new("Debug\nmode"));

        let mut options = Registry::<Opt>::default();
        options.add("bar b", Opt::new("default", "Specify bar"));

        let mut hints = Hints::new();
        hints.add_flags(&flags);
        hints.add_options(&options);

        let mut out = String::new();
        hints.render("Options:\n", &mut out);

        let expected = concat!(
            "Options:\n",
            "  --debug                Debug\n",
            "                         mode\n",
            "  -b <arg>, --bar=<arg>  Specify bar\n",
            "  -f, --foo              Enable feature foo\n",
        );

        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_named() {
        let mut hints = Hints::new();

        hints.add_named(vec![
            (vec!["zoo"], "This is command zoo"),
            (vec!["boo", "b"], "This is command boo"),
            (vec!["hidden"], ""),
        ]);

        let mut out = String::new();
        hints.render("Commands:\n", &mut out);

        let expected = concat!(
            "Commands:\n",
            "  boo, b  This is command boo\n",
            "  zoo     This is command zoo\n",
        );

        assert_eq!(out, expected);
    }
}
