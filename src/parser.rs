// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;
use std::ops::Index;
use std::process;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::help::Hints;
use crate::output::{shared_output, Output, SharedOutput, StdOutput};
use crate::registry::{Flag, Opt, Registry};
use crate::stream::{get_args, ArgStream};

const OPT_PREFIX: char = '-';

/// Special argument that is silently consumed and used to denote the end of
/// all options; all arguments that follow are considered to be positional
/// arguments (even if they start with `-`!)
///
/// See: `getopt(3)`.
const END_OF_OPTIONS: &str = "--";
const LONG_OPT_PREFIX: &str = END_OF_OPTIONS;

/// Separates an option name from its value in `--name=value`.
const VALUE_SEPARATOR: char = '=';

/// Name of the automatic command that shows the help for another command.
const HELP_COMMAND: &str = "help";

const HELP_LONG: &str = "help";
const HELP_SHORT: &str = "h";
const HELP_HINT: &str = "Show this help text";

const VERSION_LONG: &str = "version";
const VERSION_SHORT: &str = "v";
const VERSION_HINT: &str = "Show program version";

/// Function called once a command has parsed its arguments. It is passed
/// the command name as specified on the command-line and the command's
/// parser.
type Callback<'a> = Box<dyn FnMut(&str, &Parser<'a>) -> Result<()> + 'a>;

/// The number of positional arguments a parser requires.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArgCount {
    /// Exactly this many arguments.
    Exactly(usize),
    /// This many arguments or more.
    AtLeast(usize),
}

impl ArgCount {
    /// Determine if `count` positional arguments satisfies the requirement.
    pub fn is_valid(&self, count: usize) -> bool {
        match *self {
            ArgCount::Exactly(required) => count == required,
            ArgCount::AtLeast(required) => count >= required,
        }
    }
}

impl fmt::Display for ArgCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgCount::Exactly(count) => write!(f, "exactly {}", count),
            ArgCount::AtLeast(count) => write!(f, "at least {}", count),
        }
    }
}

/// The successful result of a parse.
///
/// Anything other than [Outcome::Success] means the program should display
/// the text and exit: see [Parser::report()].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// All arguments were parsed; query the [Parser] for the results.
    Success,
    /// Help was requested. Contains the full help text.
    Help(String),
    /// The version was requested. Contains the version text.
    Version(String),
}

/// The main object used to represent the program or one of its commands.
///
/// A parser holds the registered flags, options and commands plus the
/// results of parsing them. Each command is itself a [Parser] which
/// handles all the arguments following the command name.
#[derive(Default)]
pub struct Parser<'a> {
    help: String,
    version: String,
    hint: String,
    flags: Registry<Flag>,
    options: Registry<Opt>,
    commands: Registry<Parser<'a>>,
    args: Vec<String>,
    // Name (as specified on the command-line) and id of the command found.
    command: Option<(String, usize)>,
    arg_count: Option<ArgCount>,
    callback: Option<Callback<'a>>,
    output: Option<SharedOutput<'a>>,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    ///
    /// # Parameters
    ///
    /// - `help` - Help text. If not empty, `-h` and `--help` display it
    ///   (unless registered as a flag or option).
    /// - `version` - Version text. If not empty, `-v` and `--version`
    ///   display it (unless registered as a flag or option).
    pub fn new(help: &str, version: &str) -> Self {
        Parser {
            help: help.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Specify the help text.
    pub fn help(&mut self, help: &str) -> &mut Self {
        self.help = help.into();
        self
    }

    /// Specify the version text.
    pub fn version(&mut self, version: &str) -> &mut Self {
        self.version = version.into();
        self
    }

    /// Specify the one-line description shown for this command in the help
    /// output of its parent.
    pub fn hint(&mut self, hint: &str) -> &mut Self {
        self.hint = hint.into();
        self
    }

    /// Register a flag (an option that does not take a value).
    ///
    /// `aliases` is a whitespace-separated list of names, for example
    /// `"verbose v"` which allows the flag to be specified as either
    /// `--verbose` or `-v`. Single character names are short options.
    ///
    /// # Note
    ///
    /// Registering a name that is already in use replaces the existing
    /// binding for that name.
    pub fn flag(&mut self, aliases: &str, hint: &str) -> &mut Self {
        self.flags.add(aliases, Flag::new(hint));
        self
    }

    /// Register an option (which requires a value).
    ///
    /// `fallback` is returned by [Parser::value()] if the option is not
    /// specified on the command-line.
    ///
    /// See [Parser::flag()] for details of `aliases`.
    pub fn option(&mut self, aliases: &str, fallback: &str, hint: &str) -> &mut Self {
        self.options.add(aliases, Opt::new(fallback, hint));
        self
    }

    /// Register a command and return its parser so flags, options and
    /// further commands can be registered on it.
    ///
    /// If the command is found as the first positional argument, all the
    /// remaining arguments are parsed by the command's parser.
    ///
    /// See [Parser::flag()] for details of `aliases`.
    pub fn command(&mut self, aliases: &str, help: &str) -> &mut Parser<'a> {
        let output = self
            .output
            .get_or_insert_with(|| shared_output(StdOutput))
            .clone();

        let parser = Parser {
            help: help.into(),
            output: Some(output),
            ..Default::default()
        };

        let id = self.commands.add(aliases, parser);

        &mut self.commands[id]
    }

    /// Specify a function to call once this command has parsed its
    /// arguments.
    ///
    /// The function is passed the command name as specified on the
    /// command-line and this parser. If it returns an error, the parse
    /// fails with that error.
    pub fn callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&str, &Parser<'a>) -> Result<()> + 'a,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Specify the number of positional arguments required.
    ///
    /// If `accept_more` is set, `count` is a minimum.
    pub fn args_required(&mut self, count: usize, accept_more: bool) -> &mut Self {
        self.arg_count = Some(if accept_more {
            ArgCount::AtLeast(count)
        } else {
            ArgCount::Exactly(count)
        });

        self
    }

    /// Specify how help, version and error text is displayed.
    ///
    /// The closure is passed the text and whether it is an error, and
    /// returns the status the program should exit with.
    ///
    /// # Note
    ///
    /// The output is shared by the whole command tree, so setting it on any
    /// parser in the tree changes it for all of them.
    pub fn set_output<F>(&mut self, output: F) -> &mut Self
    where
        F: FnMut(&str, bool) -> i32 + 'a,
    {
        self.set_output_sink(output)
    }

    /// Specify an [Output] to display help, version and error text.
    ///
    /// See [Parser::set_output()].
    pub fn set_output_sink<O>(&mut self, output: O) -> &mut Self
    where
        O: Output + 'a,
    {
        if let Some(shared) = self.output.as_ref() {
            *shared.borrow_mut() = Box::new(output);
            return self;
        }

        self.output = Some(shared_output(output));
        self
    }

    //----------------------------------------
    // Queries

    /// Determine if the flag or option was specified.
    pub fn found(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Returns the number of times the flag or option was specified.
    pub fn count(&self, name: &str) -> usize {
        if let Some(flag) = self.flags.get(name) {
            return flag.count;
        }

        self.options.get(name).map_or(0, |opt| opt.values.len())
    }

    /// Returns the last value specified for the option, or its fallback
    /// value. Returns an empty string for unknown options.
    pub fn value(&self, name: &str) -> &str {
        self.options.get(name).map_or("", |opt| opt.value())
    }

    /// Returns all the values specified for the option, in command-line
    /// order.
    pub fn values(&self, name: &str) -> &[String] {
        match self.options.get(name) {
            Some(opt) => &opt.values,
            None => &[],
        }
    }

    /// Returns the positional argument at `index`, or an empty string if
    /// there is no such argument.
    pub fn arg(&self, index: usize) -> &str {
        self.args.get(index).map_or("", String::as_str)
    }

    /// Returns all positional arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Determine if a command was found.
    pub fn command_found(&self) -> bool {
        self.command.is_some()
    }

    /// Returns the name of the command found (as specified on the
    /// command-line), or an empty string.
    pub fn command_name(&self) -> &str {
        self.command.as_ref().map_or("", |(name, _)| name.as_str())
    }

    /// Returns the parser for the command found.
    pub fn command_parser(&self) -> Option<&Parser<'a>> {
        self.command
            .as_ref()
            .and_then(|(_, id)| self.commands.entry(*id))
    }

    //----------------------------------------
    // Parsing

    /// Parse a set of command line arguments (without the program name).
    ///
    /// # Return value
    ///
    /// - `Ok(Outcome::Success)` if all arguments were parsed.
    /// - `Ok(Outcome::Help(_))` or `Ok(Outcome::Version(_))` if the user
    ///   asked for help or the version.
    /// - An [Error] if the command-line is invalid.
    ///
    /// Pass the result to [Parser::report()] to display the appropriate
    /// text.
    pub fn parse_with_args<I, S>(&mut self, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stream = ArgStream::new(args);

        let result = self.parse_stream(&mut stream);

        if let Err(e) = &result {
            debug!(error = %e, "failed to parse arguments");
        }

        result
    }

    /// Simplest interface to the parser: parse the program's arguments and
    /// exit if help or the version was requested, or if the arguments are
    /// invalid.
    pub fn parse(&mut self) {
        let result = self.parse_with_args(get_args());

        if let Some(code) = self.report(&result) {
            process::exit(code);
        }
    }

    /// Display the text for a parse result using the configured output.
    ///
    /// # Return value
    ///
    /// `None` for [Outcome::Success], otherwise the status the program
    /// should exit with.
    pub fn report(&self, result: &Result<Outcome>) -> Option<i32> {
        let (text, is_error) = match result {
            Ok(Outcome::Success) => return None,
            Ok(Outcome::Help(text)) | Ok(Outcome::Version(text)) => (text.clone(), false),
            Err(e) => (format!("Error: {}.\n", e), true),
        };

        let code = match &self.output {
            Some(output) => output.borrow_mut().flush(&text, is_error),
            None => {
                let mut output = StdOutput;
                output.flush(&text, is_error)
            }
        };

        Some(code)
    }

    fn parse_stream(&mut self, stream: &mut ArgStream) -> Result<Outcome> {
        // Commands are only recognised before the first positional argument.
        let mut is_first_arg = true;

        while let Some(arg) = stream.next() {
            trace!(arg = %arg, is_first_arg, "parsing argument");

            if arg == END_OF_OPTIONS {
                debug!("end of options");

                self.args.extend(&mut *stream);
                continue;
            }

            if let Some(name) = arg.strip_prefix(LONG_OPT_PREFIX) {
                if let Some(outcome) = self.parse_long_option(name, stream)? {
                    return Ok(outcome);
                }

                continue;
            }

            if let Some(name) = arg.strip_prefix(OPT_PREFIX) {
                // A lone dash (stdin) or a negative number.
                if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
                    self.args.push(arg);
                    continue;
                }

                if let Some(outcome) = self.parse_short_option(name, stream)? {
                    return Ok(outcome);
                }

                continue;
            }

            if is_first_arg {
                if let Some(id) = self.commands.id(&arg) {
                    debug!(command = %arg, "found command");

                    self.command = Some((arg.clone(), id));

                    let command = &mut self.commands[id];

                    let outcome = command.parse_stream(stream)?;
                    if outcome != Outcome::Success {
                        return Ok(outcome);
                    }

                    command.run_callback(&arg)?;
                    continue;
                }

                if arg == HELP_COMMAND && !self.commands.is_empty() {
                    let name = stream.next().ok_or(Error::MissingHelpCommand)?;

                    let command = self
                        .commands
                        .get(&name)
                        .ok_or_else(|| Error::UnknownCommand(name.clone()))?;

                    debug!(command = %name, "help requested for command");

                    return Ok(Outcome::Help(command.help_text()));
                }
            }

            self.args.push(arg);
            is_first_arg = false;
        }

        if let Some(expected) = self.arg_count {
            let found = self.args.len();

            if !expected.is_valid(found) {
                return Err(Error::InvalidArgCount { expected, found });
            }
        }

        Ok(Outcome::Success)
    }

    /// Handle `--name`, `--name value` or `--name=value` (`arg` is the text
    /// after the dashes).
    fn parse_long_option(&mut self, arg: &str, stream: &mut ArgStream) -> Result<Option<Outcome>> {
        if let Some((name, value)) = arg.split_once(VALUE_SEPARATOR) {
            self.parse_equals_option(LONG_OPT_PREFIX, name, value)?;
            return Ok(None);
        }

        if let Some(flag) = self.flags.get_mut(arg) {
            flag.count += 1;
            return Ok(None);
        }

        if let Some(opt) = self.options.get_mut(arg) {
            let value = stream
                .next()
                .ok_or_else(|| Error::MissingOptArg(format!("{}{}", LONG_OPT_PREFIX, arg)))?;

            opt.values.push(value);
            return Ok(None);
        }

        if arg == HELP_LONG && !self.help.is_empty() {
            return Ok(Some(self.help_outcome()));
        }

        if arg == VERSION_LONG && !self.version.is_empty() {
            return Ok(Some(self.version_outcome()));
        }

        Err(Error::UnknownOpt(format!("{}{}", LONG_OPT_PREFIX, arg)))
    }

    /// Handle a group of one or more single character flags and options,
    /// or `-n=value` (`arg` is the text after the dash).
    fn parse_short_option(&mut self, arg: &str, stream: &mut ArgStream) -> Result<Option<Outcome>> {
        if let Some((name, value)) = arg.split_once(VALUE_SEPARATOR) {
            let prefix = OPT_PREFIX.to_string();

            self.parse_equals_option(&prefix, name, value)?;
            return Ok(None);
        }

        let describe = |c: char| {
            if arg.chars().count() > 1 {
                format!("'{}' in {}{}", c, OPT_PREFIX, arg)
            } else {
                format!("{}{}", OPT_PREFIX, c)
            }
        };

        for c in arg.chars() {
            let name = c.to_string();

            if let Some(flag) = self.flags.get_mut(&name) {
                flag.count += 1;
                continue;
            }

            if let Some(opt) = self.options.get_mut(&name) {
                let value = stream
                    .next()
                    .ok_or_else(|| Error::MissingOptArg(describe(c)))?;

                opt.values.push(value);
                continue;
            }

            if name == HELP_SHORT && !self.help.is_empty() {
                return Ok(Some(self.help_outcome()));
            }

            if name == VERSION_SHORT && !self.version.is_empty() {
                return Ok(Some(self.version_outcome()));
            }

            return Err(Error::UnknownOpt(describe(c)));
        }

        Ok(None)
    }

    /// Handle `--name=value` or `-n=value`. Only options can be specified
    /// this way.
    fn parse_equals_option(&mut self, prefix: &str, name: &str, value: &str) -> Result<()> {
        let opt = self
            .options
            .get_mut(name)
            .ok_or_else(|| Error::UnknownValueOpt(format!("{}{}", prefix, name)))?;

        if value.is_empty() {
            return Err(Error::MissingOptValue(format!("{}{}", prefix, name)));
        }

        opt.values.push(value.into());

        Ok(())
    }

    fn run_callback(&mut self, name: &str) -> Result<()> {
        if let Some(mut callback) = self.callback.take() {
            let result = callback(name, &*self);

            self.callback = Some(callback);

            result?;
        }

        Ok(())
    }

    fn help_outcome(&self) -> Outcome {
        debug!("help requested");

        Outcome::Help(self.help_text())
    }

    fn version_outcome(&self) -> Outcome {
        debug!("version requested");

        Outcome::Version(format!("{}\n", self.version))
    }

    //----------------------------------------
    // Help

    /// Flags for `-h`/`--help` and `-v`/`--version`, for those names the
    /// caller has not registered.
    fn builtins(&self) -> Registry<Flag> {
        let mut builtins = Registry::default();

        let unclaimed = |names: &[&str]| {
            names
                .iter()
                .filter(|name| !self.flags.contains(name) && !self.options.contains(name))
                .copied()
                .collect::<Vec<&str>>()
                .join(" ")
        };

        if !self.version.is_empty() {
            builtins.add(
                &unclaimed(&[VERSION_SHORT, VERSION_LONG]),
                Flag::new(VERSION_HINT),
            );
        }

        if !self.help.is_empty() {
            builtins.add(
                &unclaimed(&[HELP_SHORT, HELP_LONG]),
                Flag::new(HELP_HINT),
            );
        }

        builtins
    }

    /// Generate the help statement: the help text followed by a summary of
    /// the commands and options that have a hint.
    pub fn help_text(&self) -> String {
        let mut out = format!("{}\n", self.help);

        let mut commands = Hints::new();
        commands.add_named(
            self.commands
                .groups()
                .into_iter()
                .map(|(aliases, command)| (aliases, command.hint.as_str())),
        );
        commands.render("\nCommands:\n", &mut out);

        let builtins = self.builtins();

        let mut options = Hints::new();
        options.add_flags(&self.flags);
        options.add_options(&self.options);
        options.add_flags(&builtins);
        options.render("\nOptions:\n", &mut out);

        out.push('\n');

        out
    }
}

impl<'a> fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Parser")
            .field("help", &self.help)
            .field("version", &self.version)
            .field("hint", &self.hint)
            .field("flags", &self.flags)
            .field("options", &self.options)
            .field("commands", &self.commands)
            .field("args", &self.args)
            .field("command", &self.command)
            .field("arg_count", &self.arg_count)
            .field("callback", &self.callback.is_some())
            .field("output", &self.output.is_some())
            .finish()
    }
}

/// Dump the state of the parser.
impl<'a> fmt::Display for Parser<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const NONE: &str = "  [none]";

        writeln!(f, "Options:")?;
        if self.options.is_empty() {
            writeln!(f, "{}", NONE)?;
        }
        for (alias, opt) in self.options.iter() {
            writeln!(
                f,
                "  {}: ({}) [{}]",
                alias,
                opt.fallback,
                opt.values.join(", ")
            )?;
        }

        writeln!(f, "\nFlags:")?;
        if self.flags.is_empty() {
            writeln!(f, "{}", NONE)?;
        }
        for (alias, flag) in self.flags.iter() {
            writeln!(f, "  {}: {}", alias, flag.count)?;
        }

        writeln!(f, "\nArguments:")?;
        if self.args.is_empty() {
            writeln!(f, "{}", NONE)?;
        }
        for arg in self.args.iter() {
            writeln!(f, "  {}", arg)?;
        }

        writeln!(f, "\nCommand:")?;
        if self.command_found() {
            writeln!(f, "  {}", self.command_name())
        } else {
            writeln!(f, "{}", NONE)
        }
    }
}

/// `parser["name"]` is the same as `parser.value("name")`.
impl<'a, 'n> Index<&'n str> for Parser<'a> {
    type Output = str;

    fn index(&self, name: &'n str) -> &str {
        self.value(name)
    }
}

/// `parser[i]` is the same as `parser.arg(i)`.
impl<'a> Index<usize> for Parser<'a> {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        self.arg(index)
    }
}
