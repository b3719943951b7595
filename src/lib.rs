#![warn(clippy::pedantic)]
#![warn(clippy::complexity)]
//! Argord - an order-preserving argument parser
//!
//! Tokenizes a flat slice of command-line arguments into a stream of typed
//! items: recognized options (short or long, with or without a value) and
//! non-option arguments, in the exact order they appear. Each non-option item
//! remembers its position within the original arguments and its position
//! amongst the other non-option items, so a caller can always reconstruct
//! where anything came from.
//!
//! Supported forms:
//!
//! * Short options, possibly tied together: `-f -auf -n`
//! * Short options with a value: `-b 45 -f/mein/file -xyzhello`
//! * Long options: `--five-guys --burger-king`
//! * Long options with a value: `--security enable --time=18.56`
//! * Non-option arguments (anything else).
//!
//! `-` and `--` are **not** special here. For many tools `--` means "end of
//! options", but this parser is all about keeping the order of the arguments,
//! so it does not mean much to put them at the end. Both parse as ordinary
//! non-option arguments. The side effect is that a non-option argument cannot
//! have the shape of an option; pass `./--component` if you need the literal
//! relative path `--component`.
//!
//! Parse lazily with [`Parser`], one item per [`Parser::next_item`] call, or
//! all at once with [`parse_all`].
//!
//! ```
//! use argord::{parse_all, Item, OptDescr};
//!
//! let descrs = [
//!     OptDescr::new(0, Some('v'), Some("verbose"), false),
//!     OptDescr::new(1, None, Some("output"), true),
//! ];
//!
//! let args = ["-v", "--output=a.txt", "input.txt"];
//! let ret = parse_all(&args, &descrs, true).unwrap();
//!
//! assert_eq!(ret.items.len(), 3);
//! assert_eq!(ret.ingested_orig_args, 3);
//! assert_eq!(ret.items[1].value(), Some("a.txt"));
//! assert_eq!(ret.items[2], Item::NonOpt {
//!     text: "input.txt",
//!     orig_index: 2,
//!     non_opt_index: 0,
//! });
//! ```

use thiserror::Error as ThisError;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Describes one option the parser should recognize.
///
/// Plain data: at least one of `short_name`/`long_name` should be set for the
/// descriptor to ever match (one with neither is legal but inert). The same
/// name may appear in several descriptors; the first one in table order wins.
/// Matching is exact: no abbreviations, no case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptDescr {
    /// Caller-chosen numeric ID, echoed back through matched items.
    pub id: u32,

    /// Short option character, without the `-`.
    pub short_name: Option<char>,

    /// Long option name, without the `--`.
    pub long_name: Option<String>,

    /// True if this option expects a value.
    pub takes_value: bool,
}

impl OptDescr {
    #[must_use]
    pub fn new(
        id: u32,
        short_name: Option<char>,
        long_name: Option<&str>,
        takes_value: bool,
    ) -> Self {
        Self {
            id,
            short_name,
            long_name: long_name.map(str::to_owned),
            takes_value,
        }
    }

    // Renders the name the user wrote, for diagnostics. The caller vouches
    // that the flagged side of the descriptor is populated.
    fn error_name(&self, is_short: bool) -> String {
        match (is_short, self.short_name, &self.long_name) {
            (true, Some(short), _) => format!("-{short}"),
            (false, _, Some(long)) => format!("--{long}"),
            _ => String::new(),
        }
    }
}

fn find_short(descrs: &[OptDescr], short: char) -> Option<&OptDescr> {
    descrs.iter().find(|descr| descr.short_name == Some(short))
}

fn find_long<'descr>(descrs: &'descr [OptDescr], long: &str) -> Option<&'descr OptDescr> {
    descrs
        .iter()
        .find(|descr| descr.long_name.as_deref() == Some(long))
}

/// One parsed item.
///
/// An option's value is owned because it may be carved out of a glued
/// (`-cvalue`) or equal-form (`--opt=value`) argument. Non-option text is
/// always borrowed straight from the original arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<'arg, 'descr> {
    /// A recognized option, with its value if it took one.
    Opt {
        descr: &'descr OptDescr,
        value: Option<String>,
    },

    /// Anything that is not an option.
    NonOpt {
        /// The complete original argument.
        text: &'arg str,

        /// Index of this argument amongst all original arguments.
        orig_index: usize,

        /// Index of this argument amongst the non-option arguments only.
        non_opt_index: usize,
    },
}

impl<'arg, 'descr> Item<'arg, 'descr> {
    #[must_use]
    pub fn is_opt(&self) -> bool {
        matches!(self, Item::Opt { .. })
    }

    /// The matched descriptor, for option items.
    #[must_use]
    pub fn descr(&self) -> Option<&'descr OptDescr> {
        match self {
            Item::Opt { descr, .. } => Some(descr),
            Item::NonOpt { .. } => None,
        }
    }

    /// The option's value. `None` for non-option items and for options
    /// without one; note that an empty string (`--opt=`) is a value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Item::Opt { value, .. } => value.as_deref(),
            Item::NonOpt { .. } => None,
        }
    }

    /// The original text, for non-option items.
    #[must_use]
    pub fn text(&self) -> Option<&'arg str> {
        match self {
            Item::Opt { .. } => None,
            Item::NonOpt { text, .. } => Some(text),
        }
    }

    #[must_use]
    pub fn orig_index(&self) -> Option<usize> {
        match self {
            Item::Opt { .. } => None,
            Item::NonOpt { orig_index, .. } => Some(*orig_index),
        }
    }

    #[must_use]
    pub fn non_opt_index(&self) -> Option<usize> {
        match self {
            Item::Opt { .. } => None,
            Item::NonOpt { non_opt_index, .. } => Some(*non_opt_index),
        }
    }
}

/// Ways a parse step can fail.
///
/// Every variant keeps the index and full text of the original argument that
/// triggered it, so diagnostics can point at the exact spot.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// No descriptor matches this option name.
    #[error("While parsing argument #{} (`{orig_arg}`): Unknown option `{name}`", .orig_index + 1)]
    UnknownOpt {
        orig_index: usize,
        orig_arg: String,
        /// The unknown name as written, `-`/`--` prefix included.
        name: String,
    },

    /// The option expects a value but none is there to take.
    #[error("While parsing argument #{} (`{orig_arg}`): Missing required argument for option `{}`", .orig_index + 1, .descr.error_name(*(.is_short)))]
    MissingOptArg {
        orig_index: usize,
        orig_arg: String,
        descr: OptDescr,
        is_short: bool,
    },

    /// The option takes no value but was written `--opt=value`.
    #[error("While parsing argument #{} (`{orig_arg}`): Unexpected argument for option `{}`", .orig_index + 1, .descr.error_name(*(.is_short)))]
    UnexpectedOptArg {
        orig_index: usize,
        orig_arg: String,
        descr: OptDescr,
        is_short: bool,
    },
}

impl Error {
    /// Index of the original argument where the error was detected.
    #[must_use]
    pub fn orig_index(&self) -> usize {
        match self {
            Self::UnknownOpt { orig_index, .. }
            | Self::MissingOptArg { orig_index, .. }
            | Self::UnexpectedOptArg { orig_index, .. } => *orig_index,
        }
    }

    /// Full text of the original argument where the error was detected.
    #[must_use]
    pub fn orig_arg(&self) -> &str {
        match self {
            Self::UnknownOpt { orig_arg, .. }
            | Self::MissingOptArg { orig_arg, .. }
            | Self::UnexpectedOptArg { orig_arg, .. } => orig_arg,
        }
    }

    /// The unknown option name (prefix included), for [`Error::UnknownOpt`].
    #[must_use]
    pub fn unknown_opt_name(&self) -> Option<&str> {
        match self {
            Self::UnknownOpt { name, .. } => Some(name),
            Self::MissingOptArg { .. } | Self::UnexpectedOptArg { .. } => None,
        }
    }

    /// The offending descriptor and whether its short name was used, for
    /// [`Error::MissingOptArg`] and [`Error::UnexpectedOptArg`].
    #[must_use]
    pub fn opt_descr(&self) -> Option<(&OptDescr, bool)> {
        match self {
            Self::MissingOptArg { descr, is_short, .. }
            | Self::UnexpectedOptArg { descr, is_short, .. } => Some((descr, *is_short)),
            Self::UnknownOpt { .. } => None,
        }
    }
}

/// The parsing engine: produces one [`Item`] per [`Parser::next_item`] call.
///
/// Borrows the original arguments and the option table for its whole
/// lifetime and never mutates either, so independent parsers over shared
/// input can run side by side.
///
/// After a call returns `Err`, the parser is *poisoned*: its position is
/// frozen where the error was detected, [`Parser::is_poisoned`] returns true
/// and every later call returns `Ok(None)`. Make a fresh parser to reparse.
pub struct Parser<'arg, 'descr, S> {
    args: &'arg [S],
    descrs: &'descr [OptDescr],

    next_arg_index: usize,
    non_opt_count: usize,

    // Byte offset of the next character to interpret inside the current
    // argument, while draining a `-abc` cluster.
    cluster_cursor: Option<usize>,

    poisoned: bool,
}

impl<'arg, 'descr, S> Parser<'arg, 'descr, S>
where
    S: AsRef<str>,
{
    #[must_use]
    pub fn new(args: &'arg [S], descrs: &'descr [OptDescr]) -> Self {
        Self {
            args,
            descrs,
            next_arg_index: 0,
            non_opt_count: 0,
            cluster_cursor: None,
            poisoned: false,
        }
    }

    /// Number of original arguments fully consumed by the items produced so
    /// far. An argument being drained as a short cluster does not count
    /// until its last option is out.
    ///
    /// This is not the number of items: `-xyz` is one ingested argument but
    /// up to three items.
    #[must_use]
    pub fn ingested_orig_args(&self) -> usize {
        self.next_arg_index
    }

    /// True once a call has returned `Err`.
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Moves the parser one item forward.
    ///
    /// Returns `Ok(Some(item))` for each parsed item, `Ok(None)` once the
    /// arguments are exhausted (or the parser is poisoned).
    ///
    /// # Errors
    ///
    /// [`Error::UnknownOpt`] for an undescribed option name,
    /// [`Error::MissingOptArg`] for a value-taking option with nothing left
    /// to consume, [`Error::UnexpectedOptArg`] for `--opt=value` on an
    /// option that takes none. The failing argument is not consumed.
    pub fn next_item(&mut self) -> Result<Option<Item<'arg, 'descr>>> {
        if self.poisoned {
            return Ok(None);
        }

        match self.step() {
            Err(err) => {
                self.poisoned = true;
                Err(err)
            }
            ok => ok,
        }
    }

    fn step(&mut self) -> Result<Option<Item<'arg, 'descr>>> {
        if let Some(cursor) = self.cluster_cursor {
            return self.short_opt_at(cursor).map(Some);
        }

        let args = self.args;
        let Some(arg) = args.get(self.next_arg_index) else {
            return Ok(None);
        };
        let arg = arg.as_ref();

        // `-` and `--` alone are ordinary non-option arguments here, never
        // option terminators; see the crate docs.
        if !arg.starts_with('-') || arg == "-" || arg == "--" {
            let item = Item::NonOpt {
                text: arg,
                orig_index: self.next_arg_index,
                non_opt_index: self.non_opt_count,
            };

            self.non_opt_count += 1;
            self.next_arg_index += 1;

            return Ok(Some(item));
        }

        if let Some(body) = arg.strip_prefix("--") {
            // `---foo` is the long option `-foo`.
            self.long_opt(arg, body).map(Some)
        } else {
            self.cluster_cursor = Some(1);
            self.short_opt_at(1).map(Some)
        }
    }

    fn long_opt(&mut self, orig_arg: &'arg str, body: &'arg str) -> Result<Item<'arg, 'descr>> {
        // Only the first `=` separates: `--zebra=three=yes` has the value
        // `three=yes`.
        let (name, inline_value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let Some(descr) = find_long(self.descrs, name) else {
            return Err(Error::UnknownOpt {
                orig_index: self.next_arg_index,
                orig_arg: orig_arg.to_owned(),
                name: format!("--{name}"),
            });
        };

        if !descr.takes_value {
            if inline_value.is_some() {
                return Err(Error::UnexpectedOptArg {
                    orig_index: self.next_arg_index,
                    orig_arg: orig_arg.to_owned(),
                    descr: descr.clone(),
                    is_short: false,
                });
            }

            self.next_arg_index += 1;

            return Ok(Item::Opt { descr, value: None });
        }

        let value = if let Some(value) = inline_value {
            // `--opt=` carries a valid, empty value.
            self.next_arg_index += 1;
            value.to_owned()
        } else if let Some(next) = self.args.get(self.next_arg_index + 1) {
            // Space form: the next argument is the value, verbatim, leading
            // `-` or not.
            self.next_arg_index += 2;
            next.as_ref().to_owned()
        } else {
            return Err(Error::MissingOptArg {
                orig_index: self.next_arg_index,
                orig_arg: orig_arg.to_owned(),
                descr: descr.clone(),
                is_short: false,
            });
        };

        Ok(Item::Opt {
            descr,
            value: Some(value),
        })
    }

    fn short_opt_at(&mut self, cursor: usize) -> Result<Item<'arg, 'descr>> {
        let args = self.args;
        let arg = match args.get(self.next_arg_index) {
            Some(arg) => arg.as_ref(),
            // A live cluster cursor always points inside a live argument.
            None => unreachable!(),
        };
        let Some(short) = arg[cursor..].chars().next() else {
            unreachable!()
        };

        let Some(descr) = find_short(self.descrs, short) else {
            return Err(Error::UnknownOpt {
                orig_index: self.next_arg_index,
                orig_arg: arg.to_owned(),
                name: format!("-{short}"),
            });
        };

        let after = cursor + short.len_utf8();

        if !descr.takes_value {
            if after == arg.len() {
                self.cluster_cursor = None;
                self.next_arg_index += 1;
            } else {
                self.cluster_cursor = Some(after);
            }

            return Ok(Item::Opt { descr, value: None });
        }

        let value = if after < arg.len() {
            // Glued form, `-cvalue`. A glued value is never empty: a
            // trailing value-taking option uses the space form instead.
            self.next_arg_index += 1;
            arg[after..].to_owned()
        } else if let Some(next) = args.get(self.next_arg_index + 1) {
            // Space form. `-o ''` is accepted: an empty next argument is
            // still a value.
            self.next_arg_index += 2;
            next.as_ref().to_owned()
        } else {
            return Err(Error::MissingOptArg {
                orig_index: self.next_arg_index,
                orig_arg: arg.to_owned(),
                descr: descr.clone(),
                is_short: true,
            });
        };

        self.cluster_cursor = None;

        Ok(Item::Opt {
            descr,
            value: Some(value),
        })
    }
}

impl<'arg, 'descr, S> Iterator for Parser<'arg, 'descr, S>
where
    S: AsRef<str>,
{
    type Item = Result<Item<'arg, 'descr>>;

    /// Fuses after an error: the `Err` comes out once, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        self.next_item().transpose()
    }
}

/// What [`parse_all`] returns on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRet<'arg, 'descr> {
    /// All items, in parsing order.
    pub items: Vec<Item<'arg, 'descr>>,

    /// Number of original arguments ingested to produce `items`. Equal to
    /// the argument count unless a tolerated unknown option cut the run
    /// short.
    pub ingested_orig_args: usize,
}

/// What [`parse_all`] returns on failure.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{error}")]
pub struct ParseError {
    pub error: Error,

    /// Number of original arguments ingested before the error.
    pub ingested_orig_args: usize,
}

/// Parses all of `args` in one call.
///
/// With `fail_on_unknown_opt` false, an unknown *option* is a soft stop
/// rather than an error: the items parsed so far are returned and
/// `ingested_orig_args` tells where the unknown option lives, so a later
/// stage can pick up from there with a different option table. This is how a
/// sub-command boundary is found:
///
/// ```
/// use argord::{parse_all, OptDescr};
///
/// let descrs = [
///     OptDescr::new(0, None, Some("verbose"), false),
///     OptDescr::new(1, None, Some("stuff"), true),
/// ];
///
/// let args = ["--verbose", "--stuff=23", "do-something", "--specific-opt"];
/// let ret = parse_all(&args, &descrs, false).unwrap();
///
/// // `--verbose`, `--stuff=23` and the command name were parsed; resume at
/// // `args[3]` with the descriptors for `do-something`.
/// assert_eq!(ret.items.len(), 3);
/// assert_eq!(ret.ingested_orig_args, 3);
/// ```
///
/// # Errors
///
/// Any engine [`Error`] aborts the parse and discards the partial items,
/// except a tolerated unknown option as described above. The returned
/// [`ParseError`] carries the ingested count at the time of the error.
pub fn parse_all<'arg, 'descr, S>(
    args: &'arg [S],
    descrs: &'descr [OptDescr],
    fail_on_unknown_opt: bool,
) -> Result<ParseRet<'arg, 'descr>, ParseError>
where
    S: AsRef<str>,
{
    let mut parser = Parser::new(args, descrs);
    let mut items = Vec::new();

    loop {
        match parser.next_item() {
            Ok(Some(item)) => items.push(item),
            Ok(None) => break,
            Err(Error::UnknownOpt { .. }) if !fail_on_unknown_opt => {
                // The unknown option's argument was not ingested; it is the
                // next stage's problem now. Items already produced stay,
                // including any from a partially drained cluster.
                return Ok(ParseRet {
                    items,
                    ingested_orig_args: parser.ingested_orig_args(),
                });
            }
            Err(error) => {
                return Err(ParseError {
                    ingested_orig_args: parser.ingested_orig_args(),
                    error,
                });
            }
        }
    }

    Ok(ParseRet {
        items,
        ingested_orig_args: parser.ingested_orig_args(),
    })
}
