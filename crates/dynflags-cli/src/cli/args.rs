//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use clap::{Arg, ArgAction, value_parser};
use dynflags_codec::RefKind;

/// Type expression in type notation (positional).
pub fn type_arg() -> Arg {
    Arg::new("type")
        .value_name("TYPE")
        .required(true)
        .help("Type expression, e.g. 'Dictionary<dynamic, int[]>'")
}

/// Stored marker flags (positional).
pub fn flags_arg() -> Arg {
    Arg::new("flags")
        .value_name("FLAGS")
        .help("Comma-separated true/false/1/0, or 'bare', or 'none'")
}

/// By-reference kind of the site (--ref).
pub fn ref_arg() -> Arg {
    Arg::new("ref")
        .long("ref")
        .value_name("KIND")
        .default_value("none")
        .value_parser(RefKind::NAMES)
        .help("By-reference kind of the site")
}

/// Number of custom modifiers on the site (--modifiers).
pub fn modifiers_arg() -> Arg {
    Arg::new("modifiers")
        .long("modifiers")
        .value_name("N")
        .default_value("0")
        .value_parser(value_parser!(usize))
        .help("Number of custom modifiers preceding the type")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of text")
}

/// Ignore malformed flags instead of failing (--lenient).
pub fn lenient_arg() -> Arg {
    Arg::new("lenient")
        .long("lenient")
        .action(ArgAction::SetTrue)
        .overrides_with("strict")
        .help("Ignore malformed flags and keep the erased type")
}

/// Reject malformed flags (--strict). The default.
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .overrides_with("lenient")
        .help("Reject malformed flags (default)")
}

/// Maximum nesting depth (--max-depth).
pub fn max_depth_arg() -> Arg {
    Arg::new("max_depth")
        .long("max-depth")
        .value_name("N")
        .default_value("512")
        .value_parser(value_parser!(u32))
        .help("Maximum type nesting depth")
}

/// Verbosity level (-v).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v also prints each container's full type)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
