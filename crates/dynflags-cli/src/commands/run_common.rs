//! Input handling shared by all commands.

use std::fmt::Display;

use dynflags_codec::{Marker, RefKind, SignatureSite, WalkLimits};
use dynflags_core::{ErasedType, parse_type};

/// A signature site as given on the command line.
pub struct SiteInput {
    pub ty: String,
    pub ref_kind: RefKind,
    pub modifiers: usize,
    pub max_depth: u32,
}

impl SiteInput {
    pub fn limits(&self) -> WalkLimits {
        WalkLimits::new().recursion_limit(self.max_depth)
    }

    /// Parse the site's type. Syntax errors are rendered against the input
    /// and end the process.
    pub fn load(&self) -> SignatureSite {
        let ty = match parse_type(&self.ty) {
            Ok(ty) => ty,
            Err(e) => {
                eprint!("{}", e.render(&self.ty));
                std::process::exit(1);
            }
        };
        SignatureSite::new(ty)
            .by_ref(self.ref_kind)
            .custom_modifiers(self.modifiers)
    }

    /// Parse the site's type and erase it. Types nested deeper than
    /// `max_depth` end the process.
    pub fn load_erased(&self) -> SignatureSite<ErasedType> {
        match self.load().try_erase(self.max_depth) {
            Ok(site) => site,
            Err(e) => fail(e),
        }
    }
}

/// Malformed `FLAGS` argument.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagsError {
    #[error("empty flag list (use 'none' for an absent marker)")]
    Empty,

    #[error("invalid flag `{token}` at position {position} (expected true, false, 1 or 0)")]
    InvalidFlag { token: String, position: usize },
}

/// Parse a marker: `none`, `bare`, or a comma-separated flag list with
/// optional surrounding brackets.
pub fn parse_marker(input: &str) -> Result<Marker, FlagsError> {
    let input = input.trim();
    match input {
        "" => return Err(FlagsError::Empty),
        "none" => return Ok(Marker::Absent),
        "bare" => return Ok(Marker::Bare),
        _ => {}
    }

    let list = input
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(input)
        .trim();
    if list.is_empty() {
        return Ok(Marker::Flags(Vec::new()));
    }

    list.split(',')
        .enumerate()
        .map(|(position, token)| parse_flag(token.trim(), position))
        .collect::<Result<Vec<_>, _>>()
        .map(Marker::Flags)
}

fn parse_flag(token: &str, position: usize) -> Result<bool, FlagsError> {
    match token {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(FlagsError::InvalidFlag {
            token: token.to_string(),
            position,
        }),
    }
}

/// `[false, true]`
pub fn format_flags(flags: &[bool]) -> String {
    let items: Vec<String> = flags.iter().map(bool::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Render a site as its prefix words followed by the type, e.g.
/// `modifier ref dynamic[]`.
pub fn format_site<T: Display>(site: &SignatureSite<T>) -> String {
    let mut words: Vec<String> = site.prefix_labels().map(str::to_string).collect();
    words.push(site.ty.to_string());
    words.join(" ")
}

pub fn fail(message: impl Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}
