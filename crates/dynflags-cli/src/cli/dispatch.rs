//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use clap::ArgMatches;
use dynflags_codec::{DecodePolicy, RefKind, Verbosity};

use super::ColorChoice;
use crate::commands::decode::DecodeArgs;
use crate::commands::encode::EncodeArgs;
use crate::commands::run_common::SiteInput;
use crate::commands::trace::TraceArgs;

pub struct EncodeParams {
    pub ty: String,
    pub ref_kind: RefKind,
    pub modifiers: usize,
    pub max_depth: u32,
    pub json: bool,
}

impl EncodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            ty: parse_type_text(m),
            ref_kind: parse_ref_kind(m),
            modifiers: parse_modifiers(m),
            max_depth: parse_max_depth(m),
            json: m.get_flag("json"),
        }
    }
}

impl From<EncodeParams> for EncodeArgs {
    fn from(p: EncodeParams) -> Self {
        Self {
            site: SiteInput {
                ty: p.ty,
                ref_kind: p.ref_kind,
                modifiers: p.modifiers,
                max_depth: p.max_depth,
            },
            json: p.json,
        }
    }
}

pub struct DecodeParams {
    pub ty: String,
    pub flags: String,
    pub ref_kind: RefKind,
    pub modifiers: usize,
    pub max_depth: u32,
    pub policy: DecodePolicy,
    pub json: bool,
}

impl DecodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            ty: parse_type_text(m),
            flags: m.get_one::<String>("flags").cloned().unwrap_or_default(),
            ref_kind: parse_ref_kind(m),
            modifiers: parse_modifiers(m),
            max_depth: parse_max_depth(m),
            policy: parse_policy(m),
            json: m.get_flag("json"),
        }
    }
}

impl From<DecodeParams> for DecodeArgs {
    fn from(p: DecodeParams) -> Self {
        Self {
            site: SiteInput {
                ty: p.ty,
                ref_kind: p.ref_kind,
                modifiers: p.modifiers,
                max_depth: p.max_depth,
            },
            flags: p.flags,
            policy: p.policy,
            json: p.json,
        }
    }
}

pub struct TraceParams {
    pub ty: String,
    pub flags: Option<String>,
    pub ref_kind: RefKind,
    pub modifiers: usize,
    pub max_depth: u32,
    pub policy: DecodePolicy,
    pub verbosity: Verbosity,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            ty: parse_type_text(m),
            flags: m.get_one::<String>("flags").cloned(),
            ref_kind: parse_ref_kind(m),
            modifiers: parse_modifiers(m),
            max_depth: parse_max_depth(m),
            policy: parse_policy(m),
            verbosity: parse_verbosity(m),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        Self {
            site: SiteInput {
                ty: p.ty,
                ref_kind: p.ref_kind,
                modifiers: p.modifiers,
                max_depth: p.max_depth,
            },
            flags: p.flags,
            policy: p.policy,
            verbosity: p.verbosity,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_type_text(m: &ArgMatches) -> String {
    m.get_one::<String>("type").cloned().unwrap_or_default()
}

fn parse_ref_kind(m: &ArgMatches) -> RefKind {
    m.get_one::<String>("ref")
        .and_then(|name| RefKind::from_name(name))
        .unwrap_or_default()
}

fn parse_modifiers(m: &ArgMatches) -> usize {
    m.get_one::<usize>("modifiers").copied().unwrap_or(0)
}

fn parse_max_depth(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("max_depth").copied().unwrap_or(512)
}

fn parse_policy(m: &ArgMatches) -> DecodePolicy {
    if m.get_flag("lenient") {
        DecodePolicy::Lenient
    } else {
        DecodePolicy::Strict
    }
}

fn parse_verbosity(m: &ArgMatches) -> Verbosity {
    match m.get_count("verbose") {
        0 => Verbosity::Default,
        _ => Verbosity::Verbose,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
