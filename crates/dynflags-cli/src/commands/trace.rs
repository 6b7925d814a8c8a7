//! Trace the slot walk of an encode or decode.

use std::io::Write;

use dynflags_codec::{DecodePolicy, DynamicFlagCodec, Marker, PrintTracer, Verbosity};
use dynflags_core::Colors;

use super::run_common::{SiteInput, fail, format_site, parse_marker};

pub struct TraceArgs {
    pub site: SiteInput,
    /// Decode these flags; encode when absent.
    pub flags: Option<String>,
    pub policy: DecodePolicy,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let colors = Colors::new(args.color);
    let tracer = PrintTracer::new(std::io::stdout().lock(), args.verbosity, colors);
    let mut codec = DynamicFlagCodec::new()
        .limits(args.site.limits())
        .policy(args.policy)
        .tracer(tracer);

    let summary = match &args.flags {
        None => {
            let site = args.site.load();
            codec
                .encode_site(&site)
                .map(|flags| Marker::from_flags(flags).to_string())
        }
        Some(flags) => {
            let skeleton = args.site.load_erased();
            let marker = match parse_marker(flags) {
                Ok(marker) => marker,
                Err(e) => fail(e),
            };
            codec
                .decode_site_marker(&skeleton, &marker)
                .map(|site| format_site(&site))
        }
    };

    let mut out = codec.into_tracer().into_inner();
    match summary {
        Ok(summary) => {
            let _ = writeln!(out, "{}---{}", colors.dim, colors.reset);
            let _ = writeln!(out, "{summary}");
        }
        Err(e) => {
            let _ = out.flush();
            fail(e);
        }
    }
}
