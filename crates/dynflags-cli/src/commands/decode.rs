//! Apply stored flags to an erased type.

use dynflags_codec::{DecodePolicy, DynamicFlagCodec, SignatureSite};
use serde::Serialize;

use super::run_common::{SiteInput, fail, format_site, parse_marker};

pub struct DecodeArgs {
    pub site: SiteInput,
    pub flags: String,
    pub policy: DecodePolicy,
    pub json: bool,
}

#[derive(Serialize)]
struct DecodeOutput<'a> {
    notation: String,
    site: &'a SignatureSite,
}

pub fn run(args: DecodeArgs) {
    let skeleton = args.site.load_erased();
    let marker = match parse_marker(&args.flags) {
        Ok(marker) => marker,
        Err(e) => fail(e),
    };

    let mut codec = DynamicFlagCodec::new()
        .limits(args.site.limits())
        .policy(args.policy);
    let site = match codec.decode_site_marker(&skeleton, &marker) {
        Ok(site) => site,
        Err(e) => fail(e),
    };

    if args.json {
        let output = DecodeOutput {
            notation: format_site(&site),
            site: &site,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        }
        return;
    }

    println!("{}", format_site(&site));
}
