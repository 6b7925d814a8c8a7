//! Compute the flags and marker form of a type.

use dynflags_codec::{DynamicFlagCodec, Marker, SignatureSite};
use serde::Serialize;

use super::run_common::{SiteInput, fail, format_flags, format_site};

pub struct EncodeArgs {
    pub site: SiteInput,
    pub json: bool,
}

#[derive(Serialize)]
struct EncodeOutput<'a> {
    notation: String,
    site: &'a SignatureSite,
    flags: &'a [bool],
    marker: &'a Marker,
}

pub fn run(args: EncodeArgs) {
    let site = args.site.load();
    let mut codec = DynamicFlagCodec::new().limits(args.site.limits());

    let flags = match codec.encode_site(&site) {
        Ok(flags) => flags,
        Err(e) => fail(e),
    };
    let marker = Marker::from_flags(flags.clone());

    if args.json {
        let output = EncodeOutput {
            notation: format_site(&site),
            site: &site,
            flags: &flags,
            marker: &marker,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        }
        return;
    }

    println!("flags:  {}", format_flags(&flags));
    println!("marker: {marker}");
}
