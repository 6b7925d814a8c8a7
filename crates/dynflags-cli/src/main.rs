mod cli;
mod commands;

use cli::{DecodeParams, EncodeParams, TraceParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("encode", m)) => {
            let params = EncodeParams::from_matches(m);
            commands::encode::run(params.into());
        }
        Some(("decode", m)) => {
            let params = DecodeParams::from_matches(m);
            commands::decode::run(params.into());
        }
        Some(("trace", m)) => {
            let params = TraceParams::from_matches(m);
            commands::trace::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
