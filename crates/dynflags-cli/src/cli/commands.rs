//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Add the signature-site args shared by every command.
fn with_site_args(cmd: Command) -> Command {
    cmd.arg(ref_arg())
        .arg(modifiers_arg())
        .arg(max_depth_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("dynflags")
        .about("Encode and decode dynamic transform flags of type expressions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(encode_command())
        .subcommand(decode_command())
        .subcommand(trace_command())
}

/// Compute the flags and marker for a type.
pub fn encode_command() -> Command {
    let cmd = Command::new("encode")
        .about("Compute the dynamic flags of a type")
        .override_usage("  dynflags encode <TYPE> [--ref <KIND>] [--modifiers <N>] [--json]")
        .after_help(
            r#"EXAMPLES:
  dynflags encode 'dynamic[]'                  # [false, true]
  dynflags encode 'dynamic' --ref ref          # [false, true]
  dynflags encode '(dynamic, object)' --json"#,
        )
        .arg(type_arg())
        .arg(json_arg());

    with_site_args(cmd)
}

/// Rebuild a type from its erased form and stored flags.
pub fn decode_command() -> Command {
    let cmd = Command::new("decode")
        .about("Apply stored flags to an erased type")
        .override_usage("  dynflags decode <TYPE> <FLAGS> [--lenient] [--ref <KIND>] [--json]")
        .after_help(
            r#"EXAMPLES:
  dynflags decode 'object[]' false,true        # dynamic[]
  dynflags decode object bare                  # dynamic
  dynflags decode 'List<int>' 0,1 --lenient    # List<int>

TYPE is erased before decoding: 'dynamic' in it reads as 'object'."#,
        )
        .arg(type_arg())
        .arg(flags_arg().required(true))
        .arg(lenient_arg())
        .arg(strict_arg())
        .arg(json_arg());

    with_site_args(cmd)
}

/// Print the slot walk of an encode or decode.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Show the slot walk of a type")
        .override_usage(
            "\
  dynflags trace <TYPE> [-v]
  dynflags trace <TYPE> <FLAGS> [--lenient]",
        )
        .after_help(
            r#"EXAMPLES:
  dynflags trace 'Outer<T>.Inner<int, dynamic>'     # encode walk
  dynflags trace 'object[]' false,true              # decode walk
  dynflags trace '(dynamic, int)' -v --color never"#,
        )
        .arg(type_arg())
        .arg(flags_arg())
        .arg(lenient_arg())
        .arg(strict_arg())
        .arg(verbose_arg())
        .arg(color_arg());

    with_site_args(cmd)
}
