//! Root command definition and the usage synopsis.
//!
//! This module only knows about the top level: program name, version,
//! global flags.  Domains attach their own subcommands through the
//! registry in [`crate::commands`].

use clap::Args;

use crate::commands::REGISTRY;
use crate::context::InvocationContext;

pub mod global;
pub use global::GlobalArgs;

const EXAMPLES: &str = "EXAMPLES:\n\
    \x20 clusterval network connectivity 10.0.0.11 10.0.0.12\n\
    \x20 clusterval consul service localhost 8500\n\
    \x20 clusterval -v bmc accessible srvnode-1 srvnode-2\n\
    \x20 clusterval pacemaker stonith";

/// The root parser with global flags and no domains yet.
pub fn root_command(ctx: &InvocationContext) -> clap::Command {
    let root = clap::Command::new(ctx.prog_name().to_owned())
        .bin_name(ctx.prog_name().to_owned())
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Pre-flight validation of cluster node prerequisites")
        .after_help(EXAMPLES)
        .disable_help_subcommand(true);
    GlobalArgs::augment_args(root)
}

/// One bracketed line per accepted invocation, in registry order.
pub fn synopsis(ctx: &InvocationContext) -> String {
    let mut out = format!("usage: {}\n\t[-h]\n", ctx.prog_name());
    for line in REGISTRY.iter().flat_map(|def| def.usage.iter()) {
        out.push_str(&format!("\t[{line}]\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_structure_is_valid() {
        root_command(&InvocationContext::default()).debug_assert();
    }

    #[test]
    fn version_matches_cargo() {
        let cmd = root_command(&InvocationContext::default());
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn synopsis_lists_every_invocation() {
        let text = synopsis(&InvocationContext::new("clusterval"));
        let expected = "usage: clusterval\n\
            \t[-h]\n\
            \t[network connectivity <ip1> <ip2> <...>]\n\
            \t[consul service <host> <port>]\n\
            \t[storage luns <node1> <node2> <...>]\n\
            \t[salt minions <node1> <node2> <...>]\n\
            \t[bmc accessible <node1> <node2> <...>]\n\
            \t[bmc stonith <node> <bmc_ip> <bmc_user> <bmc_passwd>]\n\
            \t[elasticsearch service <host> <port>]\n\
            \t[pacemaker corosync]\n\
            \t[pacemaker stonith]\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn synopsis_uses_context_name() {
        assert!(synopsis(&InvocationContext::new("cv")).starts_with("usage: cv\n"));
    }
}
