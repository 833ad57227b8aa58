//! Turns an argument vector into exactly one bound command.

use std::ffi::OsString;

use clap::error::ErrorKind;
use tracing::{debug, instrument};

use crate::cli::root_command;
use crate::commands::{Adapters, Command, DomainDef, REGISTRY, find_domain};
use crate::context::InvocationContext;
use crate::error::{CliError, CliResult};

pub struct CommandFactory<'a> {
    adapters: &'a Adapters,
    ctx: &'a InvocationContext,
}

impl<'a> CommandFactory<'a> {
    pub fn new(adapters: &'a Adapters, ctx: &'a InvocationContext) -> Self {
        Self { adapters, ctx }
    }

    /// Build every registered command, parse `argv` once and bind the one selected.
    ///
    /// `Ok(None)` means there is nothing to run: empty invocation, help or
    /// version output, or an unknown domain.
    #[instrument(skip_all)]
    pub fn get_command(&self, argv: &[OsString]) -> CliResult<Option<Command>> {
        if argv.len() <= 1 {
            return Ok(None);
        }

        let mut commands: Vec<Command> = REGISTRY
            .iter()
            .map(|def| (def.build)(self.adapters))
            .collect();

        let root = REGISTRY
            .iter()
            .zip(&commands)
            .fold(root_command(self.ctx), |root, (def, cmd)| {
                root.subcommand(cmd.register(def))
            });

        let matches = match root.try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(e) => return self.parse_failure(argv, &commands, e),
        };

        let Some((name, sub_matches)) = matches.subcommand() else {
            debug!("Only global flags given");
            return Ok(None);
        };

        let index = commands
            .iter()
            .position(|cmd| cmd.domain() == name)
            .ok_or_else(|| CliError::Internal {
                message: format!("parsed unregistered domain '{name}'"),
                source: None,
            })?;
        let mut command = commands.swap_remove(index);

        command.bind(sub_matches)?;
        debug!(domain = command.domain(), "Command bound");
        Ok(Some(command))
    }

    fn parse_failure(
        &self,
        argv: &[OsString],
        commands: &[Command],
        err: clap::Error,
    ) -> CliResult<Option<Command>> {
        match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|e| CliError::Internal {
                    message: "cannot print help".into(),
                    source: Some(Box::new(e)),
                })?;
                Ok(None)
            }
            _ => {
                let Some((index, def)) = named_domain(argv) else {
                    debug!(kind = ?err.kind(), "No registered domain named");
                    return Ok(None);
                };

                // Re-parse the domain's own tokens to tell its errors apart
                // from errors in the global flags before it.
                let domain_parses = commands
                    .iter()
                    .find(|cmd| cmd.domain() == def.name)
                    .is_some_and(|cmd| {
                        cmd.register(def)
                            .try_get_matches_from(&argv[index..])
                            .is_ok()
                    });

                if domain_parses {
                    Err(CliError::GlobalFlags { source: err })
                } else {
                    Err(CliError::Usage {
                        domain: def.name,
                        source: err,
                    })
                }
            }
        }
    }
}

/// Index of the token in the domain position, when it names a registered domain.
///
/// Global flags and the value of `-c`/`--config` are skipped; the first
/// other token is the only candidate.
fn named_domain(argv: &[OsString]) -> Option<(usize, &'static DomainDef)> {
    let mut tokens = argv.iter().enumerate().skip(1);
    while let Some((index, token)) = tokens.next() {
        let token = token.to_str()?;
        if token == "--" {
            return None;
        }
        if token.len() > 1 && token.starts_with('-') {
            let takes_value =
                token == "--config" || (!token.starts_with("--") && token.ends_with('c'));
            if takes_value {
                tokens.next();
            }
            continue;
        }
        return find_domain(token).map(|def| (index, def));
    }
    None
}
