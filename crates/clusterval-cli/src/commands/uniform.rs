//! Commands of the shape `<domain> <v_type> [arg ...]`.
//!
//! Each subtype is its own subcommand with no flags of its own, so once the
//! subtype is named every following token (`-h` included) belongs to the
//! check. Unknown subtypes are accepted here and rejected by the validator.

use clap::{Arg, ArgAction, ArgMatches};
use clusterval_core::{
    application::Validator,
    error::{ValidationError, ValidationResult},
};
use tracing::debug;

use super::DomainDef;

/// The parsed request: which check, against what.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ValidationRequest {
    v_type: String,
    args: Vec<String>,
}

pub struct UniformCommand {
    domain: &'static str,
    validator: Box<dyn Validator>,
    request: Option<ValidationRequest>,
}

impl UniformCommand {
    pub fn new(domain: &'static str, validator: Box<dyn Validator>) -> Self {
        Self {
            domain,
            validator,
            request: None,
        }
    }

    pub fn domain(&self) -> &'static str {
        self.domain
    }

    pub fn subtypes(&self) -> &'static [&'static str] {
        self.validator.subtypes()
    }

    pub fn register(&self, def: &DomainDef) -> clap::Command {
        clap::Command::new(self.domain)
            .about(def.about)
            .subcommand_required(true)
            .disable_help_subcommand(true)
            .allow_external_subcommands(true)
            .external_subcommand_value_parser(clap::value_parser!(String))
            .subcommands(self.subtypes().iter().map(|&v_type| {
                let synopsis = def
                    .usage
                    .iter()
                    .copied()
                    .find(|line| line.split_whitespace().nth(1) == Some(v_type))
                    .unwrap_or(v_type);
                clap::Command::new(v_type)
                    .about(synopsis)
                    .disable_help_flag(true)
                    .arg(
                        Arg::new("args")
                            .value_name("ARG")
                            .num_args(0..)
                            .action(ArgAction::Append)
                            .trailing_var_arg(true)
                            .allow_hyphen_values(true),
                    )
            }))
    }

    pub fn bind(&mut self, matches: &ArgMatches) {
        let (v_type, args) = match matches.subcommand() {
            Some((name, sub)) => {
                // Known subtypes store under "args", external ones under "".
                let id = if self.subtypes().contains(&name) { "args" } else { "" };
                let args: Vec<String> = sub
                    .try_get_many::<String>(id)
                    .ok()
                    .flatten()
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default();
                (name.to_owned(), args)
            }
            None => (String::new(), Vec::new()),
        };

        debug!(domain = self.domain, v_type, count = args.len(), "Bound request");
        self.request = Some(ValidationRequest { v_type, args });
    }

    pub fn process(&self) -> ValidationResult<()> {
        let request = self
            .request
            .as_ref()
            .ok_or_else(|| ValidationError::invalid_argument("No check selected"))?;
        self.validator.validate(&request.v_type, &request.args)
    }
}
