//! `pacemaker <check>`: one nested subcommand per table row.

use clap::ArgMatches;
use clusterval_core::{
    application::PacemakerValidator,
    error::{ValidationError, ValidationResult},
};
use tracing::debug;

use super::DomainDef;

/// A named pacemaker check and the routine that performs it.
pub struct PacemakerCheck {
    pub name: &'static str,
    pub about: &'static str,
    pub run: fn(&PacemakerValidator) -> ValidationResult<()>,
}

pub static PACEMAKER_CHECKS: &[PacemakerCheck] = &[
    PacemakerCheck {
        name: "corosync",
        about: "Check that every node is a cluster member",
        run: PacemakerValidator::check_corosync,
    },
    PacemakerCheck {
        name: "stonith",
        about: "Check fencing coverage and state",
        run: PacemakerValidator::check_stonith,
    },
];

pub struct PacemakerCommand {
    validator: PacemakerValidator,
    selected: Option<&'static PacemakerCheck>,
}

impl PacemakerCommand {
    pub const DOMAIN: &'static str = "pacemaker";

    pub fn new(validator: PacemakerValidator) -> Self {
        Self {
            validator,
            selected: None,
        }
    }

    pub fn register(&self, def: &DomainDef) -> clap::Command {
        clap::Command::new(Self::DOMAIN)
            .about(def.about)
            .subcommand_required(true)
            .subcommands(
                PACEMAKER_CHECKS
                    .iter()
                    .map(|check| clap::Command::new(check.name).about(check.about)),
            )
    }

    pub fn bind(&mut self, matches: &ArgMatches) -> ValidationResult<()> {
        let name = matches.subcommand_name().unwrap_or_default();
        let check = PACEMAKER_CHECKS
            .iter()
            .find(|check| check.name == name)
            .ok_or_else(|| {
                ValidationError::invalid_argument(format!("Action parameter {name} not supported"))
            })?;

        debug!(check = check.name, "Bound pacemaker check");
        self.selected = Some(check);
        Ok(())
    }

    pub fn process(&self) -> ValidationResult<()> {
        let check = self
            .selected
            .ok_or_else(|| ValidationError::invalid_argument("No pacemaker check selected"))?;
        (check.run)(&self.validator)
    }
}
