//! Domain commands and the static registry that lists them.
//!
//! Adding a uniform domain takes one [`DomainDef`] row below whose `build`
//! wraps the domain's validator.

use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;
use clusterval_adapters::{CrmClusterManager, PingProbe, SystemProcessRunner, TcpServiceProbe};
use clusterval_core::{
    application::{
        BmcValidator, ClusterManager, NetworkValidator, PacemakerValidator, ProcessRunner,
        ReachabilityProbe, SaltValidator, ServiceProbe, ServiceValidator, StorageValidator,
        Validator,
    },
    domain::RemoteShell,
    error::ValidationResult,
};

use crate::config::AppConfig;

pub mod pacemaker;
pub mod uniform;

pub use pacemaker::PacemakerCommand;
pub use uniform::UniformCommand;

/// The probes and runners every command is built from.
pub struct Adapters {
    pub runner: Arc<dyn ProcessRunner>,
    pub reachability: Arc<dyn ReachabilityProbe>,
    pub service: Arc<dyn ServiceProbe>,
    pub cluster: Arc<dyn ClusterManager>,
    pub shell: RemoteShell,
}

impl Adapters {
    /// Real system adapters configured from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let runner: Arc<dyn ProcessRunner> = Arc::new(SystemProcessRunner::new());
        Self::with_runner(runner, config)
    }

    /// Adapters that run every external program through `runner`.
    pub fn with_runner(runner: Arc<dyn ProcessRunner>, config: &AppConfig) -> Self {
        let probes = &config.probes;
        Self {
            reachability: Arc::new(PingProbe::new(
                runner.clone(),
                probes.ping_program.clone(),
                probes.ping_timeout_secs,
            )),
            service: Arc::new(TcpServiceProbe::new(Duration::from_millis(
                probes.connect_timeout_ms,
            ))),
            cluster: Arc::new(CrmClusterManager::new(runner.clone())),
            shell: RemoteShell::new(
                config.remote.ssh_program.clone(),
                config.remote.ssh_options.clone(),
            ),
            runner,
        }
    }
}

/// One registered domain.
#[derive(Debug, PartialEq)]
pub struct DomainDef {
    pub name: &'static str,
    pub about: &'static str,
    /// Synopsis lines, without brackets.
    pub usage: &'static [&'static str],
    pub build: fn(&Adapters) -> Command,
}

/// Every domain, in synopsis order.
pub static REGISTRY: &[DomainDef] = &[
    DomainDef {
        name: "network",
        about: "Check that addresses answer ping",
        usage: &["network connectivity <ip1> <ip2> <...>"],
        build: |a| Command::uniform("network", NetworkValidator::new(a.reachability.clone())),
    },
    DomainDef {
        name: "consul",
        about: "Check that a Consul endpoint accepts connections",
        usage: &["consul service <host> <port>"],
        build: |a| Command::uniform("consul", ServiceValidator::consul(a.service.clone())),
    },
    DomainDef {
        name: "storage",
        about: "Check that nodes see their storage LUNs",
        usage: &["storage luns <node1> <node2> <...>"],
        build: |a| {
            Command::uniform("storage", StorageValidator::new(a.runner.clone(), a.shell.clone()))
        },
    },
    DomainDef {
        name: "salt",
        about: "Check that salt minions respond",
        usage: &["salt minions <node1> <node2> <...>"],
        build: |a| Command::uniform("salt", SaltValidator::new(a.runner.clone())),
    },
    DomainDef {
        name: "bmc",
        about: "Check BMC reachability and credentials",
        usage: &[
            "bmc accessible <node1> <node2> <...>",
            "bmc stonith <node> <bmc_ip> <bmc_user> <bmc_passwd>",
        ],
        build: |a| {
            Command::uniform(
                "bmc",
                BmcValidator::new(
                    a.runner.clone(),
                    a.reachability.clone(),
                    a.shell.clone(),
                ),
            )
        },
    },
    DomainDef {
        name: "elasticsearch",
        about: "Check that an Elasticsearch endpoint accepts connections",
        usage: &["elasticsearch service <host> <port>"],
        build: |a| {
            Command::uniform("elasticsearch", ServiceValidator::elasticsearch(a.service.clone()))
        },
    },
    DomainDef {
        name: "pacemaker",
        about: "Check Pacemaker cluster health",
        usage: &["pacemaker corosync", "pacemaker stonith"],
        build: |a| {
            Command::Pacemaker(PacemakerCommand::new(PacemakerValidator::new(
                a.cluster.clone(),
            )))
        },
    },
];

/// Look a domain up by name.
pub fn find_domain(name: &str) -> Option<&'static DomainDef> {
    REGISTRY.iter().find(|def| def.name == name)
}

/// A command instance: registered, then bound, then processed.
pub enum Command {
    Uniform(UniformCommand),
    Pacemaker(PacemakerCommand),
}

impl Command {
    fn uniform(domain: &'static str, validator: impl Validator + 'static) -> Self {
        Self::Uniform(UniformCommand::new(domain, Box::new(validator)))
    }

    pub fn domain(&self) -> &'static str {
        match self {
            Self::Uniform(cmd) => cmd.domain(),
            Self::Pacemaker(_) => PacemakerCommand::DOMAIN,
        }
    }

    /// The subcommand this command contributes under the root parser.
    pub fn register(&self, def: &DomainDef) -> clap::Command {
        match self {
            Self::Uniform(cmd) => cmd.register(def),
            Self::Pacemaker(cmd) => cmd.register(def),
        }
    }

    /// Take the request out of this command's subcommand matches.
    pub fn bind(&mut self, matches: &ArgMatches) -> ValidationResult<()> {
        match self {
            Self::Uniform(cmd) => {
                cmd.bind(matches);
                Ok(())
            }
            Self::Pacemaker(cmd) => cmd.bind(matches),
        }
    }

    /// Run the bound request.
    pub fn process(&self) -> ValidationResult<()> {
        match self {
            Self::Uniform(cmd) => cmd.process(),
            Self::Pacemaker(cmd) => cmd.process(),
        }
    }
}
