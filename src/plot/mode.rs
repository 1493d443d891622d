//! Naming conventions and mode resolution.
//!
//! ovn-kubernetes names its infrastructure switches and routers predictably.
//! When the mode is `auto`, the presence of a join switch decides whether those
//! conventions apply.

use log::debug;

use crate::config::{Filter, Mode};
use crate::topology::Switch;

/// Prefix shared by all join switches
pub const JOIN_PREFIX: &str = "join";
/// Name of the single cluster-wide join switch
pub const JOIN_SWITCH: &str = "join";
/// Prefix of external (gateway) switches
pub const EXT_PREFIX: &str = "ext_";
pub const NODE_LOCAL_SWITCH: &str = "node_local_switch";
/// The distributed router every node switch attaches to
pub const CLUSTER_ROUTER: &str = "ovn_cluster_router";

/// Layout levels seeded by the compact strategy
pub const OVN_KUBE_LEVELS: usize = 10;
pub const OVN_LEVELS: usize = 4;

/// A mode with `auto` already decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedMode {
    Ovn,
    OvnKubernetes,
}

impl ResolvedMode {
    /// Number of invisible level nodes the compact layout seeds
    pub fn levels(self) -> usize {
        match self {
            Self::Ovn => OVN_LEVELS,
            Self::OvnKubernetes => OVN_KUBE_LEVELS,
        }
    }
}

/// True for a join switch that should be plotted under `filter`
pub fn is_plotted_join_switch(name: &str, filter: &Filter) -> bool {
    name.starts_with(JOIN_PREFIX) && (name == JOIN_SWITCH || filter.is_match(name))
}

/// True for names reserved by the ovn-kubernetes conventions
pub fn is_reserved_switch(name: &str) -> bool {
    name.starts_with(JOIN_PREFIX) || name.starts_with(EXT_PREFIX) || name == NODE_LOCAL_SWITCH
}

/// Decide the effective mode from the switch listing
pub fn resolve_mode(mode: Mode, switches: &[Switch], filter: &Filter) -> ResolvedMode {
    let resolved = match mode {
        Mode::Ovn => ResolvedMode::Ovn,
        Mode::OvnKubernetes => ResolvedMode::OvnKubernetes,
        Mode::Auto => {
            if switches
                .iter()
                .any(|s| is_plotted_join_switch(&s.name, filter))
            {
                ResolvedMode::OvnKubernetes
            } else {
                ResolvedMode::Ovn
            }
        }
    };
    debug!("Resolved plot mode {:?} from {:?}", resolved, mode);
    resolved
}
