//! Bond resolution: turns per-atom bond intents into a deduplicated,
//! typed bond list.

mod resolver;

pub use resolver::{
    resolve_bonds, BondResolution, DanglingIntent, DanglingReason,
    ResolvedBond,
};
