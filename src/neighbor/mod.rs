pub mod cell_list;
pub mod neighbor_list;
pub mod update_settings;

pub use cell_list::{Cell, CellList};
pub use neighbor_list::{brute_force_pairs, NeighborList};
pub use update_settings::{RebuildTrigger, UpdateSettings};
