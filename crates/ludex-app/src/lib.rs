// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalog;
pub mod filter;
pub mod ids;
pub mod nav;
pub mod pills;
pub mod recovery;
pub mod sidebar;
pub mod state;
pub mod timer;

pub use catalog::*;
pub use filter::*;
pub use ids::*;
pub use nav::*;
pub use pills::*;
pub use recovery::*;
pub use sidebar::*;
pub use state::*;
pub use timer::*;
