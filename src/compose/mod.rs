//! Query composition: scoring strategies, per-entity profiles, and the
//! composer that assembles a request into one boolean query tree.

pub mod composer;
pub mod ops;
pub mod profile;

pub use self::composer::QueryComposer;
pub use self::profile::{EntityProfile, ProfileRegistry, Strategy, boost};
