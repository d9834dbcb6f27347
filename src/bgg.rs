mod client;
mod model;

pub use client::{BggClient, BggError, GameDataProvider};
#[cfg(test)]
pub(crate) use client::{MockCollectionOutcome, MockGameDataProvider};
pub use model::{CollectionItem, HotItem, PlayRecord};
