use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::entities::{Bin, PackResult};
use crate::registry;
use crate::util::Amount;
use crate::{BinPacker, SplicingBinPacker};

/// Configuration of a [`BinPacker`]. Policies are referred to by their [`registry`] keys.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PackerConfig {
    /// Ordering of the pieces before packing
    pub piece_pre_order: String,
    /// Heuristic choosing the bin for each piece
    pub packing_policy: String,
    /// Ordering of the existing bins (by remaining capacity) before packing
    pub existing_bin_pre_order: String,
    /// Ordering in which catalogue capacities are tried for new bins
    pub capacity_pre_order: String,
    /// Seed for the `random` pre-order. If undefined, shuffling uses entropy
    pub prng_seed: Option<u64>,
    /// Split pieces larger than the largest catalogue capacity before packing
    pub splice_oversized: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            piece_pre_order: "descending".to_string(),
            packing_policy: "best_fit".to_string(),
            existing_bin_pre_order: "descending".to_string(),
            capacity_pre_order: "ascending".to_string(),
            prng_seed: None,
            splice_oversized: false,
        }
    }
}

impl PackerConfig {
    /// Reads a JSON config file. Fields missing from the file keep their default value.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("could not open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("incorrect config file format: {}", path.display()))
    }

    /// Packs with a packer built from this configuration, splicing oversized pieces if enabled.
    pub fn pack_all<A: Amount>(
        &self,
        pieces: Vec<A>,
        existing_bins: Vec<Bin<A>>,
        capacities: Vec<A>,
    ) -> crate::Result<PackResult<A>> {
        match self.splice_oversized {
            true => SplicingBinPacker::from_config(self)?.pack_all(pieces, existing_bins, capacities),
            false => BinPacker::from_config(self)?.pack_all(pieces, existing_bins, capacities),
        }
    }
}

impl<A: Amount> BinPacker<A> {
    pub fn from_config(config: &PackerConfig) -> crate::Result<Self> {
        let seed = config.prng_seed;
        Ok(Self {
            piece_pre_order: registry::pre_order_policy::<A>(&config.piece_pre_order, seed)?,
            packing_policy: registry::packing_policy::<A>(&config.packing_policy)?,
            existing_bin_pre_order: registry::pre_order_policy::<Bin<A>>(
                &config.existing_bin_pre_order,
                seed,
            )?,
            capacity_pre_order: registry::pre_order_policy::<A>(&config.capacity_pre_order, seed)?,
        })
    }
}

impl<A: Amount> SplicingBinPacker<A> {
    /// Builds a splicing packer regardless of `config.splice_oversized`.
    pub fn from_config(config: &PackerConfig) -> crate::Result<Self> {
        Ok(Self::new(BinPacker::from_config(config)?))
    }
}
