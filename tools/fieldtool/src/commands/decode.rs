use anyhow::{Context, Result};
use clap::Args;
use fieldtype::FieldTypeRegistry;

use super::lookup;

#[derive(Args)]
pub struct DecodeArgs {
    /// Field type name
    type_name: String,

    /// Encoded bytes as hex; must hold exactly one value
    hex: String,
}

impl DecodeArgs {
    pub fn run(self, registry: &FieldTypeRegistry) -> Result<()> {
        let ty = lookup(registry, &self.type_name)?;
        let bytes = hex::decode(self.hex.trim()).context("invalid hex input")?;
        let value = ty.decode_exact(&bytes)?;
        println!("{}", ty.to_parseable_string(&value)?);
        Ok(())
    }
}
