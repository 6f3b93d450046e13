use anyhow::Result;
use clap::Args;
use fieldtype::FieldTypeRegistry;

#[derive(Args)]
pub struct TypesArgs {
    /// Also show the encoding signature of each type
    #[arg(short, long)]
    signatures: bool,
}

impl TypesArgs {
    pub fn run(self, registry: &FieldTypeRegistry) -> Result<()> {
        for ty in registry.types() {
            if self.signatures {
                println!(
                    "{}\t{}\t{:#018x}",
                    ty.name(),
                    ty.shape(),
                    ty.encoding_signature()
                );
            } else {
                println!("{}\t{}", ty.name(), ty.shape());
            }
        }
        Ok(())
    }
}
