//! Runtime ModelInfo loading example
//!
//! Loads a model file given on the command line (XML or JSON, detected by
//! extension) and prints the interfaces and static fields of every type.
//!
//! ```text
//! cargo run -p textcast-model --example runtime_loading -- billing.xml
//! ```

use textcast_model::{collect_static_fields, list_interfaces, MetadataProvider, ModelRegistry};
use textcast_types::TypeDescriptor;

fn main() -> anyhow::Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        anyhow::bail!("usage: runtime_loading <model.xml|model.json>");
    };

    let registry = ModelRegistry::from_file(&path)?;
    println!(
        "Loaded {} v{} ({} types)",
        registry.model_name(),
        registry.model_version(),
        registry.type_names().len()
    );

    for name in registry.type_names() {
        let Some(descriptor) = registry.resolve_name(&name) else {
            continue;
        };

        let interfaces = list_interfaces(&registry, &descriptor)?;
        let interfaces: Vec<String> = interfaces.iter().map(ToString::to_string).collect();
        println!("\n{}", name);
        println!("  interfaces: [{}]", interfaces.join(", "));

        // Every static field, whatever its declared type
        let type_info = registry.get_type(&name);
        for field in type_info.iter().flat_map(|t| t.static_elements()) {
            let declared = registry.descriptor(&field.element_type)?;
            let matching = collect_static_fields(&registry, &descriptor, &declared)?;
            if let Some(found) = matching.iter().find(|f| f.name == field.name) {
                println!(
                    "  static {}: {} = {}",
                    found.name,
                    found.declared_type,
                    found.value.as_deref().unwrap_or("<none>")
                );
            }
        }
    }

    // Types can also be described without a model
    let adhoc: TypeDescriptor = "List<Int32?>".parse()?;
    println!("\nad-hoc descriptor: {} ({})", adhoc, adhoc.qualified_name());

    Ok(())
}
