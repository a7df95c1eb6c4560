use std::path::PathBuf;

use console::style;
use crate::cli::commands::TemplatesArgs;
use crate::errors::ReportError;
use crate::templates::TemplateRegistry;

pub async fn handle_templates(args: TemplatesArgs) -> Result<(), ReportError> {
    let registry = TemplateRegistry::load(&PathBuf::from(&args.template_dir))?;

    for name in registry.display_names() {
        if let Some(template) = registry.by_display_name(&name) {
            println!(
                "{}  {} {}",
                style(&template.display_name).bold(),
                style(&template.config_name).dim(),
                style(format!(".{}", template.extension)).cyan(),
            );
        }
    }

    Ok(())
}
